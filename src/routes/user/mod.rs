pub mod get;
pub mod profile;
