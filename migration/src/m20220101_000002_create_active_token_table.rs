use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActiveToken::Table)
                    .col(
                        ColumnDef::new(ActiveToken::TokenHash)
                            .string()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(ActiveToken::UserId)
                            .big_integer()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(ActiveToken::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_active_tokens_user_id")
                            .from(ActiveToken::Table, ActiveToken::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade)
                    )
                    .to_owned()
            )
            .await?;

        // the expiry sweep deletes by this column
        manager
            .create_index(
                Index::create()
                    .name("idx_active_tokens_expires_at")
                    .table(ActiveToken::Table)
                    .col(ActiveToken::ExpiresAt)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ActiveToken::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ActiveToken {
    #[sea_orm(iden = "active_tokens")]
    Table,
    TokenHash,
    UserId,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
