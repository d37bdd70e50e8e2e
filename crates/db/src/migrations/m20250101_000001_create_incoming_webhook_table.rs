//! Create incoming webhook table.

use crate::entities::incoming_webhook::{
    MAX_DESCRIPTION_LENGTH, MAX_DISPLAY_NAME_LENGTH, MAX_ICON_URL_LENGTH, MAX_USERNAME_LENGTH,
};
use sea_orm_migration::prelude::*;

const ID_LENGTH: u32 = 26;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_table()).await?;

        for index in create_indexes() {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncomingWebhook::Table).to_owned())
            .await
    }
}

#[allow(clippy::cast_possible_truncation)]
fn text_column(column: IncomingWebhook, max: u64) -> ColumnDef {
    ColumnDef::new(column)
        .string_len(max as u32)
        .not_null()
        .default("")
        .to_owned()
}

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(IncomingWebhook::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(IncomingWebhook::Id)
                .string_len(ID_LENGTH)
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(IncomingWebhook::CreateAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(IncomingWebhook::UpdateAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(IncomingWebhook::UserId)
                .string_len(ID_LENGTH)
                .not_null(),
        )
        .col(
            ColumnDef::new(IncomingWebhook::ChannelId)
                .string_len(ID_LENGTH)
                .not_null(),
        )
        .col(
            ColumnDef::new(IncomingWebhook::TeamId)
                .string_len(ID_LENGTH)
                .not_null(),
        )
        // Widths match the limits enforced by `Model::validate`.
        .col(text_column(
            IncomingWebhook::DisplayName,
            MAX_DISPLAY_NAME_LENGTH,
        ))
        .col(text_column(
            IncomingWebhook::Description,
            MAX_DESCRIPTION_LENGTH,
        ))
        .col(text_column(IncomingWebhook::Username, MAX_USERNAME_LENGTH))
        .col(text_column(IncomingWebhook::IconUrl, MAX_ICON_URL_LENGTH))
        .to_owned()
}

fn create_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx_incoming_webhook_team_id")
            .table(IncomingWebhook::Table)
            .col(IncomingWebhook::TeamId)
            .to_owned(),
        Index::create()
            .name("idx_incoming_webhook_channel_id")
            .table(IncomingWebhook::Table)
            .col(IncomingWebhook::ChannelId)
            .to_owned(),
    ]
}

#[derive(Iden)]
pub enum IncomingWebhook {
    Table,
    Id,
    CreateAt,
    UpdateAt,
    UserId,
    ChannelId,
    TeamId,
    DisplayName,
    Description,
    Username,
    IconUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_column_widths_follow_validation_limits() {
        let sql = create_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "incoming_webhook""#));
        assert!(sql.contains(r#""id" varchar(26)"#));
        assert!(sql.contains(r#""create_at" bigint"#));
        assert!(sql.contains(r#""update_at" bigint"#));
        for (column, max) in [
            ("display_name", MAX_DISPLAY_NAME_LENGTH),
            ("description", MAX_DESCRIPTION_LENGTH),
            ("username", MAX_USERNAME_LENGTH),
            ("icon_url", MAX_ICON_URL_LENGTH),
        ] {
            let expected = format!(r#""{column}" varchar({max})"#);
            assert!(sql.contains(&expected), "missing {expected} in {sql}");
        }
    }

    #[test]
    fn test_lookup_indexes() {
        let sql: Vec<String> = create_indexes()
            .iter()
            .map(|index| index.to_string(PostgresQueryBuilder))
            .collect();

        assert_eq!(sql.len(), 2);
        assert!(sql[0].contains(r#""idx_incoming_webhook_team_id" ON "incoming_webhook" ("team_id")"#));
        assert!(sql[1].contains(
            r#""idx_incoming_webhook_channel_id" ON "incoming_webhook" ("channel_id")"#
        ));
    }
}
