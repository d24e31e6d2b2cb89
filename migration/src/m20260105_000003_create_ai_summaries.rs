// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20260105_000002_create_target_accounts::TargetAccounts;

/// AI 摘要表迁移
///
/// 摘要随所属账号一并删除（级联）
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiSummaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiSummaries::TargetAccountId).uuid().not_null())
                    .col(ColumnDef::new(AiSummaries::Summary).json())
                    .col(
                        ColumnDef::new(AiSummaries::Status)
                            .string_len(20)
                            .not_null()
                            .default("success"),
                    )
                    .col(
                        ColumnDef::new(AiSummaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Inline so SQLite gets the constraint too
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_summaries_target_account")
                            .from(AiSummaries::Table, AiSummaries::TargetAccountId)
                            .to(TargetAccounts::Table, TargetAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_summaries_status_created_at")
                    .table(AiSummaries::Table)
                    .col(AiSummaries::Status)
                    .col(AiSummaries::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiSummaries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiSummaries {
    Table,
    Id,
    TargetAccountId,
    Summary,
    Status,
    CreatedAt,
}
