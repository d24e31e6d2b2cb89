// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TargetAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TargetAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TargetAccounts::BakeryName).string().not_null())
                    .col(
                        ColumnDef::new(TargetAccounts::InstagramId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TargetAccounts::Category).string())
                    .col(ColumnDef::new(TargetAccounts::ShoppingMallUrl).string())
                    .col(
                        ColumnDef::new(TargetAccounts::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(TargetAccounts::LastScrapedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(TargetAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_target_accounts_last_scraped_at")
                    .table(TargetAccounts::Table)
                    .col(TargetAccounts::LastScrapedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TargetAccounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TargetAccounts {
    Table,
    Id,
    BakeryName,
    InstagramId,
    Category,
    ShoppingMallUrl,
    Status,
    LastScrapedAt,
    CreatedAt,
}
