// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 全局爬取状态表迁移
///
/// 创建 `system_status` 单行表，并写入固定主键 `global` 的初始记录
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemStatus::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemStatus::IsCrawling)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SystemStatus::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the singleton row
        let seed = Query::insert()
            .into_table(SystemStatus::Table)
            .columns([SystemStatus::Id, SystemStatus::IsCrawling])
            .values_panic(["global".into(), false.into()])
            .to_owned();

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SystemStatus {
    Table,
    Id,
    IsCrawling,
    UpdatedAt,
}
