// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// AI 摘要实体，`summary` 保存外部任务写入的原始 JSON
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_summaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub target_account_id: Uuid,
    pub summary: Option<Json>,
    pub status: String,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::target_account::Entity",
        from = "Column::TargetAccountId",
        to = "super::target_account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TargetAccount,
}

impl Related<super::target_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
