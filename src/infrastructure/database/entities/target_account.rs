// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::sea_orm_active_enums::SeaAccountStatus;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "target_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bakery_name: String,
    #[sea_orm(unique)]
    pub instagram_id: String,
    pub category: Option<String>,
    pub shopping_mall_url: Option<String>,
    pub status: SeaAccountStatus,
    pub last_scraped_at: Option<ChronoDateTimeWithTimeZone>,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ai_summary::Entity")]
    AiSummary,
}

impl Related<super::ai_summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiSummary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
