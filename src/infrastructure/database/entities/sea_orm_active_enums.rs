// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::target_account::AccountStatus;
use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(20))",
    enum_name = "account_status"
)]
pub enum SeaAccountStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "syncing")]
    Syncing,
    #[sea_orm(string_value = "paused")]
    Paused,
}

impl From<AccountStatus> for SeaAccountStatus {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Active => SeaAccountStatus::Active,
            AccountStatus::Syncing => SeaAccountStatus::Syncing,
            AccountStatus::Paused => SeaAccountStatus::Paused,
        }
    }
}

impl From<SeaAccountStatus> for AccountStatus {
    fn from(status: SeaAccountStatus) -> Self {
        match status {
            SeaAccountStatus::Active => AccountStatus::Active,
            SeaAccountStatus::Syncing => AccountStatus::Syncing,
            SeaAccountStatus::Paused => AccountStatus::Paused,
        }
    }
}
