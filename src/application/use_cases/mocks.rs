// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_status::CrawlFlag;
use crate::domain::models::summary::SummaryRecord;
use crate::domain::models::target_account::TargetAccount;
use crate::domain::repositories::crawl_status_repository::CrawlStatusRepository;
use crate::domain::repositories::summary_repository::{SummaryQuery, SummaryRepository};
use crate::domain::repositories::target_account_repository::TargetAccountRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::job_dispatcher::{DispatchError, JobDispatcher};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

mock! {
    pub CrawlStatusRepo {}
    #[async_trait]
    impl CrawlStatusRepository for CrawlStatusRepo {
        async fn current(&self) -> Result<Option<CrawlFlag>, RepositoryError>;
        async fn try_acquire(&self) -> Result<bool, RepositoryError>;
        async fn release(&self) -> Result<(), RepositoryError>;
        async fn release_if_stale(&self, max_age: chrono::Duration) -> Result<bool, RepositoryError>;
    }
}

mock! {
    pub TargetAccountRepo {}
    #[async_trait]
    impl TargetAccountRepository for TargetAccountRepo {
        async fn list(&self) -> Result<Vec<TargetAccount>, RepositoryError>;
        async fn find_by_id(&self, id: Uuid) -> Result<Option<TargetAccount>, RepositoryError>;
        async fn create(&self, account: &TargetAccount) -> Result<TargetAccount, RepositoryError>;
        async fn update(&self, account: &TargetAccount) -> Result<TargetAccount, RepositoryError>;
        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
        async fn latest_scraped_at(&self) -> Result<Option<DateTime<Utc>>, RepositoryError>;
        async fn reset_syncing(&self) -> Result<u64, RepositoryError>;
    }
}

mock! {
    pub SummaryRepo {}
    #[async_trait]
    impl SummaryRepository for SummaryRepo {
        async fn list_recent(&self, query: SummaryQuery) -> Result<Vec<SummaryRecord>, RepositoryError>;
    }
}

mock! {
    pub Dispatcher {}
    #[async_trait]
    impl JobDispatcher for Dispatcher {
        fn is_configured(&self) -> bool;
        async fn dispatch(&self) -> Result<(), DispatchError>;
    }
}
