pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    analytics_service::AnalyticsService, application_service::ApplicationService,
    company_service::CompanyService, posting_service::PostingService,
    screening_service::ScreeningService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub posting_service: PostingService,
    pub application_service: ApplicationService,
    pub screening_service: ScreeningService,
    pub analytics_service: AnalyticsService,
    pub company_service: CompanyService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let posting_service = PostingService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let screening_service = ScreeningService::new(pool.clone());
        let analytics_service = AnalyticsService::new(pool.clone());
        let company_service = CompanyService::new(pool.clone());

        Self {
            pool,
            posting_service,
            application_service,
            screening_service,
            analytics_service,
            company_service,
        }
    }
}
