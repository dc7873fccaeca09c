pub mod analytics_service;
pub mod application_service;
pub mod classifier_service;
pub mod company_service;
pub mod posting_service;
pub mod screening_service;
