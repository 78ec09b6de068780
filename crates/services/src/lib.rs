#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod authoring_service;
pub mod dashboard_service;
pub mod error;
pub mod essay_service;
pub mod quiz_service;

pub use atheno_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthService, SignUpForm};
pub use authoring_service::AuthoringService;
pub use dashboard_service::{DashboardService, QuizReport, StudentProgress};
pub use error::{
    AppServicesError, AuthError, AuthoringError, DashboardError, EssayServiceError,
    QuizServiceError,
};
pub use essay_service::EssayWritingService;
pub use quiz_service::QuizTakingService;
