#![forbid(unsafe_code)]

pub mod config;
pub mod demo;
pub mod error;
pub mod gateway;
pub mod http;
pub mod identity;
pub mod memory;

pub use config::{ApiConfig, ConfigError, FirebaseConfig};
pub use error::ApiError;
pub use gateway::{
    AccountGateway, AnalyticsGateway, Backend, DashboardGateway, EssayGateway, QuizGateway,
    Registration,
};
pub use http::HttpBackend;
pub use identity::{
    FirebaseIdentity, IdentityError, IdentityProvider, IdentitySession, LocalIdentity,
    StaticToken, TokenSource,
};
pub use memory::InMemoryBackend;
