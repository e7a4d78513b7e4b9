pub mod config;
pub mod ingest;
pub mod models;
pub mod prompt;
pub mod ranking;
pub mod report;
pub mod resolver;
pub mod session;
pub mod vocabulary;

pub use config::AppConfig;
pub use session::run_session;
