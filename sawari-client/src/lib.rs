pub mod app_config;
pub mod envelope;
pub mod http;
pub mod session;

pub use app_config::{ApiConfig, Config};
pub use envelope::ApiEnvelope;
pub use http::ApiClient;
pub use session::Session;
