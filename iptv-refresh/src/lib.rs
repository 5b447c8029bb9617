mod app_state;
mod config;
pub use app_state::*;
pub use config::*;
pub mod errors;
pub mod pipeline;
pub mod routes;
pub use errors::RefreshError;
