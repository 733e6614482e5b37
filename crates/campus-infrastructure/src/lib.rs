//! Infrastructure layer: HTTP transport, configuration and session storage.

pub mod api_client;
pub mod config_loader;
pub mod paths;
pub mod session_store;

pub use crate::api_client::ApiClient;
pub use crate::config_loader::ConfigLoader;
pub use crate::paths::CampusPaths;
pub use crate::session_store::{InMemorySessionStore, JsonSessionStore};
