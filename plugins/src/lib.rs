pub mod factory;
pub mod http_client;
pub mod persist;
pub mod services;

pub use http_client::HttpClient;
pub use persist::{FileSessionStore, MemorySessionStore};
pub use services::FinoraServices;
