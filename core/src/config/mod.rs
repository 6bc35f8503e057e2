mod load;
mod types;

pub use load::{get_finora_data_dir, load_default, load_from_path, API_URL_ENV};
pub use types::{ApiConfig, AppConfig, LoggingConfig, SessionStoreConfig};
