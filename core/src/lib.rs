pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod test_support;
