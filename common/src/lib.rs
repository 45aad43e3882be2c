pub mod config;
pub mod error;
pub mod network;

pub use config::KnockConfig;
pub use error::KnockError;
