pub mod config;
pub mod error;
pub mod logging;

pub use config::LorebookConfig;
pub use error::{LorebookError, Result};
