pub mod config;
pub mod error;
pub mod traits;

pub use config::{CacheConfig, IterationConfig, Tolerance};
pub use error::{NumanError, Result};
