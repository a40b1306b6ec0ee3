// Domain entities
pub mod detection;
pub mod runtime_config;
pub mod time_series;

pub use detection::*;
pub use runtime_config::*;
pub use time_series::*;
