pub mod config;
pub mod dtos;
pub mod repositories;
pub mod services;

pub use config::*;
pub use repositories::*;
pub use services::*;
