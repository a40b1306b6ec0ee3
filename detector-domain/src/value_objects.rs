// Domain value objects
pub mod granularity;
pub mod row_policy;
pub mod sensitivity;

pub use granularity::*;
pub use row_policy::*;
pub use sensitivity::*;
