pub mod context;
pub mod lifecycle;
pub mod reporter;

pub use lifecycle::{run, run_context, run_pipeline};
pub use reporter::Reporter;
