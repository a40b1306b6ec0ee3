pub mod csv_series;

pub use csv_series::*;
