pub mod filter;

pub use filter::{filter_rows, validate_filters, Bounds, FilterConfig};
