pub mod format;
pub mod test_utils;

pub use format::{format_amount, format_time_12h};
