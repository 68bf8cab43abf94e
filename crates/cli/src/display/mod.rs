pub mod formatter;

pub use formatter::{format_descriptor, format_migration};
