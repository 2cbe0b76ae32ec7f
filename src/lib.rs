//! Exports the shared styles of a Figma file (fill colors, text styles,
//! drop shadows) as JSON theme files grouped by category.

pub mod config;
pub mod figma;
pub mod pipeline;
pub mod theme;
pub mod transform;

pub use config::Config;
pub use pipeline::{run, ExportError, RunSummary};
