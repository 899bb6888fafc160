//! Presentation layer: pure mappings from study state to display models.
//!
//! Nothing here mutates state; front ends call the services directly and
//! re-map after every change.

pub mod text;
pub mod vm;

pub use text::render_markdown;
