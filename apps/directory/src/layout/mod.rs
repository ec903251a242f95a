// Layout primitives for the directory document: font metrics, greedy word
// wrap, page geometry and the render cursor. Synchronous; the renderer in
// `crate::render` drives it.

pub mod font_metrics;
pub mod page;
pub mod wrap;

pub use page::{default_page_config, PageConfig};
