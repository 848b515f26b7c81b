pub mod convert;
mod document;
pub mod error;
pub mod format;
pub mod inject;
pub mod label;
pub mod renderer;
mod verse;

pub use convert::{CmarkConverter, HtmlConverter, to_fragment};
pub use error::ConvertError;
pub use format::{MAX_HEADING_DEPTH, OutputFormat};
pub use inject::inject_labels;
pub use label::{LabelFn, LabelMap};
pub use renderer::{RenderOptions, Renderer, render_html, render_markdown};
