//! # Pagecraft React Compiler
//!
//! Turns a page document into a single React page module plus the image
//! files that were embedded inline in block properties.

mod assets;
mod compiler;
mod components;
mod context;
mod props;
mod warnings;

pub use assets::{is_inline_image, ImageAsset, INLINE_IMAGE_PREFIX};
pub use compiler::{compile_page, GeneratedPage};
pub use components::{component_for, ComponentRef};
pub use context::{CompileOptions, CompilerContext};
pub use warnings::ExportWarning;
