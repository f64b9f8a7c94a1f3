//! # Pagecraft Common
//!
//! Schema shared by the editor, the exporter and the hosts: block types,
//! the page document, the block registry, id generation and property-tree
//! traversal.

pub mod block_type;
pub mod document;
pub mod error;
pub mod filesystem;
pub mod id_generator;
pub mod registry;
pub mod result;
pub mod samples;
pub mod visitor;

pub use block_type::BlockType;
pub use document::{Block, BlockKind, PageDocument, PageMeta, PageTheme, Props, RESERVED_KEYS};
pub use error::CommonError;
pub use filesystem::{FileSystem, MockFileSystem, RealFileSystem};
pub use id_generator::IdGenerator;
pub use registry::{Category, RegistryEntry};
pub use result::CommonResult;
pub use visitor::{PathSegment, PropPath, PropVisitor, PropVisitorMut};
