pub mod block;
pub mod compile;
pub mod init;
pub mod meta;
pub mod registry;

pub use block::{block, BlockArgs};
pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use meta::{meta, MetaArgs};
pub use registry::{registry, RegistryArgs};
