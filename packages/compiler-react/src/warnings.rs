use serde::Serialize;
use thiserror::Error;

/// Non-fatal conditions hit while exporting a page.
///
/// The export always completes; each warning names the block it concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ExportWarning {
    #[error("Block {block_id} has unknown type `{block_type}` and was not exported")]
    UnknownBlockType { block_id: String, block_type: String },

    #[error("Inline image at {block_id}.{path} could not be parsed: {reason}")]
    UnparsableInlineImage {
        block_id: String,
        path: String,
        reason: String,
    },
}

impl ExportWarning {
    pub fn block_id(&self) -> &str {
        match self {
            ExportWarning::UnknownBlockType { block_id, .. } => block_id,
            ExportWarning::UnparsableInlineImage { block_id, .. } => block_id,
        }
    }
}
