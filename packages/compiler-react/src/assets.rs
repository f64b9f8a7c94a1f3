//! # Inline Image Extraction
//!
//! Block properties may hold images embedded as data URLs
//! (`data:image/png;base64,...`). Generated code must not carry them, so each
//! distinct value becomes one file under the image directory and every
//! occurrence is rewritten to that file's public path.
//!
//! Filenames derive from a CRC-32 of the full inline value, so re-exporting
//! the same page names its images the same way.

use crate::warnings::ExportWarning;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pagecraft_common::visitor::walk_props_mut;
use pagecraft_common::{PropPath, PropVisitorMut, Props};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const INLINE_IMAGE_PREFIX: &str = "data:image";

const FALLBACK_EXTENSION: &str = "png";

pub fn is_inline_image(value: &str) -> bool {
    value.starts_with(INLINE_IMAGE_PREFIX)
}

/// An extracted image file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAsset {
    /// Path relative to the output root, e.g. `images/img-1a2b3c4d.png`
    pub filename: String,
    /// Decoded file contents
    pub data: Vec<u8>,
}

/// `data:image/<subtype>[;param]*[;base64],<payload>`
#[derive(Debug, PartialEq, Eq)]
struct InlineImage<'a> {
    subtype: &'a str,
    is_base64: bool,
    /// `None` when the value has no `,` separator
    payload: Option<&'a str>,
}

impl<'a> InlineImage<'a> {
    fn parse(value: &'a str) -> Self {
        let rest = value.strip_prefix("data:").unwrap_or(value);
        let (header, payload) = match rest.split_once(',') {
            Some((header, payload)) => (header, Some(payload)),
            None => (rest, None),
        };

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default();
        let is_base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));

        Self {
            subtype: media_type.strip_prefix("image/").unwrap_or_default(),
            is_base64,
            payload,
        }
    }

    /// File extension for the declared media type
    fn extension(&self) -> Option<String> {
        let subtype = self.subtype.to_ascii_lowercase();

        match subtype.as_str() {
            "svg+xml" => Some("svg".to_string()),
            "x-icon" | "vnd.microsoft.icon" => Some("ico".to_string()),
            "" => None,
            other if other.chars().all(|c| c.is_ascii_alphanumeric()) => Some(other.to_string()),
            _ => None,
        }
    }
}

/// Rewrites inline images in property trees and gathers the extracted files
pub struct AssetCollector {
    image_dir: String,
    /// Inline value → public reference
    references: HashMap<String, String>,
    filenames: HashSet<String>,
    assets: Vec<ImageAsset>,
    warnings: Vec<ExportWarning>,
    block_id: String,
}

impl AssetCollector {
    pub fn new(image_dir: &str) -> Self {
        Self {
            image_dir: image_dir.trim_matches('/').to_string(),
            references: HashMap::new(),
            filenames: HashSet::new(),
            assets: Vec::new(),
            warnings: Vec::new(),
            block_id: String::new(),
        }
    }

    /// Replace every inline image in `props` with its public path
    pub fn collect_block(&mut self, block_id: &str, props: &mut Props) {
        self.block_id = block_id.to_string();
        walk_props_mut(self, props);
    }

    /// Warnings raised since the last call
    pub fn take_warnings(&mut self) -> Vec<ExportWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn into_assets(self) -> Vec<ImageAsset> {
        self.assets
    }

    fn reference_for(&mut self, path: &PropPath, value: &str) -> String {
        if let Some(reference) = self.references.get(value) {
            return reference.clone();
        }

        let image = InlineImage::parse(value);

        let extension = image.extension().unwrap_or_else(|| {
            self.warn(path, format!("unrecognized media type `image/{}`", image.subtype));
            FALLBACK_EXTENSION.to_string()
        });

        let data = match image.payload {
            Some(payload) => self.decode_payload(path, payload.trim(), image.is_base64),
            None => {
                self.warn(path, "missing `,` before the payload".to_string());
                Vec::new()
            }
        };

        let filename = self.unique_filename(value, &extension);
        let relative = self.in_image_dir(&filename);
        let reference = format!("/{}", relative);

        debug!(block_id = %self.block_id, path = %path, file = %relative, bytes = data.len(), "Extracted inline image");

        self.references.insert(value.to_string(), reference.clone());
        self.assets.push(ImageAsset {
            filename: relative,
            data,
        });

        reference
    }

    /// Payloads are URL-escaped, and base64 on top of that when flagged
    fn decode_payload(&mut self, path: &PropPath, payload: &str, is_base64: bool) -> Vec<u8> {
        let bytes = urlencoding::decode_binary(payload.as_bytes());

        if !is_base64 {
            return bytes.into_owned();
        }

        STANDARD.decode(&bytes).unwrap_or_else(|err| {
            self.warn(path, format!("invalid base64 payload ({})", err));
            bytes.into_owned()
        })
    }

    fn unique_filename(&mut self, value: &str, extension: &str) -> String {
        let stem = format!("img-{:08x}", crc32fast::hash(value.as_bytes()));

        let mut filename = format!("{}.{}", stem, extension);
        let mut n = 1;
        while self.filenames.contains(&filename) {
            filename = format!("{}-{}.{}", stem, n, extension);
            n += 1;
        }

        self.filenames.insert(filename.clone());
        filename
    }

    fn in_image_dir(&self, filename: &str) -> String {
        if self.image_dir.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", self.image_dir, filename)
        }
    }

    fn warn(&mut self, path: &PropPath, reason: String) {
        self.warnings.push(ExportWarning::UnparsableInlineImage {
            block_id: self.block_id.clone(),
            path: path.to_string(),
            reason,
        });
    }
}

impl PropVisitorMut for AssetCollector {
    fn visit_string_mut(&mut self, path: &PropPath, value: &mut String) {
        if is_inline_image(value) {
            *value = self.reference_for(path, value);
        }
    }
}
