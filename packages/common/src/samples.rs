//! Bundled sample pages, used to seed new projects

use crate::document::PageDocument;
use crate::error::CommonError;
use crate::result::CommonResult;

const SAMPLES: [(&str, &str); 2] = [
    ("auto-gallery", include_str!("../samples/auto-gallery.json")),
    ("dental-clinic", include_str!("../samples/dental-clinic.json")),
];

/// Names of all bundled samples
pub fn names() -> impl Iterator<Item = &'static str> {
    SAMPLES.iter().map(|(name, _)| *name)
}

/// Parse a bundled sample by name
pub fn load(name: &str) -> CommonResult<PageDocument> {
    let (_, source) = SAMPLES
        .iter()
        .find(|(sample, _)| *sample == name)
        .ok_or_else(|| CommonError::UnknownSample(name.to_string()))?;

    Ok(serde_json::from_str(source)?)
}
