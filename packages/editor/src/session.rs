//! # Editor Session
//!
//! Transient, per-user view state that sits next to the document but is
//! never persisted: selection, preview toggle, drag state and the
//! simulated viewport.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simulated device width for the canvas (display only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Viewport {
    pub const ALL: [Viewport; 3] = [Viewport::Mobile, Viewport::Tablet, Viewport::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Mobile => "mobile",
            Viewport::Tablet => "tablet",
            Viewport::Desktop => "desktop",
        }
    }

    /// Canvas width cap in pixels, `None` for full width
    pub fn max_width(&self) -> Option<u32> {
        match self {
            Viewport::Mobile => Some(384),
            Viewport::Tablet => Some(672),
            Viewport::Desktop => None,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Viewport::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("Invalid viewport: {}. Use: mobile, tablet, or desktop", s))
    }
}

/// View state of one editing session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    /// At most one selected block; always present in the document when set
    pub selected_block_id: Option<String>,

    /// Editing affordances are suppressed while previewing
    pub is_preview_mode: bool,

    /// A drag gesture is in flight
    pub is_dragging: bool,

    pub viewport: Viewport,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, block_id: &str) -> bool {
        self.selected_block_id.as_deref() == Some(block_id)
    }

    pub fn clear_selection(&mut self) {
        self.selected_block_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let session = EditorSession::new();
        assert_eq!(session.selected_block_id, None);
        assert!(!session.is_preview_mode);
        assert!(!session.is_dragging);
        assert_eq!(session.viewport, Viewport::Desktop);
    }

    #[test]
    fn test_viewport_parse() {
        assert_eq!("tablet".parse::<Viewport>().unwrap(), Viewport::Tablet);
        assert!("watch".parse::<Viewport>().is_err());
        assert_eq!(Viewport::Mobile.max_width(), Some(384));
        assert_eq!(Viewport::Desktop.max_width(), None);
    }
}
