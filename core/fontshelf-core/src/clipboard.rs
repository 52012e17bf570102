//! Clipboard seam with a show-the-text fallback

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use log::warn;

use crate::notice::Notice;

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard for environments that have none; every write fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(anyhow!("no clipboard available"))
    }
}

/// Keeps the last written text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| anyhow!("clipboard poisoned"))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(Notice),
    /// The caller should show `text` so it can be copied by hand.
    Fallback { text: String, notice: Notice },
}

impl CopyOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            CopyOutcome::Copied(notice) => notice,
            CopyOutcome::Fallback { notice, .. } => notice,
        }
    }
}

/// Try the clipboard; on failure hand the text back for manual copying.
pub fn copy_with_fallback(clipboard: &dyn Clipboard, text: &str, success: &str) -> CopyOutcome {
    match clipboard.write_text(text) {
        Ok(()) => CopyOutcome::Copied(Notice::success(success)),
        Err(err) => {
            warn!("clipboard write failed: {err:#}");
            CopyOutcome::Fallback {
                text: text.to_string(),
                notice: Notice::info("Copy the text below manually"),
            }
        }
    }
}

/// Try the clipboard and report either `success` or `failure`.
pub fn copy_or_report(clipboard: &dyn Clipboard, text: &str, success: &str, failure: &str) -> Notice {
    match clipboard.write_text(text) {
        Ok(()) => Notice::success(success),
        Err(err) => {
            warn!("clipboard write failed: {err:#}");
            Notice::error(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copied_when_clipboard_works() {
        let clipboard = MemoryClipboard::new();
        let outcome = copy_with_fallback(&clipboard, "cfg", "Tailwind Config Copied!");
        assert_eq!(outcome.notice().message, "Tailwind Config Copied!");
        assert_eq!(clipboard.contents().as_deref(), Some("cfg"));
    }

    #[test]
    fn falls_back_with_the_text() {
        match copy_with_fallback(&NoClipboard, "cfg", "Tailwind Config Copied!") {
            CopyOutcome::Fallback { text, .. } => assert_eq!(text, "cfg"),
            other => panic!("expected fallback, got {other:?}"),
        }
        let notice = copy_or_report(&NoClipboard, "u", "Workbench URL Copied!", "Failed to copy URL");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to copy URL");
    }
}
