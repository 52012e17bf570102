//! Filtering, quick find and infinite-scroll windows over the catalog

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::font::Font;
use crate::query::FilterState;

/// Fonts shown before the first scroll.
pub const INITIAL_BATCH: usize = 15;
/// Fonts added on each scroll step.
pub const SCROLL_BATCH: usize = 15;
/// Default number of command-palette hits.
pub const QUICK_FIND_LIMIT: usize = 5;

/// Keep the fonts that match `filter`, in input order.
pub fn filter_fonts<'a>(fonts: &'a [Font], filter: &FilterState) -> Vec<&'a Font> {
    fonts.par_iter().filter(|f| filter.matches(f)).collect()
}

/// Command-palette lookup: case-insensitive name substring, capped at `limit`.
pub fn quick_find<'a>(fonts: &'a [Font], query: &str, limit: usize) -> Vec<&'a Font> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    fonts
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Growing window over a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    visible: usize,
    step: usize,
    initial: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(INITIAL_BATCH, SCROLL_BATCH)
    }
}

impl Paginator {
    pub fn new(initial: usize, step: usize) -> Self {
        Self {
            visible: initial,
            step,
            initial,
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn window<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[..self.visible.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Grow the window by one step; returns false when everything is already shown.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.visible += self.step;
        true
    }

    /// Back to the first batch, as after a filter change.
    pub fn reset(&mut self) {
        self.visible = self.initial;
    }
}

/// Sample texts offered for card previews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pangram {
    #[default]
    Standard,
    Ui,
    Editorial,
    Code,
    Digits,
}

impl Pangram {
    pub const ALL: [Pangram; 5] = [
        Pangram::Standard,
        Pangram::Ui,
        Pangram::Editorial,
        Pangram::Code,
        Pangram::Digits,
    ];

    pub fn text(self) -> &'static str {
        match self {
            Pangram::Standard => "The quick brown fox jumps over the lazy dog.",
            Pangram::Ui => "Dashboard Settings Profile Logout Submit Cancel",
            Pangram::Editorial => {
                "Typography is the craft of endowing human language with a durable visual form."
            }
            Pangram::Code => "function render(props: Props) { return <Component /> }",
            Pangram::Digits => "0123456789 £$€%&@+-=*",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Pangram::Standard => "standard",
            Pangram::Ui => "ui",
            Pangram::Editorial => "editorial",
            Pangram::Code => "code",
            Pangram::Digits => "digits",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn quick_find_is_empty_for_blank_query_and_capped() {
        let catalog = Catalog::builtin();
        assert!(quick_find(catalog.fonts(), "   ", QUICK_FIND_LIMIT).is_empty());
        let hits = quick_find(catalog.fonts(), "sans", QUICK_FIND_LIMIT);
        assert_eq!(hits.len(), QUICK_FIND_LIMIT);
        assert!(hits.iter().all(|f| f.name.to_lowercase().contains("sans")));
    }

    #[test]
    fn paginator_grows_until_exhausted() {
        let items: Vec<u32> = (0..40).collect();
        let mut pages = Paginator::default();
        assert_eq!(pages.window(&items).len(), 15);
        assert!(pages.load_more(items.len()));
        assert!(pages.load_more(items.len()));
        assert_eq!(pages.window(&items).len(), 40);
        assert!(!pages.has_more(items.len()));
        assert!(!pages.load_more(items.len()));
        pages.reset();
        assert_eq!(pages.visible(), INITIAL_BATCH);
    }

    #[test]
    fn pangram_keys_resolve() {
        assert_eq!(Pangram::from_key("code"), Some(Pangram::Code));
        assert_eq!(Pangram::from_key("nope"), None);
        assert!(Pangram::Digits.text().starts_with("0123456789"));
    }
}
