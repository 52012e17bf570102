//! Font record shared by every part of the catalog

use serde::{Deserialize, Serialize};

/// One catalog entry describing a typeface family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub id: String,
    pub name: String,
    pub author: String,
    pub description: String,
    pub variable: bool,
    pub categories: Vec<String>,
    pub languages: Vec<String>,
    pub license: String,
    pub source: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css_url: Option<String>,
    pub weights: Vec<String>,
    pub styles: Vec<String>,
    pub tags: Vec<String>,
    pub css_stack: String,
}

impl Font {
    /// First category, which drives the CSS fallback and pairing.
    pub fn primary_category(&self) -> &str {
        self.categories
            .first()
            .map(String::as_str)
            .unwrap_or("sans-serif")
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Weights parsed as numbers, skipping anything that is not numeric.
    pub fn numeric_weights(&self) -> Vec<u16> {
        self.weights
            .iter()
            .filter_map(|w| w.trim().parse().ok())
            .collect()
    }
}

/// Lower-case and hyphenate a label (`"Google Fonts"` -> `"google-fonts"`).
pub fn slugify(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let font = Font {
            id: "x-1".into(),
            name: "X".into(),
            author: "A".into(),
            description: String::new(),
            variable: true,
            categories: vec!["serif".into()],
            languages: vec!["Latin".into()],
            license: "OFL".into(),
            source: "Google Fonts".into(),
            source_url: "https://example.test".into(),
            download_url: None,
            custom_css_url: Some("https://cdn.test/x.css".into()),
            weights: vec!["400".into(), "bold".into()],
            styles: vec!["Regular".into()],
            tags: Vec::new(),
            css_stack: "'X', serif".into(),
        };

        let json = serde_json::to_value(&font).expect("serialize");
        assert_eq!(json["sourceUrl"], "https://example.test");
        assert_eq!(json["customCssUrl"], "https://cdn.test/x.css");
        assert!(json.get("downloadUrl").is_none());
        assert_eq!(font.numeric_weights(), vec![400]);
        assert_eq!(font.primary_category(), "serif");
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify(" Clash Display "), "clash-display");
    }
}
