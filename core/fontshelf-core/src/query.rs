//! Filter state and matching

use anyhow::{anyhow, Result};
use regex::Regex;

use crate::catalog::SourceGroups;
use crate::font::Font;

/// Everything the filter sidebar and search box can constrain.
///
/// An empty dimension imposes no constraint. Values inside one dimension
/// are OR-ed; dimensions are AND-ed together.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    search: String,
    categories: Vec<String>,
    languages: Vec<String>,
    sources: Vec<String>,
    licenses: Vec<String>,
    variable_only: bool,
    name_patterns: Vec<Regex>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_licenses(mut self, licenses: Vec<String>) -> Self {
        self.licenses = licenses;
        self
    }

    pub fn with_name_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.name_patterns = patterns;
        self
    }

    pub fn require_variable(mut self, yes: bool) -> Self {
        self.variable_only = yes;
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn licenses(&self) -> &[String] {
        &self.licenses
    }

    pub fn variable_only(&self) -> bool {
        self.variable_only
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_variable_only(&mut self, yes: bool) {
        self.variable_only = yes;
    }

    pub fn toggle_category(&mut self, value: &str) {
        toggle_value(&mut self.categories, value);
    }

    pub fn toggle_language(&mut self, value: &str) {
        toggle_value(&mut self.languages, value);
    }

    pub fn toggle_source(&mut self, value: &str) {
        toggle_value(&mut self.sources, value);
    }

    pub fn toggle_license(&mut self, value: &str) {
        toggle_value(&mut self.licenses, value);
    }

    /// Select or deselect every minor source in one go.
    ///
    /// When all of them are already selected they are all removed;
    /// otherwise the missing ones are added.
    pub fn toggle_other_sources(&mut self, groups: &SourceGroups) {
        if groups.other.is_empty() {
            return;
        }
        let all_selected = groups.other.iter().all(|s| self.sources.contains(s));
        if all_selected {
            self.sources.retain(|s| !groups.other.contains(s));
        } else {
            for source in &groups.other {
                if !self.sources.contains(source) {
                    self.sources.push(source.clone());
                }
            }
        }
    }

    /// Clear every constraint.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.categories.is_empty()
            || !self.languages.is_empty()
            || !self.sources.is_empty()
            || !self.licenses.is_empty()
            || self.variable_only
            || !self.name_patterns.is_empty()
    }

    /// Check whether a font passes every active constraint.
    pub fn matches(&self, font: &Font) -> bool {
        if self.variable_only && !font.variable {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !font.name.to_lowercase().contains(&needle)
            && !font.author.to_lowercase().contains(&needle)
        {
            return false;
        }

        if !overlaps(&self.categories, &font.categories) {
            return false;
        }

        if !overlaps(&self.languages, &font.languages) {
            return false;
        }

        if !overlaps(&self.sources, std::slice::from_ref(&font.source)) {
            return false;
        }

        if !overlaps(&self.licenses, std::slice::from_ref(&font.license)) {
            return false;
        }

        if !self.name_patterns.is_empty()
            && !self.name_patterns.iter().any(|re| re.is_match(&font.name))
        {
            return false;
        }

        true
    }
}

fn toggle_value(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

/// Any selected value and any font value contain each other, ignoring case.
fn overlaps(selected: &[String], available: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    selected.iter().any(|s| {
        let s = s.to_lowercase();
        available.iter().any(|v| {
            let v = v.to_lowercase();
            v.contains(&s) || s.contains(&v)
        })
    })
}

/// Compile name patterns, reporting the first invalid one.
pub fn parse_name_patterns(raw: &[String]) -> Result<Vec<Regex>> {
    raw.iter()
        .map(|p| Regex::new(p).map_err(|e| anyhow!("invalid name pattern {p:?}: {e}")))
        .collect()
}

/// Split comma-separated CLI values, dropping blanks.
pub fn parse_value_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(name: &str, author: &str, category: &str, source: &str, variable: bool) -> Font {
        Font {
            id: name.to_lowercase(),
            name: name.into(),
            author: author.into(),
            description: String::new(),
            variable,
            categories: vec![category.into()],
            languages: vec!["Latin".into()],
            license: "Open Source".into(),
            source: source.into(),
            source_url: String::new(),
            download_url: None,
            custom_css_url: None,
            weights: vec!["400".into()],
            styles: vec!["Regular".into()],
            tags: Vec::new(),
            css_stack: String::new(),
        }
    }

    #[test]
    fn search_hits_name_or_author() {
        let f = font("Lora", "Cyreal", "serif", "Google Fonts", true);
        assert!(FilterState::new().with_search("LOR").matches(&f));
        assert!(FilterState::new().with_search(" cyr ").matches(&f));
        assert!(!FilterState::new().with_search("zzz").matches(&f));
    }

    #[test]
    fn sans_serif_category_also_satisfies_serif_selection() {
        let f = font("Inter", "Rsms", "sans-serif", "Rsms", true);
        let filter = FilterState::new().with_categories(vec!["serif".into()]);
        assert!(filter.matches(&f), "substring rule admits sans-serif under serif");
    }

    #[test]
    fn dimensions_are_anded() {
        let f = font("Inter", "Rsms", "sans-serif", "Rsms", false);
        let filter = FilterState::new()
            .with_categories(vec!["sans-serif".into()])
            .require_variable(true);
        assert!(!filter.matches(&f));
    }

    #[test]
    fn toggles_add_then_remove() {
        let mut filter = FilterState::new();
        filter.toggle_language("Cyrillic");
        assert_eq!(filter.languages(), ["Cyrillic"]);
        assert!(filter.is_active());
        filter.toggle_language("Cyrillic");
        assert!(filter.languages().is_empty());
        assert!(!filter.is_active());
    }

    #[test]
    fn other_sources_toggle_as_a_block() {
        let groups = SourceGroups {
            main: vec!["Google Fonts".into()],
            other: vec!["GitHub".into(), "Vercel".into()],
        };
        let mut filter = FilterState::new();
        filter.toggle_source("GitHub");
        filter.toggle_other_sources(&groups);
        assert_eq!(filter.sources(), ["GitHub", "Vercel"]);
        filter.toggle_other_sources(&groups);
        assert!(filter.sources().is_empty());
    }

    #[test]
    fn name_patterns_and_value_lists_parse() {
        let patterns = parse_name_patterns(&["^Fira".into()]).unwrap();
        let filter = FilterState::new().with_name_patterns(patterns);
        assert!(filter.matches(&font("Fira Code", "x", "monospaced", "s", false)));
        assert!(!filter.matches(&font("Code Fira", "x", "monospaced", "s", false)));
        assert!(parse_name_patterns(&["(".into()]).is_err());
        assert_eq!(
            parse_value_list(&["serif, display".into(), "".into()]),
            vec!["serif", "display"]
        );
    }
}
