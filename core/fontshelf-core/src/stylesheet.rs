//! Web-font stylesheet planning
//!
//! Nothing is fetched here. The loader works out which `<link>` elements a
//! page needs for a set of fonts and remembers what it already handed out,
//! so repeated plans only return new URLs.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use serde::Serialize;
use url::form_urlencoded;

use crate::font::{slugify, Font};

const GOOGLE_CSS: &str = "https://fonts.googleapis.com/css2";
const FONTSHARE_CSS: &str = "https://api.fontshare.com/v2/css";

/// Google family batches per request.
pub const GOOGLE_BATCH: usize = 15;
/// Fontshare family batches per request.
pub const FONTSHARE_BATCH: usize = 10;

const GRID_WEIGHTS: &str = "300;400;500;700";
const FONTSHARE_WEIGHTS: &str = "400,500,700";
const NON_GOOGLE_SOURCES: [&str; 3] = ["Fontshare", "Velvetyne", "Collletttivo"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Custom,
    Google,
    Fontshare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylesheetLink {
    pub kind: LinkKind,
    pub href: String,
}

impl StylesheetLink {
    fn new(kind: LinkKind, href: String) -> Self {
        Self { kind, href }
    }
}

/// Session-scoped record of inserted links and loaded families.
#[derive(Debug, Default)]
pub struct StylesheetLoader {
    inserted: HashSet<String>,
    loaded_families: HashSet<String>,
}

impl StylesheetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inserted(&self, href: &str) -> bool {
        self.inserted.contains(href)
    }

    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }

    /// Links needed to render `fonts` that have not been inserted yet.
    pub fn plan<'a, I>(&mut self, fonts: I) -> Vec<StylesheetLink>
    where
        I: IntoIterator<Item = &'a Font>,
    {
        let mut custom: Vec<&str> = Vec::new();
        let mut google: Vec<&str> = Vec::new();
        let mut fontshare: Vec<String> = Vec::new();

        for font in fonts {
            if let Some(url) = font.custom_css_url.as_deref() {
                push_unique(&mut custom, url);
                continue;
            }
            if font.source == "Fontshare" {
                let slug = slugify(&font.name);
                if !fontshare.contains(&slug) {
                    fontshare.push(slug);
                }
            } else if !NON_GOOGLE_SOURCES.contains(&font.source.as_str()) {
                push_unique(&mut google, &font.name);
            }
        }

        let mut candidates: Vec<StylesheetLink> = custom
            .into_iter()
            .map(|url| StylesheetLink::new(LinkKind::Custom, url.to_string()))
            .collect();

        for batch in google.chunks(GOOGLE_BATCH) {
            let families: Vec<String> = batch
                .iter()
                .map(|name| format!("family={}:wght@{GRID_WEIGHTS}", plus_joined(name)))
                .collect();
            let href = format!("{GOOGLE_CSS}?{}&display=swap", families.join("&"));
            candidates.push(StylesheetLink::new(LinkKind::Google, href));
        }

        for batch in fontshare.chunks(FONTSHARE_BATCH) {
            let params: Vec<String> = batch
                .iter()
                .map(|slug| format!("f[]={slug}@{FONTSHARE_WEIGHTS}"))
                .collect();
            let href = format!("{FONTSHARE_CSS}?{}&display=swap", params.join("&"));
            candidates.push(StylesheetLink::new(LinkKind::Fontshare, href));
        }

        let fresh: Vec<StylesheetLink> = candidates
            .into_iter()
            .filter(|link| self.inserted.insert(link.href.clone()))
            .collect();
        debug!("stylesheet plan: {} new links", fresh.len());
        fresh
    }

    /// Link for a single font, once per family name.
    pub fn load_font(&mut self, font: &Font) -> Option<StylesheetLink> {
        if self.loaded_families.contains(&font.name) {
            return None;
        }

        let link = if let Some(url) = font.custom_css_url.as_deref() {
            StylesheetLink::new(LinkKind::Custom, url.to_string())
        } else if font.source == "Google Fonts" || font.source == "The League of Moveable Type" {
            StylesheetLink::new(LinkKind::Google, google_font_url(&font.name, &font.weights))
        } else if font.source == "Fontshare" {
            StylesheetLink::new(LinkKind::Fontshare, fontshare_url(&font.name))
        } else {
            return None;
        };

        self.loaded_families.insert(font.name.clone());
        self.inserted.insert(link.href.clone());
        Some(link)
    }
}

fn push_unique<'a>(values: &mut Vec<&'a str>, value: &'a str) {
    if !values.contains(&value) {
        values.push(value);
    }
}

fn plus_joined(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("+")
}

/// Google Fonts CSS2 URL for one family with its distinct weights in order.
pub fn google_font_url(name: &str, weights: &[String]) -> String {
    let unique: BTreeSet<&str> = weights.iter().map(|w| w.trim()).collect();
    let joined = unique.into_iter().collect::<Vec<_>>().join(";");
    format!(
        "{GOOGLE_CSS}?family={}:wght@{joined}&display=swap",
        plus_joined(name.trim())
    )
}

/// Fontshare CSS URL for one family.
pub fn fontshare_url(name: &str) -> String {
    let slug = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    let encoded: String = form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    format!("{FONTSHARE_CSS}?f[]={encoded}&display=swap")
}

/// `<link>` markup for a planned stylesheet.
pub fn render_link(link: &StylesheetLink) -> String {
    let href = link.href.replace('&', "&amp;").replace('"', "&quot;");
    format!(r#"<link rel="stylesheet" href="{href}">"#)
}
