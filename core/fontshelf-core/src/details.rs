//! Font detail inspector: glyph sets, weight map and a pairing suggestion

use serde::Serialize;

use crate::catalog::Catalog;
use crate::font::Font;
use crate::i18n::Translator;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMERALS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?/~`";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphSets {
    pub uppercase: &'static str,
    pub lowercase: &'static str,
    pub numerals: &'static str,
    pub symbols: &'static str,
}

impl Default for GlyphSets {
    fn default() -> Self {
        Self {
            uppercase: UPPERCASE,
            lowercase: LOWERCASE,
            numerals: NUMERALS,
            symbols: SYMBOLS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDetails<'c> {
    pub font: &'c Font,
    pub glyphs: GlyphSets,
    /// Weights in the order the font lists them.
    pub weight_map: Vec<String>,
    pub pairing: Option<&'c Font>,
    pub license_text: String,
}

impl<'c> FontDetails<'c> {
    /// Details for `id`, or `None` when the catalog has no such font.
    pub fn lookup(catalog: &'c Catalog, id: &str, t: &Translator) -> Option<Self> {
        let font = catalog.get(id)?;
        Some(Self {
            font,
            glyphs: GlyphSets::default(),
            weight_map: font.weights.clone(),
            pairing: pairing_for(catalog, font),
            license_text: t.t_with("details.licenseDesc", &[("license", &font.license)]),
        })
    }

    /// Fonts a detail page needs stylesheets for.
    pub fn fonts_to_load(&self) -> Vec<&'c Font> {
        let mut fonts = vec![self.font];
        fonts.extend(self.pairing);
        fonts
    }
}

/// Serif fonts pair with a sans-serif, everything else with a serif.
///
/// The pick is stable per id: the sum of the id's UTF-16 code units,
/// modulo the number of candidates.
pub fn pairing_for<'c>(catalog: &'c Catalog, font: &Font) -> Option<&'c Font> {
    let target = if font.has_category("serif") {
        "sans-serif"
    } else {
        "serif"
    };
    let candidates: Vec<&Font> = catalog
        .fonts()
        .iter()
        .filter(|f| f.has_category(target))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let seed: usize = font.id.encode_utf16().map(usize::from).sum();
    Some(candidates[seed % candidates.len()])
}
