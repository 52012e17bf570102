//! Modular type scale and the comparison workbench settings

use anyhow::{Context, Result};
use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::font::Font;

pub const DEFAULT_BASE: f64 = 16.0;
pub const DEFAULT_RATIO: f64 = 1.25;
/// Number of steps in the preview scale (base through 4xl).
pub const SCALE_STEPS: usize = 6;

/// Tailwind names for each scale step.
pub const STEP_NAMES: [&str; SCALE_STEPS] = ["base", "lg", "xl", "2xl", "3xl", "4xl"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Ratio {
    MinorSecond,
    MajorSecond,
    MinorThird,
    #[default]
    MajorThird,
    PerfectFourth,
    AugmentedFourth,
    PerfectFifth,
    GoldenRatio,
}

impl Ratio {
    pub const ALL: [Ratio; 8] = [
        Ratio::MinorSecond,
        Ratio::MajorSecond,
        Ratio::MinorThird,
        Ratio::MajorThird,
        Ratio::PerfectFourth,
        Ratio::AugmentedFourth,
        Ratio::PerfectFifth,
        Ratio::GoldenRatio,
    ];

    pub fn value(self) -> f64 {
        match self {
            Ratio::MinorSecond => 1.067,
            Ratio::MajorSecond => 1.125,
            Ratio::MinorThird => 1.2,
            Ratio::MajorThird => 1.25,
            Ratio::PerfectFourth => 1.333,
            Ratio::AugmentedFourth => 1.414,
            Ratio::PerfectFifth => 1.5,
            Ratio::GoldenRatio => 1.618,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ratio::MinorSecond => "Minor Second",
            Ratio::MajorSecond => "Major Second",
            Ratio::MinorThird => "Minor Third",
            Ratio::MajorThird => "Major Third",
            Ratio::PerfectFourth => "Perfect Fourth",
            Ratio::AugmentedFourth => "Augmented Fourth",
            Ratio::PerfectFifth => "Perfect Fifth",
            Ratio::GoldenRatio => "Golden Ratio",
        }
    }

    /// Named ratio for a raw value, tolerating float noise.
    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| (r.value() - value).abs() < 1e-6)
    }
}

/// Six pixel sizes, `round(base * ratio^i)`.
pub fn modular_scale(base: f64, ratio: f64) -> [u32; SCALE_STEPS] {
    let mut sizes = [0u32; SCALE_STEPS];
    for (i, size) in sizes.iter_mut().enumerate() {
        // `as` saturates, so absurd inputs clamp instead of wrapping.
        *size = (base * ratio.powi(i as i32)).round() as u32;
    }
    sizes
}

/// Heading/body roles and scale for up to three compared fonts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Workbench {
    pub heading: usize,
    pub body: usize,
    pub base: f64,
    pub ratio: f64,
}

impl Workbench {
    /// Defaults for `inputs` fonts: body takes the second font when there is one.
    pub fn new(inputs: usize) -> Self {
        Self {
            heading: 0,
            body: usize::from(inputs > 1),
            base: DEFAULT_BASE,
            ratio: DEFAULT_RATIO,
        }
    }

    /// Read `h`, `b`, `base` and `ratio`; anything unparsable keeps its default.
    pub fn from_query(query: &str, inputs: usize) -> Self {
        let mut bench = Self::new(inputs);
        let query = query.trim_start_matches('?');
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                "h" => {
                    if let Ok(idx) = value.parse() {
                        bench.heading = idx;
                    }
                }
                "b" => {
                    if let Ok(idx) = value.parse() {
                        bench.body = idx;
                    }
                }
                "base" => {
                    if let Some(size) = parse_positive(value) {
                        bench.base = size;
                    }
                }
                "ratio" => {
                    if let Some(ratio) = parse_positive(value) {
                        bench.ratio = ratio;
                    }
                }
                _ => {}
            }
        }
        bench
    }

    /// Write the four keys into `existing`, keeping every other pair.
    pub fn to_query(&self, existing: &str) -> String {
        let existing = existing.trim_start_matches('?');
        let mut out = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
            if !matches!(key.as_ref(), "h" | "b" | "base" | "ratio") {
                out.append_pair(&key, &value);
            }
        }
        out.append_pair("h", &self.heading.to_string());
        out.append_pair("b", &self.body.to_string());
        out.append_pair("base", &self.base.to_string());
        out.append_pair("ratio", &self.ratio.to_string());
        out.finish()
    }

    /// Shareable link: `page_url` with the workbench state in its query.
    pub fn share_url(&self, page_url: &str) -> Result<String> {
        let mut url = Url::parse(page_url).with_context(|| format!("invalid URL {page_url}"))?;
        let query = self.to_query(url.query().unwrap_or_default());
        url.set_query(Some(&query));
        Ok(url.to_string())
    }

    pub fn sizes(&self) -> [u32; SCALE_STEPS] {
        modular_scale(self.base, self.ratio)
    }

    pub fn ratio_label(&self) -> Option<&'static str> {
        Ratio::from_value(self.ratio).map(Ratio::label)
    }

    pub fn heading_font<'a>(&self, inputs: &[&'a Font]) -> Option<&'a Font> {
        inputs.get(self.heading).or_else(|| inputs.first()).copied()
    }

    pub fn body_font<'a>(&self, inputs: &[&'a Font]) -> Option<&'a Font> {
        inputs.get(self.body).or_else(|| inputs.first()).copied()
    }

    /// Theme extension snippet for `tailwind.config.js`.
    pub fn tailwind_config(&self, inputs: &[&Font]) -> String {
        let body = self
            .body_font(inputs)
            .map_or("System Sans", |f| f.name.as_str());
        let heading = self
            .heading_font(inputs)
            .map_or("System Display", |f| f.name.as_str());
        let sizes = self.sizes();

        let mut out = String::from("// tailwind.config.js theme extension\n");
        out.push_str("fontFamily: {\n");
        out.push_str(&format!("  sans: [\"{body}\", \"sans-serif\"],\n"));
        out.push_str(&format!("  display: [\"{heading}\", \"sans-serif\"],\n"));
        out.push_str("},\nfontSize: {\n");
        out.push_str(&format!("  base: \"{}px\",\n", self.base));
        for (name, size) in STEP_NAMES.iter().zip(sizes).skip(1) {
            let key = if name.starts_with(|c: char| c.is_ascii_digit()) {
                format!("\"{name}\"")
            } else {
                name.to_string()
            };
            out.push_str(&format!("  {key}: \"{size}px\",\n"));
        }
        out.push('}');
        out
    }
}

fn parse_positive(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn major_third_from_sixteen() {
        assert_eq!(modular_scale(16.0, 1.25), [16, 20, 25, 31, 39, 49]);
        assert_eq!(modular_scale(16.0, Ratio::GoldenRatio.value())[5], 177);
    }

    #[test]
    fn ratio_lookup_by_value() {
        assert_eq!(Ratio::from_value(1.333), Some(Ratio::PerfectFourth));
        assert_eq!(Ratio::from_value(1.3), None);
        assert_eq!(Ratio::default().label(), "Major Third");
    }

    #[test]
    fn query_parse_falls_back_per_key() {
        let bench = Workbench::from_query("?h=2&b=oops&base=18&ratio=abc", 3);
        assert_eq!(bench.heading, 2);
        assert_eq!(bench.body, 1);
        assert_eq!(bench.base, 18.0);
        assert_eq!(bench.ratio, 1.25);

        let single = Workbench::from_query("", 1);
        assert_eq!(single.body, 0);
    }

    #[test]
    fn query_write_keeps_foreign_keys() {
        let bench = Workbench {
            heading: 1,
            body: 0,
            base: 18.0,
            ratio: 1.5,
        };
        let query = bench.to_query("ids=a&h=9");
        assert_eq!(query, "ids=a&h=1&b=0&base=18&ratio=1.5");
        assert_eq!(Workbench::from_query(&query, 2), bench);
    }

    #[test]
    fn share_url_replaces_query() {
        let bench = Workbench::new(2);
        let url = bench
            .share_url("https://fonts.example/compare?h=5")
            .unwrap();
        assert_eq!(url, "https://fonts.example/compare?h=0&b=1&base=16&ratio=1.25");
        assert!(bench.share_url("not a url").is_err());
    }

    #[test]
    fn out_of_range_roles_fall_back_to_first_font() {
        let catalog = Catalog::builtin();
        let fonts: Vec<&Font> = catalog.fonts().iter().take(2).collect();
        let bench = Workbench {
            heading: 7,
            ..Workbench::new(2)
        };
        assert_eq!(bench.heading_font(&fonts).unwrap().id, fonts[0].id);
        assert_eq!(bench.body_font(&fonts).unwrap().id, fonts[1].id);
        assert!(bench.heading_font(&[]).is_none());
    }

    #[test]
    fn tailwind_config_lists_roles_and_sizes() {
        let config = Workbench::new(0).tailwind_config(&[]);
        let expected = "// tailwind.config.js theme extension
fontFamily: {
  sans: [\"System Sans\", \"sans-serif\"],
  display: [\"System Display\", \"sans-serif\"],
},
fontSize: {
  base: \"16px\",
  lg: \"20px\",
  xl: \"25px\",
  \"2xl\": \"31px\",
  \"3xl\": \"39px\",
  \"4xl\": \"49px\",
}";
        assert_eq!(config, expected);
    }
}
