//! fontshelf-core: the engine behind the fontshelf type catalog
//!
//! Everything the browsing UI needs lives here as plain data and state
//! machines: the built-in catalog, filtering and quick find, favorites and
//! the comparison stack with their persistence, the modular-scale
//! workbench, stylesheet planning, the detail inspector, the MarkBuilder
//! toy, localisation and routing. [`app::App`] ties them together.
//!
//! ```rust
//! use fontshelf_core::catalog::Catalog;
//! use fontshelf_core::query::FilterState;
//! use fontshelf_core::search::filter_fonts;
//!
//! let catalog = Catalog::builtin();
//! let filter = FilterState::new()
//!     .with_categories(vec!["monospaced".into()])
//!     .require_variable(true);
//!
//! for font in filter_fonts(catalog.fonts(), &filter).iter().take(3) {
//!     println!("{} by {}", font.name, font.author);
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod collections;
pub mod details;
pub mod font;
pub mod i18n;
pub mod mark;
pub mod notice;
pub mod output;
pub mod query;
pub mod route;
pub mod scale;
pub mod search;
pub mod storage;
pub mod stylesheet;
