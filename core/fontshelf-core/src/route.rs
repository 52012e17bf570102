//! Page routes

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "id", rename_all = "kebab-case")]
pub enum Route {
    #[default]
    Catalog,
    FontDetail(String),
    Compare,
    Favorites,
    About,
    Privacy,
    Terms,
    License,
}

impl Route {
    /// Resolve a path; anything unrecognised lands on the catalog.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Catalog,
            "/compare" => Route::Compare,
            "/favorites" => Route::Favorites,
            "/about" => Route::About,
            "/privacy" => Route::Privacy,
            "/terms" => Route::Terms,
            "/license" => Route::License,
            other => match other.strip_prefix("/font/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Route::FontDetail(id.to_string())
                }
                _ => Route::Catalog,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Catalog => "/".to_string(),
            Route::FontDetail(id) => format!("/font/{id}"),
            Route::Compare => "/compare".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::About => "/about".to_string(),
            Route::Privacy => "/privacy".to_string(),
            Route::Terms => "/terms".to_string(),
            Route::License => "/license".to_string(),
        }
    }

    /// i18n key for the page title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Route::Catalog => "nav.catalog",
            Route::FontDetail(_) => "details.about",
            Route::Compare => "nav.compare",
            Route::Favorites => "nav.favorites",
            Route::About => "nav.about",
            Route::Privacy => "page.privacy",
            Route::Terms => "page.terms",
            Route::License => "page.license",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths_and_tolerates_trailing_slash() {
        assert_eq!(Route::parse("/"), Route::Catalog);
        assert_eq!(Route::parse("/compare/"), Route::Compare);
        assert_eq!(Route::parse("/compare?h=1&b=0"), Route::Compare);
        assert_eq!(
            Route::parse("/font/gh-mona"),
            Route::FontDetail("gh-mona".into())
        );
        assert_eq!(Route::parse("/license"), Route::License);
    }

    #[test]
    fn unknown_paths_go_home() {
        assert_eq!(Route::parse("/nope"), Route::Catalog);
        assert_eq!(Route::parse("/font/"), Route::Catalog);
        assert_eq!(Route::parse("/font/a/b"), Route::Catalog);
    }

    #[test]
    fn path_round_trips() {
        for route in [
            Route::Catalog,
            Route::FontDetail("pt-0".into()),
            Route::Favorites,
            Route::Terms,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
