use fontshelf_core::catalog::Catalog;
use fontshelf_core::font::Font;
use fontshelf_core::query::FilterState;
use fontshelf_core::search::filter_fonts;
use proptest::prelude::*;

const CATEGORIES: [&str; 5] = ["sans-serif", "serif", "display", "handwriting", "monospaced"];
const LANGUAGES: [&str; 4] = ["Latin", "Cyrillic", "Korean", "Japanese"];

fn ids(fonts: &[&Font]) -> Vec<String> {
    fonts.iter().map(|f| f.id.clone()).collect()
}

fn is_subsequence(small: &[String], big: &[String]) -> bool {
    let mut it = big.iter();
    small.iter().all(|id| it.any(|b| b == id))
}

#[test]
fn empty_filter_returns_everything_in_order() {
    let catalog = Catalog::builtin();
    let all = filter_fonts(catalog.fonts(), &FilterState::new());
    assert_eq!(all.len(), catalog.len());
    assert_eq!(all[0].id, catalog.fonts()[0].id);
}

#[test]
fn serif_selection_admits_both_serif_and_sans_serif() {
    let catalog = Catalog::builtin();
    let hits = filter_fonts(
        catalog.fonts(),
        &FilterState::new().with_categories(vec!["serif".into()]),
    );
    assert!(hits.iter().any(|f| f.has_category("serif")));
    assert!(hits.iter().any(|f| f.has_category("sans-serif")));
    assert!(hits.iter().all(|f| !f.has_category("display")));
}

#[test]
fn cyrillic_variable_search_combines_with_and() {
    let catalog = Catalog::builtin();
    let filter = FilterState::new()
        .with_languages(vec!["cyrillic".into()])
        .require_variable(true)
        .with_search("sans");
    let hits = filter_fonts(catalog.fonts(), &filter);
    assert!(!hits.is_empty());
    for font in hits {
        assert!(font.variable);
        assert!(font.languages.iter().any(|l| l == "Cyrillic"));
        let hay = format!("{} {}", font.name, font.author).to_lowercase();
        assert!(hay.contains("sans"), "{} should mention sans", font.name);
    }
}

#[test]
fn source_and_license_match_by_substring() {
    let catalog = Catalog::builtin();
    let hits = filter_fonts(
        catalog.fonts(),
        &FilterState::new()
            .with_sources(vec!["github".into()])
            .with_licenses(vec!["ofl".into()]),
    );
    let names: Vec<&str> = hits.iter().map(|f| f.name.as_str()).collect();
    assert!(names.contains(&"Mona Sans"));
    assert!(names.contains(&"Monaspace Neon"), "GitHub Next matches github");
}

proptest! {
    #[test]
    fn constraining_an_empty_dimension_never_grows(
        cat in 0usize..CATEGORIES.len(),
        lang in 0usize..LANGUAGES.len(),
        search in "[a-z]{0,3}",
        variable in any::<bool>(),
    ) {
        let catalog = Catalog::builtin();
        let base = FilterState::new().with_search(search.clone());
        let before = ids(&filter_fonts(catalog.fonts(), &base));

        let narrowed = base
            .clone()
            .with_categories(vec![CATEGORIES[cat].to_string()])
            .with_languages(vec![LANGUAGES[lang].to_string()])
            .require_variable(variable);
        let after = ids(&filter_fonts(catalog.fonts(), &narrowed));

        prop_assert!(after.len() <= before.len());
        prop_assert!(is_subsequence(&after, &before));
    }

    #[test]
    fn extending_the_search_never_grows(prefix in "[a-z]{0,2}", extra in "[a-z]{1,2}") {
        let catalog = Catalog::builtin();
        let short = filter_fonts(catalog.fonts(), &FilterState::new().with_search(prefix.clone()));
        let long = filter_fonts(
            catalog.fonts(),
            &FilterState::new().with_search(format!("{prefix}{extra}")),
        );
        prop_assert!(is_subsequence(&ids(&long), &ids(&short)));
    }
}
