use fontshelf_core::app::App;
use fontshelf_core::catalog::Catalog;
use fontshelf_core::collections::Toggle;
use fontshelf_core::i18n::Locale;
use fontshelf_core::storage::{JsonFileStore, KeyValueStore, COMPARE_KEY, FAVORITES_KEY};

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");

    {
        let store = JsonFileStore::open(&path).expect("open");
        let mut app = App::new(Catalog::builtin(), Box::new(store));
        app.toggle_favorite("gh-mona");
        app.toggle_compare("pretendard");
        app.toggle_compare("hack-font");
        app.set_locale(Locale::En);
    }

    let store = JsonFileStore::open(&path).expect("reopen");
    assert_eq!(
        store.get(FAVORITES_KEY).unwrap().as_deref(),
        Some(r#"["gh-mona"]"#)
    );
    let app = App::new(Catalog::builtin(), Box::new(store));
    assert_eq!(app.compare().list().as_slice(), ["pretendard", "hack-font"]);
    assert_eq!(app.locale(), Locale::En);
}

#[test]
fn ghost_ids_vanish_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.json");
    let store = JsonFileStore::open(&path).expect("open");
    store
        .set(COMPARE_KEY, r#"["ghost-id","gh-hubot"]"#)
        .expect("seed");

    let mut app = App::new(Catalog::builtin(), Box::new(store));
    assert_eq!(app.compare().list().as_slice(), ["gh-hubot"]);

    for id in ["gh-mona", "iosevka"] {
        assert_eq!(app.toggle_compare(id).0, Toggle::Added);
    }
    let (toggle, notice) = app.toggle_compare("go-font");
    assert_eq!(toggle, Toggle::Rejected);
    assert_eq!(notice.message, "You can only compare up to 3 fonts");
}
