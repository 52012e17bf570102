use fontshelf_core::app::App;
use fontshelf_core::catalog::Catalog;
use fontshelf_core::clipboard::{copy_with_fallback, CopyOutcome, MemoryClipboard, NoClipboard};
use fontshelf_core::storage::MemoryStore;

#[test]
fn shared_link_restores_the_same_workbench() {
    let mut app = App::new(Catalog::builtin(), Box::new(MemoryStore::new()));
    app.toggle_compare("geist-sans");
    app.toggle_compare("geist-mono");

    let mut bench = app.workbench("");
    assert_eq!((bench.heading, bench.body), (0, 1));
    bench.heading = 1;
    bench.ratio = 1.618;

    let link = bench
        .share_url("https://fonts.example/compare")
        .expect("share url");
    let query = link.split_once('?').map(|(_, q)| q).unwrap_or_default();
    let restored = app.workbench(query);
    assert_eq!(restored, bench);
    assert_eq!(restored.ratio_label(), Some("Golden Ratio"));
}

#[test]
fn exported_config_names_the_role_fonts() {
    let mut app = App::new(Catalog::builtin(), Box::new(MemoryStore::new()));
    app.toggle_compare("geist-sans");
    app.toggle_compare("geist-mono");
    let fonts = app.compare_fonts();
    let bench = app.workbench("h=1&b=0");
    let config = bench.tailwind_config(&fonts);

    let heading = bench.heading_font(&fonts).unwrap().name.clone();
    let body = bench.body_font(&fonts).unwrap().name.clone();
    assert!(config.contains(&format!("display: [\"{heading}\", \"sans-serif\"]")));
    assert!(config.contains(&format!("sans: [\"{body}\", \"sans-serif\"]")));

    let clipboard = MemoryClipboard::new();
    let copied = copy_with_fallback(&clipboard, &config, "Tailwind Config Copied!");
    assert!(matches!(copied, CopyOutcome::Copied(_)));
    assert_eq!(clipboard.contents().as_deref(), Some(config.as_str()));

    match copy_with_fallback(&NoClipboard, &config, "Tailwind Config Copied!") {
        CopyOutcome::Fallback { text, .. } => assert_eq!(text, config),
        other => panic!("expected fallback, got {other:?}"),
    }
}
