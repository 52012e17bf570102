//! Application state store
//!
//! [`App`] owns every piece of session state. Mutations persist through the
//! key-value store, return a [`Notice`] where the user should hear about
//! the outcome, and notify subscribers with an [`Event`].

use log::debug;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::collections::{CompareStack, Favorites, Toggle};
use crate::font::Font;
use crate::i18n::{Locale, Translator};
use crate::notice::Notice;
use crate::query::FilterState;
use crate::route::Route;
use crate::scale::Workbench;
use crate::search::{filter_fonts, quick_find, Paginator, QUICK_FIND_LIMIT};
use crate::storage::KeyValueStore;
use crate::stylesheet::{StylesheetLink, StylesheetLoader};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    FavoritesChanged { ids: Vec<String> },
    CompareChanged { ids: Vec<String> },
    FilterChanged,
    LocaleChanged { locale: Locale },
    RouteChanged { route: Route },
    ThemeChanged { inverted: bool },
    Notice { notice: Notice },
}

/// Entries of the command palette that are not font lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    GoToIndex,
    GoToWorkbench,
    GoToFavorites,
    ToggleTheme,
    ClearFilters,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::GoToIndex,
        Command::GoToWorkbench,
        Command::GoToFavorites,
        Command::ToggleTheme,
        Command::ClearFilters,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::GoToIndex => "Go to Index",
            Command::GoToWorkbench => "Go to Workbench",
            Command::GoToFavorites => "Go to Favorites",
            Command::ToggleTheme => "Toggle Theme",
            Command::ClearFilters => "Clear Filters",
        }
    }
}

type Observer = Box<dyn Fn(&Event) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

pub struct App {
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    favorites: Favorites,
    compare: CompareStack,
    filter: FilterState,
    pages: Paginator,
    locale: Locale,
    route: Route,
    inverted: bool,
    stylesheets: StylesheetLoader,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: usize,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("fonts", &self.catalog.len())
            .field("favorites", &self.favorites.list().as_slice())
            .field("compare", &self.compare.list().as_slice())
            .field("locale", &self.locale)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Hydrate favorites, comparison and locale from `store`.
    pub fn new(catalog: Catalog, store: Box<dyn KeyValueStore>) -> Self {
        let favorites = Favorites::load(store.as_ref(), &catalog);
        let compare = CompareStack::load(store.as_ref(), &catalog);
        let locale = Locale::load(store.as_ref());
        debug!(
            "app ready: {} fonts, {} favorites, {} compared, locale {locale}",
            catalog.len(),
            favorites.list().len(),
            compare.list().len()
        );
        Self {
            catalog,
            store,
            favorites,
            compare,
            filter: FilterState::default(),
            pages: Paginator::default(),
            locale,
            route: Route::default(),
            inverted: false,
            stylesheets: StylesheetLoader::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl Fn(&Event) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(sub, _)| *sub != id);
    }

    fn emit(&self, event: Event) {
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }

    fn announce(&self, notice: &Notice) {
        self.emit(Event::Notice {
            notice: notice.clone(),
        });
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn compare(&self) -> &CompareStack {
        &self.compare
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.locale)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn unknown_font(&self, id: &str) -> (Toggle, Notice) {
        let notice = Notice::error(format!("{}: {id}", self.translator().t("details.notFound")));
        self.announce(&notice);
        (Toggle::Rejected, notice)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> (Toggle, Notice) {
        if !self.catalog.contains(id) {
            return self.unknown_font(id);
        }
        let outcome = self.favorites.toggle(self.store.as_ref(), id);
        self.emit(Event::FavoritesChanged {
            ids: self.favorites.list().as_slice().to_vec(),
        });
        self.announce(&outcome.1);
        outcome
    }

    pub fn toggle_compare(&mut self, id: &str) -> (Toggle, Notice) {
        if !self.catalog.contains(id) {
            return self.unknown_font(id);
        }
        let outcome = self.compare.toggle(self.store.as_ref(), id);
        if outcome.0 != Toggle::Rejected {
            self.emit(Event::CompareChanged {
                ids: self.compare.list().as_slice().to_vec(),
            });
        }
        self.announce(&outcome.1);
        outcome
    }

    pub fn clear_compare(&mut self) -> Notice {
        let notice = self.compare.clear(self.store.as_ref());
        self.emit(Event::CompareChanged { ids: Vec::new() });
        self.announce(&notice);
        notice
    }

    pub fn favorite_fonts(&self) -> Vec<&Font> {
        self.favorites.list().resolve(&self.catalog)
    }

    pub fn compare_fonts(&self) -> Vec<&Font> {
        self.compare.list().resolve(&self.catalog)
    }

    /// Workbench defaults for the current comparison, overridden by `query`.
    pub fn workbench(&self, query: &str) -> Workbench {
        Workbench::from_query(query, self.compare.list().len())
    }

    /// Change the filter; the scroll window starts over.
    pub fn update_filter(&mut self, change: impl FnOnce(&mut FilterState)) {
        change(&mut self.filter);
        self.pages.reset();
        self.emit(Event::FilterChanged);
    }

    pub fn reset_filters(&mut self) {
        self.update_filter(FilterState::reset);
    }

    pub fn filtered_fonts(&self) -> Vec<&Font> {
        filter_fonts(self.catalog.fonts(), &self.filter)
    }

    /// The filtered fonts inside the current scroll window.
    pub fn visible_fonts(&self) -> Vec<&Font> {
        let filtered = self.filtered_fonts();
        self.pages.window(&filtered).to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.pages.has_more(self.filtered_fonts().len())
    }

    pub fn load_more(&mut self) -> bool {
        let total = self.filtered_fonts().len();
        self.pages.load_more(total)
    }

    /// Stylesheets still needed for the visible fonts.
    pub fn plan_visible_stylesheets(&mut self) -> Vec<StylesheetLink> {
        let filtered = filter_fonts(self.catalog.fonts(), &self.filter);
        let window = self.pages.window(&filtered);
        self.stylesheets.plan(window.iter().copied())
    }

    pub fn plan_stylesheets(&mut self, ids: &[String]) -> Vec<StylesheetLink> {
        let fonts: Vec<&Font> = ids.iter().filter_map(|id| self.catalog.get(id)).collect();
        self.stylesheets.plan(fonts)
    }

    pub fn quick_find(&self, query: &str) -> Vec<&Font> {
        quick_find(self.catalog.fonts(), query, QUICK_FIND_LIMIT)
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        locale.persist(self.store.as_ref());
        self.emit(Event::LocaleChanged { locale });
    }

    pub fn navigate(&mut self, path: &str) -> &Route {
        self.route = Route::parse(path);
        self.emit(Event::RouteChanged {
            route: self.route.clone(),
        });
        &self.route
    }

    pub fn run_command(&mut self, command: Command) {
        match command {
            Command::GoToIndex => {
                self.navigate("/");
            }
            Command::GoToWorkbench => {
                self.navigate("/compare");
            }
            Command::GoToFavorites => {
                self.navigate("/favorites");
            }
            Command::ToggleTheme => {
                self.inverted = !self.inverted;
                self.emit(Event::ThemeChanged {
                    inverted: self.inverted,
                });
            }
            Command::ClearFilters => self.reset_filters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, FAVORITES_KEY};
    use std::sync::{Arc, Mutex};

    fn app() -> App {
        App::new(Catalog::builtin(), Box::new(MemoryStore::new()))
    }

    #[test]
    fn observers_see_mutations_in_order() {
        let mut app = app();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = app.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        app.toggle_favorite("gh-mona");
        app.navigate("/favorites");
        app.unsubscribe(sub);
        app.navigate("/");

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            Event::FavoritesChanged {
                ids: vec!["gh-mona".into()]
            }
        );
        assert!(matches!(events[1], Event::Notice { .. }));
        assert_eq!(
            events[2],
            Event::RouteChanged {
                route: Route::Favorites
            }
        );
    }

    #[test]
    fn unknown_ids_are_rejected_without_persisting() {
        let store = MemoryStore::new();
        let mut app = App::new(Catalog::builtin(), Box::new(store));
        let (toggle, notice) = app.toggle_favorite("ghost");
        assert_eq!(toggle, Toggle::Rejected);
        assert!(notice.is_error());
        assert!(app.favorites().list().is_empty());
    }

    #[test]
    fn hydrates_from_store() {
        let store = MemoryStore::new().with_value(FAVORITES_KEY, r#"["pretendard","gone"]"#);
        let app = App::new(Catalog::builtin(), Box::new(store));
        assert_eq!(app.favorites().list().as_slice(), ["pretendard"]);
        assert_eq!(app.locale(), Locale::Ru);
    }

    #[test]
    fn filter_changes_reset_the_window() {
        let mut app = app();
        assert_eq!(app.visible_fonts().len(), 15);
        assert!(app.load_more());
        assert_eq!(app.visible_fonts().len(), 30);

        app.update_filter(|f| f.set_search("sans"));
        assert_eq!(app.visible_fonts().len(), 15);
        assert!(app.visible_fonts().iter().all(|f| {
            f.name.to_lowercase().contains("sans") || f.author.to_lowercase().contains("sans")
        }));

        app.run_command(Command::ClearFilters);
        assert!(!app.filter().is_active());
    }

    #[test]
    fn commands_navigate_and_toggle_theme() {
        let mut app = app();
        app.run_command(Command::GoToWorkbench);
        assert_eq!(app.route(), &Route::Compare);
        app.run_command(Command::ToggleTheme);
        assert!(app.is_inverted());
    }

    #[test]
    fn visible_stylesheets_are_planned_once() {
        let mut app = app();
        assert!(!app.plan_visible_stylesheets().is_empty());
        assert!(app.plan_visible_stylesheets().is_empty());
    }
}
