//! Two-locale string table

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, LANGUAGE_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ru,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Stored locale, or the default when missing or unrecognised.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(LANGUAGE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("could not read {LANGUAGE_KEY}: {err:#}");
                Self::default()
            }
        }
    }

    pub fn persist(self, store: &dyn KeyValueStore) {
        if let Err(err) = store.set(LANGUAGE_KEY, self.code()) {
            warn!("could not persist {LANGUAGE_KEY}: {err:#}");
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(anyhow!("unsupported language: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translated string, or the key itself when there is none.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.locale {
            Locale::En => EN,
            Locale::Ru => RU,
        };
        table
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(key, |(_, v)| *v)
    }

    /// Translate and fill `{name}` placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

const EN: &[(&str, &str)] = &[
    ("app.title", "ONOD Fonts"),
    ("nav.catalog", "Index"),
    ("nav.favorites", "Saved"),
    ("nav.compare", "Workbench"),
    ("nav.about", "Manifesto"),
    ("page.privacy", "Privacy"),
    ("page.terms", "Terms"),
    ("page.license", "License"),
    ("search.placeholder", "Search index..."),
    ("preview.placeholder", "Type to preview..."),
    ("filters.title", "System Filters"),
    ("filters.reset", "Reset"),
    ("filters.categories", "Classification"),
    ("filters.platform", "Platform"),
    ("filters.other", "Other"),
    ("filters.platform.note", "* Library is constantly updating. More platforms coming soon."),
    ("filters.languages", "Script"),
    ("filters.variable", "Variable Axis"),
    ("filters.index", "Index"),
    ("styles.available", "Styles"),
    ("card.inStack", "Queued"),
    ("card.addToStack", "Queue"),
    ("card.stacked", "STACKED"),
    ("card.stack", "STACK"),
    ("card.viewDetails", "Inspect"),
    ("card.addToFavorites", "Save"),
    ("card.removeFromFavorites", "Forget"),
    ("card.addToCompare", "Compare"),
    ("card.removeFromCompare", "Unlink"),
    ("fonts.label", "Typefaces"),
    ("fonts.count", "results"),
    ("fonts.notFound", "No matches found"),
    ("status.loading", "Initializing..."),
    ("details.back", "Return"),
    ("details.download", "Download"),
    ("details.license", "License"),
    ("details.styles", "Styles"),
    ("details.designer", "Author"),
    ("details.category", "Class"),
    ("details.variable", "Variable"),
    ("details.specimen", "Specimen"),
    ("details.foundry", "Foundry"),
    ("details.weights", "Weights"),
    ("details.source", "Source"),
    ("details.pair", "Pairing Algorithm"),
    ("details.glyphs", "Glyphs"),
    ("details.about", "Data"),
    ("details.allWeights", "Weight Map"),
    ("details.uppercase", "Upper"),
    ("details.lowercase", "Lower"),
    ("details.numerals", "Numerals"),
    ("details.commercial", "Commercial Use"),
    ("details.licenseDesc", "Licensed under {license}. Open for digital and print usage."),
    ("details.notFound", "Font not found"),
    ("back", "Back"),
    ("share", "Share"),
    ("compare.title", "System Workbench"),
    ("compare.empty", "Workbench empty. Initialize selection."),
    ("compare.clear", "Purge"),
    ("compare.emptyTitle", "NULL_STATE"),
    ("compare.emptyDesc", "Initialize font selection to begin comparison."),
    ("compare.return", "Return to Index"),
    ("compare.sources", "INPUTS"),
    ("compare.export", "Export Config"),
    ("compare.roles", "Roles"),
    ("compare.heading", "H-Level"),
    ("compare.body", "P-Level"),
    ("compare.scale", "Modular Scale"),
    ("compare.base", "Base"),
    ("compare.ratio", "Ratio"),
    ("compare.active", "Active Nodes"),
    ("favorites.title", "Saved Collection"),
    ("favorites.empty", "No saved items."),
    ("favorites.noItemsTitle", "VOID"),
    ("favorites.noItemsDesc", "Collection is empty. Mark items to save."),
    ("favorites.browse", "Access Index"),
    ("favorites.collection", "CACHE"),
    ("favorites.items", "UNITS"),
    ("favorites.export", "Export Data"),
    ("mark.title", "Mark Builder"),
    ("mark.generate", "Generate"),
    ("mark.clear", "Clear"),
    ("preview.title", "Systematic Design."),
    ("preview.subtitle", "Form follows function."),
    ("preview.body1", "Typography is the craft of endowing human language with a durable visual form."),
    ("preview.body2", "Modular scale ensures mathematical rhythm."),
    ("preview.quote", "Type is the voice of the page."),
    ("switcher.en", "EN"),
    ("switcher.ru", "RU"),
    ("footer.rights", "All systems operational."),
];

const RU: &[(&str, &str)] = &[
    ("app.title", "ONOD Fonts"),
    ("nav.catalog", "Индекс"),
    ("nav.favorites", "Сохранено"),
    ("nav.compare", "Верстак"),
    ("nav.about", "Манифест"),
    ("page.privacy", "Конфиденциальность"),
    ("page.terms", "Условия"),
    ("page.license", "Лицензия"),
    ("search.placeholder", "Поиск по индексу..."),
    ("preview.placeholder", "Текст превью..."),
    ("filters.title", "Фильтры"),
    ("filters.reset", "Сброс"),
    ("filters.categories", "Классификация"),
    ("filters.platform", "Платформа"),
    ("filters.other", "Other"),
    ("filters.platform.note", "* Библиотека обновляется. Новые платформы скоро будут добавлены."),
    ("filters.languages", "Письменность"),
    ("filters.variable", "Вариативность"),
    ("filters.index", "Индекс"),
    ("styles.available", "Начертаний"),
    ("card.inStack", "В очереди"),
    ("card.addToStack", "В очередь"),
    ("card.stacked", "В СТЕКЕ"),
    ("card.stack", "СТЕК"),
    ("card.viewDetails", "Обзор"),
    ("card.addToFavorites", "В память"),
    ("card.removeFromFavorites", "Стереть"),
    ("card.addToCompare", "Сравнить"),
    ("card.removeFromCompare", "Убрать"),
    ("fonts.label", "Гарнитуры"),
    ("fonts.count", "найдено"),
    ("fonts.notFound", "Совпадений нет"),
    ("status.loading", "Инициализация..."),
    ("details.back", "Назад"),
    ("details.download", "СКАЧАТЬ"),
    ("details.license", "Лицензия"),
    ("details.styles", "Стили"),
    ("details.designer", "Автор"),
    ("details.category", "Класс"),
    ("details.variable", "Вариатив"),
    ("details.specimen", "Спесимен"),
    ("details.foundry", "Студия"),
    ("details.weights", "Веса"),
    ("details.source", "Ресурс"),
    ("details.pair", "Алгоритм Пары"),
    ("details.glyphs", "Глифы"),
    ("details.about", "Данные"),
    ("details.allWeights", "Карта Весов"),
    ("details.uppercase", "Прописные"),
    ("details.lowercase", "Строчные"),
    ("details.numerals", "Цифры"),
    ("details.commercial", "Коммерция"),
    ("details.licenseDesc", "Лицензия {license}. Открыто для цифры и печати."),
    ("details.notFound", "Шрифт не найден"),
    ("back", "Назад"),
    ("share", "Шер"),
    ("compare.title", "Системный Верстак"),
    ("compare.empty", "Верстак пуст. Выберите шрифты."),
    ("compare.clear", "Очистка"),
    ("compare.emptyTitle", "NULL_STATE"),
    ("compare.emptyDesc", "Инициализируйте выбор шрифтов для начала сравнения."),
    ("compare.return", "Вернуться в Индекс"),
    ("compare.sources", "ВВОД"),
    ("compare.export", "Экспорт Конфига"),
    ("compare.roles", "Роли"),
    ("compare.heading", "Уровень-H"),
    ("compare.body", "Уровень-P"),
    ("compare.scale", "Модульная Шкала"),
    ("compare.base", "База"),
    ("compare.ratio", "Ратио"),
    ("compare.active", "Активные Узлы"),
    ("favorites.title", "Коллекция"),
    ("favorites.empty", "Пусто."),
    ("favorites.noItemsTitle", "ПУСТОТА"),
    ("favorites.noItemsDesc", "Коллекция пуста. Отметьте элементы для сохранения."),
    ("favorites.browse", "Доступ к Индексу"),
    ("favorites.collection", "КЭШ"),
    ("favorites.items", "ЮНИТОВ"),
    ("favorites.export", "Экспорт Данных"),
    ("mark.title", "Конструктор Знака"),
    ("mark.generate", "Сгенерировать"),
    ("mark.clear", "Очистить"),
    // Preview copy stays in English in both locales.
    ("preview.title", "Systematic Design."),
    ("preview.subtitle", "Form follows function."),
    ("preview.body1", "Typography is the craft of endowing human language with a durable visual form."),
    ("preview.body2", "Modular scale ensures mathematical rhythm."),
    ("preview.quote", "Type is the voice of the page."),
    ("switcher.en", "EN"),
    ("switcher.ru", "RU"),
    ("footer.rights", "Все системы работают."),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_keys_echo_back() {
        let t = Translator::new(Locale::En);
        assert_eq!(t.t("nav.compare"), "Workbench");
        assert_eq!(t.t("no.such.key"), "no.such.key");
        assert_eq!(Translator::new(Locale::Ru).t("no.such.key"), "no.such.key");
    }

    #[test]
    fn default_locale_is_russian() {
        assert_eq!(Locale::default(), Locale::Ru);
        assert_eq!(Translator::default().t("nav.catalog"), "Индекс");
    }

    #[test]
    fn placeholders_are_filled() {
        let t = Translator::new(Locale::En);
        assert_eq!(
            t.t_with("details.licenseDesc", &[("license", "OFL")]),
            "Licensed under OFL. Open for digital and print usage."
        );
    }

    #[test]
    fn stored_locale_falls_back_on_garbage() {
        let store = MemoryStore::new().with_value(LANGUAGE_KEY, "de");
        assert_eq!(Locale::load(&store), Locale::Ru);
        Locale::En.persist(&store);
        assert_eq!(Locale::load(&store), Locale::En);
    }

    #[test]
    fn both_tables_cover_the_same_keys() {
        let mut en: Vec<&str> = EN.iter().map(|(k, _)| *k).collect();
        let mut ru: Vec<&str> = RU.iter().map(|(k, _)| *k).collect();
        en.sort_unstable();
        ru.sort_unstable();
        assert_eq!(en, ru);
    }
}
