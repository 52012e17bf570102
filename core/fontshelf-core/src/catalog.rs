//! Built-in typeface catalog and lookups

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;

use anyhow::{anyhow, Context, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::font::{slugify, Font};

const WEIGHT_STEPS: [&str; 9] = [
    "100", "200", "300", "400", "500", "600", "700", "800", "900",
];

/// Sources with at least this many fonts get their own filter entry.
pub const MIN_FONTS_FOR_MAIN_SOURCE: usize = 10;

const CYRILLIC_SUPPORTED: &[&str] = &[
    "PT Sans", "PT Serif", "PT Mono", "PT Sans Caption", "PT Serif Caption", "PT Sans Narrow",
    "Golos Text", "Roboto", "Roboto Slab", "Roboto Mono", "Roboto Condensed", "Open Sans",
    "Montserrat", "Montserrat Alternates", "Inter", "Lato", "Ubuntu", "Ubuntu Mono",
    "Ubuntu Condensed", "Merriweather", "Merriweather Sans", "Playfair Display", "Lora", "Nunito",
    "Nunito Sans", "Fira Sans", "Fira Mono", "Fira Code", "Alegreya", "Alegreya Sans",
    "Alegreya SC", "Alegreya Sans SC", "Cormorant", "Cormorant Garamond", "Arimo", "Tinos",
    "Cousine", "Rubik", "Exo 2", "Comfortaa", "Russo One", "Stalinist One", "Yanone Kaffeesatz",
    "Jura", "Tenor Sans", "Bad Script", "Marck Script", "Neucha", "Poiret One", "Philosopher",
    "Didact Gothic", "Ledger", "Scada", "Vollkorn", "Old Standard TT", "Forum", "Cuprum", "Alice",
    "Lobster", "Arvo", "Bebas Neue", "Oswald", "Source Sans Pro", "Source Serif Pro",
    "Source Code Pro", "IBM Plex Sans", "IBM Plex Serif", "IBM Plex Mono", "Manrope", "Jost",
    "Caveat", "Pacifico", "Amatic SC", "Kurale", "Press Start 2P", "Arsenal", "Asap",
    "Asap Condensed", "Bitter", "Literata", "Podkova", "Spectral", "El Messiri", "Rubik Glitch",
    "Rubik Wet Paint", "Noto Sans", "Noto Serif", "JetBrains Mono", "Raleway", "Play",
    "Maven Pro", "Andika", "Sawarabi Gothic", "Sawarabi Mincho", "Yeseva One", "Satoshi",
    "General Sans", "Clash Display", "Cabinet Grotesk", "Switzer", "Sentient", "Boska", "Pally",
    "Ranade", "Excon", "Zodiak",
];

/// `(name, category, weight count, variable)`
type GroupRow = (&'static str, &'static str, usize, bool);

struct Group {
    author: &'static str,
    source: &'static str,
    prefix: &'static str,
    rows: &'static [GroupRow],
}

const GROUPS: &[Group] = &[
    Group {
        author: "ParaType",
        source: "Google Fonts",
        prefix: "pt",
        rows: &[
            ("PT Sans", "sans-serif", 4, false),
            ("PT Serif", "serif", 4, false),
            ("PT Mono", "monospaced", 1, false),
            ("PT Sans Caption", "sans-serif", 2, false),
            ("PT Serif Caption", "serif", 2, false),
            ("PT Sans Narrow", "sans-serif", 2, false),
            ("Golos Text", "sans-serif", 6, true),
        ],
    },
    Group {
        author: "Sorkin Type",
        source: "Google Fonts",
        prefix: "sorkin",
        rows: &[
            ("Merriweather Sans", "sans-serif", 8, true),
            ("Arvo", "serif", 4, false),
            ("Vast Shadow", "display", 1, false),
            ("Gudea", "sans-serif", 3, false),
            ("Kavoon", "display", 1, false),
            ("Metrophobic", "sans-serif", 1, false),
            ("Sarina", "display", 1, false),
            ("Short Stack", "handwriting", 1, false),
            ("Spinnaker", "sans-serif", 1, false),
            ("Stalemate", "handwriting", 1, false),
            ("Supermercado One", "display", 1, false),
        ],
    },
    Group {
        author: "Impallari Type",
        source: "Google Fonts",
        prefix: "impallari",
        rows: &[
            ("Lobster", "display", 1, false),
            ("Cabin", "sans-serif", 4, true),
            ("Dosis", "sans-serif", 7, true),
            ("Quattrocento", "serif", 2, false),
            ("Quattrocento Sans", "sans-serif", 4, false),
            ("Racing Sans One", "display", 1, false),
            ("Kaushan Script", "handwriting", 1, false),
        ],
    },
    Group {
        author: "Etcetera Type Co",
        source: "Google Fonts",
        prefix: "etc",
        rows: &[("Sora", "sans-serif", 8, true)],
    },
    Group {
        author: "Omnibus-Type",
        source: "Google Fonts",
        prefix: "omnibus",
        rows: &[
            ("Chivo", "sans-serif", 9, true),
            ("Chivo Mono", "monospaced", 9, true),
            ("Archivo Narrow", "sans-serif", 9, true),
            ("Asap", "sans-serif", 9, true),
            ("Asap Condensed", "sans-serif", 9, true),
            ("Faustina", "serif", 8, true),
            ("Manual", "sans-serif", 8, true),
            ("Rosario", "sans-serif", 8, true),
            ("Saira", "sans-serif", 9, true),
            ("Saira Condensed", "sans-serif", 9, false),
            ("Saira Extra Condensed", "sans-serif", 9, false),
            ("MuseoModerno", "display", 9, true),
        ],
    },
    Group {
        author: "Huerta Tipográfica",
        source: "Google Fonts",
        prefix: "huerta",
        rows: &[
            ("Alegreya", "serif", 6, true),
            ("Alegreya Sans", "sans-serif", 7, true),
            ("Alegreya SC", "serif", 6, false),
            ("Alegreya Sans SC", "sans-serif", 7, false),
            ("Bitter", "serif", 9, true),
            ("Piazzolla", "serif", 9, true),
            ("Sura", "serif", 2, false),
            ("Lalezar", "display", 1, false),
            ("Mirza", "display", 4, false),
        ],
    },
    Group {
        author: "Arrow Type",
        source: "Google Fonts",
        prefix: "arrow",
        rows: &[
            ("Recursive", "sans-serif", 9, true),
            ("Name Sans", "sans-serif", 9, true),
            ("Shantell Sans", "handwriting", 9, true),
        ],
    },
    Group {
        author: "Google Inc",
        source: "Google Fonts",
        prefix: "early",
        rows: &[
            ("Noto Sans JP", "sans-serif", 4, false),
            ("Noto Serif JP", "serif", 4, false),
            ("Noto Sans KR", "sans-serif", 4, false),
            ("Noto Serif KR", "serif", 4, false),
            ("Noto Sans TC", "sans-serif", 4, false),
            ("Noto Serif TC", "serif", 4, false),
        ],
    },
];

/// Name-only lists; the category is guessed from the name.
struct NameList {
    author: &'static str,
    source: &'static str,
    prefix: &'static str,
    weights: usize,
    variable: bool,
    names: &'static [&'static str],
}

const CLASSICS: &[&str] = &[
    "Pacifico", "Source Sans Pro", "Ubuntu", "Droid Sans", "Oxygen", "Titillium Web",
    "Inconsolata", "Indie Flower", "Vollkorn", "Signika", "Ubuntu Condensed", "Play", "Muli",
    "Cuprum", "Maven Pro", "Poiret One", "Hammersmith One", "Armata", "Nobile", "Molengo",
    "Pontano Sans", "Jura", "Grand Hotel", "Great Vibes", "Sofia", "Alex Brush", "Tangerine",
    "Rochester", "Pinyon Script", "Sacramento", "Parisienne", "Cookie", "Allura", "Arizonia",
    "Bad Script", "Bilbo", "Calligraffitti", "Clicker Script", "Coming Soon",
    "Covered By Your Grace", "Crafty Girls", "Damion", "Delius", "Delius Swash Caps",
    "Eagle Lake", "Euphoria Script", "Felipa", "Fondamento", "Gochi Hand", "Handlee",
    "Homemade Apple", "Italianno", "Kristi", "La Belle Aurore", "Leckerli One", "Marck Script",
    "Merienda", "Neucha", "Niconne", "Petit Formal Script", "Playball", "Quintessential",
    "Rancho", "Redressed", "Rouge Script", "Schoolbell", "Shadows Into Light", "Sunshiney",
    "The Girl Next Door", "Unkempt", "Vibur", "Yellowtail", "Yesteryear", "Zeyada",
];

const NAME_LISTS: &[NameList] = &[
    NameList {
        author: "The League of Moveable Type",
        source: "The League of Moveable Type",
        prefix: "league",
        weights: 4,
        variable: false,
        names: &[
            "League Gothic", "League Spartan", "League Script", "Knewave", "Sniglet", "Raleway",
            "Orbitron", "Prociono", "Goudy Bookletter 1911", "Sorts Mill Goudy", "Linden Hill",
            "Fanwood Text", "Alice",
        ],
    },
    NameList {
        author: "Indian Type Foundry",
        source: "Fontshare",
        prefix: "itf",
        weights: 8,
        variable: true,
        names: &[
            "Satoshi", "General Sans", "Clash Display", "Cabinet Grotesk", "Ranade", "Zodiak",
            "Stardom", "Telma", "Erode", "Melodrama", "Gambetta", "Panchang", "Britney", "Switzer",
            "Sentient", "Author", "Besley", "Boska", "Boxing", "Bromine", "Chubbo", "Chillax",
            "Comico", "Dodi", "Excon", "Fokkol", "Hoover", "Ladi", "Lausanne", "Magro",
            "New Spirit", "Nippo", "Pally", "Plein", "Rowan", "Supreme", "Tabular", "Tanker",
            "Technor", "Amulya", "Array", "Aspekta", "Bonny", "Cal Sans", "Cassandra",
        ],
    },
    NameList {
        author: "Various",
        source: "Google Fonts",
        prefix: "g-misc",
        weights: 4,
        variable: true,
        names: &[
            "Hind", "Kalam", "Poppins", "Rajdhani", "Yantramanav", "Azeret Mono", "Catamaran",
            "Chathura", "Coda", "Darker Grotesque", "Eczar", "Fahkwang", "Frank Ruhl Libre",
            "Glegoo", "Grenze", "Halant", "Hepta Slab", "Instrument Sans", "Karma", "Kumbh Sans",
            "Laila", "Lexend", "Martian Mono", "Monda", "Montserrat", "Mukta", "Newsreader",
            "Plus Jakarta Sans", "Questrial", "Red Hat Display", "Rubik", "Urbanist",
            "Be Vietnam Pro",
        ],
    },
    NameList {
        author: "Various",
        source: "Neo-Pixel",
        prefix: "neopix",
        weights: 1,
        variable: false,
        names: &["Jersey 10", "Jersey 15", "Jersey 20", "Jersey 25", "Jacquard 12", "Tiny5", "Micro 5"],
    },
    NameList {
        author: "Thomas Jockin",
        source: "Hyper-Legibility",
        prefix: "lexend",
        weights: 9,
        variable: true,
        names: &[
            "Lexend Deca", "Lexend Exa", "Lexend Giga", "Lexend Mega", "Lexend Peta",
            "Lexend Tera", "Lexend Zetta",
        ],
    },
];

/// `(name, category, author, source, id prefix, weight count, variable)`
type SingleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    usize,
    bool,
);

const SINGLES: &[SingleRow] = &[
    ("Source Sans 3", "sans-serif", "Paul D. Hunt", "Adobe", "adobe", 9, true),
    ("Source Serif 4", "serif", "Frank Grießhammer", "Adobe", "adobe", 9, true),
    ("Source Code Pro", "monospaced", "Paul D. Hunt", "Adobe", "adobe", 9, true),
    ("Ubuntu Mono", "monospaced", "Dalton Maag", "Canonical", "canonical", 4, false),
    ("Fira Sans", "sans-serif", "Carrois Apostrophe", "Mozilla", "mozilla", 9, true),
    ("Fira Mono", "monospaced", "Carrois Apostrophe", "Mozilla", "mozilla", 9, false),
    ("Red Hat Mono", "monospaced", "MCKL", "Red Hat", "redhat", 9, true),
    ("Atkinson Hyperlegible", "sans-serif", "Braille Institute", "Braille Institute", "braille", 4, false),
    ("Inter", "sans-serif", "Rasmus Andersson", "Rsms", "rsms", 9, true),
    ("Cantarell", "sans-serif", "Dave Crossland", "GNOME", "gnome", 4, false),
    ("Gentium Plus", "serif", "SIL", "SIL International", "sil", 4, false),
    ("STIX Two Text", "serif", "STIPub", "Scientific", "stix", 4, true),
    ("Michroma", "display", "Various", "Sci-Fi / Tech", "scifi", 4, false),
    ("Bruno Ace", "display", "Various", "Sci-Fi / Tech", "scifi", 4, false),
    ("Goldman", "sans-serif", "Jaakkola & Goldman Sachs", "Goldman Sachs", "goldman", 3, false),
    ("Zilla Slab", "serif", "Typotheque", "Mozilla", "mozilla-ext", 5, false),
    ("Share Tech", "sans-serif", "Various", "Drafting", "draft", 3, false),
    ("Lekton", "sans-serif", "Various", "Drafting", "draft", 3, false),
    ("Cutive", "monospaced", "Various", "Typewriter", "typewriter", 2, false),
    ("Special Elite", "monospaced", "Various", "Typewriter", "typewriter", 2, false),
    ("DM Serif Display", "serif", "Colophon Foundry", "DeepMind", "dm", 9, true),
    ("DM Serif Text", "serif", "Colophon Foundry", "DeepMind", "dm", 9, true),
    ("Overpass", "sans-serif", "Delve Fonts", "Transport", "transport", 9, true),
    ("Overpass Mono", "monospaced", "Delve Fonts", "Transport", "transport", 9, true),
    ("Russo One", "display", "Various", "Brutalist", "brutal", 1, false),
    ("Stalinist One", "display", "Various", "Brutalist", "brutal", 1, false),
    ("Plaster", "display", "Various", "Brutalist", "brutal", 1, false),
    ("Koulen", "display", "Various", "Brutalist", "brutal", 1, false),
    ("Arimo", "sans-serif", "Steve Matteson", "Chrome OS", "chrome", 4, false),
    ("Tinos", "serif", "Steve Matteson", "Chrome OS", "chrome", 4, false),
    ("Syncopate", "display", "Various", "Geometric", "geo", 1, false),
    ("Do Hyeon", "sans-serif", "Sandoll", "Asian Industrial", "asia-ind", 1, false),
    ("Gothic A1", "sans-serif", "HanYang I&C", "Asian Industrial", "asia-ind", 9, false),
    ("Nanum Gothic Coding", "monospaced", "Sandoll", "Asian Industrial", "asia-ind", 2, false),
    ("Architects Daughter", "handwriting", "Kimberly Geswein", "Blueprint", "sketch", 1, false),
    ("Reenie Beanie", "handwriting", "Various", "Blueprint", "sketch", 1, false),
    ("Gloria Hallelujah", "handwriting", "Kimberly Geswein", "Blueprint", "sketch", 1, false),
    ("Balsamiq Sans", "handwriting", "Dan Ross", "Wireframe", "flow", 1, false),
    ("Flow Circular", "display", "Dan Ross", "Wireframe", "flow", 1, false),
    ("Bricolage Grotesque", "sans-serif", "Mathieu Réguer", "Trending", "bricolage", 9, true),
    ("Schibsted Grotesk", "sans-serif", "Bakken & Bæck", "Scandinavian", "schibsted", 4, false),
    ("Albert Sans", "sans-serif", "Andreas Rasmussen", "Geometric", "albert", 9, true),
    ("Dela Gothic One", "display", "Artur Schmal", "Poster", "dela", 1, false),
    ("Righteous", "display", "Astigmatic", "Sci-Fi", "righteous", 1, false),
    ("Unica One", "display", "Various", "Retro", "unica", 1, false),
    ("B612", "sans-serif", "PolarSys & Airbus", "Avionics", "airbus", 4, false),
    ("B612 Mono", "monospaced", "PolarSys & Airbus", "Avionics", "airbus", 4, false),
    ("Big Shoulders Display", "display", "Patric King", "Urban", "urban", 9, true),
    ("Big Shoulders Text", "display", "Patric King", "Urban", "urban", 9, true),
    ("Varela Round", "sans-serif", "Joe Prince", "Soft UI", "varela", 1, false),
    ("M PLUS Rounded 1c", "sans-serif", "M+ Fonts", "Soft UI", "mplus", 7, false),
    ("Permanent Marker", "handwriting", "Font Diner", "Marker", "marker", 1, false),
    ("Rock Salt", "handwriting", "Various", "Marker", "marker", 1, false),
    ("Zilla Slab Highlight", "display", "Typotheque", "Tech Slab", "zilla", 2, false),
    ("Black Ops One", "display", "James Grieshaber", "Military", "military", 1, false),
    ("Stardos Stencil", "display", "Vernon Adams", "Military", "military", 2, false),
    ("Quantico", "sans-serif", "MadType", "HUD", "quantico", 4, true),
    ("Rubik Glitch", "display", "Hubert & Fischer", "Glitch", "rubik", 1, false),
    ("Rubik Wet Paint", "display", "Hubert & Fischer", "Liquid", "rubik", 1, false),
    ("Antonio", "sans-serif", "Vernon Adams", "Dashboard", "antonio", 7, false),
    ("Red Hat Text", "sans-serif", "Red Hat", "Enterprise", "redhat", 4, true),
    ("VT323", "monospaced", "Peter Hull", "CRT", "vt323", 1, false),
    ("Silkscreen", "display", "Jason Kottke", "Pixel", "silkscreen", 2, false),
    ("DotGothic16", "sans-serif", "Fontworks", "Dot Matrix", "dot", 1, false),
    ("Syne", "display", "Bonjour Monde", "Art House", "syne", 5, true),
    ("Krona One", "sans-serif", "Yvonne Schüttler", "Low Res", "krona", 1, false),
    ("Public Sans", "sans-serif", "USWDS", "Civic", "public", 9, true),
    ("Merriweather", "serif", "Sorkin Type", "Editorial", "merriweather", 8, true),
    ("Courier Prime", "monospaced", "Quote", "Typewriter", "courier", 4, false),
    ("Cutive Mono", "monospaced", "Vernon Adams", "Typewriter", "cutive", 1, false),
    ("Chakra Petch", "sans-serif", "Cadson Demak", "Square", "chakra", 7, false),
    ("Barlow", "sans-serif", "Jeremy Tribby", "DIN", "barlow", 9, true),
    ("Barlow Condensed", "sans-serif", "Jeremy Tribby", "DIN", "barlow", 9, true),
    ("Barlow Semi Condensed", "sans-serif", "Jeremy Tribby", "DIN", "barlow", 9, false),
    ("Manrope", "sans-serif", "Mikhail Sharanda", "Geometric", "manrope", 7, true),
    ("Jost", "sans-serif", "Indestructible Type", "Geometric", "jost", 9, true),
    ("Space Grotesk", "sans-serif", "Florian Karsten", "Space", "space", 5, true),
    ("Audiowide", "display", "Astigmatic", "Techno", "audio", 1, false),
    ("Press Start 2P", "display", "CodeMan38", "Pixel", "press", 1, false),
    ("Pixelify Sans", "display", "Stefie Justprince", "Pixel", "pixelify", 4, true),
    ("Playfair Display", "serif", "Claus Eggers Sørensen", "Editorial", "playfair", 6, true),
    ("Cinzel", "serif", "Natanael Gama", "Classical", "cinzel", 4, false),
    ("Prata", "serif", "Cyreal", "Elegant", "prata", 1, false),
    ("Noto Sans", "sans-serif", "Google", "Universal", "noto", 9, true),
    ("Noto Serif", "serif", "Google", "Universal", "noto", 9, true),
    ("Alfa Slab One", "display", "JM Solé", "Poster", "alfa", 1, false),
    ("Rokkitt", "serif", "Vernon Adams", "Slab", "rokkitt", 9, true),
    ("Comic Neue", "handwriting", "Craig Rozynski", "Casual", "comic", 2, true),
    ("Bangers", "display", "Vernon Adams", "Comic", "bangers", 1, false),
    ("Open Sans", "sans-serif", "Steve Matteson", "Humanist", "opensans", 9, true),
    ("Lato", "sans-serif", "Łukasz Dziedzic", "Humanist", "lato", 9, true),
    ("Anonymous Pro", "monospaced", "Mark Simonson", "Terminal", "anonymous", 4, false),
    ("Oswald", "sans-serif", "Vernon Adams", "Condensed", "oswald", 7, true),
    ("Anton", "sans-serif", "Vernon Adams", "Impact", "anton", 1, false),
    ("Exo 2", "sans-serif", "Natanael Gama", "Futuristic", "exo", 9, true),
    ("Lora", "serif", "Cyreal", "Calligraphic", "lora", 4, true),
    ("Crimson Text", "serif", "Sebastian Kosch", "Old Style", "crimson", 3, false),
    ("IBM Plex Sans", "sans-serif", "Mike Abbink", "Corporate", "ibm", 9, true),
    ("IBM Plex Mono", "monospaced", "Mike Abbink", "Corporate", "ibm", 7, true),
    ("IBM Plex Serif", "serif", "Mike Abbink", "Corporate", "ibm", 7, true),
    ("DM Sans", "sans-serif", "Colophon Foundry", "Swiss", "dm", 9, true),
    ("DM Mono", "monospaced", "Colophon Foundry", "Swiss", "dm", 3, false),
    ("Work Sans", "sans-serif", "Wei Huang", "Grotesque", "work", 9, true),
    ("Karla", "sans-serif", "Jonny Pinhorn", "Grotesque", "karla", 4, true),
    ("Archivo", "sans-serif", "Omnibus-Type", "Grotesque", "archivo", 9, true),
    ("Archivo Black", "sans-serif", "Omnibus-Type", "Heavy", "archivo", 1, false),
    ("Libre Franklin", "sans-serif", "Impallari Type", "Classic", "franklin", 9, true),
    ("Bebas Neue", "display", "Ryoichi Tsunekawa", "Condensed", "bebas", 1, false),
    ("Six Caps", "sans-serif", "Vernon Adams", "Condensed", "sixcaps", 1, false),
    ("Teko", "sans-serif", "Indian Type Foundry", "Square", "teko", 5, false),
    ("Roboto", "sans-serif", "Christian Robertson", "System", "roboto", 9, true),
    ("Roboto Mono", "monospaced", "Christian Robertson", "System", "roboto", 9, true),
    ("Roboto Serif", "serif", "Greg Gazdowicz", "System", "roboto", 9, true),
    ("Nunito", "sans-serif", "Vernon Adams", "Rounded", "nunito", 9, true),
    ("Quicksand", "sans-serif", "Andrew Paglinawan", "Rounded", "quicksand", 5, true),
    ("Comfortaa", "display", "Johan Aakerlund", "Rounded", "comfortaa", 5, true),
    ("Oxanium", "display", "Severin Meyer", "Futuristic", "oxanium", 7, true),
    ("Tektur", "display", "Adam Jagielski", "Cyberpunk", "tektur", 6, true),
    ("EB Garamond", "serif", "Georg Duffner", "Classic", "garamond", 6, false),
    ("Libre Baskerville", "serif", "Impallari Type", "Classic", "baskerville", 3, false),
    ("Abril Fatface", "display", "Veronika Burian", "Didone", "abril", 1, false),
    ("Yeseva One", "display", "Jovanny Lemonad", "Serif", "yeseva", 1, false),
    ("Share Tech Mono", "monospaced", "Carrois Apostrophe", "Digital", "share", 1, false),
    ("Wallpoet", "display", "Lars Berggren", "Stencil", "wallpoet", 1, false),
    ("Epilogue", "sans-serif", "Etcetera Type", "Variable", "epilogue", 9, true),
    ("Saira Stencil One", "display", "Omnibus-Type", "Stencil", "saira", 1, false),
    ("Caveat", "handwriting", "Impallari Type", "Handwritten", "caveat", 4, true),
    ("Patrick Hand", "handwriting", "Patrick Wagstrom", "Marker", "patrick", 1, false),
    ("Fira Code", "monospaced", "Nikita Prokopov", "Ligatures", "firacode", 5, true),
    ("Outfit", "sans-serif", "Rodrigo Fuenzalida", "Brand", "outfit", 9, true),
    ("Dancing Script", "handwriting", "Impallari Type", "Casual", "dancing", 4, true),
    ("Satisfy", "handwriting", "Sideshow", "Brush", "satisfy", 1, false),
    ("Space Mono", "monospaced", "Colophon Foundry", "Hybrid", "spacemono", 4, true),
    ("Cousine", "monospaced", "Steve Matteson", "Courier", "cousine", 4, true),
    ("Domine", "serif", "Impallari Type", "News", "domine", 4, true),
    ("Fredoka", "sans-serif", "Milena Brandao", "Rounded", "fredoka", 5, true),
    ("Unbounded", "sans-serif", "Polkadot", "Variable", "unbounded", 7, true),
    ("Fjalla One", "sans-serif", "Sorkin Type", "Condensed", "fjalla", 1, false),
    ("Marcellus", "serif", "Astigmatic", "Classic", "marcellus", 1, false),
    ("Cormorant Garamond", "serif", "Christian Thalmann", "Elegant", "cormorant", 5, true),
    ("Spectral", "serif", "Production Type", "Screen", "spectral", 7, true),
    ("Fraunces", "serif", "Undercase", "Uncut / Indie", "uncut", 6, true),
    ("Literata", "serif", "TypeTogether", "Uncut / Indie", "uncut", 6, true),
    ("Castoro", "serif", "Tiro Typeworks", "Uncut / Indie", "uncut", 6, true),
];

/// Hand-curated records that carry their own stylesheet URL.
struct Curated {
    id: &'static str,
    name: &'static str,
    author: &'static str,
    description: &'static str,
    variable: bool,
    category: &'static str,
    languages: &'static [&'static str],
    license: &'static str,
    source: &'static str,
    source_url: &'static str,
    css_url: &'static str,
    weights: &'static [&'static str],
    styles: &'static [&'static str],
    tags: &'static [&'static str],
    css_stack: &'static str,
}

const ALL_WEIGHTS: &[&str] = &WEIGHT_STEPS;

const CURATED: &[Curated] = &[
    Curated {
        id: "gh-mona",
        name: "Mona Sans",
        author: "GitHub",
        description: "Mona Sans is a strong, versatile variable font used across GitHub's marketing and product.",
        variable: true,
        category: "sans-serif",
        languages: &["Latin"],
        license: "OFL",
        source: "GitHub",
        source_url: "https://github.com/mona-sans",
        css_url: "https://cdn.jsdelivr.net/npm/@github/mona-sans",
        weights: &["200", "300", "400", "500", "600", "700", "800", "900"],
        styles: &["Variable"],
        tags: &["sans-serif", "variable", "github", "industrial"],
        css_stack: "'Mona Sans', sans-serif",
    },
    Curated {
        id: "gh-hubot",
        name: "Hubot Sans",
        author: "GitHub",
        description: "Hubot Sans is a robotic, geometric sans-serif with a technical character.",
        variable: true,
        category: "sans-serif",
        languages: &["Latin"],
        license: "OFL",
        source: "GitHub",
        source_url: "https://github.com/hubot-sans",
        css_url: "https://cdn.jsdelivr.net/npm/@github/hubot-sans",
        weights: &["200", "300", "400", "500", "600", "700", "800", "900"],
        styles: &["Variable"],
        tags: &["sans-serif", "variable", "github", "robot"],
        css_stack: "'Hubot Sans', sans-serif",
    },
    Curated {
        id: "pretendard",
        name: "Pretendard",
        author: "Kil Hyung-jin",
        description: "A system-ui replacement for Apple's San Francisco and Inter.",
        variable: true,
        category: "sans-serif",
        languages: &["Latin", "Cyrillic", "Korean"],
        license: "SIL OFL",
        source: "Cactus",
        source_url: "https://github.com/orioncactus/pretendard",
        css_url: "https://cdn.jsdelivr.net/gh/orioncactus/pretendard@v1.3.9/dist/web/static/pretendard.css",
        weights: ALL_WEIGHTS,
        styles: &["Regular", "Bold"],
        tags: &["sans-serif", "system", "clean", "apple-like"],
        css_stack: "'Pretendard', -apple-system, BlinkMacSystemFont, system-ui, Roboto, sans-serif",
    },
    Curated {
        id: "hack-font",
        name: "Hack",
        author: "Source Foundry",
        description: "A typeface designed for source code.",
        variable: false,
        category: "monospaced",
        languages: &["Latin", "Cyrillic"],
        license: "MIT",
        source: "Source Foundry",
        source_url: "https://sourcefoundry.org/hack/",
        css_url: "https://cdn.jsdelivr.net/npm/hack-font",
        weights: &["400", "700"],
        styles: &["Regular", "Bold", "Italic"],
        tags: &["code", "mono", "developer"],
        css_stack: "'Hack', monospace",
    },
    Curated {
        id: "cascadia-code",
        name: "Cascadia Code",
        author: "Microsoft",
        description: "A monospaced font with programming ligatures, designed for the Windows Terminal.",
        variable: true,
        category: "monospaced",
        languages: &["Latin", "Cyrillic"],
        license: "OFL",
        source: "Microsoft",
        source_url: "https://github.com/microsoft/cascadia-code",
        css_url: "https://cdn.jsdelivr.net/npm/@fontsource/cascadia-code",
        weights: &["200", "300", "400", "500", "600", "700"],
        styles: &["Regular", "Italic"],
        tags: &["code", "terminal", "windows", "microsoft"],
        css_stack: "'Cascadia Code', monospace",
    },
    Curated {
        id: "intel-one-mono",
        name: "Intel One Mono",
        author: "Intel",
        description: "An expressive monospaced font family built with clarity and legibility in mind.",
        variable: false,
        category: "monospaced",
        languages: &["Latin"],
        license: "OFL",
        source: "Intel",
        source_url: "https://github.com/intel/intel-one-mono",
        css_url: "https://cdn.jsdelivr.net/npm/intel-one-mono",
        weights: &["400", "500", "700"],
        styles: &["Regular", "Bold", "Italic"],
        tags: &["code", "hardware", "intel", "industrial"],
        css_stack: "'Intel One Mono', monospace",
    },
    Curated {
        id: "cooper-hewitt",
        name: "Cooper Hewitt",
        author: "Chester Jenkins",
        description: "A contemporary sans serif with modified geometric curves and arches.",
        variable: false,
        category: "sans-serif",
        languages: &["Latin"],
        license: "OFL",
        source: "Smithsonian",
        source_url: "https://www.cooperhewitt.org/open-source-at-cooper-hewitt/",
        css_url: "https://cdn.jsdelivr.net/npm/@fontsource/cooper-hewitt",
        weights: &["100", "300", "400", "500", "600", "700", "800"],
        styles: &["Regular", "Italic"],
        tags: &["museum", "design", "geometric", "art"],
        css_stack: "'Cooper Hewitt', sans-serif",
    },
    Curated {
        id: "iosevka",
        name: "Iosevka",
        author: "Belleve Invis",
        description: "Slender monospace sans-serif and slab-serif typeface, built procedurally.",
        variable: false,
        category: "monospaced",
        languages: &["Latin", "Cyrillic", "Japanese", "Chinese"],
        license: "OFL",
        source: "Community",
        source_url: "https://typeof.net/Iosevka/",
        css_url: "https://cdn.jsdelivr.net/npm/@fontsource/iosevka",
        weights: ALL_WEIGHTS,
        styles: &["Regular", "Oblique"],
        tags: &["procedural", "code", "tech", "narrow"],
        css_stack: "'Iosevka', monospace",
    },
    Curated {
        id: "geist-sans",
        name: "Geist Sans",
        author: "Vercel",
        description: "A typeface designed to be invisible. Precision-engineered for the web.",
        variable: true,
        category: "sans-serif",
        languages: &["Latin"],
        license: "OFL",
        source: "Vercel",
        source_url: "https://vercel.com/font",
        css_url: "https://cdn.jsdelivr.net/npm/geist",
        weights: ALL_WEIGHTS,
        styles: &["Variable"],
        tags: &["clean", "modern", "vercel", "interface"],
        css_stack: "'Geist Sans', sans-serif",
    },
    Curated {
        id: "geist-mono",
        name: "Geist Mono",
        author: "Vercel",
        description: "The monospace companion to Geist Sans.",
        variable: true,
        category: "monospaced",
        languages: &["Latin"],
        license: "OFL",
        source: "Vercel",
        source_url: "https://vercel.com/font",
        css_url: "https://cdn.jsdelivr.net/npm/geist",
        weights: ALL_WEIGHTS,
        styles: &["Variable"],
        tags: &["code", "console", "vercel", "mono"],
        css_stack: "'Geist Mono', monospace",
    },
    Curated {
        id: "go-font",
        name: "Go",
        author: "Bigelow & Holmes",
        description: "The font family for the Go programming language.",
        variable: false,
        category: "sans-serif",
        languages: &["Latin"],
        license: "BSD",
        source: "Go Project",
        source_url: "https://go.dev/blog/go-fonts",
        css_url: "https://cdn.jsdelivr.net/npm/@fontsource/go-sans",
        weights: &["400", "500", "700"],
        styles: &["Regular", "Italic"],
        tags: &["google", "golang", "system", "ui"],
        css_stack: "'Go', sans-serif",
    },
    Curated {
        id: "go-mono",
        name: "Go Mono",
        author: "Bigelow & Holmes",
        description: "The monospace font family for the Go programming language.",
        variable: false,
        category: "monospaced",
        languages: &["Latin"],
        license: "BSD",
        source: "Go Project",
        source_url: "https://go.dev/blog/go-fonts",
        css_url: "https://cdn.jsdelivr.net/npm/@fontsource/go-mono",
        weights: &["400", "500", "700"],
        styles: &["Regular", "Italic"],
        tags: &["code", "golang", "mono"],
        css_stack: "'Go Mono', monospace",
    },
    Curated {
        id: "jetbrains-mono-standalone",
        name: "JetBrains Mono",
        author: "JetBrains",
        description: "A typeface for developers. Created to make reading code easier.",
        variable: true,
        category: "monospaced",
        languages: &["Latin", "Cyrillic"],
        license: "OFL",
        source: "JetBrains",
        source_url: "https://www.jetbrains.com/lp/mono/",
        css_url: "https://cdn.jsdelivr.net/npm/jetbrains-mono",
        weights: &["100", "200", "300", "400", "500", "600", "700", "800"],
        styles: &["Variable", "Italic"],
        tags: &["ide", "code", "developer", "jetbrains"],
        css_stack: "'JetBrains Mono', monospace",
    },
    Curated {
        id: "victor-mono",
        name: "Victor Mono",
        author: "Rubens Boy",
        description: "A monospaced font with semi-connected cursive italics and symbol ligatures.",
        variable: false,
        category: "monospaced",
        languages: &["Latin"],
        license: "MIT",
        source: "Indie Coding",
        source_url: "https://rubjo.github.io/victor-mono/",
        css_url: "https://cdn.jsdelivr.net/npm/victor-mono",
        weights: &["100", "200", "300", "400", "500", "600", "700"],
        styles: &["Regular", "Italic"],
        tags: &["code", "cursive", "ligatures"],
        css_stack: "'Victor Mono', monospace",
    },
    Curated {
        id: "julia-mono",
        name: "JuliaMono",
        author: "Cormullion",
        description: "A monospaced font for scientific and technical computing.",
        variable: true,
        category: "monospaced",
        languages: &["Latin", "Greek", "Cyrillic"],
        license: "OFL",
        source: "Indie Coding",
        source_url: "https://juliamono.netlify.app/",
        css_url: "https://cdn.jsdelivr.net/npm/juliamono",
        weights: &["400", "500", "700"],
        styles: &["Regular"],
        tags: &["code", "science", "julia", "math"],
        css_stack: "'JuliaMono', monospace",
    },
];

const MONASPACE: &[(&str, &str, &str)] = &[
    ("Monaspace Neon", "Neo-grotesque", "neon"),
    ("Monaspace Argon", "Humanist", "argon"),
    ("Monaspace Xenon", "Serif", "xenon"),
    ("Monaspace Radon", "Handwriting", "radon"),
    ("Monaspace Krypton", "Mechanical", "krypton"),
];

/// Pick `count` weights from the nine standard steps.
pub fn weights_for(count: usize) -> Vec<String> {
    let picked: Vec<&str> = match count {
        0 | 1 => vec!["400"],
        2 => vec!["400", "700"],
        c if c >= 9 => WEIGHT_STEPS.to_vec(),
        c => {
            let step = 9 / c;
            (0..c)
                .map(|i| WEIGHT_STEPS[(i * step + usize::from(i > 0)).min(8)])
                .collect()
        }
    };
    picked.into_iter().map(str::to_string).collect()
}

/// Guess a category from words in the family name.
pub fn guess_category(name: &str, default: &str) -> String {
    let n = name.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| n.contains(w));

    let category = if has_any(&["serif", "slab", "mincho"]) {
        "serif"
    } else if has_any(&["mono", "code", "terminal"]) {
        "monospaced"
    } else if has_any(&["script", "hand", "brush", "cursive"]) {
        "handwriting"
    } else if has_any(&["display", "one", "shadow", "outline"]) {
        "display"
    } else {
        default
    };
    category.to_string()
}

fn specimen_url(name: &str, source: &str) -> String {
    let dashed = slugify(name);
    match source {
        "Fontshare" => format!("https://www.fontshare.com/fonts/{dashed}"),
        "Velvetyne" => format!("https://velvetyne.fr/fonts/{dashed}/"),
        "The League of Moveable Type" => {
            format!("https://www.theleagueofmoveabletype.com/{dashed}")
        }
        "Font Squirrel" => format!("https://www.fontsquirrel.com/fonts/{dashed}"),
        "Font Library" => format!("https://fontlibrary.org/en/font/{dashed}"),
        "Collletttivo" => "https://collletttivo.it/".to_string(),
        "Open Foundry" => format!(
            "https://open-foundry.com/fonts/{}",
            name.to_lowercase().replace(' ', "_")
        ),
        _ => format!("https://fonts.google.com/specimen/{}", name.replace(' ', "+")),
    }
}

fn css_fallback(category: &str) -> &'static str {
    if category.contains("serif") {
        "serif"
    } else if category.contains("mono") {
        "monospace"
    } else {
        "sans-serif"
    }
}

/// Arguments shared by every generated record.
struct Spec<'a> {
    name: &'a str,
    category: &'a str,
    author: &'a str,
    source: &'a str,
    prefix: &'a str,
    weights: usize,
    variable: bool,
}

fn generated(spec: &Spec<'_>, index: usize) -> Font {
    let Spec {
        name,
        category,
        author,
        source,
        prefix,
        weights,
        variable,
    } = *spec;

    let mut languages = vec!["Latin".to_string()];
    if CYRILLIC_SUPPORTED.contains(&name)
        || author == "ParaType"
        || name.starts_with("PT ")
        || name.contains("Cyrillic")
    {
        languages.push("Cyrillic".to_string());
    }
    if prefix == "early" {
        if name.contains("JP") {
            languages.push("Japanese".to_string());
        }
        if name.contains("KR") {
            languages.push("Korean".to_string());
        }
        if name.contains("SC") || name.contains("TC") {
            languages.push("Chinese".to_string());
        }
    }

    let mut styles = vec!["Regular".to_string()];
    if variable {
        styles.push("Variable".to_string());
    }

    Font {
        id: format!("{prefix}-{index}"),
        name: name.to_string(),
        author: author.to_string(),
        description: format!(
            "{name} is a {category} typeface by {author}, available on {source}."
        ),
        variable,
        categories: vec![category.to_string()],
        languages,
        license: "Open Source".to_string(),
        source: source.to_string(),
        source_url: specimen_url(name, source),
        download_url: None,
        custom_css_url: None,
        weights: weights_for(weights),
        styles,
        tags: vec![
            category.to_string(),
            if variable { "variable" } else { "static" }.to_string(),
            slugify(source),
            slugify(author),
        ],
        css_stack: format!("'{name}', {}", css_fallback(category)),
    }
}

fn curated(entry: &Curated) -> Font {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Font {
        id: entry.id.to_string(),
        name: entry.name.to_string(),
        author: entry.author.to_string(),
        description: entry.description.to_string(),
        variable: entry.variable,
        categories: vec![entry.category.to_string()],
        languages: owned(entry.languages),
        license: entry.license.to_string(),
        source: entry.source.to_string(),
        source_url: entry.source_url.to_string(),
        download_url: None,
        custom_css_url: Some(entry.css_url.to_string()),
        weights: owned(entry.weights),
        styles: owned(entry.styles),
        tags: owned(entry.tags),
        css_stack: entry.css_stack.to_string(),
    }
}

fn monaspace(name: &str, style: &str, slug: &str) -> Font {
    Font {
        id: format!("monaspace-{slug}"),
        name: name.to_string(),
        author: "GitHub Next".to_string(),
        description: format!(
            "Part of the Monaspace supergroup. A {style} monospace font with texture healing."
        ),
        variable: true,
        categories: vec!["monospaced".to_string()],
        languages: vec!["Latin".to_string()],
        license: "OFL".to_string(),
        source: "GitHub Next".to_string(),
        source_url: "https://monaspace.githubnext.com/".to_string(),
        download_url: None,
        custom_css_url: Some("https://cdn.jsdelivr.net/npm/@github/monaspace".to_string()),
        weights: ["200", "300", "400", "500", "600", "700", "800"]
            .iter()
            .map(|w| w.to_string())
            .collect(),
        styles: vec!["Variable".to_string()],
        tags: ["code", "github", "future", "texture-healing"]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        css_stack: format!("'{name}', monospace"),
    }
}

/// Collects records in insertion order, keeping the first font of each name.
#[derive(Default)]
struct Builder {
    fonts: Vec<Font>,
    seen: HashSet<String>,
    next_index: usize,
}

impl Builder {
    fn push(&mut self, font: Font) {
        if self.seen.insert(font.name.clone()) {
            self.fonts.push(font);
        }
    }

    fn generate(&mut self, spec: Spec<'_>) {
        let index = self.next_index;
        self.next_index += 1;
        self.push(generated(&spec, index));
    }
}

fn builtin_fonts() -> Vec<Font> {
    let mut b = Builder::default();

    for group in GROUPS {
        for &(name, category, weights, variable) in group.rows {
            b.generate(Spec {
                name,
                category,
                author: group.author,
                source: group.source,
                prefix: group.prefix,
                weights,
                variable,
            });
        }
    }

    for (i, name) in CLASSICS.iter().enumerate() {
        let category = guess_category(name, "sans-serif");
        b.generate(Spec {
            name,
            category: &category,
            author: "Various Authors",
            source: "Google Fonts",
            prefix: "google",
            weights: if i % 3 == 0 { 1 } else { 4 },
            variable: i % 10 == 0,
        });
    }

    for list in NAME_LISTS {
        for name in list.names {
            let category = guess_category(name, "sans-serif");
            b.generate(Spec {
                name,
                category: &category,
                author: list.author,
                source: list.source,
                prefix: list.prefix,
                weights: list.weights,
                variable: list.variable,
            });
        }
    }

    for entry in CURATED {
        b.push(curated(entry));
    }
    for &(name, style, slug) in MONASPACE {
        b.push(monaspace(name, style, slug));
    }

    for &(name, category, author, source, prefix, weights, variable) in SINGLES {
        b.generate(Spec {
            name,
            category,
            author,
            source,
            prefix,
            weights,
            variable,
        });
    }

    b.fonts
}

/// Sources split the way the filter sidebar lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceGroups {
    pub main: Vec<String>,
    pub other: Vec<String>,
}

/// Value counts per filter dimension.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Facets {
    pub categories: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
    pub sources: BTreeMap<String, usize>,
    pub licenses: BTreeMap<String, usize>,
}

/// Immutable set of fonts with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    fonts: Vec<Font>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Built-in dataset in table order.
    pub fn builtin() -> Self {
        let mut catalog = Self {
            fonts: builtin_fonts(),
            by_id: HashMap::new(),
        };
        catalog.reindex();
        catalog
    }

    /// Built-in dataset shuffled once, as the browsing UI shows it.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut catalog = Self::builtin();
        catalog.fonts.shuffle(rng);
        catalog.reindex();
        catalog
    }

    /// Validate and index a list of fonts.
    pub fn from_fonts(fonts: Vec<Font>) -> Result<Self> {
        for font in &fonts {
            if font.id.trim().is_empty() {
                return Err(anyhow!("font {:?} has an empty id", font.name));
            }
            if font.weights.is_empty() {
                return Err(anyhow!("font {} has no weights", font.id));
            }
            if font.categories.is_empty() {
                return Err(anyhow!("font {} has no categories", font.id));
            }
        }

        let mut catalog = Self {
            fonts,
            by_id: HashMap::new(),
        };
        catalog.reindex();
        if catalog.by_id.len() != catalog.fonts.len() {
            return Err(anyhow!("font ids must be unique"));
        }
        debug!("catalog ready with {} fonts", catalog.fonts.len());
        Ok(catalog)
    }

    /// Load a JSON array of font records.
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let fonts: Vec<Font> =
            serde_json::from_reader(reader).context("parsing catalog JSON")?;
        Self::from_fonts(fonts)
    }

    fn reindex(&mut self) {
        self.by_id = self
            .fonts
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Font> {
        self.by_id.get(id).map(|&i| &self.fonts[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fonts.iter().map(|f| f.id.as_str())
    }

    /// Split sources into main entries and the grouped remainder, in first-seen order.
    pub fn source_groups(&self) -> SourceGroups {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for font in &self.fonts {
            let count = counts.entry(font.source.as_str()).or_insert(0);
            if *count == 0 {
                order.push(&font.source);
            }
            *count += 1;
        }

        let mut groups = SourceGroups::default();
        for source in order {
            if counts[source] >= MIN_FONTS_FOR_MAIN_SOURCE {
                groups.main.push(source.to_string());
            } else {
                groups.other.push(source.to_string());
            }
        }
        groups
    }

    pub fn facets(&self) -> Facets {
        let mut facets = Facets::default();
        for font in &self.fonts {
            for c in &font.categories {
                *facets.categories.entry(c.clone()).or_default() += 1;
            }
            for l in &font.languages {
                *facets.languages.entry(l.clone()).or_default() += 1;
            }
            *facets.sources.entry(font.source.clone()).or_default() += 1;
            *facets.licenses.entry(font.license.clone()).or_default() += 1;
        }
        facets
    }
}
