//! fontshelf CLI

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fontshelf_core::app::{App, Command as PaletteCommand};
use fontshelf_core::catalog::{Catalog, Facets};
use fontshelf_core::clipboard::{copy_with_fallback, CopyOutcome, NoClipboard};
use fontshelf_core::collections::Toggle;
use fontshelf_core::details::FontDetails;
use fontshelf_core::font::Font;
use fontshelf_core::i18n::Locale;
use fontshelf_core::mark::{glyph_keys, MarkBuilder, STROKE_DELAY};
use fontshelf_core::notice::Notice;
use fontshelf_core::output::{write_json_pretty, write_ndjson};
use fontshelf_core::query::{parse_name_patterns, parse_value_list, FilterState};
use fontshelf_core::scale::{Ratio, Workbench, STEP_NAMES};
use fontshelf_core::search::Pangram;
use fontshelf_core::storage::JsonFileStore;
use fontshelf_core::stylesheet::render_link;

pub mod server;

/// CLI entrypoint for fontshelf.
#[derive(Debug, Parser)]
#[command(
    name = "fontshelf",
    about = "Browse, filter and compare open typefaces"
)]
pub struct Cli {
    /// State file holding favorites, comparison and language
    #[arg(long = "state", global = true, value_hint = ValueHint::FilePath)]
    state: Option<PathBuf>,

    /// Load fonts from a JSON array instead of the built-in catalog
    #[arg(long = "dataset", global = true, value_hint = ValueHint::FilePath)]
    dataset: Option<PathBuf>,

    /// Shuffle the catalog with this seed
    #[arg(long = "seed", global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter the catalog
    Find(FindArgs),
    /// Value counts for every filter dimension
    Facets(FacetsArgs),
    /// Detail view for one font
    Show(ShowArgs),
    /// Manage favorites
    #[command(subcommand)]
    Fav(FavAction),
    /// Manage the comparison stack
    #[command(subcommand)]
    Compare(CompareAction),
    /// Modular type scale for the compared fonts
    Workbench(WorkbenchArgs),
    /// Stylesheet links needed to preview fonts
    Stylesheets(StylesheetArgs),
    /// Draw a MarkBuilder glyph
    Mark(MarkArgs),
    /// Quick find and palette commands
    Quick(QuickArgs),
    /// Show or change the interface language
    Lang(LangArgs),
    /// Translate a key in the current language
    T(TranslateArgs),
    /// List preview sample texts
    Pangrams,
    /// Serve the catalog over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct FindArgs {
    /// Case-insensitive text matched against name and author
    #[arg(short = 'q', long = "search")]
    search: Option<String>,

    /// Categories to admit (any match)
    #[arg(short = 'c', long = "categories", value_delimiter = ',', value_hint = ValueHint::Other)]
    categories: Vec<String>,

    /// Languages to admit (any match)
    #[arg(short = 'l', long = "languages", value_delimiter = ',', value_hint = ValueHint::Other)]
    languages: Vec<String>,

    /// Sources to admit (any match)
    #[arg(short = 's', long = "sources", value_delimiter = ',', value_hint = ValueHint::Other)]
    sources: Vec<String>,

    /// Admit every source outside the main group
    #[arg(long = "other-sources", action = ArgAction::SetTrue)]
    other_sources: bool,

    /// Licenses to admit (any match)
    #[arg(short = 'L', long = "licenses", value_delimiter = ',', value_hint = ValueHint::Other)]
    licenses: Vec<String>,

    /// Regex patterns that must match the font name
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Only include variable fonts
    #[arg(short = 'v', long = "variable", action = ArgAction::SetTrue)]
    variable: bool,

    /// Print every match instead of the first window
    #[arg(long = "all", action = ArgAction::SetTrue)]
    all: bool,

    /// Extra scroll batches to load after the first window
    #[arg(long = "more", default_value_t = 0)]
    more: usize,

    /// Sample text shown in column output
    #[arg(long = "pangram", value_parser = parse_pangram)]
    pangram: Option<Pangram>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Args)]
struct FacetsArgs {
    /// Emit JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Font id
    id: String,

    /// Emit JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum FavAction {
    /// Add or remove a font
    Toggle { id: String },
    /// List favorite fonts
    List(OutputArgs),
}

#[derive(Debug, Subcommand)]
enum CompareAction {
    /// Add or remove a font (at most three)
    Toggle { id: String },
    /// List compared fonts
    List(OutputArgs),
    /// Empty the comparison stack
    Clear,
}

#[derive(Debug, Args)]
struct WorkbenchArgs {
    /// Existing query string, e.g. "h=1&b=0&base=18&ratio=1.333"
    #[arg(long = "query", default_value = "")]
    query: String,

    /// Index of the heading font among the compared fonts
    #[arg(long = "heading")]
    heading: Option<usize>,

    /// Index of the body font among the compared fonts
    #[arg(long = "body")]
    body: Option<usize>,

    /// Base size in pixels
    #[arg(long = "base")]
    base: Option<f64>,

    /// Scale ratio
    #[arg(long = "ratio")]
    ratio: Option<f64>,

    /// Print the tailwind.config.js snippet
    #[arg(long = "config", action = ArgAction::SetTrue)]
    config: bool,

    /// Print a share link based on this page URL
    #[arg(long = "share", value_hint = ValueHint::Url)]
    share: Option<String>,

    /// List the named ratio presets
    #[arg(long = "ratios", action = ArgAction::SetTrue)]
    ratios: bool,

    /// Emit JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Args)]
struct StylesheetArgs {
    /// Font ids; defaults to the fonts the catalog window shows first
    ids: Vec<String>,

    /// Print <link> tags instead of URLs
    #[arg(long = "html", action = ArgAction::SetTrue)]
    html: bool,
}

#[derive(Debug, Args)]
struct MarkArgs {
    /// Letter to draw (see --list); random when omitted
    #[arg(short = 'g', long = "glyph")]
    glyph: Option<char>,

    /// Print every intermediate frame with the stroke delay
    #[arg(long = "animate", action = ArgAction::SetTrue)]
    animate: bool,

    /// List the available glyphs
    #[arg(long = "list", action = ArgAction::SetTrue, conflicts_with_all = ["glyph", "animate"])]
    list: bool,
}

#[derive(Debug, Args)]
struct QuickArgs {
    /// Text to look up
    query: String,

    /// Run the first palette command whose label matches
    #[arg(long = "run", action = ArgAction::SetTrue)]
    run: bool,
}

#[derive(Debug, Args)]
struct LangArgs {
    /// New language (en|ru); prints the current one when omitted
    code: Option<String>,
}

#[derive(Debug, Args)]
struct TranslateArgs {
    /// Key such as "nav.catalog"
    key: String,

    /// Placeholder values as name=value
    #[arg(short = 'a', long = "arg", value_parser = parse_placeholder)]
    args: Vec<(String, String)>,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let mut app = open_app(&cli)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Find(args) => run_find(&mut app, &args, &mut handle),
        Command::Facets(args) => run_facets(&app, &args, &mut handle),
        Command::Show(args) => run_show(&app, &args, &mut handle),
        Command::Fav(action) => run_fav(&mut app, &action, &mut handle),
        Command::Compare(action) => run_compare(&mut app, &action, &mut handle),
        Command::Workbench(args) => run_workbench(&app, &args, &mut handle),
        Command::Stylesheets(args) => run_stylesheets(&mut app, &args, &mut handle),
        Command::Mark(args) => run_mark(&args, cli.seed, &mut handle),
        Command::Quick(args) => run_quick(&mut app, &args, &mut handle),
        Command::Lang(args) => run_lang(&mut app, &args, &mut handle),
        Command::T(args) => {
            let t = app.translator();
            let pairs: Vec<(&str, &str)> = args
                .args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            writeln!(handle, "{}", t.t_with(&args.key, &pairs))?;
            Ok(())
        }
        Command::Pangrams => {
            for pangram in Pangram::ALL {
                writeln!(handle, "{:<10} {}", pangram.key(), pangram.text())?;
            }
            Ok(())
        }
        Command::Serve(args) => {
            drop(handle);
            let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
            runtime.block_on(server::serve(&args.bind, app))
        }
    }
}

fn open_app(cli: &Cli) -> Result<App> {
    let catalog = load_catalog(cli.dataset.as_ref(), cli.seed)?;
    let state_path = resolve_state_path(&cli.state)?;
    debug!("using state file {}", state_path.display());
    let store = JsonFileStore::open(&state_path)?;
    Ok(App::new(catalog, Box::new(store)))
}

fn load_catalog(dataset: Option<&PathBuf>, seed: Option<u64>) -> Result<Catalog> {
    if let Some(path) = dataset {
        let file =
            File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
        return Catalog::from_json_reader(io::BufReader::new(file));
    }
    Ok(match seed {
        Some(seed) => Catalog::shuffled(&mut StdRng::seed_from_u64(seed)),
        None => Catalog::builtin(),
    })
}

/// `--state`, then `FONTSHELF_STATE`, then the user config directory.
fn resolve_state_path(cli_path: &Option<PathBuf>) -> Result<PathBuf> {
    resolve_state_path_with(cli_path, |key| env::var_os(key))
}

/// `--state`, then `FONTSHELF_STATE`, then the XDG config dir, then `~/.config`.
fn resolve_state_path_with(
    cli_path: &Option<PathBuf>,
    var: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path.clone());
    }
    let non_empty = |key: &str| var(key).filter(|raw| !raw.is_empty());
    if let Some(raw) = non_empty("FONTSHELF_STATE") {
        return Ok(PathBuf::from(raw));
    }
    if let Some(raw) = non_empty("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(raw).join("fontshelf").join("state.json"));
    }
    let home = var("HOME")
        .or_else(|| var("USERPROFILE"))
        .ok_or_else(|| anyhow!("cannot locate a home directory; pass --state"))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("fontshelf")
        .join("state.json"))
}

fn build_filter(args: &FindArgs, app: &App) -> Result<FilterState> {
    let name_patterns = parse_name_patterns(&args.name_patterns)?;
    let mut filter = FilterState::new()
        .with_search(args.search.clone().unwrap_or_default())
        .with_categories(parse_value_list(&args.categories))
        .with_languages(parse_value_list(&args.languages))
        .with_sources(parse_value_list(&args.sources))
        .with_licenses(parse_value_list(&args.licenses))
        .with_name_patterns(name_patterns)
        .require_variable(args.variable);
    if args.other_sources {
        filter.toggle_other_sources(&app.catalog().source_groups());
    }
    Ok(filter)
}

fn run_find(app: &mut App, args: &FindArgs, mut w: impl Write) -> Result<()> {
    let filter = build_filter(args, app)?;
    app.update_filter(|state| *state = filter);

    let fonts: Vec<Font> = if args.all {
        app.filtered_fonts().into_iter().cloned().collect()
    } else {
        for _ in 0..args.more {
            if !app.load_more() {
                break;
            }
        }
        app.visible_fonts().into_iter().cloned().collect()
    };

    let total = app.filtered_fonts().len();
    if !args.all && app.has_more() {
        eprintln!("showing {} of {total} fonts (use --all or --more)", fonts.len());
    }
    if total == 0 {
        eprintln!("{}", app.translator().t("fonts.notFound"));
    }

    let sample = args.pangram.map(Pangram::text);
    write_fonts(&fonts, &args.output, sample, &mut w)
}

fn write_fonts(
    fonts: &[Font],
    output: &OutputArgs,
    sample: Option<&str>,
    mut w: impl Write,
) -> Result<()> {
    let use_color = use_color(output.color);
    if output.ndjson {
        write_ndjson(fonts, &mut w)?;
    } else if output.json {
        write_json_pretty(fonts, &mut w)?;
    } else if output.columns {
        write_columns(fonts, &mut w, use_color, sample)?;
    } else {
        write_plain(fonts, &mut w, use_color)?;
    }
    Ok(())
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    }
}

fn write_plain(fonts: &[Font], mut w: impl Write, color: bool) -> Result<()> {
    for font in fonts {
        let id = apply_color(&font.id, color, AnsiColor::Cyan);
        writeln!(w, "{id}\t{}", font.name)?;
    }
    Ok(())
}

fn write_columns(
    fonts: &[Font],
    mut w: impl Write,
    color: bool,
    sample: Option<&str>,
) -> Result<()> {
    let rows: Vec<(String, String, String)> = fonts
        .iter()
        .map(|f| {
            let summary = format!(
                "{} · {} · {} weights{}",
                f.primary_category(),
                f.source,
                f.weights.len(),
                if f.variable { " var" } else { "" },
            );
            (f.id.clone(), f.name.clone(), summary)
        })
        .collect();

    let id_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);
    let name_width = rows
        .iter()
        .map(|r| r.1.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 48);

    for (id, name, summary) in rows {
        let padded_id = format!("{:<id_width$}", id);
        let padded_name = format!("{:<name_width$}", name);
        let rendered_id = apply_color(&padded_id, color, AnsiColor::Cyan);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_summary = apply_color(&summary, color, AnsiColor::Green);

        match sample {
            Some(text) => writeln!(
                w,
                "{rendered_id}  {rendered_name}  {rendered_summary}  {text}"
            )?,
            None => writeln!(w, "{rendered_id}  {rendered_name}  {rendered_summary}")?,
        }
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
    Red,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
        AnsiColor::Red => "31",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

/// Notices go to stderr so stdout stays machine-readable.
fn report(notice: &Notice) {
    let color = io::stderr().is_terminal();
    let rendered = if notice.is_error() {
        apply_color(&notice.message, color, AnsiColor::Red)
    } else {
        notice.message.clone()
    };
    eprintln!("{rendered}");
}

fn run_facets(app: &App, args: &FacetsArgs, mut w: impl Write) -> Result<()> {
    let facets = app.catalog().facets();
    let groups = app.catalog().source_groups();
    if args.json {
        let value = serde_json::json!({ "facets": facets, "sourceGroups": groups });
        serde_json::to_writer_pretty(&mut w, &value)?;
        writeln!(w)?;
        return Ok(());
    }
    write_facets(&facets, &mut w)?;
    writeln!(w, "main sources: {}", groups.main.join(", "))?;
    writeln!(w, "other sources: {}", groups.other.join(", "))?;
    Ok(())
}

fn write_facets(facets: &Facets, mut w: impl Write) -> Result<()> {
    let dimensions = [
        ("category", &facets.categories),
        ("language", &facets.languages),
        ("source", &facets.sources),
        ("license", &facets.licenses),
    ];
    for (label, counts) in dimensions {
        for (value, count) in counts {
            writeln!(w, "{label:<9} {value:<24} {count:>4}")?;
        }
    }
    Ok(())
}

fn run_show(app: &App, args: &ShowArgs, mut w: impl Write) -> Result<()> {
    let t = app.translator();
    let details = FontDetails::lookup(app.catalog(), &args.id, &t)
        .ok_or_else(|| anyhow!("{}: {}", t.t("details.notFound"), args.id))?;

    if args.json {
        serde_json::to_writer_pretty(&mut w, &details)?;
        writeln!(w)?;
        return Ok(());
    }

    let font = details.font;
    writeln!(w, "{} ({})", font.name, font.id)?;
    writeln!(w, "{}: {}", t.t("details.designer"), font.author)?;
    writeln!(w, "{}", font.description)?;
    writeln!(w, "{}: {}", t.t("details.license"), details.license_text)?;
    writeln!(w, "source: {} <{}>", font.source, font.source_url)?;
    if let Some(url) = &font.download_url {
        writeln!(w, "download: {url}")?;
    }
    writeln!(w, "categories: {}", font.categories.join(", "))?;
    writeln!(w, "languages: {}", font.languages.join(", "))?;
    writeln!(w, "weights: {}", details.weight_map.join(" "))?;
    writeln!(w, "css: font-family: {};", font.css_stack)?;
    if let Some(pair) = details.pairing {
        writeln!(w, "{}: {} ({})", t.t("details.pair"), pair.name, pair.id)?;
    }
    writeln!(w, "{}", details.glyphs.uppercase)?;
    writeln!(w, "{}", details.glyphs.lowercase)?;
    writeln!(w, "{}", details.glyphs.numerals)?;
    writeln!(w, "{}", details.glyphs.symbols)?;
    Ok(())
}

fn run_fav(app: &mut App, action: &FavAction, mut w: impl Write) -> Result<()> {
    match action {
        FavAction::Toggle { id } => finish_toggle(app.toggle_favorite(id)),
        FavAction::List(output) => {
            let fonts: Vec<Font> = app.favorite_fonts().into_iter().cloned().collect();
            if fonts.is_empty() {
                eprintln!("{}", app.translator().t("favorites.empty"));
            }
            write_fonts(&fonts, output, None, &mut w)
        }
    }
}

fn run_compare(app: &mut App, action: &CompareAction, mut w: impl Write) -> Result<()> {
    match action {
        CompareAction::Toggle { id } => finish_toggle(app.toggle_compare(id)),
        CompareAction::List(output) => {
            let fonts: Vec<Font> = app.compare_fonts().into_iter().cloned().collect();
            if fonts.is_empty() {
                eprintln!("{}", app.translator().t("compare.empty"));
            }
            write_fonts(&fonts, output, None, &mut w)
        }
        CompareAction::Clear => {
            report(&app.clear_compare());
            Ok(())
        }
    }
}

/// Rejected toggles surface as command errors.
fn finish_toggle((toggle, notice): (Toggle, Notice)) -> Result<()> {
    if toggle == Toggle::Rejected {
        return Err(anyhow!(notice.message));
    }
    report(&notice);
    Ok(())
}

fn workbench_for(app: &App, args: &WorkbenchArgs) -> Workbench {
    let mut bench = app.workbench(&args.query);
    if let Some(heading) = args.heading {
        bench.heading = heading;
    }
    if let Some(body) = args.body {
        bench.body = body;
    }
    if let Some(base) = args.base.filter(|b| b.is_finite() && *b > 0.0) {
        bench.base = base;
    }
    if let Some(ratio) = args.ratio.filter(|r| r.is_finite() && *r > 0.0) {
        bench.ratio = ratio;
    }
    bench
}

fn run_workbench(app: &App, args: &WorkbenchArgs, mut w: impl Write) -> Result<()> {
    if args.ratios {
        writeln!(w, "{}", ratio_table())?;
        return Ok(());
    }

    let bench = workbench_for(app, args);
    let fonts = app.compare_fonts();
    let sizes = bench.sizes();

    if let Some(page) = &args.share {
        let link = bench.share_url(page)?;
        let outcome = copy_with_fallback(&NoClipboard, &link, "Link copied");
        print_copy(&outcome, &mut w)?;
        return Ok(());
    }

    if args.config {
        let config = bench.tailwind_config(&fonts);
        let outcome = copy_with_fallback(&NoClipboard, &config, "Config copied");
        print_copy(&outcome, &mut w)?;
        return Ok(());
    }

    if args.json {
        let value = serde_json::json!({
            "workbench": bench,
            "ratioLabel": bench.ratio_label(),
            "sizes": sizes,
            "heading": bench.heading_font(&fonts).map(|f| &f.id),
            "body": bench.body_font(&fonts).map(|f| &f.id),
        });
        serde_json::to_writer_pretty(&mut w, &value)?;
        writeln!(w)?;
        return Ok(());
    }

    if fonts.is_empty() {
        eprintln!("{}", app.translator().t("compare.empty"));
    }
    let label = bench
        .ratio_label()
        .map(str::to_string)
        .unwrap_or_else(|| format!("custom {}", bench.ratio));
    writeln!(w, "base {}px, ratio {label}", bench.base)?;
    if let Some(font) = bench.heading_font(&fonts) {
        writeln!(w, "heading: {}", font.name)?;
    }
    if let Some(font) = bench.body_font(&fonts) {
        writeln!(w, "body: {}", font.name)?;
    }
    for (name, size) in STEP_NAMES.iter().zip(sizes) {
        writeln!(w, "{name:<4} {size:>4}px")?;
    }
    Ok(())
}

/// The CLI has no clipboard, so copies always fall back to printing.
fn print_copy(outcome: &CopyOutcome, mut w: impl Write) -> Result<()> {
    match outcome {
        CopyOutcome::Copied(notice) => report(notice),
        CopyOutcome::Fallback { text, notice } => {
            debug!("clipboard unavailable: {}", notice.message);
            writeln!(w, "{text}")?;
        }
    }
    Ok(())
}

fn run_stylesheets(app: &mut App, args: &StylesheetArgs, mut w: impl Write) -> Result<()> {
    let links = if args.ids.is_empty() {
        app.plan_visible_stylesheets()
    } else {
        if let Some(missing) = args.ids.iter().find(|id| !app.catalog().contains(id)) {
            return Err(anyhow!(
                "{}: {missing}",
                app.translator().t("details.notFound")
            ));
        }
        app.plan_stylesheets(&args.ids)
    };
    for link in &links {
        if args.html {
            writeln!(w, "{}", render_link(link))?;
        } else {
            writeln!(w, "{}", link.href)?;
        }
    }
    Ok(())
}

fn run_mark(args: &MarkArgs, seed: Option<u64>, mut w: impl Write) -> Result<()> {
    if args.list {
        let keys: String = glyph_keys().into_iter().collect();
        writeln!(w, "{keys}")?;
        return Ok(());
    }

    let mut builder = MarkBuilder::new();
    let glyph = match args.glyph {
        Some(key) => {
            builder.generate_glyph(key)?;
            key.to_ascii_uppercase()
        }
        None => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            builder.generate(&mut rng)
        }
    };

    if args.animate {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("starting tokio runtime")?;
        runtime.block_on(animate(&mut builder, &mut w))?;
    } else {
        // Jump straight to the finished glyph.
        builder.advance(STROKE_DELAY * 64);
    }

    writeln!(w, "{glyph}")?;
    writeln!(w, "{}", builder.render_ascii())?;
    Ok(())
}

async fn animate(builder: &mut MarkBuilder, mut w: impl Write) -> Result<()> {
    while builder.pending_strokes() > 0 {
        writeln!(w, "{}\n", builder.render_ascii())?;
        w.flush()?;
        tokio::time::sleep(STROKE_DELAY).await;
        builder.advance(STROKE_DELAY);
    }
    Ok(())
}

fn run_quick(app: &mut App, args: &QuickArgs, mut w: impl Write) -> Result<()> {
    let needle = args.query.trim().to_lowercase();
    let commands: Vec<PaletteCommand> = PaletteCommand::ALL
        .into_iter()
        .filter(|c| needle.is_empty() || c.label().to_lowercase().contains(&needle))
        .collect();

    if args.run {
        let command = commands
            .first()
            .copied()
            .ok_or_else(|| anyhow!("no command matches {:?}", args.query))?;
        app.run_command(command);
        writeln!(w, "{} -> {}", command.label(), app.route().path())?;
        return Ok(());
    }

    for font in app.quick_find(&args.query) {
        writeln!(w, "{}\t{}\t{}", font.id, font.name, font.author)?;
    }
    for command in commands {
        writeln!(w, ">\t{}", command.label())?;
    }
    Ok(())
}

fn run_lang(app: &mut App, args: &LangArgs, mut w: impl Write) -> Result<()> {
    if let Some(code) = &args.code {
        let locale: Locale = code.parse()?;
        app.set_locale(locale);
    }
    writeln!(w, "{}", app.locale())?;
    Ok(())
}

fn parse_pangram(raw: &str) -> Result<Pangram, String> {
    Pangram::from_key(raw.trim()).ok_or_else(|| {
        let keys: Vec<&str> = Pangram::ALL.iter().map(|p| p.key()).collect();
        format!("unknown pangram {raw:?}; expected one of {}", keys.join(", "))
    })
}

fn parse_placeholder(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

fn ratio_table() -> String {
    Ratio::ALL
        .iter()
        .map(|r| format!("{:<6} {}", r.value(), r.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
