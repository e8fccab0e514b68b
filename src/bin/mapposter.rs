use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mapposter", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a poster from a spec and an Overpass JSON response.
    Render(RenderArgs),
    /// Print poster/fetch bounds and the Overpass query for a spec.
    Query(QueryArgs),
    /// List built-in themes.
    Themes(ThemesArgs),
    /// Suggest swatches around a color.
    Palette(PaletteArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Poster spec JSON; defaults are used when omitted.
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Overpass API response (JSON with an `elements` array).
    #[arg(long)]
    osm: PathBuf,

    /// Output path; a generated name in the current directory when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// `png` or `pdf`; inferred from `--out` when omitted.
    #[arg(long)]
    format: Option<String>,
}

#[derive(Parser, Debug)]
struct QueryArgs {
    #[arg(long)]
    spec: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ThemesArgs {
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct PaletteArgs {
    /// Seed color, e.g. `#aabbcc`.
    #[arg(long)]
    color: String,

    /// Theme whose palette tops up the suggestions.
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Query(args) => cmd_query(args),
        Command::Themes(args) => cmd_themes(args),
        Command::Palette(args) => cmd_palette(args),
    }
}

fn load_spec(path: Option<&Path>) -> anyhow::Result<mapposter::PosterSpec> {
    let Some(path) = path else {
        return Ok(mapposter::PosterSpec::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read spec '{}'", path.display()))?;
    Ok(mapposter::PosterSpec::from_json(&json)?)
}

fn load_fonts(spec: &mapposter::PosterSpec, root: &Path) -> anyhow::Result<mapposter::FontBook> {
    let mut fonts = mapposter::FontBook::new();
    for font in &spec.fonts {
        let path = if font.path.is_absolute() {
            font.path.clone()
        } else {
            root.join(&font.path)
        };
        let bytes =
            std::fs::read(&path).with_context(|| format!("read font '{}'", path.display()))?;
        fonts.insert(font.family.clone(), bytes)?;
    }
    Ok(fonts)
}

fn output_format(args: &RenderArgs) -> anyhow::Result<mapposter::DocumentFormat> {
    if let Some(f) = &args.format {
        return Ok(mapposter::DocumentFormat::parse(f)?);
    }
    match args.out.as_deref().and_then(Path::extension) {
        Some(ext) => Ok(mapposter::DocumentFormat::parse(&ext.to_string_lossy())?),
        None => Ok(mapposter::DocumentFormat::Png),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = load_spec(args.spec.as_deref())?;
    let validated = spec.validate()?;
    let format = output_format(&args)?;

    let spec_root = args
        .spec
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    let fonts = load_fonts(&spec, spec_root)?;
    if fonts.is_empty() {
        tracing::warn!("no fonts configured; poster text will be skipped");
    }

    let osm = std::fs::read_to_string(&args.osm)
        .with_context(|| format!("read overpass json '{}'", args.osm.display()))?;
    let map_data = mapposter::parse_overpass_payload(&osm)?;

    let themes = mapposter::ThemeRegistry::builtin()?;
    let req = validated.render_request(map_data, &themes)?;
    let mut backend = mapposter::CpuBackend::new(fonts);
    let poster = mapposter::render_poster(&req, &mut backend)?;

    let page = mapposter::PageSize {
        width_cm: validated.size.width_cm,
        height_cm: validated.size.height_cm,
    };
    let doc = mapposter::export_document(&poster, format, page)?;

    let out = args.out.clone().unwrap_or_else(|| {
        let name = if validated.typography.city.is_empty() {
            validated.display_name.as_str()
        } else {
            validated.typography.city.as_str()
        };
        PathBuf::from(mapposter::poster_filename(
            name,
            &validated.theme_id,
            format.extension(),
        ))
    });
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &doc.bytes)
        .with_context(|| format!("write {} '{}'", format.extension(), out.display()))?;

    let stats = poster.stats;
    eprintln!(
        "wrote {} ({}x{} px; {} roads, {} water, {} parks, {} buildings)",
        out.display(),
        doc.size.width,
        doc.size.height,
        stats.roads,
        stats.water,
        stats.parks,
        stats.buildings
    );
    Ok(())
}

fn cmd_query(args: QueryArgs) -> anyhow::Result<()> {
    let validated = load_spec(args.spec.as_deref())?.validate()?;
    let bounds = validated.poster_bounds();
    let json = serde_json::to_string_pretty(&bounds).context("serialize bounds")?;
    println!("{json}");
    println!();
    println!("{}", validated.overpass_query());
    Ok(())
}

fn cmd_themes(args: ThemesArgs) -> anyhow::Result<()> {
    let themes = mapposter::ThemeRegistry::builtin()?;
    let options = themes.options();
    if args.json {
        let json = serde_json::to_string_pretty(&options).context("serialize themes")?;
        println!("{json}");
        return Ok(());
    }
    for opt in options {
        let marker = if opt.id == themes.default_id() { "*" } else { " " };
        println!(
            "{marker} {:<16} {:<18} {}",
            opt.id,
            opt.name,
            opt.palette.join(" ")
        );
    }
    Ok(())
}

fn cmd_palette(args: PaletteArgs) -> anyhow::Result<()> {
    let palette = match &args.theme {
        Some(id) => {
            let themes = mapposter::ThemeRegistry::builtin()?;
            mapposter::theme_palette(&themes.get(id))
        }
        None => Vec::new(),
    };
    let choices = mapposter::build_dynamic_color_choices(&args.color, &palette);
    if choices.suggested.is_empty() {
        anyhow::bail!("'{}' is not a hex color and no palette was given", args.color);
    }
    let json = serde_json::to_string_pretty(&choices).context("serialize swatches")?;
    println!("{json}");
    Ok(())
}
