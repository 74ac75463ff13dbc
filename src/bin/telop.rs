use std::{
    io::{BufRead as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "telop", version, about = "Weekly schedule telop generator")]
struct Cli {
    /// Log more (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill a weekly preset with this week's labels and write the image.
    Generate(GenerateArgs),
    /// Draw one telop onto an image.
    Single(SingleArgs),
    /// List font families that can be selected by name.
    Fonts(FontsArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Preset JSON saved from a weekly session.
    preset: PathBuf,

    /// Output image; the format follows the extension.
    output: PathBuf,

    /// Body text for the next day, Monday first. Repeat up to seven times.
    #[arg(long = "body", conflicts_with = "bodies_file")]
    bodies: Vec<String>,

    /// File with one body line per day.
    #[arg(long)]
    bodies_file: Option<PathBuf>,

    /// First day of the week (YYYY-MM-DD). Defaults to the Monday of today.
    #[arg(long)]
    week_start: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct SingleArgs {
    /// Base image.
    #[arg(long)]
    image: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(long)]
    out: PathBuf,

    /// Telop text; embedded newlines start new lines.
    #[arg(long)]
    text: String,

    /// Font file to draw with.
    #[arg(long, conflicts_with = "family", required_unless_present = "family")]
    font: Option<PathBuf>,

    /// Font family resolved through the font catalog.
    #[arg(long)]
    family: Option<String>,

    /// Anchor x in image pixels.
    #[arg(long, default_value_t = 24, allow_hyphen_values = true)]
    x: i32,

    /// Anchor y in image pixels.
    #[arg(long, default_value_t = 24, allow_hyphen_values = true)]
    y: i32,

    #[arg(long, default_value_t = 72)]
    size: u32,

    #[arg(long, default_value = "#ffffff")]
    fill: telop::Rgb8,

    #[arg(long, default_value = "#000000")]
    stroke_fill: telop::Rgb8,

    #[arg(long, default_value_t = 2)]
    stroke_width: u32,

    #[arg(long, default_value_t = 8)]
    line_spacing: u32,
}

#[derive(Args, Debug)]
struct FontsArgs {
    /// Also print the file each family resolves to.
    #[arg(long)]
    paths: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = telop::Settings::from_env();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args, &settings),
        Command::Single(args) => cmd_single(args, &settings),
        Command::Fonts(args) => cmd_fonts(args, &settings),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_generate(args: GenerateArgs, settings: &telop::Settings) -> anyhow::Result<()> {
    let bodies = if let Some(path) = &args.bodies_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read bodies file '{}'", path.display()))?;
        telop::split_week_bodies(&text).to_vec()
    } else if !args.bodies.is_empty() {
        args.bodies
    } else {
        prompt_bodies()?
    };

    let week_start = args
        .week_start
        .unwrap_or_else(|| telop::monday_of(telop::today_in(settings.reference_zone())));

    telop::generate_weekly(&args.preset, &args.output, bodies.as_slice(), week_start)?;
    eprintln!("saved {}", args.output.display());
    Ok(())
}

/// Ask for seven body lines on stdin; end of input leaves the rest blank.
fn prompt_bodies() -> anyhow::Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stderr = std::io::stderr();
    eprintln!("Enter the body text for each day (blank is fine):");
    let mut out = Vec::with_capacity(telop::WEEK_DAYS);
    for i in 0..telop::WEEK_DAYS {
        write!(stderr, "{}: ", i + 1)?;
        stderr.flush()?;
        let line = lines.next().transpose().context("read body line")?;
        out.push(line.unwrap_or_default());
    }
    Ok(out)
}

fn cmd_single(args: SingleArgs, settings: &telop::Settings) -> anyhow::Result<()> {
    let font_path = match (&args.font, &args.family) {
        (Some(path), _) => path.clone(),
        (None, Some(family)) => resolve_family(family, settings)?,
        (None, None) => anyhow::bail!("either --font or --family is required"),
    };

    let style = telop::Style {
        family: args.family.clone(),
        font_path: Some(font_path),
        font_size: args.size,
        fill: args.fill,
        stroke_fill: args.stroke_fill,
        stroke_width: args.stroke_width,
        line_spacing: args.line_spacing,
    };
    let style = telop::RenderStyle::full(&style)?;
    let base = telop::load_base_image(&args.image)?;

    let mut renderer = telop::Renderer::new();
    let anchor = telop::IPoint::new(args.x, args.y);
    let out = telop::render_blocks(
        &mut renderer,
        base,
        &style,
        [(anchor, args.text.as_str())],
    )?;
    ensure_parent_dir(&args.out)?;
    telop::save_surface(&out, &args.out)?;
    eprintln!("saved {}", args.out.display());
    Ok(())
}

fn cmd_fonts(args: FontsArgs, settings: &telop::Settings) -> anyhow::Result<()> {
    use telop::FontResolver as _;

    let catalog = telop::FontCatalog::scan(settings);
    if catalog.is_empty() {
        eprintln!("no fonts found");
        return Ok(());
    }
    for family in catalog.families() {
        match (args.paths, catalog.resolve(family)) {
            (true, Some(path)) => println!("{family}\t{}", path.display()),
            _ => println!("{family}"),
        }
    }
    Ok(())
}

fn resolve_family(family: &str, settings: &telop::Settings) -> anyhow::Result<PathBuf> {
    use telop::FontResolver as _;

    let catalog = telop::FontCatalog::scan(settings);
    catalog
        .resolve(family)
        .ok_or_else(|| telop::TelopError::font_unavailable(format!("unknown family '{family}'")))
        .map_err(Into::into)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
