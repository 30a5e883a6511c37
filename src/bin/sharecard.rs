use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sharecard", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one image per session.
    Generate(GenerateArgs),
    /// Print the layout descriptor of one session as JSON.
    Describe(DescribeArgs),
    /// Render a layout descriptor JSON file.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct EngineArgs {
    /// Engine config JSON (`output`, `template`, optional `asset_root`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background template image.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Base directory for relative image and font paths.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Sessions JSON: an object mapping session id to session record.
    #[arg(long)]
    sessions: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,

    /// Directory of pre-fetched avatars named after the speaker slug.
    #[arg(long)]
    avatars: Option<PathBuf>,

    /// Style table JSON; defaults to the built-in card design.
    #[arg(long)]
    styles: Option<PathBuf>,

    /// Render sessions in parallel.
    #[arg(long)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct DescribeArgs {
    /// Sessions JSON: an object mapping session id to session record.
    #[arg(long)]
    sessions: PathBuf,

    /// Session id to describe.
    #[arg(long)]
    session: String,

    /// Directory of pre-fetched avatars named after the speaker slug.
    #[arg(long)]
    avatars: Option<PathBuf>,

    /// Style table JSON; defaults to the built-in card design.
    #[arg(long)]
    styles: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Layout descriptor JSON.
    #[arg(long)]
    layout: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Describe(args) => cmd_describe(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn engine_config(args: &EngineArgs) -> anyhow::Result<sharecard::EngineConfig> {
    let base = match &args.config {
        Some(path) => Some(sharecard::EngineConfig::from_json_file(path)?),
        None => None,
    };

    let template = args
        .template
        .clone()
        .or_else(|| base.as_ref().map(|c| c.template.clone()))
        .context("missing --template (or `template` in --config)")?;
    let output = args
        .output
        .clone()
        .or_else(|| base.as_ref().map(|c| c.output.clone()))
        .context("missing --output (or `output` in --config)")?;
    let asset_root = args
        .assets
        .clone()
        .or_else(|| base.and_then(|c| c.asset_root));

    Ok(sharecard::EngineConfig {
        output,
        template,
        asset_root,
    })
}

fn styles(path: Option<&Path>) -> anyhow::Result<sharecard::StyleTable> {
    Ok(match path {
        Some(p) => sharecard::StyleTable::from_json_file(p)?,
        None => sharecard::StyleTable::default(),
    })
}

/// Resolved avatar paths end up in layout descriptors, where relative paths would be read
/// against the asset root instead of the working directory.
fn resolver(avatars: Option<PathBuf>) -> anyhow::Result<sharecard::DirectoryAvatarResolver> {
    let dir = avatars.unwrap_or_else(|| PathBuf::from("avatars"));
    let dir = std::path::absolute(&dir)
        .with_context(|| format!("resolve avatar dir '{}'", dir.display()))?;
    Ok(sharecard::DirectoryAvatarResolver::new(dir))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = engine_config(&args.engine)?;
    let styles = styles(args.styles.as_deref())?;
    let mut sessions = sharecard::load_sessions(&args.sessions)?;
    let resolver = resolver(args.avatars)?;
    let engine = sharecard::CompositionEngine::new(config);

    let summary = sharecard::generate_images(
        &engine,
        &mut sessions,
        &resolver,
        &styles,
        sharecard::RenderThreading {
            parallel: args.parallel,
        },
    )?;

    for outcome in &summary.outcomes {
        match &outcome.status {
            sharecard::SessionStatus::Rendered(r) if r.skipped.is_empty() => {
                println!("ok      {} -> {}", outcome.session_id, r.path.display());
            }
            sharecard::SessionStatus::Rendered(r) => {
                println!(
                    "partial {} -> {} ({} element(s) skipped)",
                    outcome.session_id,
                    r.path.display(),
                    r.skipped.len()
                );
            }
            sharecard::SessionStatus::Failed(msg) => {
                println!("failed  {}: {msg}", outcome.session_id);
            }
        }
    }

    let failed = summary.failed().count();
    println!("{} rendered, {failed} failed", summary.succeeded().count());
    if failed > 0 {
        anyhow::bail!("{failed} session(s) failed");
    }
    Ok(())
}

fn cmd_describe(args: DescribeArgs) -> anyhow::Result<()> {
    let styles = styles(args.styles.as_deref())?;
    let sessions = sharecard::load_sessions(&args.sessions)?;
    let mut session = sessions
        .get(&args.session)
        .cloned()
        .with_context(|| {
            format!("no session '{}' in '{}'", args.session, args.sessions.display())
        })?;

    sharecard::resolve_speakers(&mut session, &resolver(args.avatars)?);
    let layout = sharecard::build_layout(&session, &styles);
    println!("{}", layout.to_json_pretty()?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = engine_config(&args.engine)?;
    let json = std::fs::read_to_string(&args.layout)
        .with_context(|| format!("read layout '{}'", args.layout.display()))?;
    let layout = sharecard::LayoutDescriptor::from_json_str(&json)?;

    let outcome = sharecard::CompositionEngine::new(config).create_image(&layout)?;
    for s in &outcome.skipped {
        eprintln!("skipped {}: {}", s.element, s.reason);
    }
    eprintln!("wrote {}", outcome.path.display());
    Ok(())
}
