use anyhow::Context;
use clap::Parser;
use notion_convert::{Config, DEFAULT_INPUT, FenceMode, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "notion-convert",
    version,
    about = "Convert a design document into Notion-importable markdown",
    long_about = "Convert a design document into Notion-importable markdown.\n\n\
    Headers and feature list items get emoji, code blocks and section labels \
    become callouts, and the document is split into one page per `## ` section.\n\n\
    USAGE EXAMPLES:\n  \
      # Convert the default document in the current directory\n  \
      notion-convert\n\n  \
      # Convert another document and put pages in ./notion\n  \
      notion-convert design.md --out ./notion\n\n  \
      # Only quote fences that close sql/dart blocks\n  \
      notion-convert design.md --track-fences"
)]
struct Cli {
    /// Markdown document to convert
    #[arg(default_value = DEFAULT_INPUT, value_name = "FILE")]
    input: PathBuf,

    /// Output directory for page files and the import guide
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    out: PathBuf,

    /// Path for the whole-document output (default: <input stem>_notion.md)
    #[arg(long, value_name = "FILE")]
    single_output: Option<PathBuf>,

    /// Filename prefix for page files
    #[arg(long, default_value = "notion_page")]
    prefix: String,

    /// Add a table of contents to pages longer than this many lines
    #[arg(long, default_value_t = 50)]
    toc_threshold: usize,

    /// Only quote closing fences of sql/dart blocks
    #[arg(long)]
    track_fences: bool,

    /// Skip the whole-document output
    #[arg(long)]
    no_single: bool,

    /// Skip splitting into pages
    #[arg(long)]
    no_split: bool,

    /// Skip the import guide
    #[arg(long)]
    no_instructions: bool,

    /// Write a JSON manifest of the generated pages
    #[arg(long)]
    manifest: bool,

    /// Dry run (don't write files)
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    println!("🚀 에뷰리띵 플러터 앱 설계서 → Notion 변환기");
    println!("{}", "=".repeat(50));

    let fence_mode = if cli.track_fences {
        FenceMode::Tracked
    } else {
        FenceMode::Lenient
    };

    let mut builder = Config::builder()
        .input_path(cli.input)
        .output_dir(cli.out)
        .page_prefix(cli.prefix)
        .toc_threshold(cli.toc_threshold)
        .fence_mode(fence_mode)
        .single_file(!cli.no_single)
        .split_pages(!cli.no_split)
        .write_instructions(!cli.no_instructions)
        .write_manifest(cli.manifest)
        .dry_run(cli.dry_run);

    if let Some(single_output) = cli.single_output {
        builder = builder.single_output(single_output);
    }

    let config = builder.build()
        .context("Failed to build configuration")?;

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Conversion failed")?;

    if let Some(stats) = stats {
        stats.print_summary();
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("notion_convert=info"),
        1 => EnvFilter::new("notion_convert=debug"),
        _ => EnvFilter::new("notion_convert=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
