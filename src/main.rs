use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::{BuildError, Config, ConfigError, SiteBuilder};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Parser)]
#[command(name = "mdsite", version)]
#[command(about = "Generate HTML pages from Markdown files")]
struct Cli {
    /// Log progress at info level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the whole site.
    Build(BuildArgs),
    /// Print the HTML fragment for a single Markdown file.
    Render {
        /// Input Markdown file
        input: PathBuf,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Config file
    #[arg(short, long, default_value = "mdsite.toml")]
    config: PathBuf,

    /// Content directory (overrides config)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Static asset directory (overrides config)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML template (overrides config)
    #[arg(short, long)]
    template: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => build(args),
        Commands::Render { input } => render(input),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn build(args: BuildArgs) -> Result<(), CliError> {
    let mut config = Config::load(&args.config)?;
    if let Some(content) = args.content {
        config.site.content_dir = content;
    }
    if let Some(static_dir) = args.static_dir {
        config.site.static_dir = static_dir;
    }
    if let Some(output) = args.output {
        config.site.output_dir = output;
    }
    if let Some(template) = args.template {
        config.site.template = template;
    }

    let report = SiteBuilder::new(config).build()?;
    println!(
        "Generated {} pages, copied {} static files",
        report.pages.len(),
        report.assets
    );
    Ok(())
}

fn render(input: PathBuf) -> Result<(), CliError> {
    let markdown = fs::read_to_string(&input).map_err(|source| CliError::Read {
        path: input.clone(),
        source,
    })?;

    let page = mdsite::markdown_to_html(&markdown);
    match &page.title {
        Some(title) => tracing::info!(%title, "Rendered page"),
        None => tracing::warn!(input = %input.display(), "No level-1 heading"),
    }
    println!("{}", page.html);
    Ok(())
}
