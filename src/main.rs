use anyhow::Result;
use clap::Parser;
use ghfolio::{
    commands::generate,
    orchestrator::FetchOptions,
    portfolio::{DEFAULT_FEATURED_COUNT, DEFAULT_LANGUAGE_LIMIT},
    render::{OutputFormat, RenderOptions},
};
use std::path::PathBuf;
use std::time::Duration;

/// ghfolio - GitHub portfolio generator
///
/// Fetch a GitHub user's profile and repositories from a portfolio backend
/// and render them as a portfolio page.
///
/// Examples:
///   ghfolio generate octocat                 # Markdown page on stdout
///   ghfolio generate octocat -o octocat.md   # Write to a file
#[derive(Parser, Debug)]
#[command(author, version = env!("GHFOLIO_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Portfolio backend root URL (defaults to http://127.0.0.1:8000)
    #[arg(
        long = "api-url",
        env = "GHFOLIO_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a portfolio for a GitHub user
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// GitHub username
    #[arg(value_name = "USERNAME")]
    pub handle: String,

    /// Give up on the backend after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not store a snapshot of the fetched data on the backend
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write the document to PATH instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Maximum number of languages in the skills section
    #[arg(long, value_name = "N", default_value_t = DEFAULT_LANGUAGE_LIMIT)]
    pub languages: usize,

    /// Number of featured repositories
    #[arg(long, value_name = "N", default_value_t = DEFAULT_FEATURED_COUNT)]
    pub featured: usize,
}

impl GenerateArgs {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout.map(Duration::from_secs),
            persist: !self.no_save,
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            language_limit: self.languages,
            featured_count: self.featured,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = ghfolio::runtime::RealRuntime;

    match cli.command {
        Commands::Generate(args) => {
            generate(
                runtime,
                &args.handle,
                cli.api_url,
                args.fetch_options(),
                args.render_options(),
                args.output,
            )
            .await?
        }
    }
    Ok(())
}
