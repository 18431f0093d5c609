use anyhow::Result;
use clap::Parser;
use codium_site::commands::{self, Config, SiteOptions};
use std::path::PathBuf;

/// codium-site - VSCodium site data
///
/// Fetches the latest VSCodium releases and the upstream documentation,
/// and turns them into download links, rendered pages and navigation data.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   codium-site release                      # Show the latest stable release
///   codium-site download linux x64 deb       # Print a download link
///   codium-site docs show index              # Render the documentation index
///   codium-site export ./public/data         # Write all site data as JSON
#[derive(Parser, Debug)]
#[command(author, version = env!("CODIUM_SITE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Cache directory (defaults to ./cache; also via CODIUM_SITE_CACHE_DIR)
    #[arg(
        long = "cache-dir",
        env = "CODIUM_SITE_CACHE_DIR",
        value_name = "PATH",
        global = true
    )]
    pub cache_dir: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Development mode: reuse cached release data
    #[arg(long, env = "CODIUM_SITE_DEV", global = true)]
    pub dev: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the latest release and its downloads
    Release(ReleaseArgs),

    /// Print the download URL for a platform, architecture and installer
    Download(DownloadArgs),

    /// Documentation pages
    #[command(subcommand)]
    Docs(DocsCommands),

    /// Write release and documentation data as JSON files
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReleaseArgs {
    /// Release channel: stable or insider
    #[arg(long, short = 'q', default_value = "stable")]
    pub quality: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// windows, macos or linux
    pub platform: String,

    /// x64, arm64, arm32, ppc64, riscv64, loong64 or s390x
    pub arch: String,

    /// Installer type (e.g. UserInstaller, msi, dmg, deb, rpm, tar.gz, AppImage, zip, cli).
    /// Defaults to the platform's preferred installer.
    pub installer: Option<String>,

    /// Release channel: stable or insider
    #[arg(long, short = 'q', default_value = "stable")]
    pub quality: String,
}

#[derive(clap::Subcommand, Debug)]
enum DocsCommands {
    /// List documentation pages in navigation order
    List(DocsListArgs),

    /// Render one documentation page
    Show(DocsShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct DocsListArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct DocsShowArgs {
    /// Page slug (file name without .md)
    pub slug: String,

    /// Print the whole page as JSON
    #[arg(long, conflicts_with = "toc")]
    pub json: bool,

    /// Print the table of contents instead of the HTML
    #[arg(long)]
    pub toc: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output directory
    #[arg(value_name = "DIR")]
    pub out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = codium_site::runtime::RealRuntime;

    let options = SiteOptions {
        cache_dir: cli.cache_dir,
        api_url: cli.api_url,
        dev: cli.dev,
    };
    let config = Config::new(runtime, options)?;

    match cli.command {
        Commands::Release(args) => commands::release(&config, &args.quality, args.json).await?,
        Commands::Download(args) => {
            commands::download(
                &config,
                &args.quality,
                &args.platform,
                &args.arch,
                args.installer.as_deref(),
            )
            .await?
        }
        Commands::Docs(DocsCommands::List(args)) => commands::docs_list(&config, args.json).await?,
        Commands::Docs(DocsCommands::Show(args)) => {
            commands::docs_show(&config, &args.slug, args.json, args.toc).await?
        }
        Commands::Export(args) => commands::export(&config, &args.out_dir).await?,
    }
    Ok(())
}
