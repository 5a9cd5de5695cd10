use clap::{Parser, Subcommand};
use error::AppError;
use log::LevelFilter;
use webspider::{
    utils::{batch_process_urls, is_valid_url},
    SpiderError, Spider, VersionInfo,
};

mod error;
mod settings;

use settings::ConfigArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the seed URL once per page
    Crawl {
        /// The seed URL
        url: String,

        /// Keep up to `--concurrency` fetches in flight
        #[arg(long)]
        concurrent: bool,
    },

    /// List the page URLs a crawl would visit, without fetching
    Pages {
        /// The seed URL
        url: String,
    },

    /// Validate URLs and print their domains
    Process {
        /// URLs to process, all or nothing
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print the effective crawl limits
    Stats,

    /// Print build information
    Version,
}

#[derive(Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    pub limits: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Crawl { url, concurrent }) => {
            if !is_valid_url(&url) {
                log::warn!("seed does not look like an http(s) URL: {}", url);
            }
            let spider = Spider::new(cli.limits.build_config()?)?;

            let cancel = spider.cancel_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::info!("interrupt received, stopping after the current page");
                    cancel.cancel();
                }
            });

            let summary = if concurrent {
                spider.crawl_concurrent(&url).await?
            } else {
                spider.crawl(&url).await?
            };
            spider.close()?;

            println!(
                "Crawled {} pages: {} succeeded, {} failed{}",
                summary.attempted,
                summary.succeeded,
                summary.failed,
                if summary.cancelled { " (cancelled)" } else { "" }
            );
        }
        Some(Command::Pages { url }) => {
            let spider = Spider::new(cli.limits.build_config()?)?;
            let mut print_page = |page_url: &str, err: Option<&SpiderError>| match err {
                Some(err) => eprintln!("{}", err),
                None => println!("{}", page_url),
            };
            spider
                .crawl_with_callback(&url, Some(&mut print_page))
                .await?;
            spider.close()?;
        }
        Some(Command::Process { urls }) => {
            let records = batch_process_urls(&urls)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Some(Command::Stats) => {
            let spider = Spider::new(cli.limits.build_config()?)?;
            println!("{}", serde_json::to_string_pretty(&spider.stats().to_map())?);
            spider.close()?;
        }
        Some(Command::Version) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&VersionInfo::current().to_map())?
            );
        }
        None => {
            let version = VersionInfo::current();
            println!("Direct Web Spider");
            println!("Version: {}", version.version);

            let spider = Spider::new(cli.limits.build_config()?)?;
            println!("Spider Stats: {}", serde_json::to_string(&spider.stats().to_map())?);
            println!("Version Info: {}", serde_json::to_string(&version.to_map())?);
            spider.close()?;
        }
    }

    Ok(())
}
