use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands {
    pub mod categories;
    pub mod configure;
    pub mod list_projects;
    pub mod render_page;
    pub mod session;
}
mod category;
mod config;
mod error;
mod feed;
mod format;
mod github;
mod page;
mod project;

use commands::categories::list_categories;
use commands::configure::configure;
use commands::list_projects::list_projects;
use commands::render_page::render_page;
use config::{default_config_path, load_config, FeedConfig};
use feed::Filter;

#[derive(Parser, Debug)]
#[command(name = "pfeed", about = "portfolio project feed")]
struct Opt {
    /// Account whose public repositories are shown
    #[arg(short = 'a', long = "account", env = "PFEED_ACCOUNT")]
    account: Option<String>,

    /// Configuration file [default: ~/.pfeed.yaml]
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Filter key: "all" or a category tag
    #[arg(short = 'f', long = "filter", default_value = "all")]
    filter: Filter,
    /// Number of "load more" clicks after the first page
    #[arg(short = 'm', long = "more", default_value_t = 0)]
    more: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the configuration file
    #[command(name = "configure")]
    Configure {
        /// Account name
        #[arg(long = "account")]
        account: String,
        /// API base URL
        #[arg(long = "api-url")]
        api_url: Option<String>,
        /// Access token (prompted for when omitted)
        #[arg(long = "token")]
        token: Option<String>,
        /// Do not prompt for a token
        #[arg(long = "no-token")]
        no_token: bool,
    },

    /// List projects as a table
    #[command(name = "list")]
    List(ViewArgs),

    /// Render the projects section as HTML
    #[command(name = "render")]
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Write to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Show how many projects each filter selects
    #[command(name = "categories")]
    Categories {},
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opt = Opt::parse();

    match opt.cmd {
        Command::Configure {
            account,
            api_url,
            token,
            no_token,
        } => {
            let path = match opt.config {
                Some(p) => p,
                None => default_config_path()?,
            };
            configure(&path, &account, api_url, token, !no_token)?;
        }
        Command::List(view) => {
            let config = feed_config(opt.config.as_deref(), opt.account)?;
            config.check_filter(&view.filter)?;
            list_projects(&config, view.filter, view.more).await?;
        }
        Command::Render { view, output } => {
            let config = feed_config(opt.config.as_deref(), opt.account)?;
            config.check_filter(&view.filter)?;
            render_page(&config, view.filter, view.more, output.as_deref()).await?;
        }
        Command::Categories {} => {
            let config = feed_config(opt.config.as_deref(), opt.account)?;
            list_categories(&config).await?;
        }
    }

    io::stdout().flush()?;
    Ok(())
}

fn feed_config(path: Option<&Path>, account: Option<String>) -> Result<FeedConfig> {
    let mut config = load_config(path)?;
    if let Some(account) = account {
        config.account = account;
    }
    log::debug!("feed for {} from {}", config.account, config.api_url);
    Ok(config)
}
