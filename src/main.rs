use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use feedline::app::App;
use feedline::config::{self, Config};
use feedline::storage::ChannelStore;

#[derive(Parser, Debug)]
#[command(name = "feedline", about = "Print the latest entries of your RSS feeds", version)]
struct Args {
    /// Channel list file (overrides the config file)
    #[arg(long, value_name = "FILE", global = true)]
    channels: Option<PathBuf>,

    /// Config file (defaults to ~/.config/feedline/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print entries without colors or text styles
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Subscribe to a feed
    Add {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Unsubscribe from a feed
    Remove {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// List subscribed feeds
    List,
    /// Remove every subscription
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the news on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // The home directory is only consulted for paths that fall back to defaults
    let config_path = config::config_path(args.config.clone(), config::config_dir)?;
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let channels_path = config.channels_path(args.channels.clone(), config::config_dir)?;
    tracing::debug!(channels = %channels_path.display(), "Using channel file");

    let use_color = config.color && !args.no_color && std::env::var_os("NO_COLOR").is_none();
    let app = App::new(config, ChannelStore::new(channels_path), use_color);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        None => {
            app.show_news(&mut out).await?;
        }
        Some(Command::Add { url }) => {
            app.add_channel(&url, &mut out)?;
        }
        Some(Command::Remove { url }) => {
            app.remove_channel(&url, &mut out)?;
        }
        Some(Command::List) => app.list_channels(&mut out)?,
        Some(Command::Clear { yes }) => {
            let stdin = std::io::stdin();
            app.clear_channels(yes, &mut stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
