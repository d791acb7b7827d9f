use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use qqlist::{
    cli,
    config::{self, LoggingConfig},
    error, logging,
    qqmusic::QqMusic,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a playlist link into "Title - Artist" lines
    Resolve(ResolveOptions),

    /// Print the playlist id a link points to
    Id(IdOptions),

    /// Serve the playlist API over HTTP
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Playlist link (web, share, short or details link)
    link: String,

    /// Keep song names verbatim instead of stripping bracketed qualifiers
    #[clap(long)]
    detailed: bool,

    /// Print the song list as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOptions {
    link: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = logging::init_logging(&LoggingConfig::from_env()) {
        error!("Cannot initialize logging. Err: {}", e);
    }

    let client = match QqMusic::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot build QQ Music client. Err: {}", e),
    };

    match cli.command {
        Command::Resolve(opt) => cli::resolve(&client, &opt.link, opt.detailed, opt.json).await,
        Command::Id(opt) => cli::playlist_id(&client, &opt.link).await,
        Command::Serve(opt) => {
            let addr = opt.addr.unwrap_or_else(config::server_addr);
            cli::serve(client, addr).await
        }
        Command::Completions(_) => {}
    }
}
