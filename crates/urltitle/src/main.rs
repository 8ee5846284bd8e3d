use crate::prelude::*;
use clap::Parser;

mod error;
mod fetch;
mod form;
mod mcp;
mod prelude;
mod title;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Derive default story titles from submitted URLs"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "URLTITLE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Base URL of the GitHub REST API used for repository lookups
    #[clap(
        long,
        env = "URLTITLE_GITHUB_API",
        global = true,
        default_value = urltitle_core::github::GITHUB_API_BASE
    )]
    github_api: String,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Derive story titles from URLs
    Title(crate::title::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Title(sub_app) => crate::title::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
