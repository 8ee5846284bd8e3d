use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::fetch::GitHubFetcher;
use crate::form::FormSession;
use urltitle_core::form::StoryForm;
use urltitle_core::provider::Provider;

#[derive(Debug, clap::Parser)]
#[command(name = "title")]
#[command(about = "Derive story titles from URLs")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Derive a title for a single URL
    #[clap(name = "derive")]
    Derive(DeriveOptions),

    /// Read URLs from stdin, one change event per line, against one form
    #[clap(name = "watch")]
    Watch(WatchOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DeriveOptions {
    /// URL of the story
    #[clap(env = "URLTITLE_URL")]
    pub url: String,

    /// Name already typed into the form. A non-empty name is never replaced
    #[arg(long)]
    pub name: Option<String>,

    /// Skip the repository metadata lookup
    #[arg(long)]
    pub no_enrich: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct WatchOptions {
    /// Skip repository metadata lookups
    #[arg(long)]
    pub no_enrich: bool,

    /// Output as JSON, one object per line
    #[arg(long)]
    pub json: bool,
}

/// Form state after a derivation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeriveOutput {
    pub url: String,
    pub provider: Provider,
    pub name: String,
    pub summary: String,
}

impl From<StoryForm> for DeriveOutput {
    fn from(form: StoryForm) -> Self {
        Self {
            provider: Provider::classify(&form.url),
            url: form.url,
            name: form.name,
            summary: form.summary,
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Repository API base: {}", global.github_api);
        eprintln!();
    }

    match app.command {
        Commands::Derive(options) => derive(options, global).await,
        Commands::Watch(options) => watch(options, global).await,
    }
}

async fn derive(options: DeriveOptions, global: crate::Global) -> Result<()> {
    let output = derive_data(
        options.url,
        options.name,
        !options.no_enrich,
        &global.github_api,
    )
    .await?;

    if options.json {
        println!("{}", format_output_json(&output)?);
    } else {
        println!("{}", format_output_text(&output));
    }

    Ok(())
}

/// Derive a title for one URL, awaiting the repository lookup if one starts
///
/// Shared with the MCP `title_derive` tool.
pub async fn derive_data(
    url: String,
    name: Option<String>,
    enrich: bool,
    api_base: &str,
) -> Result<DeriveOutput> {
    let form = StoryForm::with_name(name.unwrap_or_default());
    let mut session = FormSession::new(form, GitHubFetcher::new(), api_base);
    if !enrich {
        session = session.without_enrichment();
    }

    if let Some(handle) = session.on_url_change(&url).await {
        handle
            .await
            .map_err(|e| eyre!("Repository lookup task failed: {e}"))?;
    }

    Ok(session.snapshot().await.into())
}

async fn watch(options: WatchOptions, global: crate::Global) -> Result<()> {
    let mut session = FormSession::new(
        StoryForm::default(),
        GitHubFetcher::new(),
        global.github_api.clone(),
    );
    if options.no_enrich {
        session = session.without_enrichment();
    }

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();
    let mut pending = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .context("Failed to read from stdin")?;

        if bytes_read == 0 {
            break; // EOF
        }

        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("URL changed: {url}");
        }

        if let Some(handle) = session.on_url_change(url).await {
            pending.push(handle);
        }

        let output: DeriveOutput = session.snapshot().await.into();
        print_output(&output, options.json)?;
    }

    if pending.is_empty() {
        return Ok(());
    }

    for handle in pending {
        handle
            .await
            .map_err(|e| eyre!("Repository lookup task failed: {e}"))?;
    }

    if global.verbose {
        eprintln!("All lookups settled");
    }
    let output: DeriveOutput = session.snapshot().await.into();
    print_output(&output, options.json)
}

fn print_output(output: &DeriveOutput, json: bool) -> Result<()> {
    if json {
        // One object per line
        let line =
            serde_json::to_string(output).map_err(|e| eyre!("JSON serialization failed: {e}"))?;
        println!("{line}");
    } else {
        println!("{}", format_output_text(output));
    }
    Ok(())
}

/// Convert derive output to JSON string
pub fn format_output_json(output: &DeriveOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert derive output to formatted text with colors
fn format_output_text(output: &DeriveOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "{}: {}\n",
        "URL".green(),
        output.url.cyan().underline()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Provider".green(),
        output.provider.to_string().bright_black()
    ));
    result.push_str(&format!(
        "{}: {}",
        "Name".green(),
        format!("{:?}", output.name).white().bold()
    ));

    if !output.summary.is_empty() {
        result.push_str(&format!(
            "\n{}: {}",
            "Summary".green(),
            output.summary.bright_white()
        ));
    }

    result
}
