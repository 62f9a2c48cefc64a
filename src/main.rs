mod cli;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use sitesearch::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG wins; otherwise info with the HTTP stack quieted down
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper_util=warn,hyper=warn,reqwest=warn,rustls=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Search { term, page } => run_search(config, &term, page).await,
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
            Ok(())
        }
        Commands::Check => run_check(config).await,
    }
}

/// File (or defaults), then environment, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::load_default()?,
    }
    .with_env_overrides();
    if let Some(source) = cli.source { config.data_source = source; }
    if let Some(endpoint) = &cli.endpoint { config.data_endpoint = Some(endpoint.clone()); }
    if let Some(key) = &cli.api_key { config.api_key = Some(key.clone()); }
    if let Some(id) = &cli.resource_id { config.resource_id = Some(id.clone()); }
    if let Some(n) = cli.per_page { config.results_per_page = n; }
    Ok(config.normalized())
}

async fn run_search(config: SearchConfig, term: &str, page: usize) -> Result<()> {
    let widget = SiteSearch::new(config).with_highlighter(Highlighter::ansi());
    widget.load().await;
    widget.input(term);
    widget.go_to_page(page);
    print_view(&widget.view());
    if widget.has_error() {
        bail!("content could not be loaded");
    }
    Ok(())
}

async fn run_check(config: SearchConfig) -> Result<()> {
    let problems = config.validate();
    for p in &problems {
        println!("config: {}", p);
    }
    let widget = SiteSearch::new(config);
    match widget.load().await {
        LoadState::Ready => {
            println!("ok: {} records loaded", widget.len());
            Ok(())
        }
        state => bail!("content not available ({:?}), {} config problem(s)", state, problems.len()),
    }
}

fn print_view(view: &View) {
    match view {
        View::Message(text) => println!("{}", text),
        View::Results { items, controls, page, total_pages } => {
            for item in items {
                println!("{}", item.title);
                if !item.snippet.is_empty() {
                    println!("    {}", item.snippet);
                }
                let mut meta = vec![item.type_label.clone()];
                meta.extend(item.date_label.clone());
                if !item.url.is_empty() {
                    meta.push(item.url.clone());
                }
                println!("    [{}]", meta.join(" | "));
                println!();
            }
            if !controls.is_empty() {
                println!("{}", controls_line(controls));
            }
            println!("page {} of {}", page, total_pages);
        }
    }
}

fn controls_line(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|c| match c {
            PageControl::Previous => "<".to_string(),
            PageControl::Next => ">".to_string(),
            PageControl::Ellipsis => "...".to_string(),
            PageControl::Page { number, active: true } => format!("[{}]", number),
            PageControl::Page { number, .. } => number.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_line_marks_active_page() {
        assert_eq!(controls_line(&sitesearch::page_controls(5, 10)), "< 1 ... 4 [5] 6 ... 10 >");
    }

    #[test]
    fn flags_override_file_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "resultsPerPage = 8\ndataSource = \"json\"\n").unwrap();
        let cli = Cli::parse_from([
            "sitesearch",
            "--config",
            path.to_str().unwrap(),
            "--per-page",
            "3",
            "--endpoint",
            "content.json",
            "search",
            "term",
        ]);
        let cfg = resolve_config(&cli).unwrap();
        assert_eq!(cfg.results_per_page, 3);
        assert_eq!(cfg.data_source, DataSource::Json);
        assert_eq!(cfg.data_endpoint.as_deref(), Some("content.json"));
    }
}
