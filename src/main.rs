//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `docfetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All fetching, decoding and parsing is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use docfetch::initialization::init_logger_with;
use docfetch::{Client, ClientSettings, FetchError, FetchResult, Method, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match fetch_page(&opt).await {
        Ok(result) => {
            if opt.json {
                println!("{}", serde_json::to_string_pretty(&summary_json(&result))?);
            } else {
                print_summary(&result);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("docfetch error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn fetch_page(opt: &Opt) -> Result<FetchResult> {
    let client = build_client(opt)?;
    let method = Method::from_bytes(opt.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", opt.method))?;
    let params = (!opt.params.is_empty()).then(|| opt.params.clone());

    let outcome = client
        .run(method, &opt.url, params, opt.encoding.as_deref())
        .await;
    client.stats().log_summary();

    outcome
        .map_err(describe_failure)
        .with_context(|| format!("Failed to fetch {}", opt.url))
}

fn build_client(opt: &Opt) -> Result<Client> {
    let settings = ClientSettings {
        timeout: Duration::from_secs(opt.timeout_seconds),
        gzip: !opt.no_gzip,
        referer: !opt.no_referer,
        ..Default::default()
    };
    let client = Client::with_settings(settings).context("Failed to initialize HTTP client")?;
    if let Some(name) = &opt.browser {
        if !client.set_browser(name) {
            bail!("Unknown browser '{}'", name);
        }
    }
    Ok(client)
}

fn summary_json(result: &FetchResult) -> serde_json::Value {
    serde_json::json!({
        "document": result.document.document_info(),
        "status": result.response.status_code(),
        "title": result.document.title(),
        "cookies": result.cookies(),
        "content_type": result.response.header("content-type"),
        "body_length": result.body.len(),
    })
}

fn print_summary(result: &FetchResult) {
    let document = &result.document;
    println!("URL:      {}", document.url());
    println!("Status:   {}", result.response.status);
    println!("Charset:  {}", document.encoding().unwrap_or("(none)"));
    if let Some(title) = document.title() {
        println!("Title:    {}", title);
    }
    println!("Body:     {} bytes", result.body.len());
    for (name, value) in result.cookies() {
        println!("Cookie:   {}={}", name, value);
    }
}

/// Flattens a fetch failure into an `anyhow` chain.
///
/// `FetchError` holds the parsed document, which is not `Sync`, so it is
/// reported by value instead of being wrapped.
fn describe_failure(e: FetchError) -> anyhow::Error {
    let mut details = vec![e.category().to_string()];
    if let Some(status) = e.status_code() {
        details.push(format!("status {}", status));
    }
    if let Some(charset) = e.charset() {
        details.push(format!("charset {}", charset));
    }
    if let Some(length) = e.content_length() {
        details.push(format!("content-length {}", length));
    }
    let report = anyhow!("{} ({})", e, details.join(", "));
    match std::error::Error::source(&e) {
        Some(source) => anyhow!("{}", source).context(report.to_string()),
        None => report,
    }
}
