//! Command execution.

use crate::Settings;
use anyhow::{Context as _, Result, bail};
use model::{Client, Context};
use prompt::{Assembler, HttpScraper, MAX_INPUT_BYTES, read_url};
use std::io::IsTerminal;
use url::Url;

/// Assemble a prompt behind `system_prompt` and send it to the configured
/// model. Stdin is read only when it is not a terminal.
pub async fn query(settings: &Settings, system_prompt: &str, args: &[String]) -> Result<String> {
    let stdin = (!std::io::stdin().is_terminal()).then(tokio::io::stdin);
    let prompt = Assembler::new()
        .assemble(system_prompt, stdin, args)
        .await
        .context("error reading prompt")?;

    let provider = model::resolve_provider(&settings.model)?;
    let mut client = model::new_client(provider)
        .with_context(|| format!("error creating client for provider {provider}"))?;

    let ctx = match settings.timeout {
        Some(timeout) => Context::with_timeout(timeout),
        None => Context::background(),
    };
    tracing::debug!(
        "querying {} ({provider}) with {} prompt bytes",
        settings.model,
        prompt.len()
    );
    let answer = client
        .query_text(&ctx, &prompt, &settings.model, settings.options)
        .await;
    client.close();
    answer.with_context(|| format!("error querying model {}", settings.model))
}

/// Fetch each URL and return its text, one page per block.
pub async fn scrape(urls: &[String]) -> Result<String> {
    let scraper = HttpScraper::new();
    let mut out = String::new();
    for arg in urls {
        let url = Url::parse(arg).with_context(|| format!("invalid URL {arg}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("unsupported URL scheme in {arg}");
        }
        let remaining = MAX_INPUT_BYTES.saturating_sub(out.len());
        let text = read_url(&scraper, &url, remaining).await?;
        out.push_str(&text);
        out.push_str("\n\n");
        if out.len() > MAX_INPUT_BYTES {
            bail!(prompt::Error::BudgetExceeded {
                limit: MAX_INPUT_BYTES
            });
        }
    }
    Ok(out)
}

/// The registry listing, one `provider: model` line per model.
pub fn models() -> String {
    let width = model::models()
        .iter()
        .map(|entry| entry.provider.as_str().len())
        .max()
        .unwrap_or(0);
    let mut out = String::from("Supported Providers and Models:\n");
    for entry in model::models() {
        out.push_str(&format!(
            "   {:<width$}: {}\n",
            entry.provider.as_str(),
            entry.name
        ));
    }
    out
}
