//! URL scraping: fetch a page and reduce it to readable text.

use crate::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html};
use std::future::Future;
use url::Url;

/// Elements whose content is never text for the reader.
const SKIPPED: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "title", "tr", "ul",
];

/// Raw HTML bytes downloaded per byte of text budget. Markup shrinks a
/// great deal when reduced to text, plain bodies do not.
const HTML_BYTES_PER_TEXT_BYTE: usize = 8;

/// Fetches a URL and returns its text.
pub trait Scrape {
    /// Fetch `url`, whose text may take up to `limit` bytes.
    ///
    /// Failures are [`Error::SourceUnavailable`]. A body too large for
    /// `limit` may fail early with [`Error::BudgetExceeded`]; callers still
    /// check the length of the returned text.
    fn scrape(&self, url: &Url, limit: usize) -> impl Future<Output = Result<String>> + Send;
}

/// Scraper backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpScraper {
    client: reqwest::Client,
}

impl HttpScraper {
    /// Scraper with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scraper sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Scrape for HttpScraper {
    async fn scrape(&self, url: &Url, limit: usize) -> Result<String> {
        let unavailable = |reason: String| Error::SourceUnavailable {
            url: url.to_string(),
            reason,
        };

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("scrape of {url} returned {status}");
            return Err(unavailable(format!("HTTP {status}")));
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("html"));
        let ceiling = if is_html {
            limit.saturating_mul(HTML_BYTES_PER_TEXT_BYTE)
        } else {
            limit
        };
        let exceeded = || Error::BudgetExceeded { limit };
        if response.content_length().is_some_and(|len| len > ceiling as u64) {
            return Err(exceeded());
        }

        let mut raw = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| unavailable(e.to_string()))?
        {
            if raw.len() + chunk.len() > ceiling {
                tracing::debug!("abandoned {url} after {} bytes", raw.len());
                return Err(exceeded());
            }
            raw.extend_from_slice(&chunk);
        }
        tracing::debug!("scraped {} bytes from {url}", raw.len());

        let body = String::from_utf8_lossy(&raw);
        Ok(if is_html {
            html_to_text(&body)
        } else {
            body.into_owned()
        })
    }
}

/// Reduce an HTML document to its visible text, one block per line.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect(document.root_element(), &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if SKIPPED.contains(&name) {
                continue;
            }
            let block = BLOCKS.contains(&name);
            if block {
                out.push('\n');
            }
            collect(child, out);
            if block {
                out.push('\n');
            }
        }
    }
}
