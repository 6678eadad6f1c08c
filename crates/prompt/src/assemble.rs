//! Ordered, size-bounded prompt assembly.

use crate::{Error, HttpScraper, Result, Scrape, read_file, read_stdin, read_url};
use tokio::io::AsyncRead;
use url::Url;

/// Prompt byte budget: 65 536 tokens at roughly four bytes per token.
pub const MAX_INPUT_BYTES: usize = 65_536 * 4;

/// Builds prompts from a system prompt, stdin and file or URL arguments.
#[derive(Debug, Clone)]
pub struct Assembler<S = HttpScraper> {
    scraper: S,
    budget: usize,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Assembler with the HTTP scraper and [`MAX_INPUT_BYTES`].
    pub fn new() -> Self {
        Self::with_scraper(HttpScraper::new())
    }
}

impl<S: Scrape> Assembler<S> {
    /// Assembler fetching URLs through `scraper`.
    pub fn with_scraper(scraper: S) -> Self {
        Self {
            scraper,
            budget: MAX_INPUT_BYTES,
        }
    }

    /// Replace the byte budget.
    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Assemble a prompt.
    ///
    /// The system prompt comes first, then stdin when given, then each
    /// argument in order followed by a blank line. An argument naming an
    /// existing path is read as a file even if it also parses as a URL.
    pub async fn assemble<R>(
        &self,
        system_prompt: &str,
        stdin: Option<R>,
        args: &[String],
    ) -> Result<String>
    where
        R: AsyncRead + Unpin,
    {
        let budget = self.budget;
        let exceeded = || Error::BudgetExceeded { limit: budget };
        let rebudget = |e: Error| match e {
            Error::BudgetExceeded { .. } => exceeded(),
            other => other,
        };

        let mut prompt = String::from(system_prompt);
        if prompt.len() > budget {
            return Err(exceeded());
        }

        if let Some(stdin) = stdin {
            let text = read_stdin(stdin, budget - prompt.len())
                .await
                .map_err(rebudget)?;
            prompt.push_str(&text);
            if prompt.len() > budget {
                return Err(exceeded());
            }
        }

        for arg in args {
            let remaining = budget.saturating_sub(prompt.len());
            let text = if tokio::fs::try_exists(arg).await.unwrap_or(false) {
                read_file(arg, remaining).await
            } else if let Some(url) = web_url(arg) {
                read_url(&self.scraper, &url, remaining).await
            } else {
                Err(Error::NotFound(arg.clone()))
            };
            prompt.push_str(&text.map_err(rebudget)?);
            prompt.push_str("\n\n");
            if prompt.len() > budget {
                return Err(exceeded());
            }
            tracing::debug!("appended {arg}, prompt is {} bytes", prompt.len());
        }

        if prompt.is_empty() {
            return Err(Error::EmptyPrompt);
        }
        Ok(prompt)
    }
}

/// Assemble a prompt with the default HTTP scraper and the given budget.
pub async fn assemble<R>(
    system_prompt: &str,
    stdin: Option<R>,
    args: &[String],
    budget: usize,
) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    Assembler::new()
        .budget(budget)
        .assemble(system_prompt, stdin, args)
        .await
}

fn web_url(arg: &str) -> Option<Url> {
    Url::parse(arg)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
