//! sqirvy command line interface.
//!
//! Reads a prompt from stdin and any file or URL arguments, sends it to an
//! LLM and writes the answer to stdout, so it composes in shell pipelines.

use clap::{Args, Parser, Subcommand};
use model::Options;
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::{EnvFilter, fmt};
pub use config::Config;

mod config;
pub mod run;

/// Model used when neither the flags nor the config file name one.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// Temperature used when neither the flags nor the config file set one.
pub const DEFAULT_TEMPERATURE: f32 = 50.0;

/// Query LLMs from the command line.
#[derive(Debug, Parser)]
#[command(name = "sqirvy", version, about)]
pub struct App {
    /// Model to query
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Temperature, 0 to 100
    #[arg(short, long, global = true)]
    pub temperature: Option<f32>,

    /// Response token ceiling (defaults to the model's limit)
    #[arg(long, global = true)]
    pub max_tokens: Option<usize>,

    /// Give up on the query after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Config file (default: ./.sqirvy/config.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (use -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send an arbitrary query
    Query(Inputs),
    /// Ask for a plan
    Plan(Inputs),
    /// Ask for source code
    Code(Inputs),
    /// Ask for a code review
    Review(Inputs),
    /// Print the text of web pages
    Scrape {
        /// URLs to fetch
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// List supported models and providers
    Models,
}

/// Prompt sources appended after stdin.
#[derive(Debug, Clone, Args)]
pub struct Inputs {
    /// Files or URLs, in order
    pub args: Vec<String>,
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Model to query.
    pub model: String,
    /// Query options.
    pub options: Options,
    /// Query timeout.
    pub timeout: Option<Duration>,
}

impl Command {
    /// The embedded system prompt for query commands.
    pub fn system_prompt(&self) -> Option<&'static str> {
        match self {
            Self::Query(_) => Some(include_str!("prompts/query.md")),
            Self::Plan(_) => Some(include_str!("prompts/plan.md")),
            Self::Code(_) => Some(include_str!("prompts/code.md")),
            Self::Review(_) => Some(include_str!("prompts/review.md")),
            Self::Scrape { .. } | Self::Models => None,
        }
    }
}

impl App {
    /// Merge the flags over `config`.
    pub fn settings(&self, config: &Config) -> Settings {
        let temperature = self
            .temperature
            .or(config.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);
        Settings {
            model: self
                .model
                .clone()
                .or_else(|| config.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            options: Options {
                max_tokens: self.max_tokens.or(config.max_tokens),
                ..Options::with_temperature(temperature)
            },
            timeout: self
                .timeout
                .or(config.timeout_secs)
                .map(Duration::from_secs),
        }
    }

    /// Initialize tracing on stderr based on verbosity.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "warn",
                1 => "sqirvy_cli=debug,sqirvy_model=debug,sqirvy_prompt=debug",
                2 => "sqirvy_cli=trace,sqirvy_model=trace,sqirvy_prompt=trace",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }
}
