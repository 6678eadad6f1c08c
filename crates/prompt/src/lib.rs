//! Prompt assembly for sqirvy.
//!
//! A prompt is built from an embedded system prompt, piped stdin and any
//! number of file or URL arguments, in that order, under a fixed byte
//! budget. Sources that would overflow the budget abort assembly; no
//! partial prompt is ever returned.

pub use assemble::{Assembler, MAX_INPUT_BYTES, assemble};
pub use error::{Error, Result};
pub use pdf::extract_pdf;
pub use reader::{read_file, read_stdin, read_url};
pub use scrape::{HttpScraper, Scrape, html_to_text};

mod assemble;
mod error;
mod pdf;
mod reader;
mod scrape;
