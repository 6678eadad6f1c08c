//! Size-bounded source readers.
//!
//! Each reader takes the number of bytes still available in the prompt
//! budget and fails with [`Error::BudgetExceeded`] rather than returning a
//! truncated source. The byte count consumed is the length of the returned
//! text, after invalid UTF-8 has been replaced.

use crate::{Error, Result, Scrape, extract_pdf};
use std::path::Path;
use tokio::{
    fs,
    io::{AsyncRead, AsyncReadExt},
};
use url::Url;

/// Upper bound on the raw size of a PDF read for extraction. The extracted
/// text is what counts against the prompt budget.
const MAX_PDF_BYTES: u64 = 32 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Read `reader` to EOF, failing once more than `remaining` bytes are seen.
pub async fn read_stdin<R>(reader: R, remaining: usize) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader
        .take(remaining as u64 + 1)
        .read_to_end(&mut buf)
        .await
        .map_err(|source| Error::Io {
            what: "stdin".into(),
            source,
        })?;
    if buf.len() > remaining {
        return Err(Error::BudgetExceeded { limit: remaining });
    }
    decode(&buf, remaining)
}

/// Read the file at `path`, failing if it holds more than `remaining` bytes.
///
/// Symlinks are resolved before the file is opened. PDF documents (by
/// extension or magic bytes) are converted to text first.
pub async fn read_file(path: impl AsRef<Path>, remaining: usize) -> Result<String> {
    let path = path.as_ref();
    let resolved = fs::canonicalize(path)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    let metadata = fs::metadata(&resolved)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile(path.to_owned()));
    }

    let file = fs::File::open(&resolved)
        .await
        .map_err(|e| Error::from_io(path, e))?;

    if has_pdf_extension(&resolved) || has_pdf_magic(path, &resolved).await? {
        if metadata.len() > MAX_PDF_BYTES {
            return Err(Error::BudgetExceeded {
                limit: MAX_PDF_BYTES as usize,
            });
        }
        let bytes = read_bounded(path, file, MAX_PDF_BYTES as usize).await?;
        let text = extract_pdf(&bytes).await?;
        if text.len() > remaining {
            return Err(Error::BudgetExceeded { limit: remaining });
        }
        return Ok(text);
    }

    if metadata.len() > remaining as u64 {
        return Err(Error::BudgetExceeded { limit: remaining });
    }
    let bytes = read_bounded(path, file, remaining).await?;
    tracing::trace!("read {} bytes from {}", bytes.len(), path.display());
    decode(&bytes, remaining)
}

/// Fetch `url` through `scraper`, failing if its text exceeds `remaining`.
pub async fn read_url<S: Scrape>(scraper: &S, url: &Url, remaining: usize) -> Result<String> {
    let text = scraper.scrape(url, remaining).await?;
    if text.len() > remaining {
        return Err(Error::BudgetExceeded { limit: remaining });
    }
    Ok(text)
}

// Each invalid sequence becomes U+FFFD, which may take more bytes than it
// replaces.
fn decode(bytes: &[u8], limit: usize) -> Result<String> {
    let text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() > limit {
        return Err(Error::BudgetExceeded { limit });
    }
    Ok(text)
}

// The file may grow between the metadata check and the read.
async fn read_bounded(path: &Path, file: fs::File, limit: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    file.take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    if buf.len() > limit {
        return Err(Error::BudgetExceeded { limit });
    }
    Ok(buf)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

async fn has_pdf_magic(path: &Path, resolved: &Path) -> Result<bool> {
    let file = fs::File::open(resolved)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    let mut head = Vec::with_capacity(PDF_MAGIC.len());
    file.take(PDF_MAGIC.len() as u64)
        .read_to_end(&mut head)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    Ok(head == PDF_MAGIC)
}
