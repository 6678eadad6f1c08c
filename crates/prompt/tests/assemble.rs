use sqirvy_prompt::{Assembler, Error, MAX_INPUT_BYTES, Result, Scrape, assemble};
use std::sync::{Arc, Mutex};
use url::Url;

/// Scraper returning canned text and recording requested URLs.
#[derive(Clone, Default)]
struct Canned {
    seen: Arc<Mutex<Vec<String>>>,
}

impl Scrape for Canned {
    async fn scrape(&self, url: &Url, _limit: usize) -> Result<String> {
        self.seen.lock().unwrap().push(url.to_string());
        Ok(format!("page:{}", url.path()))
    }
}

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

#[test]
fn budget_constant() {
    assert_eq!(MAX_INPUT_BYTES, 262_144);
}

#[tokio::test]
async fn order_is_system_stdin_then_args() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(&dir, "b.txt", "B");
    let prompt = assemble("SYS", Some(&b"A"[..]), &[file], MAX_INPUT_BYTES)
        .await
        .unwrap();
    assert_eq!(prompt, "SYSAB\n\n");
}

#[tokio::test]
async fn every_argument_gets_a_separator() {
    let dir = tempfile::tempdir().unwrap();
    let one = write(&dir, "1.txt", "one");
    let two = write(&dir, "2.txt", "two");
    let canned = Canned::default();
    let prompt = Assembler::with_scraper(canned.clone())
        .assemble(
            "",
            None::<&[u8]>,
            &[one, "https://example.com/docs".into(), two],
        )
        .await
        .unwrap();
    assert_eq!(prompt, "one\n\npage:/docs\n\ntwo\n\n");
    assert_eq!(*canned.seen.lock().unwrap(), ["https://example.com/docs"]);
}

#[tokio::test]
async fn empty_input_is_rejected() {
    let err = assemble("", Some(&b""[..]), &[], MAX_INPUT_BYTES)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyPrompt));
}

#[tokio::test]
async fn system_prompt_alone_over_budget() {
    let err = assemble("0123456789", None::<&[u8]>, &[], 9)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BudgetExceeded { limit: 9 }));
}

#[tokio::test]
async fn stdin_overflow_reports_total_budget() {
    let err = assemble("sys", Some(&b"12345678"[..]), &[], 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BudgetExceeded { limit: 10 }));
}

#[tokio::test]
async fn invalid_utf8_stdin_never_overflows() {
    let err = assemble("", Some(&[0xFFu8; 10][..]), &[], 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BudgetExceeded { limit: 10 }));

    let dir = tempfile::tempdir().unwrap();
    let file = write(&dir, "after.txt", "x");
    let err = assemble("", Some(&[0xFFu8; 10][..]), &[file], 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BudgetExceeded { limit: 10 }));
}

#[tokio::test]
async fn separators_count_against_budget() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(&dir, "f.txt", "12345");
    // Content fits exactly, the trailing blank line does not.
    let err = assemble("", None::<&[u8]>, &[file.clone()], 5)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BudgetExceeded { limit: 5 }));
    assert_eq!(
        assemble("", None::<&[u8]>, &[file], 7).await.unwrap(),
        "12345\n\n"
    );
}

#[tokio::test]
async fn unknown_argument_is_not_found() {
    let err = assemble("sys", None::<&[u8]>, &["no-such-file.txt".into()], 100)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(ref arg) if arg == "no-such-file.txt"));
}

#[tokio::test]
async fn non_web_scheme_is_not_a_url() {
    let canned = Canned::default();
    let err = Assembler::with_scraper(canned.clone())
        .assemble("sys", None::<&[u8]>, &["ftp://example.com/x".into()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(canned.seen.lock().unwrap().is_empty());
}
