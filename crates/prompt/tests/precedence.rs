//! Runs alone in its own binary because it changes the working directory.

use sqirvy_prompt::{Assembler, Result, Scrape};
use url::Url;

struct Refuse;

impl Scrape for Refuse {
    async fn scrape(&self, url: &Url, _limit: usize) -> Result<String> {
        panic!("{url} should have been read as a file");
    }
}

#[tokio::test]
async fn existing_file_wins_over_url() {
    let dir = tempfile::tempdir().unwrap();
    let name = "https:example.com";
    assert!(Url::parse(name).is_ok());
    std::fs::write(dir.path().join(name), "local copy").unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let prompt = Assembler::with_scraper(Refuse)
        .assemble("", None::<&[u8]>, &[name.to_owned()])
        .await
        .unwrap();
    assert_eq!(prompt, "local copy\n\n");
}
