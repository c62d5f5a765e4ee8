use std::path::PathBuf;
use std::sync::LazyLock;

use futures::StreamExt;
use regex::Regex;
use scraper::Html;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::app::{AppContext, Result};
use crate::extract::{find_tag, TagQuery};

/// Bytes written and counted per step.
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;

const FALLBACK_FILE_NAME: &str = "archive.zip";

static PDF_A4_ARCHIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+pdf-a4\.zip$").expect("archive pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub received: u64,
    /// `Content-Length` announced by the server
    pub expected: Option<u64>,
}

impl DownloadReport {
    /// False when the server announced a size that was not received.
    pub fn is_complete(&self) -> bool {
        match self.expected {
            Some(0) | None => true,
            Some(expected) => expected == self.received,
        }
    }
}

/// Absolute URL of the A4 PDF archive listed on the download page.
pub fn archive_link(doc: &Html, page_url: &Url) -> Result<Url> {
    let main = find_tag(doc.root_element(), &TagQuery::new("div").attr("role", "main"))?;
    let table = find_tag(main, &TagQuery::new("table").attr("class", "docutils"))?;
    let anchor = find_tag(
        table,
        &TagQuery::new("a").attr_matches("href", PDF_A4_ARCHIVE.clone()),
    )?;

    // The query guarantees the attribute exists
    let href = anchor.value().attr("href").unwrap_or_default();
    Ok(page_url.join(href)?)
}

/// Last path segment of `url`.
pub fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

pub async fn download(ctx: &AppContext) -> Result<DownloadReport> {
    let downloads_url = ctx.docs_url.join("download.html")?;
    let archive_url = {
        let doc = ctx.fetch_document(downloads_url.as_str()).await?;
        archive_link(&doc, &downloads_url)?
    };

    let downloads_dir = ctx.config.paths.downloads_dir();
    tokio::fs::create_dir_all(&downloads_dir).await?;
    let path = downloads_dir.join(archive_file_name(&archive_url));

    tracing::info!(url = %archive_url, path = %path.display(), "Downloading archive");

    let mut stream = ctx.fetcher.open_stream(archive_url.as_str()).await?;
    let progress = ctx.progress_bytes(stream.content_length);
    let mut file = tokio::fs::File::create(&path).await?;
    let mut received = 0u64;

    while let Some(chunk) = stream.chunks.next().await {
        let chunk = chunk?;
        for block in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
            file.write_all(block).await?;
            received += block.len() as u64;
            progress.inc(block.len() as u64);
        }
    }
    file.flush().await?;
    progress.finish(None);

    let report = DownloadReport {
        path,
        received,
        expected: stream.content_length,
    };

    if report.is_complete() {
        tracing::info!(path = %report.path.display(), bytes = received, "Archive saved");
    } else {
        tracing::error!(
            expected = ?report.expected,
            received,
            "Download size mismatch, the archive is probably incomplete"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::app::ScrapeError;
    use crate::config::Config;
    use crate::fetcher::stub::StubFetcher;

    const DOWNLOAD_PAGE: &str = r#"<html><body><div class="body" role="main">
        <h1>Download Python documentation</h1>
        <table class="docutils align-default">
          <tr><td>PDF (US-Letter paper size)</td>
              <td><a class="reference external" href="archives/python-3.12-docs-pdf-letter.zip">Download</a></td></tr>
          <tr><td>PDF (A4 paper size)</td>
              <td><a class="reference external" href="archives/python-3.12-docs-pdf-a4.zip">Download</a></td></tr>
        </table>
    </div></body></html>"#;

    const ARCHIVE_URL: &str = "https://docs.python.org/3/archives/python-3.12-docs-pdf-a4.zip";

    fn context(stub: StubFetcher, base_dir: &std::path::Path) -> AppContext {
        let mut config = Config::default();
        config.paths.base_dir = base_dir.to_path_buf();
        AppContext::with_fetcher(config, Arc::new(stub)).unwrap()
    }

    #[test]
    fn test_archive_link() {
        let page = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let link = archive_link(&Html::parse_document(DOWNLOAD_PAGE), &page).unwrap();
        assert_eq!(link.as_str(), ARCHIVE_URL);
        assert_eq!(archive_file_name(&link), "python-3.12-docs-pdf-a4.zip");
    }

    #[test]
    fn test_missing_archive_link_fails() {
        let page = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let doc = Html::parse_document(
            r#"<div role="main"><table class="docutils"><tr><td><a href="x.tar.bz2">x</a></td></tr></table></div>"#,
        );
        assert!(matches!(
            archive_link(&doc, &page),
            Err(ScrapeError::TagNotFound { ref tag, .. }) if tag == "a"
        ));
    }

    #[test]
    fn test_file_name_fallback() {
        let url = Url::parse("https://docs.python.org/").unwrap();
        assert_eq!(archive_file_name(&url), FALLBACK_FILE_NAME);
    }

    #[tokio::test]
    async fn test_download_writes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let payload: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let stub = StubFetcher::new()
            .with_page("https://docs.python.org/3/download.html", DOWNLOAD_PAGE)
            .with_file(ARCHIVE_URL, payload.clone(), Some(payload.len() as u64));

        let report = download(&context(stub, dir.path())).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.received, 5000);
        assert_eq!(
            report.path,
            dir.path().join("downloads").join("python-3.12-docs-pdf-a4.zip")
        );
        assert_eq!(std::fs::read(&report.path).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_size_mismatch_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubFetcher::new()
            .with_page("https://docs.python.org/3/download.html", DOWNLOAD_PAGE)
            .with_file(ARCHIVE_URL, vec![1; 100], Some(4096));

        let report = download(&context(stub, dir.path())).await.unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.received, 100);
        assert_eq!(report.expected, Some(4096));
    }

    #[test]
    fn test_unknown_length_counts_as_complete() {
        let report = DownloadReport {
            path: PathBuf::from("a.zip"),
            received: 10,
            expected: None,
        };
        assert!(report.is_complete());
    }
}
