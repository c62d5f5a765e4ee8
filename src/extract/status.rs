use scraper::{ElementRef, Html};

use crate::app::{Result, ScrapeError};
use crate::extract::tags::{find_all, text_of, TagQuery};
use crate::fetcher::Fetcher;

const STATUS_TERM: &str = "Status";

/// Text of the `<dd>` that directly follows the `<dt>Status</dt>` term.
///
/// The term may carry a trailing colon (`Status:`).
pub fn status_from_document(doc: &Html) -> Option<String> {
    find_all(doc.root_element(), &TagQuery::new("dt"))
        .into_iter()
        .find(|dt| text_of(dt).trim_end_matches(':').trim_end() == STATUS_TERM)
        .and_then(|dt| dt.next_siblings().find_map(ElementRef::wrap))
        .filter(|next| next.value().name() == "dd")
        .map(|dd| text_of(&dd))
}

/// Fetch a PEP page and read its declared status.
pub async fn extract_status(fetcher: &dyn Fetcher, link: &str) -> Result<String> {
    let body = fetcher.fetch_text(link).await?;
    let doc = Html::parse_document(&body);
    status_from_document(&doc).ok_or_else(|| ScrapeError::StatusNotFound(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::stub::StubFetcher;

    const PEP_PAGE: &str = r#"<html><body><dl class="rfc2822 field-list simple">
        <dt class="field-odd">Author<span class="colon">:</span></dt>
        <dd class="field-odd">Guido van Rossum</dd>
        <dt class="field-even">Status<span class="colon">:</span></dt>
        <dd class="field-even"><abbr title="Accepted and implementation complete">Final</abbr></dd>
    </dl></body></html>"#;

    #[test]
    fn test_status_with_colon_markup() {
        let doc = Html::parse_document(PEP_PAGE);
        assert_eq!(status_from_document(&doc).as_deref(), Some("Final"));
    }

    #[test]
    fn test_plain_status_term() {
        let doc = Html::parse_document("<dl><dt>Type</dt><dd>Process</dd><dt> Status </dt><dd> Active </dd></dl>");
        assert_eq!(status_from_document(&doc).as_deref(), Some("Active"));
    }

    #[test]
    fn test_missing_status() {
        let doc = Html::parse_document("<dl><dt>Type</dt><dd>Process</dd></dl>");
        assert!(status_from_document(&doc).is_none());
    }

    #[test]
    fn test_status_term_without_definition() {
        let doc = Html::parse_document("<dl><dt>Status</dt><dt>Type</dt><dd>Process</dd></dl>");
        assert!(status_from_document(&doc).is_none());
    }

    #[tokio::test]
    async fn test_extract_status_reports_link() {
        let link = "https://peps.python.org/pep-0001/";
        let stub = StubFetcher::new().with_page(link, "<p>no metadata</p>");

        match extract_status(&stub, link).await {
            Err(ScrapeError::StatusNotFound(l)) => assert_eq!(l, link),
            other => panic!("expected missing status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_status_fetch_failure() {
        let stub = StubFetcher::new();
        let result = extract_status(&stub, "https://peps.python.org/pep-9999/").await;
        assert!(matches!(result, Err(ScrapeError::Fetch(_))));
    }
}
