use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use url::Url;

use crate::app::{AppContext, Result, ScrapeError};
use crate::domain::ResultTable;
use crate::extract::{find_all, find_tag, text_of, TagQuery};

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<version>[\d.]+)?\s*(?P<status>.+)?").expect("version pattern is valid")
});

/// Split sidebar link text such as `3.12 Stable` into version and status.
///
/// Text without a leading version number is returned whole as the version
/// with an empty status.
pub fn split_version_text(text: &str) -> (String, String) {
    let Some(caps) = VERSION_PATTERN.captures(text) else {
        return (text.to_string(), String::new());
    };

    match caps.name("version") {
        Some(version) => {
            let status = caps.name("status").map_or("", |m| m.as_str().trim());
            (version.as_str().to_string(), status.to_string())
        }
        None => (text.to_string(), String::new()),
    }
}

/// Rows of the "All versions" list in the documentation sidebar.
pub fn version_table(doc: &Html, docs_url: &Url) -> Result<ResultTable> {
    let sidebar = find_tag(
        doc.root_element(),
        &TagQuery::new("div").attr("class", "sphinxsidebarwrapper"),
    )?;

    let list = find_tag(sidebar, &TagQuery::new("ul").containing_text("All versions"))
        .map_err(|_| ScrapeError::VersionListNotFound)?;

    let mut table = ResultTable::new(["Documentation link", "Version", "Status"]);
    for anchor in find_all(list, &TagQuery::new("a")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let link = if href.starts_with("http") {
            href.to_string()
        } else {
            match docs_url.join(href) {
                Ok(link) => link.into(),
                Err(e) => {
                    tracing::warn!(href, "Skipping version with bad link: {}", e);
                    continue;
                }
            }
        };
        let (version, status) = split_version_text(&text_of(&anchor));
        table.push([link, version, status]);
    }

    Ok(table)
}

pub async fn latest_versions(ctx: &AppContext) -> Result<ResultTable> {
    let doc = ctx.fetch_document(ctx.docs_url.as_str()).await?;
    let table = version_table(&doc, &ctx.docs_url)?;
    tracing::info!(versions = table.rows().len(), "Parsed documentation versions");
    Ok(table)
}
