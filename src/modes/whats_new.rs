use scraper::Html;
use url::Url;

use crate::app::{AppContext, Result};
use crate::domain::ResultTable;
use crate::extract::{find_all, find_tag, text_of, TagQuery};

/// Links to every "What's New in Python X.Y" article on the index page.
pub fn section_links(doc: &Html, base: &Url) -> Result<Vec<String>> {
    let main = find_tag(
        doc.root_element(),
        &TagQuery::new("section").attr("id", "what-s-new-in-python"),
    )?;
    let toctree = find_tag(main, &TagQuery::new("div").attr("class", "toctree-wrapper"))?;

    let mut links: Vec<String> = Vec::new();
    for item in find_all(toctree, &TagQuery::new("li").attr("class", "toctree-l1")) {
        let Some(href) = find_tag(item, &TagQuery::new("a"))
            .ok()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        match base.join(href) {
            Ok(link) => links.push(link.into()),
            Err(e) => tracing::warn!(href, "Skipping section with bad link: {}", e),
        }
    }
    Ok(links)
}

/// Title and editor/author block of one article.
pub fn article_summary(doc: &Html) -> Result<(String, String)> {
    let h1 = find_tag(doc.root_element(), &TagQuery::new("h1"))?;
    let dl = find_tag(doc.root_element(), &TagQuery::new("dl"))?;
    Ok((text_of(&h1), text_of(&dl)))
}

pub async fn whats_new(ctx: &AppContext) -> Result<ResultTable> {
    let whats_new_url = ctx.docs_url.join("whatsnew/")?;

    let links = {
        let doc = ctx.fetch_document(whats_new_url.as_str()).await?;
        section_links(&doc, &whats_new_url)?
    };
    tracing::info!(sections = links.len(), "Found what's new sections");

    let progress = ctx.progress_items(links.len(), "whats-new");
    let pages = ctx.parallel_fetcher.fetch_all(links, &progress).await;
    progress.finish(None);

    let mut table = ResultTable::new(["Article link", "Title", "Editor, author"]);
    for (link, page) in pages {
        let body = match page {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%link, "Failed to fetch section: {}", e);
                continue;
            }
        };

        match article_summary(&Html::parse_document(&body)) {
            Ok((title, editor)) => table.push([link, title, editor]),
            Err(e) => tracing::warn!(%link, "Skipping section: {}", e),
        }
    }

    Ok(table)
}
