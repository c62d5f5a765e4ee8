use regex::Regex;
use scraper::ElementRef;

use crate::app::{Result, ScrapeError};

#[derive(Debug, Clone)]
enum AttrMatch {
    /// Exact value; for `class`, one of the element's class tokens.
    Equals(String),
    Matches(Regex),
}

/// Tag name plus optional attribute and text predicates.
#[derive(Debug, Clone)]
pub struct TagQuery {
    tag: String,
    attrs: Vec<(String, AttrMatch)>,
    text: Option<String>,
}

impl TagQuery {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), AttrMatch::Equals(value.into())));
        self
    }

    pub fn attr_matches(mut self, name: impl Into<String>, pattern: Regex) -> Self {
        self.attrs.push((name.into(), AttrMatch::Matches(pattern)));
        self
    }

    /// Only match elements whose text contains `text`.
    pub fn containing_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn matches(&self, element: &ElementRef) -> bool {
        let value = element.value();
        if !value.name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }

        let attrs_match = self.attrs.iter().all(|(name, expected)| match expected {
            AttrMatch::Equals(v) if name == "class" => value.classes().any(|c| c == v.as_str()),
            AttrMatch::Equals(v) => value.attr(name) == Some(v.as_str()),
            AttrMatch::Matches(re) => value.attr(name).is_some_and(|a| re.is_match(a)),
        });

        attrs_match
            && self
                .text
                .as_deref()
                .map_or(true, |needle| element.text().collect::<String>().contains(needle))
    }

    fn not_found(&self) -> ScrapeError {
        ScrapeError::TagNotFound {
            tag: self.tag.clone(),
            attrs: self.describe_filters(),
        }
    }

    fn describe_filters(&self) -> String {
        let mut parts: Vec<String> = self
            .attrs
            .iter()
            .map(|(name, m)| match m {
                AttrMatch::Equals(v) => format!("{name}={v:?}"),
                AttrMatch::Matches(re) => format!("{name}~/{}/", re.as_str()),
            })
            .collect();
        if let Some(text) = &self.text {
            parts.push(format!("text~{text:?}"));
        }
        format!("{{{}}}", parts.join(", "))
    }
}

/// Every descendant of `scope` matching `query`, in document order.
pub fn find_all<'a>(scope: ElementRef<'a>, query: &TagQuery) -> Vec<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| query.matches(el))
        .collect()
}

/// First descendant of `scope` matching `query`.
pub fn find_tag<'a>(scope: ElementRef<'a>, query: &TagQuery) -> Result<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| query.matches(el))
        .ok_or_else(|| query.not_found())
}

/// Concatenated, trimmed text of `element`.
pub fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const PAGE: &str = r#"<html><body>
        <div class="sidebar wide" id="nav"><p>skip</p></div>
        <div class="toctree-wrapper">
            <ul><li>One</li></ul>
            <ul><li>All versions</li></ul>
        </div>
        <table class="docutils">
            <tr><td><a href="python-docs-pdf-letter.zip">letter</a></td></tr>
            <tr><td><a href="archives/python-docs-pdf-a4.zip">a4</a></td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn test_find_by_class_token() {
        let doc = Html::parse_document(PAGE);
        let found = find_tag(doc.root_element(), &TagQuery::new("div").attr("class", "wide")).unwrap();
        assert_eq!(found.value().attr("id"), Some("nav"));
    }

    #[test]
    fn test_find_by_regex() {
        let doc = Html::parse_document(PAGE);
        let re = Regex::new(r".+pdf-a4\.zip$").unwrap();
        let found = find_tag(doc.root_element(), &TagQuery::new("a").attr_matches("href", re)).unwrap();
        assert_eq!(text_of(&found), "a4");
    }

    #[test]
    fn test_find_by_text() {
        let doc = Html::parse_document(PAGE);
        let query = TagQuery::new("ul").containing_text("All versions");
        let found = find_tag(doc.root_element(), &query).unwrap();
        assert_eq!(text_of(&found), "All versions");
    }

    #[test]
    fn test_search_is_scoped() {
        let doc = Html::parse_document(PAGE);
        let sidebar = find_tag(doc.root_element(), &TagQuery::new("div").attr("id", "nav")).unwrap();
        assert!(find_tag(sidebar, &TagQuery::new("ul")).is_err());
        assert_eq!(find_all(doc.root_element(), &TagQuery::new("ul")).len(), 2);
    }

    #[test]
    fn test_not_found_names_tag_and_attrs() {
        let doc = Html::parse_document(PAGE);
        let err = find_tag(
            doc.root_element(),
            &TagQuery::new("section").attr("id", "what-s-new-in-python"),
        )
        .unwrap_err();

        match err {
            ScrapeError::TagNotFound { tag, attrs } => {
                assert_eq!(tag, "section");
                assert_eq!(attrs, r#"{id="what-s-new-in-python"}"#);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
