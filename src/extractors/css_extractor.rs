//! CSS selector-based document queries
//!
//! Uses the scraper crate to select elements by CSS selectors. The rest of
//! the extraction pipeline only sees the [`Queryable`] trait, so it is not
//! tied to scraper.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// Minimal query capability over a parsed document.
///
/// Returned texts are raw (untrimmed) element text in document order.
pub trait Queryable {
    /// Text of every element matching `selector`
    fn select_text(&self, selector: &str) -> Result<Vec<String>>;

    /// Text of every element matching `nested` inside each element matching `selector`
    fn select_nested_text(&self, selector: &str, nested: &str) -> Result<Vec<String>>;
}

/// A parsed HTML page
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Attribute values of elements matching a CSS selector
    pub fn select_attr(&self, selector: &str, attr_name: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .select(&selector)
            .filter_map(|el| el.value().attr(attr_name).map(String::from))
            .collect())
    }
}

impl Queryable for HtmlDocument {
    fn select_text(&self, selector: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).map(element_text).collect())
    }

    fn select_nested_text(&self, selector: &str, nested: &str) -> Result<Vec<String>> {
        let outer = parse_selector(selector)?;
        let inner = parse_selector(nested)?;

        Ok(self
            .html
            .select(&outer)
            .flat_map(|section| section.select(&inner).map(element_text).collect::<Vec<_>>())
            .collect())
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_text() {
        let doc = HtmlDocument::parse(
            r#"
        <section data-test="offer">
            <h1 data-test="text-positionName"> Data Engineer </h1>
            <div data-test="text-earningAmount">12 000–16 000 zł</div>
            <div data-test="text-earningAmount">14 000–18 000 zł</div>
            <a data-test="link-apply" href="/aplikuj/1004">Aplikuj</a>
        </section>
        "#,
        );

        let salaries = doc.select_text(r#"div[data-test="text-earningAmount"]"#).unwrap();
        assert_eq!(salaries, vec!["12 000–16 000 zł", "14 000–18 000 zł"]);

        let title = doc.select_text(r#"h1[data-test="text-positionName"]"#).unwrap();
        assert_eq!(title, vec![" Data Engineer "]);

        let hrefs = doc.select_attr(r#"a[data-test="link-apply"]"#, "href").unwrap();
        assert_eq!(hrefs, vec!["/aplikuj/1004"]);
    }

    #[test]
    fn test_select_nested_text() {
        let doc = HtmlDocument::parse(
            r#"
        <ul class="a"><li>One</li><li>Two</li></ul>
        <ul class="b"><li>Skip</li></ul>
        <ul class="a"><li>Three</li></ul>
        "#,
        );

        let items = doc.select_nested_text("ul.a", "li").unwrap();
        assert_eq!(items, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let doc = HtmlDocument::parse("<p>x</p>");
        let err = doc.select_text("div[").unwrap_err();
        assert!(matches!(err, Error::Selector { .. }));
    }
}
