//! Listing page enumeration: page count and offer links

use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::error::{Error, Result};
use crate::extractors::{HtmlDocument, Queryable};
use crate::fetch::PageSource;
use crate::robots::RobotsGuard;

pub const MAX_PAGE_SELECTOR: &str = r#"span[data-test="top-pagination-max-page-number"]"#;
pub const OFFER_LINK_SELECTOR: &str = r#"a[data-test="link-offer"]"#;

/// Number of listing pages announced by the pager, 1 when absent or unreadable
pub fn page_count(doc: &HtmlDocument) -> Result<u32> {
    let count = doc
        .select_text(MAX_PAGE_SELECTOR)?
        .first()
        .and_then(|text| text.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1);
    Ok(count)
}

/// Offer links on a listing page, resolved against `base_url`
pub fn offer_links(doc: &HtmlDocument, base_url: &str) -> Result<Vec<String>> {
    let base = url::Url::parse(base_url)?;
    let mut links = Vec::new();

    for href in doc.select_attr(OFFER_LINK_SELECTOR, "href")? {
        let href = href.trim();
        if href.is_empty()
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with('#')
        {
            continue;
        }

        match base.join(href) {
            Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
                links.push(absolute.to_string());
            }
            _ => continue,
        }
    }

    Ok(links)
}

/// Every offer URL across the listing, deduplicated in first-seen order.
///
/// The first listing page must load and be allowed by `robots`; later pages
/// that fail or are disallowed are skipped.
pub fn enumerate_offers<S: PageSource + ?Sized>(
    source: &S,
    config: &ScrapeConfig,
    mut robots: Option<&mut RobotsGuard>,
) -> Result<Vec<String>> {
    let mut allowed = |url: &str| robots.as_deref_mut().map_or(true, |g| g.allowed(source, url));

    let first_url = config.listing_page_url(config.first_page);
    if !allowed(&first_url) {
        return Err(Error::source_unavailable(&first_url, "disallowed by robots.txt"));
    }
    let first = source.fetch(&first_url)?;

    let announced = page_count(&first)?;
    let pages = config.max_pages.map_or(announced, |cap| announced.min(cap));
    info!(announced, pages, "listing pagination");

    let mut seen = std::collections::HashSet::new();
    let mut offers = Vec::new();
    let mut collect = |links: Vec<String>| {
        for link in links {
            if seen.insert(link.clone()) {
                offers.push(link);
            }
        }
    };

    collect(offer_links(&first, &first_url)?);

    let last_page = config.first_page.saturating_add(pages.saturating_sub(1));
    for page in config.first_page.saturating_add(1)..=last_page {
        let url = config.listing_page_url(page);
        if !allowed(&url) {
            warn!(%url, "listing page disallowed by robots.txt");
            continue;
        }
        match source.fetch(&url).and_then(|doc| offer_links(&doc, &url)) {
            Ok(links) => collect(links),
            Err(e) => warn!(%url, error = %e, "skipping listing page"),
        }
    }

    info!(offers = offers.len(), "collected offer links");
    Ok(offers)
}
