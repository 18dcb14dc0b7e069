//! Locator-driven field extraction

use tracing::debug;

use super::css_extractor::Queryable;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    List,
}

/// Where a field's value lives in a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLocator {
    pub selector: &'static str,
    /// Re-queried inside each element matched by `selector`
    pub nested: Option<&'static str>,
    pub cardinality: Cardinality,
}

impl FieldLocator {
    pub const fn single(selector: &'static str) -> Self {
        Self {
            selector,
            nested: None,
            cardinality: Cardinality::Single,
        }
    }

    pub const fn list(selector: &'static str) -> Self {
        Self {
            selector,
            nested: None,
            cardinality: Cardinality::List,
        }
    }

    pub const fn within(self, nested: &'static str) -> Self {
        Self {
            nested: Some(nested),
            ..self
        }
    }
}

/// Raw extraction result, before field post-processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Single(String),
    List(Vec<String>),
}

/// Query `doc` with `locator` and trim every value.
///
/// A single locator yields its first match or `fallback`. A list locator
/// yields every match in document order; zero matches is an empty list.
/// Query failures are returned as-is.
pub fn extract<D: Queryable + ?Sized>(
    doc: &D,
    locator: &FieldLocator,
    fallback: &str,
) -> Result<Extracted> {
    let raw = match locator.nested {
        Some(nested) => doc.select_nested_text(locator.selector, nested)?,
        None => doc.select_text(locator.selector)?,
    };

    debug!(selector = locator.selector, matches = raw.len(), "queried locator");

    let mut values = raw.into_iter().map(|text| text.trim().to_string());

    Ok(match locator.cardinality {
        Cardinality::Single => {
            Extracted::Single(values.next().unwrap_or_else(|| fallback.to_string()))
        }
        Cardinality::List => Extracted::List(values.collect()),
    })
}
