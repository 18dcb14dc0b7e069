//! Skill gap toolkit
//!
//! Two pipelines share this crate:
//! - Job offers: paginate a job board, extract offer fields with CSS
//!   selectors, normalize Polish vocabulary, write CSV
//! - Syllabi: filter learning outcomes out of PDF syllabi, extract skills
//!   with a language model, deduplicate into JSON

pub mod config;
pub mod csv_sink;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod llm;
pub mod logging;
pub mod outcomes;
pub mod pagination;
pub mod robots;
pub mod scrape;
pub mod skills;

pub use error::{Error, Result};
pub use extractors::*;
