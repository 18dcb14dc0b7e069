//! Job offer field extraction
//!
//! Each module covers one stage: document queries, locator-driven
//! extraction, phrase translation and record assembly.

mod assembler;
mod css_extractor;
mod field;
mod schema;
pub mod tables;
mod translate;

pub use assembler::*;
pub use css_extractor::*;
pub use field::*;
pub use schema::*;
pub use translate::*;
