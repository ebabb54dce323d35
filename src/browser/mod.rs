//! Browser module
//!
//! Chrome DevTools Protocol implementation of the target document.

mod document;
mod errors;

pub use document::DomDocument;
pub use errors::BrowserError;
