//! # htmldown
//!
//! Convert HTML documents to Markdown.
//!
//! The crate is split along a simple seam: [`html::parse_html`] turns
//! an HTML string into a [`Node`] tree, and [`emitter::convert`] turns
//! that tree into Markdown text. [`convert_html`] chains the two.
//!
//! ## Example
//!
//! ```rust
//! let markdown = htmldown::convert_html("<h1>Title</h1><p>Hello</p>").unwrap();
//! assert_eq!(markdown, "# Title\n\nHello\n");
//! ```
//!
//! The tree model and emitter have no parser dependency. Disabling the
//! default `html` feature drops scraper/html5ever and leaves a crate
//! that converts trees built by hand or by another parser.

pub mod emitter;
pub mod node;
pub mod utilities;

#[cfg(feature = "html")]
pub mod html;

pub use emitter::convert;
pub use node::{Element, Node};

#[cfg(feature = "html")]
pub use html::parse_html;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum HtmldownError {
    /// The input yielded no parseable HTML content.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for htmldown operations.
pub type Result<T> = std::result::Result<T, HtmldownError>;

/// Parse an HTML string and convert it to Markdown.
#[cfg(feature = "html")]
pub fn convert_html(html: &str) -> Result<String> {
    let root = parse_html(html)?;
    Ok(convert(&root))
}
