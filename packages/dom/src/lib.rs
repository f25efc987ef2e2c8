//! # Trellis DOM
//!
//! An in-memory document that implements the [`trellis_core::Host`] mount
//! protocol. Every mutation the reconciler performs is appended to a
//! serializable journal, listeners can be triggered with
//! [`Document::dispatch`], and any subtree can be printed as HTML.
//!
//! ```rust,ignore
//! use trellis_core::render;
//! use trellis_dom::{Document, HtmlOptions};
//!
//! let mut document = Document::new();
//! let body = document.create_container("body");
//! render(tree, body, &mut document)?;
//! println!("{}", document.inner_html(body, &HtmlOptions::default())?);
//! ```

pub mod document;
pub mod html;
pub mod mutation;


pub use document::{Document, NodeData};
pub use html::HtmlOptions;
pub use mutation::Mutation;
