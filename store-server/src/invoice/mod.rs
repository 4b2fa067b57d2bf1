//! Invoice rendering
//!
//! Deterministic transformation of an order into a paginated, fixed-width
//! printable document plus its binary/base64 encodings. Layout technology is
//! deliberately plain text; only the input/output contract matters here.

pub mod document;
pub mod renderer;

pub use document::{DocBuilder, InvoiceDocument};
pub use renderer::InvoiceRenderer;
