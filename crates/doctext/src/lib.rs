//! Extract plain text from PDF documents.
//!
//! [`extract`] takes raw PDF bytes and produces a [`Document`]: every page's
//! text concatenated in page order. Pages that carry no extractable text
//! (scanned images, broken content streams) contribute nothing instead of
//! failing the whole document; only input that does not parse as a PDF at
//! all is an error.
//!
//! # Example
//! ```no_run
//! # fn main() -> Result<(), doctext::ExtractError> {
//! let extraction = doctext::extract_file("paper.pdf")?;
//! println!(
//!     "{} pages, {} bytes of text",
//!     extraction.pages,
//!     extraction.document.len()
//! );
//! for line in extraction.document.lines().take(3) {
//!     println!("> {line}");
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p doctext --example extract -- <file.pdf>`.

pub mod document;
pub mod extract;

pub use document::Document;
pub use extract::{ExtractError, PdfExtraction, extract, extract_file};
