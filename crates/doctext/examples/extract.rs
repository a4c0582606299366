use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p doctext --example extract -- <file.pdf>")?;

    let extraction = doctext::extract_file(&path)
        .with_context(|| format!("extracting {}", path.display()))?;

    let document = &extraction.document;
    println!("File       : {}", path.display());
    println!("Pages      : {}", extraction.pages);
    println!("Empty pages: {}", extraction.empty_pages);
    println!("Text bytes : {}", document.len());
    println!("Lines      : {}", document.lines().count());

    // Spot-check the opening lines to confirm extraction order.
    for line in document.lines().take(5) {
        println!("> {line}");
    }

    Ok(())
}
