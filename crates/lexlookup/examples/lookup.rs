use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use lexlookup::{
    DEFAULT_DICTIONARY_URL, DEFAULT_TARGET_LANG, DEFAULT_TRANSLATE_URL, FreeDictionary,
    LibreTranslate, WordLookup,
};

#[tokio::main]
async fn main() -> Result<()> {
    let word = env::args()
        .nth(1)
        .context("usage: cargo run -p lexlookup --example lookup -- <word> [target-lang]")?;
    let target = env::args()
        .nth(2)
        .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let lookup = WordLookup::new(
        Arc::new(FreeDictionary::new(client.clone(), DEFAULT_DICTIONARY_URL)),
        Arc::new(LibreTranslate::new(
            client,
            DEFAULT_TRANSLATE_URL,
            env::var("TRANSLATE_API_KEY").ok(),
        )),
        target,
    );

    let result = lookup
        .lookup(&word)
        .await
        .context("word must not be blank")?;

    println!("Word       : {}", result.word);
    println!("Definition : {}", result.definition);
    println!("Translation: {}", result.translation);
    for example in &result.examples {
        println!("  - {example}");
    }

    Ok(())
}
