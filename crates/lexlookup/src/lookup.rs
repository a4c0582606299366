use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::dictionary::{DictEntry, DictionaryProvider};
use crate::error::ProviderError;
use crate::translate::TranslationProvider;

/// Source language for definitions and translations.
pub const SOURCE_LANG: &str = "en";
/// Target language used when none is configured.
pub const DEFAULT_TARGET_LANG: &str = "ta";

/// Definition text when the dictionary has no entry for a word.
pub const NO_MEANING: &str = "No English meaning found.";
/// Translation text when a provider call failed.
pub const TRANSLATION_UNAVAILABLE: &str = "Translation not available";

/// Dictionary senses consulted for example sentences.
const EXAMPLE_ENTRIES: usize = 2;
/// Example sentences taken from each consulted sense.
const EXAMPLES_PER_ENTRY: usize = 2;
/// Example sentences kept after deduplication.
const MAX_EXAMPLES: usize = 3;

/// Everything the user sees for one looked-up word.
///
/// `context` is document-dependent and filled in by the caller; the adapter
/// itself always leaves it `None`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LookupResult {
    pub word: String,
    pub definition: String,
    pub translation: String,
    pub examples: Vec<String>,
    pub context: Option<String>,
}

/// Fail-soft lookup over a dictionary and a translation provider.
pub struct WordLookup {
    dictionary: Arc<dyn DictionaryProvider>,
    translator: Arc<dyn TranslationProvider>,
    target_lang: String,
}

impl WordLookup {
    pub fn new(
        dictionary: Arc<dyn DictionaryProvider>,
        translator: Arc<dyn TranslationProvider>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            dictionary,
            translator,
            target_lang: target_lang.into(),
        }
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// Look up a word: the first dictionary sense's definition, up to three
    /// example sentences, and a translation into the configured target
    /// language.
    ///
    /// Empty or whitespace-only input returns `None` without contacting any
    /// provider. A provider failure never surfaces as an error: the result
    /// degrades to an `Error: ...` definition, the literal
    /// "Translation not available", and no examples.
    pub async fn lookup(&self, word: &str) -> Option<LookupResult> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        match self.try_lookup(word).await {
            Ok(result) => Some(result),
            Err(err) => {
                warn!("lookup for {word:?} degraded: {err}");
                Some(LookupResult {
                    word: word.to_string(),
                    definition: format!("Error: {err}"),
                    translation: TRANSLATION_UNAVAILABLE.to_string(),
                    examples: Vec::new(),
                    context: None,
                })
            }
        }
    }

    async fn try_lookup(&self, word: &str) -> Result<LookupResult, ProviderError> {
        let entries = self.dictionary.entries(word).await?;
        let definition = match entries.first() {
            Some(first) => first.definition.clone(),
            None => NO_MEANING.to_string(),
        };
        let examples = gather_examples(&entries);
        let translation = self
            .translator
            .translate(word, SOURCE_LANG, &self.target_lang)
            .await?;
        Ok(LookupResult {
            word: word.to_string(),
            definition,
            translation,
            examples,
            context: None,
        })
    }
}

/// Collect up to two examples from each of the first two senses, dropping
/// duplicates while keeping first-seen order, capped at three overall.
fn gather_examples(entries: &[DictEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut examples = Vec::new();
    for entry in entries.iter().take(EXAMPLE_ENTRIES) {
        for example in entry.examples.iter().take(EXAMPLES_PER_ENTRY) {
            if seen.insert(example.as_str()) {
                examples.push(example.clone());
            }
        }
    }
    examples.truncate(MAX_EXAMPLES);
    examples
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeDictionary(Vec<DictEntry>);

    #[async_trait]
    impl DictionaryProvider for FakeDictionary {
        async fn entries(&self, _word: &str) -> Result<Vec<DictEntry>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct FailingDictionary;

    #[async_trait]
    impl DictionaryProvider for FailingDictionary {
        async fn entries(&self, _word: &str) -> Result<Vec<DictEntry>, ProviderError> {
            Err(ProviderError::Malformed {
                provider: "dictionary",
                detail: "connection reset".into(),
            })
        }
    }

    struct FakeTranslator(&'static str);

    #[async_trait]
    impl TranslationProvider for FakeTranslator {
        async fn translate(
            &self,
            _text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl TranslationProvider for FailingTranslator {
        async fn translate(
            &self,
            _text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, ProviderError> {
            Err(ProviderError::Status {
                provider: "translation",
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            })
        }
    }

    fn entry(definition: &str, examples: &[&str]) -> DictEntry {
        DictEntry {
            definition: definition.to_string(),
            examples: examples.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn adapter(
        dictionary: impl DictionaryProvider + 'static,
        translator: impl TranslationProvider + 'static,
    ) -> WordLookup {
        WordLookup::new(Arc::new(dictionary), Arc::new(translator), DEFAULT_TARGET_LANG)
    }

    #[tokio::test]
    async fn takes_the_first_definition_and_the_translation() {
        let lookup = adapter(
            FakeDictionary(vec![
                entry("a cunning mammal", &["the fox ran"]),
                entry("a sly person", &[]),
            ]),
            FakeTranslator("நரி"),
        );
        let result = lookup.lookup("fox").await.expect("non-blank word");
        assert_eq!(result.word, "fox");
        assert_eq!(result.definition, "a cunning mammal");
        assert_eq!(result.translation, "நரி");
        assert_eq!(result.examples, ["the fox ran"]);
        assert_eq!(result.context, None);
    }

    #[tokio::test]
    async fn unknown_words_get_the_placeholder_definition() {
        let lookup = adapter(FakeDictionary(Vec::new()), FakeTranslator("still translated"));
        let result = lookup.lookup("xyzzyplugh").await.expect("non-blank word");
        assert_eq!(result.definition, NO_MEANING);
        assert!(result.examples.is_empty());
        assert_eq!(result.translation, "still translated");
    }

    #[tokio::test]
    async fn examples_come_from_the_first_two_senses_deduplicated() {
        let lookup = adapter(
            FakeDictionary(vec![
                entry("first", &["shared", "one", "beyond the per-sense cap"]),
                entry("second", &["shared", "two"]),
                entry("third", &["never consulted"]),
            ]),
            FakeTranslator("t"),
        );
        let result = lookup.lookup("word").await.expect("non-blank word");
        assert_eq!(result.examples, ["shared", "one", "two"]);
    }

    #[tokio::test]
    async fn examples_cap_at_three() {
        let lookup = adapter(
            FakeDictionary(vec![entry("first", &["a", "b"]), entry("second", &["c", "d"])]),
            FakeTranslator("t"),
        );
        let result = lookup.lookup("word").await.expect("non-blank word");
        assert_eq!(result.examples, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn a_dictionary_failure_degrades_the_whole_lookup() {
        let lookup = adapter(FailingDictionary, FakeTranslator("unused"));
        let result = lookup.lookup("anything").await.expect("non-blank word");
        assert!(result.definition.starts_with("Error:"));
        assert_eq!(result.translation, TRANSLATION_UNAVAILABLE);
        assert!(result.examples.is_empty());
    }

    #[tokio::test]
    async fn a_translation_failure_degrades_the_whole_lookup() {
        let lookup = adapter(
            FakeDictionary(vec![entry("a definition", &[])]),
            FailingTranslator,
        );
        let result = lookup.lookup("word").await.expect("non-blank word");
        assert!(result.definition.starts_with("Error:"));
        assert_eq!(result.translation, TRANSLATION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let lookup = adapter(FakeDictionary(Vec::new()), FakeTranslator("t"));
        assert!(lookup.lookup("").await.is_none());
        assert!(lookup.lookup("   ").await.is_none());
    }

    #[tokio::test]
    async fn input_is_trimmed_before_dispatch() {
        let lookup = adapter(FakeDictionary(Vec::new()), FakeTranslator("t"));
        let result = lookup.lookup("  fox  ").await.expect("non-blank word");
        assert_eq!(result.word, "fox");
    }
}
