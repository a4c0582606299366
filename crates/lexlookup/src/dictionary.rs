use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;

/// Base URL used when no dictionary endpoint is configured.
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev";

const PROVIDER: &str = "dictionary";

/// One dictionary sense: a definition plus its example sentences.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DictEntry {
    pub definition: String,
    pub examples: Vec<String>,
}

/// Word in, ordered senses out. An unknown word is an empty list, not an
/// error.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    async fn entries(&self, word: &str) -> Result<Vec<DictEntry>, ProviderError>;
}

/// Client for the dictionaryapi.dev JSON API.
pub struct FreeDictionary {
    client: reqwest::Client,
    base_url: String,
}

impl FreeDictionary {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionary {
    async fn entries(&self, word: &str) -> Result<Vec<DictEntry>, ProviderError> {
        let url = format!(
            "{}/api/v2/entries/en/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(word)
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ProviderError::Request {
                provider: PROVIDER,
                source: err,
            })?;
        // The API answers 404 for words it has no entries for; that is an
        // absence, not a failure.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::Request {
                provider: PROVIDER,
                source: err,
            })?;
        parse_entries(&body)
    }
}

#[derive(Deserialize)]
struct ApiEntry {
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Deserialize)]
struct ApiMeaning {
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Deserialize)]
struct ApiDefinition {
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

/// Flatten the API's entry/meaning/definition nesting into one sense list,
/// preserving response order.
fn parse_entries(body: &str) -> Result<Vec<DictEntry>, ProviderError> {
    let api_entries: Vec<ApiEntry> =
        serde_json::from_str(body).map_err(|err| ProviderError::Malformed {
            provider: PROVIDER,
            detail: err.to_string(),
        })?;
    let mut entries = Vec::new();
    for entry in api_entries {
        for meaning in entry.meanings {
            for definition in meaning.definitions {
                entries.push(DictEntry {
                    definition: definition.definition,
                    examples: definition.example.into_iter().collect(),
                });
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"[
      {
        "word": "hello",
        "phonetic": "/həˈloʊ/",
        "meanings": [
          {
            "partOfSpeech": "noun",
            "definitions": [
              {
                "definition": "\"Hello!\" or an equivalent greeting.",
                "synonyms": ["greeting"]
              }
            ]
          },
          {
            "partOfSpeech": "verb",
            "definitions": [
              {
                "definition": "To greet with \"hello\".",
                "example": "she helloed the visitors"
              }
            ]
          }
        ]
      }
    ]"#;

    #[test]
    fn flattens_meanings_in_response_order() {
        let entries = parse_entries(HELLO).expect("fixture parses");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].definition.contains("equivalent greeting"));
        assert!(entries[0].examples.is_empty());
        assert_eq!(entries[1].examples, ["she helloed the visitors"]);
    }

    #[test]
    fn tolerates_entries_without_meanings() {
        let entries = parse_entries(r#"[{"word": "x"}]"#).expect("fixture parses");
        assert!(entries.is_empty());
    }

    #[test]
    fn rejects_bodies_that_are_not_entry_lists() {
        // Shape the API uses for its "No Definitions Found" page.
        let body = r#"{"title": "No Definitions Found", "resolution": "..."}"#;
        assert!(matches!(
            parse_entries(body),
            Err(ProviderError::Malformed { .. })
        ));
    }
}
