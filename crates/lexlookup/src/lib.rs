//! Word lookups against external dictionary and translation providers.
//!
//! The network sits behind the [`DictionaryProvider`] and
//! [`TranslationProvider`] traits so the [`WordLookup`] adapter can be
//! exercised with in-process fakes; the bundled implementations speak the
//! dictionaryapi.dev and LibreTranslate JSON shapes.
//!
//! Lookups are fail-soft: provider trouble never reaches the caller as an
//! error. A failed call degrades the [`LookupResult`] to an `Error: ...`
//! definition, the literal "Translation not available", and no examples.
//!
//! For a runnable demo against the live services, see
//! `cargo run -p lexlookup --example lookup -- <word> [target-lang]`.

pub mod dictionary;
pub mod error;
pub mod lookup;
pub mod translate;

pub use dictionary::{DEFAULT_DICTIONARY_URL, DictEntry, DictionaryProvider, FreeDictionary};
pub use error::ProviderError;
pub use lookup::{
    DEFAULT_TARGET_LANG, LookupResult, NO_MEANING, SOURCE_LANG, TRANSLATION_UNAVAILABLE, WordLookup,
};
pub use translate::{DEFAULT_TRANSLATE_URL, LibreTranslate, TranslationProvider};
