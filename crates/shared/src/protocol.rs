//! Wire types for the public dictionary API (`/api/v2/entries/<lang>/<word>`).

use serde::Deserialize;

use crate::domain::WordResult;

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Body returned alongside a 404 when the dictionary has no entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProblem {
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resolution: String,
}

/// Collapses a lookup response into a single result.
///
/// The first entry names the word; definitions from every entry and meaning
/// are kept in response order. Returns `None` for an empty response.
pub fn word_result_from_entries(entries: &[DictionaryEntry]) -> Option<WordResult> {
    let first = entries.first()?;
    let definitions = entries
        .iter()
        .flat_map(|entry| entry.meanings.iter())
        .flat_map(|meaning| meaning.definitions.iter())
        .map(|definition| definition.definition.clone())
        .collect();
    Some(WordResult::new(first.word.clone(), definitions))
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
