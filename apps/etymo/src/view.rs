//! Text rendering of the lookup display state.

use lookup_core::{ContentState, DisplayState, WordResult};

pub const TITLE: &str = "Etymo";
pub const PROMPT: &str = "Word";

pub fn render(display: &DisplayState) -> Vec<String> {
    match display {
        DisplayState::Offline => vec![
            "Not Connected".into(),
            "Unable to lookup words while offline.".into(),
            "Check your Internet connection.".into(),
        ],
        DisplayState::Content(ContentState::Loading) => vec!["Looking up...".into()],
        DisplayState::Content(ContentState::Word(word)) => render_word(word),
        DisplayState::Content(ContentState::EmptyQuery) => vec![
            "Enter a Word".into(),
            "Type a word into the search to see its definitions.".into(),
        ],
        DisplayState::Content(ContentState::NoResults) => vec![
            "No Results".into(),
            "Check the spelling or try a new search.".into(),
        ],
    }
}

fn render_word(word: &WordResult) -> Vec<String> {
    std::iter::once(word.text.clone())
        .chain(
            word.numbered_definitions()
                .map(|(number, definition)| format!("{number}. {definition}")),
        )
        .collect()
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
