/// A looked-up word and its definitions in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordResult {
    pub text: String,
    pub definitions: Vec<String>,
}

impl WordResult {
    pub fn new(text: impl Into<String>, definitions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            definitions,
        }
    }

    /// Definitions paired with their 1-based display number.
    pub fn numbered_definitions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (index + 1, definition.as_str()))
    }
}
