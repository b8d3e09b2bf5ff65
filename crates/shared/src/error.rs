use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    NotFound,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no definitions found for '{word}'")]
    NotFound { word: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl LookupError {
    pub fn not_found(word: impl Into<String>) -> Self {
        Self::NotFound { word: word.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn kind(&self) -> LookupErrorKind {
        match self {
            Self::NotFound { .. } => LookupErrorKind::NotFound,
            Self::Transport(_) => LookupErrorKind::Transport,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == LookupErrorKind::NotFound
    }
}
