use falc_types::{Corpus, Language, ParseError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Vocabulary {language}/{corpus} unavailable: {reason}")]
    SourceUnavailable {
        language: Language,
        corpus: Corpus,
        reason: String,
    },

    #[error("Unsupported corpus: {0}")]
    UnsupportedCorpus(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Malformed token {text:?} at byte {offset}: {reason}")]
    MalformedToken {
        text: String,
        offset: usize,
        reason: String,
    },
}

impl Error {
    pub fn source_unavailable(language: Language, corpus: Corpus, reason: impl ToString) -> Self {
        Error::SourceUnavailable {
            language,
            corpus,
            reason: reason.to_string(),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnsupportedLanguage(value) => Error::UnsupportedLanguage(value),
            ParseError::UnsupportedCorpus(value) => Error::UnsupportedCorpus(value),
        }
    }
}
