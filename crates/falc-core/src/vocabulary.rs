use std::collections::HashMap;
use std::sync::Arc;

use falc_types::{Corpus, Language};

use crate::error::{Error, Result};

/// Lazily read lines of a frequency-sorted vocabulary, header first
pub type VocabularyLines = Box<dyn Iterator<Item = Result<String>> + Send>;

/// Provider of frequency-ordered vocabularies (one word per line, most frequent first)
pub trait VocabularySource: Send + Sync {
    /// Open the vocabulary of `language` trained on `corpus`
    fn open(&self, language: Language, corpus: Corpus) -> Result<VocabularyLines>;
}

/// In-memory vocabularies, mostly useful for tests and embedded word lists
#[derive(Default, Clone)]
pub struct StaticVocabulary {
    lines: HashMap<(Language, Corpus), Arc<Vec<String>>>,
}

impl StaticVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw lines, the first of which is treated as a header
    pub fn with_lines<I, S>(mut self, language: Language, corpus: Corpus, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        self.lines.insert((language, corpus), Arc::new(lines));
        self
    }

    /// Register words in frequency order, a fastText style header is prepended
    pub fn with_words<I, S>(self, language: Language, corpus: Corpus, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let header = format!("{} 300", words.len());
        self.with_lines(language, corpus, std::iter::once(header).chain(words))
    }
}

impl VocabularySource for StaticVocabulary {
    fn open(&self, language: Language, corpus: Corpus) -> Result<VocabularyLines> {
        let lines = self
            .lines
            .get(&(language, corpus))
            .cloned()
            .ok_or_else(|| {
                Error::source_unavailable(language, corpus, "no vocabulary registered")
            })?;

        Ok(Box::new(
            (0..lines.len()).map(move |i| Ok(lines[i].clone())),
        ))
    }
}
