use falc_types::Language;

/// Tokenization and sentence segmentation for the supported languages
pub trait LanguageProcessor: Send + Sync {
    /// Break text into tokens whose `start` are byte offsets into `text`
    fn tokenize(&self, text: &str, language: Language) -> Vec<Token>;

    /// Split text into sentences, each an exact substring of `text`
    fn split_sentences(&self, text: &str, language: Language) -> Vec<String>;

    /// Tokens that are neither stop words, punctuation nor named entities
    fn content_tokens(&self, text: &str, language: Language) -> Vec<Token> {
        self.tokenize(text, language)
            .into_iter()
            .filter(Token::is_content)
            .collect()
    }
}

/// Optional trait for languages with a lemma lookup
pub trait Lemmatizer: Send + Sync {
    /// Dictionary form of `word`, None if unknown
    fn lemmatize(&self, word: &str, language: Language) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    /// Byte offset of `text` in the tokenized string
    pub start: usize,
    pub is_stop: bool,
    pub is_punct: bool,
    /// Named entity type, None outside entities
    pub entity: Option<String>,
}

impl Token {
    /// Content token whose lemma is its lowercase surface
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        Self {
            lemma: text.to_lowercase(),
            text,
            start,
            is_stop: false,
            is_punct: false,
            entity: None,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn stop(mut self) -> Self {
        self.is_stop = true;
        self
    }

    pub fn punct(mut self) -> Self {
        self.is_punct = true;
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct && self.entity.is_none()
    }

    /// Lemma used for rank lookups, the surface when no lemma was assigned
    pub fn lookup_form(&self) -> String {
        if self.lemma.is_empty() {
            self.text.to_lowercase()
        } else {
            self.lemma.to_lowercase()
        }
    }
}
