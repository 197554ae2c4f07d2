use std::path::Path;

use falc_core::{LanguageProcessor, Lemmatizer, Token};
use falc_types::Language;

use crate::lemmas::LemmaTable;
use crate::sentences;
use crate::stop_words::is_stop_word;
use crate::tokenizer::{self, SpanKind};

/// Entity type given to capitalized words inside a sentence
pub const MISC_ENTITY: &str = "MISC";

/// Rule based processor for French, English, Spanish, Italian and German
#[derive(Default)]
pub struct LatinProcessor {
    lemmatizer: Option<Box<dyn Lemmatizer>>,
}

impl LatinProcessor {
    /// Processor whose lemmas are lowercased surfaces
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Some(Box::new(lemmatizer));
        self
    }

    /// Processor with lemmas read from a `form<TAB>lemma` file
    pub fn with_lemmas_file(path: &Path) -> Result<Self, std::io::Error> {
        let table = LemmaTable::load_from_file(path)?;
        Ok(Self::new().with_lemmatizer(table))
    }

    fn lemma(&self, word: &str, language: Language) -> String {
        self.lemmatizer
            .as_ref()
            .and_then(|l| l.lemmatize(word, language))
            .unwrap_or_else(|| word.to_lowercase())
    }
}

/// "Paris", "Jean-Pierre"; not "PARIS" nor "paris"
pub(crate) fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.any(char::is_lowercase)
}

fn ends_sentence(punct: &str) -> bool {
    punct.chars().any(|c| matches!(c, '.' | '!' | '?' | '…'))
}

impl LanguageProcessor for LatinProcessor {
    fn tokenize(&self, text: &str, language: Language) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;

        for span in tokenizer::split(text, language) {
            let surface = span.text(text);

            let token = match span.kind {
                SpanKind::Punct => {
                    if ends_sentence(surface) {
                        sentence_start = true;
                    }
                    tokens.push(Token::new(surface, span.start).with_lemma(surface).punct());
                    continue;
                }
                SpanKind::Number => Token::new(surface, span.start).with_lemma(surface),
                SpanKind::Acronym => Token::new(surface, span.start),
                SpanKind::Word => {
                    let token = Token::new(surface, span.start)
                        .with_lemma(self.lemma(surface, language));
                    if is_stop_word(language, surface) {
                        token.stop()
                    } else if !sentence_start && is_title_case(surface) {
                        token.with_entity(MISC_ENTITY)
                    } else {
                        token
                    }
                }
            };

            sentence_start = false;
            tokens.push(token);
        }

        tokens
    }

    fn split_sentences(&self, text: &str, _language: Language) -> Vec<String> {
        sentences::split(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn content(text: &str, language: Language) -> Vec<String> {
        LatinProcessor::new()
            .content_tokens(text, language)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_content_tokens() {
        assert_eq!(
            content("L'été, le chat de Marie mange des souris.", Language::Fr),
            vec!["chat", "mange", "souris"]
        );
    }

    #[test]
    fn test_sentence_start_is_not_an_entity() {
        let tokens = LatinProcessor::new().tokenize("Chat noir. Maison de Paris.", Language::Fr);
        let entities: Vec<&str> = tokens
            .iter()
            .filter(|t| t.entity.is_some())
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(entities, vec!["Paris"]);
    }

    #[test]
    fn test_capitals_and_numbers_are_content() {
        assert_eq!(
            content("Il a vu la NASA et 3,5 U.S.A.", Language::Fr),
            vec!["vu", "NASA", "3,5", "U.S.A."]
        );
    }

    #[test]
    fn test_offsets() {
        let text = "Où est l'élève ? Là-bas.";
        for token in LatinProcessor::new().tokenize(text, Language::Fr) {
            assert_eq!(&text[token.start..token.end()], token.text);
        }
    }

    #[test]
    fn test_lemmas() {
        let mut table = LemmaTable::new();
        table.insert("mangeait", "manger");
        let processor = LatinProcessor::new().with_lemmatizer(table);

        let tokens = processor.tokenize("Il mangeait Tout", Language::Fr);
        assert_eq!(tokens[1].lemma, "manger");
        // Unknown forms fall back to the lowercase surface
        assert_eq!(tokens[2].lemma, "tout");
    }

    #[test]
    fn test_punctuation_tokens() {
        let tokens = LatinProcessor::new().tokenize("Oui !", Language::Fr);
        assert!(tokens[1].is_punct);
        assert!(!tokens[1].is_content());
    }

    #[test]
    fn test_sentences() {
        let processor = LatinProcessor::new();
        assert_eq!(
            processor.split_sentences("Bonjour M. Martin. Comment allez-vous ?", Language::Fr),
            vec!["Bonjour M. Martin.", "Comment allez-vous ?"]
        );
    }
}
