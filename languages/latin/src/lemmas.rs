use std::collections::HashMap;
use std::path::Path;

use falc_core::Lemmatizer;
use falc_types::Language;
use unicode_normalization::UnicodeNormalization;

/// Inflected form to lemma lookup
#[derive(Debug, Default, Clone)]
pub struct LemmaTable {
    lemmas: HashMap<String, String>,
    language: Option<Language>,
}

impl LemmaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only answer for `language`; a table without one answers for all
    pub fn for_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn insert(&mut self, form: &str, lemma: &str) {
        let form: String = form.nfc().collect();
        self.lemmas.insert(form.to_lowercase(), lemma.nfc().collect());
    }

    /// Parse `form<TAB>lemma` lines; blank lines and `#` comments are skipped
    pub fn parse(content: &str) -> Self {
        let mut table = Self::new();
        for line in content.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split('\t');
            match (parts.next(), parts.next()) {
                (Some(form), Some(lemma)) if !form.is_empty() && !lemma.is_empty() => {
                    table.insert(form, lemma)
                }
                _ => tracing::debug!("Skipping lemma line: {:?}", line),
            }
        }
        table
    }

    /// Load lemma data from a TSV file
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        tracing::info!("Loading lemmas from file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let table = Self::parse(&content);
        tracing::info!("Loaded {} lemmas", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Lemmatizer for LemmaTable {
    fn lemmatize(&self, word: &str, language: Language) -> Option<String> {
        if self.language.is_some_and(|l| l != language) {
            return None;
        }
        let form: String = word.nfc().collect();
        self.lemmas.get(&form.to_lowercase()).cloned()
    }
}
