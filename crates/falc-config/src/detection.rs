use falc_types::{Corpus, Language};
use serde::{Deserialize, Serialize};

fn default_language() -> Language {
    Language::Fr
}

fn default_corpus() -> Corpus {
    Corpus::CommonCrawl
}

fn default_vocab_size() -> usize {
    100_000
}

fn default_rare_rank_threshold() -> usize {
    3500
}

fn default_capitalized_rank_threshold() -> usize {
    3500
}

fn default_long_sentence_threshold() -> usize {
    11
}

fn default_loanword_ratio() -> usize {
    5
}

fn default_loanword_source_min_rank() -> usize {
    15_000
}

fn default_loanword_english_max_rank() -> usize {
    5000
}

/// Knobs of the detection pipeline, overridable per call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Language of the analysed text
    #[serde(default = "default_language")]
    pub language: Language,
    #[serde(default = "default_corpus")]
    pub corpus: Corpus,
    /// Number of vocabulary entries kept in each rank table
    #[serde(default = "default_vocab_size")]
    pub vocab_size: usize,
    /// Lemmas ranked past this are `Rare`
    #[serde(default = "default_rare_rank_threshold")]
    pub rare_rank_threshold: usize,
    /// All-caps words ranked at or before this are `Majuscules`
    #[serde(default = "default_capitalized_rank_threshold")]
    pub capitalized_rank_threshold: usize,
    /// Sentences with more content tokens than this are `Phrase Longue`
    #[serde(default = "default_long_sentence_threshold")]
    pub long_sentence_threshold: usize,
    #[serde(default = "default_loanword_ratio")]
    pub loanword_ratio: usize,
    #[serde(default = "default_loanword_source_min_rank")]
    pub loanword_source_min_rank: usize,
    #[serde(default = "default_loanword_english_max_rank")]
    pub loanword_english_max_rank: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            corpus: default_corpus(),
            vocab_size: default_vocab_size(),
            rare_rank_threshold: default_rare_rank_threshold(),
            capitalized_rank_threshold: default_capitalized_rank_threshold(),
            long_sentence_threshold: default_long_sentence_threshold(),
            loanword_ratio: default_loanword_ratio(),
            loanword_source_min_rank: default_loanword_source_min_rank(),
            loanword_english_max_rank: default_loanword_english_max_rank(),
        }
    }
}
