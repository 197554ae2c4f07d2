use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use falc_config::detection::DetectionConfig;
use falc_types::{DetectedType, Detection};
use serde::Serialize;

use crate::detectors::DetectorContext;
use crate::error::{Error, Result};
use crate::language::{LanguageProcessor, Token};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::ranking::{RankCache, RankKey};
use crate::sentence;

/// Result of one detection run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Normalized text all offsets refer to
    pub text: String,
    pub detections: Vec<Detection>,
    /// Tokens or sentences that could not be evaluated
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn of_type(&self, detected_type: DetectedType) -> impl Iterator<Item = &Detection> {
        self.detections
            .iter()
            .filter(move |d| d.detected_type == detected_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub text: String,
    /// Byte offset in the normalized text
    pub offset: usize,
    pub reason: String,
}

/// Content token whose lemma log-rank passed a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexWord {
    pub text: String,
    pub char_offset: usize,
    /// Rounded to two decimals, infinite for unknown words
    pub log_rank: f64,
}

/// Byte to char offset conversion for one text
struct CharOffsets {
    starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
        }
    }

    fn of(&self, byte: usize) -> usize {
        self.starts.partition_point(|&start| start < byte)
    }
}

/// Normalize, tokenize and run every detector over a text
pub struct Pipeline<P> {
    processor: P,
    ranks: Arc<RankCache>,
    preprocessor: Box<dyn Preprocessor + Send + Sync>,
    config: DetectionConfig,
}

impl<P: LanguageProcessor> Pipeline<P> {
    pub fn new(processor: P, ranks: Arc<RankCache>, config: DetectionConfig) -> Self {
        Self {
            processor,
            ranks,
            preprocessor: Box::new(DefaultPreprocessor),
            config,
        }
    }

    pub fn with_preprocessor(
        mut self,
        preprocessor: impl Preprocessor + Send + Sync + 'static,
    ) -> Self {
        self.preprocessor = Box::new(preprocessor);
        self
    }

    /// Run with the pipeline's own configuration
    pub fn detect(&self, text: &str) -> Result<Report> {
        self.detect_with(text, &self.config)
    }

    /// Run with per-call overrides.
    ///
    /// Detectors run once per distinct surface form; every occurrence of a
    /// flagged form is reported at its own offset. Failing tokens end up in
    /// [`Report::failures`], an unavailable vocabulary fails the whole call.
    pub fn detect_with(&self, text: &str, config: &DetectionConfig) -> Result<Report> {
        let text = self.preprocessor.process(text);
        let ctx = DetectorContext::new(&self.ranks, config);
        ctx.warm_up()?;

        let offsets = CharOffsets::new(&text);
        let mut detections = Vec::new();
        let mut failures = Vec::new();
        let mut verdicts: HashMap<String, Vec<DetectedType>> = HashMap::new();

        let tokens = self.processor.tokenize(&text, config.language);
        tracing::debug!("Tokenized {} tokens", tokens.len());

        for token in tokens.iter().filter(|t| t.is_content()) {
            if let Err(err) = check_token(&text, token) {
                tracing::warn!("Skipping token: {}", err);
                failures.push(Failure::for_token(token, &err));
                continue;
            }

            if !verdicts.contains_key(&token.text) {
                match ctx.evaluate(token) {
                    Ok(labels) => {
                        verdicts.insert(token.text.clone(), labels);
                    }
                    Err(err) => {
                        tracing::warn!("Detectors failed on {:?}: {}", token.text, err);
                        failures.push(Failure::for_token(token, &err));
                        continue;
                    }
                }
            }

            let char_offset = offsets.of(token.start);
            for &detected_type in &verdicts[&token.text] {
                detections.push(Detection {
                    text: token.text.clone(),
                    char_offset,
                    detected_type,
                });
            }
        }

        let long = sentence::long_sentences(
            &self.processor,
            &text,
            config.language,
            config.long_sentence_threshold,
        );

        // Search past the previous match so repeated sentences get their own offset
        let mut cursor = 0;
        for sentence in long {
            let found = text[cursor..]
                .find(&sentence)
                .map(|i| cursor + i)
                .or_else(|| text.find(&sentence));

            match found {
                Some(start) => {
                    cursor = start + sentence.len();
                    detections.push(Detection {
                        text: sentence,
                        char_offset: offsets.of(start),
                        detected_type: DetectedType::PhraseLongue,
                    });
                }
                None => {
                    tracing::warn!("Long sentence not found in text: {:?}", sentence);
                    failures.push(Failure {
                        text: sentence,
                        offset: cursor,
                        reason: "sentence not found in text".to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            "{} detections, {} failures",
            detections.len(),
            failures.len()
        );

        Ok(Report {
            text,
            detections,
            failures,
        })
    }

    /// Distinct content tokens whose lemma log-rank exceeds `log_rank_threshold`,
    /// in order of first occurrence
    pub fn complex_words(
        &self,
        text: &str,
        log_rank_threshold: f64,
    ) -> Result<Vec<ComplexWord>> {
        let text = self.preprocessor.process(text);
        let table = self.ranks.table(RankKey::from_config(&self.config))?;
        let offsets = CharOffsets::new(&text);
        let mut seen = HashSet::new();

        let words = self
            .processor
            .content_tokens(&text, self.config.language)
            .into_iter()
            .filter(|token| seen.insert(token.text.clone()))
            .filter_map(|token| {
                let log_rank = table.rank(&token.lookup_form()).log();
                (log_rank > log_rank_threshold).then(|| ComplexWord {
                    char_offset: offsets.of(token.start),
                    text: token.text,
                    log_rank: (log_rank * 100.0).round() / 100.0,
                })
            })
            .collect();

        Ok(words)
    }
}

impl Failure {
    fn for_token(token: &Token, err: &Error) -> Self {
        Self {
            text: token.text.clone(),
            offset: token.start,
            reason: err.to_string(),
        }
    }
}

/// The token's surface must be found in `text` at its offset
fn check_token(text: &str, token: &Token) -> Result<()> {
    let malformed = |reason: &str| Error::MalformedToken {
        text: token.text.clone(),
        offset: token.start,
        reason: reason.to_string(),
    };

    if token.text.is_empty() {
        return Err(malformed("empty surface"));
    }
    match text.get(token.start..token.end()) {
        Some(slice) if slice == token.text => Ok(()),
        Some(_) => Err(malformed("surface differs from the text at its offset")),
        None => Err(malformed("offset outside the text")),
    }
}
