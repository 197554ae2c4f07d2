//! Per-token difficulty detectors.
//!
//! Rank based detectors lower-case before looking a word up, since the
//! vocabularies are built from lower-cased crawl text. Shape based detectors
//! (acronyms, numbers, all caps) look at the surface as written.

use falc_config::detection::DetectionConfig;
use falc_types::{DetectedType, Language};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;
use crate::language::Token;
use crate::lexicon;
use crate::ranking::{Rank, RankCache, RankKey};

lazy_static! {
    static ref ACRONYM: Regex = Regex::new(r"^(?:\p{Lu}\.?)+$").unwrap();
    static ref NUMBER: Regex = Regex::new(r"^[+-]?\d+(?:[.,]\d+)*$").unwrap();
}

/// Signed integer or decimal, digit groups separated by `.` or `,`
pub fn is_number(word: &str) -> bool {
    NUMBER.is_match(word)
}

/// One or more uppercase letters, each optionally followed by a period
pub fn is_acronym_shape(word: &str) -> bool {
    ACRONYM.is_match(word)
}

/// Has an uppercase letter and no lowercase one; "123" or "!!" are not all caps
pub fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Rank tables and thresholds a detector evaluates against
pub struct DetectorContext<'a> {
    pub ranks: &'a RankCache,
    pub config: &'a DetectionConfig,
}

impl<'a> DetectorContext<'a> {
    pub fn new(ranks: &'a RankCache, config: &'a DetectionConfig) -> Self {
        Self { ranks, config }
    }

    pub fn source_key(&self) -> RankKey {
        RankKey::from_config(self.config)
    }

    pub fn english_key(&self) -> RankKey {
        self.source_key().with_language(Language::En)
    }

    /// Rank in the analysed language
    pub fn rank(&self, word: &str) -> Result<Rank> {
        self.ranks.rank(word, self.source_key())
    }

    pub fn english_rank(&self, word: &str) -> Result<Rank> {
        self.ranks.rank(word, self.english_key())
    }

    /// Load every table the applicable detectors will query
    pub fn warm_up(&self) -> Result<()> {
        self.ranks.table(self.source_key())?;
        if Detector::EmpruntAnglais.applies(self.config) {
            self.ranks.table(self.english_key())?;
        }
        Ok(())
    }

    /// Every label that fires for `token`
    pub fn evaluate(&self, token: &Token) -> Result<Vec<DetectedType>> {
        let mut labels = Vec::new();
        for detector in Detector::ALL {
            if detector.applies(self.config) && detector.fires(self, token)? {
                labels.push(detector.label());
            }
        }
        Ok(labels)
    }
}

/// The lexical detectors, one per label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detector {
    Rare,
    Majuscules,
    EmpruntAnglais,
    Accronyme,
    Abbreviation,
    Nombre,
}

impl Detector {
    pub const ALL: [Detector; 6] = [
        Detector::Rare,
        Detector::Majuscules,
        Detector::EmpruntAnglais,
        Detector::Accronyme,
        Detector::Abbreviation,
        Detector::Nombre,
    ];

    pub fn label(&self) -> DetectedType {
        match self {
            Detector::Rare => DetectedType::Rare,
            Detector::Majuscules => DetectedType::Majuscules,
            Detector::EmpruntAnglais => DetectedType::EmpruntAnglais,
            Detector::Accronyme => DetectedType::Accronyme,
            Detector::Abbreviation => DetectedType::Abbreviation,
            Detector::Nombre => DetectedType::Nombre,
        }
    }

    /// English loanwords are meaningless in an English text
    pub fn applies(&self, config: &DetectionConfig) -> bool {
        match self {
            Detector::EmpruntAnglais => config.language != Language::En,
            _ => true,
        }
    }

    pub fn fires(&self, ctx: &DetectorContext<'_>, token: &Token) -> Result<bool> {
        match self {
            Detector::Rare => rare(ctx, &token.lookup_form()),
            Detector::Majuscules => frequent_capitalized(ctx, &token.text),
            Detector::EmpruntAnglais => english_loanword(ctx, &token.lookup_form()),
            Detector::Accronyme => acronym(ctx, &token.text),
            Detector::Abbreviation => {
                Ok(lexicon::is_abbreviation(&token.text) || lexicon::is_slang(&token.text))
            }
            Detector::Nombre => Ok(is_number(&token.text)),
        }
    }
}

fn rare(ctx: &DetectorContext<'_>, lemma: &str) -> Result<bool> {
    if is_number(lemma) {
        return Ok(false);
    }
    Ok(ctx.rank(lemma)?.exceeds(ctx.config.rare_rank_threshold))
}

/// An ordinary, frequent word written in capitals
fn frequent_capitalized(ctx: &DetectorContext<'_>, word: &str) -> Result<bool> {
    if !is_all_caps(word) {
        return Ok(false);
    }
    let rank = ctx.rank(&word.to_lowercase())?;
    Ok(!rank.exceeds(ctx.config.capitalized_rank_threshold))
}

/// Common in English but comparatively rare in the analysed language
fn english_loanword(ctx: &DetectorContext<'_>, lemma: &str) -> Result<bool> {
    let config = ctx.config;
    let source = ctx.rank(lemma)?;
    let english = ctx.english_rank(lemma)?;

    let much_rarer = source > english.scaled(config.loanword_ratio);
    let rare_here_common_there = source.exceeds(config.loanword_source_min_rank)
        && english < Rank::Known(config.loanword_english_max_rank);

    Ok(much_rarer || rare_here_common_there)
}

/// Acronym shaped and not merely a frequent word in capitals
fn acronym(ctx: &DetectorContext<'_>, word: &str) -> Result<bool> {
    Ok(is_acronym_shape(word) && !frequent_capitalized(ctx, word)?)
}
