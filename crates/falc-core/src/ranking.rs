//! Frequency ranks derived from embedding vocabularies.
//!
//! A vocabulary lists words from most to least frequent; a word's rank is its
//! position in that list. Tables are expensive to build (the common crawl
//! vocabularies are several gigabytes), so [`RankCache`] builds each one at most
//! once per key and shares it afterwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use falc_config::detection::DetectionConfig;
use falc_types::{Corpus, Language};

use crate::error::Result;
use crate::vocabulary::VocabularySource;

/// Position of a word in a frequency-sorted vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// 0 is the most frequent word
    Known(usize),
    /// Beyond the known vocabulary, greater than every known rank
    Unknown,
}

impl Rank {
    /// `ln(1 + rank)`, infinite for unknown words
    pub fn log(&self) -> f64 {
        match self {
            Rank::Known(rank) => (*rank as f64).ln_1p(),
            Rank::Unknown => f64::INFINITY,
        }
    }

    /// Multiply a known rank, saturating; unknown stays unknown
    pub fn scaled(&self, factor: usize) -> Rank {
        match self {
            Rank::Known(rank) => Rank::Known(rank.saturating_mul(factor)),
            Rank::Unknown => Rank::Unknown,
        }
    }

    /// Strictly rarer than `threshold`
    pub fn exceeds(&self, threshold: usize) -> bool {
        *self > Rank::Known(threshold)
    }
}

/// Selects one rank table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankKey {
    pub language: Language,
    pub corpus: Corpus,
    pub vocab_size: usize,
}

impl RankKey {
    pub fn new(language: Language, corpus: Corpus, vocab_size: usize) -> Self {
        Self {
            language,
            corpus,
            vocab_size,
        }
    }

    /// Key of the analysed language under `config`
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.language, config.corpus, config.vocab_size)
    }

    /// Same corpus and size, another language
    pub fn with_language(&self, language: Language) -> Self {
        Self { language, ..*self }
    }
}

/// Word to rank mapping, ranks contiguous from 0
#[derive(Debug, Default)]
pub struct RankTable {
    ranks: HashMap<String, usize>,
}

impl RankTable {
    pub fn rank(&self, word: &str) -> Rank {
        self.ranks
            .get(word)
            .map_or(Rank::Unknown, |&rank| Rank::Known(rank))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Build a table from vocabulary lines, skipping the header line.
///
/// The first whitespace separated column of each line is the word. Blank lines
/// and repeated words do not consume a rank. Reading stops once `vocab_size`
/// words were ranked.
pub fn build_rank_table<I>(lines: I, vocab_size: usize) -> Result<RankTable>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut ranks = HashMap::new();
    let mut lines = lines.into_iter();

    // Header: "<word count> <dimension>"
    if let Some(header) = lines.next() {
        header?;
    }

    while ranks.len() < vocab_size {
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let Some(word) = line.split_whitespace().next() else {
            continue;
        };
        let rank = ranks.len();
        ranks.entry(word.to_string()).or_insert(rank);
    }

    Ok(RankTable { ranks })
}

type Slot = Arc<Mutex<Option<Arc<RankTable>>>>;

/// Memoized rank tables, one per [`RankKey`].
///
/// Each key has its own slot lock: concurrent first lookups of one key wait
/// for a single build, other keys are not blocked. A failed build leaves the
/// slot empty so the next lookup tries again.
pub struct RankCache {
    source: Box<dyn VocabularySource>,
    slots: Mutex<HashMap<RankKey, Slot>>,
}

impl RankCache {
    pub fn new(source: impl VocabularySource + 'static) -> Self {
        Self {
            source: Box::new(source),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Table for `key`, built from the source on first use
    pub fn table(&self, key: RankKey) -> Result<Arc<RankTable>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key).or_default())
        };

        let mut table = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = table.as_ref() {
            return Ok(Arc::clone(table));
        }

        tracing::info!(
            "Building rank table for {}/{} (vocab size {})",
            key.language,
            key.corpus,
            key.vocab_size
        );
        let lines = self.source.open(key.language, key.corpus)?;
        let built = Arc::new(build_rank_table(lines, key.vocab_size)?);
        tracing::info!("Ranked {} words for {}", built.len(), key.language);

        *table = Some(Arc::clone(&built));
        Ok(built)
    }

    /// Rank of `word`, exact and case sensitive
    pub fn rank(&self, word: &str, key: RankKey) -> Result<Rank> {
        Ok(self.table(key)?.rank(word))
    }

    /// `ln(1 + rank)` of `word`, infinite when unknown
    pub fn log_rank(&self, word: &str, key: RankKey) -> Result<f64> {
        Ok(self.rank(word, key)?.log())
    }

    /// Keys whose table is built; tables still being built are skipped
    pub fn loaded(&self) -> Vec<RankKey> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .iter()
            .filter(|(_, slot)| matches!(slot.try_lock(), Ok(table) if table.is_some()))
            .map(|(key, _)| *key)
            .collect()
    }
}
