pub mod detectors;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod pipeline;
pub mod preprocess;
pub mod ranking;
pub mod sentence;
pub mod vocabulary;

pub use detectors::{Detector, DetectorContext};
pub use error::{Error, Result};
pub use language::{LanguageProcessor, Lemmatizer, Token};
pub use pipeline::{ComplexWord, Failure, Pipeline, Report};
pub use ranking::{Rank, RankCache, RankKey, RankTable};
pub use vocabulary::{StaticVocabulary, VocabularyLines, VocabularySource};
