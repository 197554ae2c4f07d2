pub mod types;

pub use types::{Corpus, DetectedType, Detection, Language, ParseError};
