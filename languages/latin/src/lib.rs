pub mod lemmas;
pub mod processor;
pub mod sentences;
pub mod stop_words;
pub mod tokenizer;

pub use lemmas::LemmaTable;
pub use processor::LatinProcessor;
