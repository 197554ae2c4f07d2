use falc_types::Language;

use crate::language::LanguageProcessor;

/// Number of content tokens (no stop words, punctuation or named entities)
pub fn count_content_tokens<P>(processor: &P, text: &str, language: Language) -> usize
where
    P: LanguageProcessor + ?Sized,
{
    processor.content_tokens(text, language).len()
}

/// Sentences with strictly more than `threshold` content tokens
pub fn long_sentences<P>(
    processor: &P,
    text: &str,
    language: Language,
    threshold: usize,
) -> Vec<String>
where
    P: LanguageProcessor + ?Sized,
{
    processor
        .split_sentences(text, language)
        .into_iter()
        .filter(|sentence| count_content_tokens(processor, sentence, language) > threshold)
        .collect()
}
