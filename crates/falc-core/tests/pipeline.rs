use std::sync::Arc;

use falc_config::detection::DetectionConfig;
use falc_core::preprocess::Preprocessor;
use falc_core::{Error, LanguageProcessor, Pipeline, RankCache, StaticVocabulary, Token};
use falc_types::{Corpus, DetectedType, Language};
use pretty_assertions::assert_eq;

const STOP_WORDS: [&str; 7] = ["le", "la", "de", "et", "il", "a", "the"];

// le 0, de 1, la 2, et 3, chat 4, maison 5, dort 6, mange 7, usa 8, week 9, end 10
const FRENCH: [&str; 11] = [
    "le", "de", "la", "et", "chat", "maison", "dort", "mange", "usa", "week", "end",
];
const ENGLISH: [&str; 5] = ["the", "of", "and", "week", "download"];

/// Space separated words, a trailing period is its own punctuation token
struct Words;

impl LanguageProcessor for Words {
    fn tokenize(&self, text: &str, _language: Language) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for piece in text.split(' ') {
            let word = piece.strip_suffix('.').unwrap_or(piece);
            if !word.is_empty() {
                let token = Token::new(word, offset);
                if STOP_WORDS.contains(&word.to_lowercase().as_str()) {
                    tokens.push(token.stop());
                } else {
                    tokens.push(token);
                }
            }
            if word.len() < piece.len() {
                tokens.push(Token::new(".", offset + word.len()).punct());
            }
            offset += piece.len() + 1;
        }
        tokens
    }

    fn split_sentences(&self, text: &str, _language: Language) -> Vec<String> {
        text.split_inclusive('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Emits a token that is nowhere in the text
struct Ghost;

impl LanguageProcessor for Ghost {
    fn tokenize(&self, text: &str, language: Language) -> Vec<Token> {
        let mut tokens = Words.tokenize(text, language);
        tokens.push(Token::new("fantôme", text.len() + 10));
        tokens
    }

    fn split_sentences(&self, _text: &str, _language: Language) -> Vec<String> {
        Vec::new()
    }
}

fn cache() -> Arc<RankCache> {
    Arc::new(RankCache::new(
        StaticVocabulary::new()
            .with_words(Language::Fr, Corpus::CommonCrawl, FRENCH)
            .with_words(Language::En, Corpus::CommonCrawl, ENGLISH),
    ))
}

fn config() -> DetectionConfig {
    DetectionConfig {
        rare_rank_threshold: 7,
        capitalized_rank_threshold: 7,
        loanword_ratio: 5,
        loanword_source_min_rank: 9,
        loanword_english_max_rank: 4,
        ..DetectionConfig::default()
    }
}

fn pipeline() -> Pipeline<Words> {
    Pipeline::new(Words, cache(), config())
}

fn labels_of(report: &falc_core::Report, text: &str) -> Vec<DetectedType> {
    report
        .detections
        .iter()
        .filter(|d| d.text == text)
        .map(|d| d.detected_type)
        .collect()
}

#[test]
fn test_plain_sentence_has_no_detections() {
    let report = pipeline().detect("Le chat dort.").unwrap();
    assert_eq!(report.text, "Le chat dort.");
    assert!(report.detections.is_empty());
    assert!(report.failures.is_empty());
}

#[test]
fn test_frequent_word_in_capitals() {
    let report = pipeline().detect("Le CHAT mange.").unwrap();
    assert_eq!(labels_of(&report, "CHAT"), vec![DetectedType::Majuscules]);
}

#[test]
fn test_acronym_is_not_capitals() {
    let report = pipeline().detect("Le USA dort.").unwrap();
    let labels = labels_of(&report, "USA");
    assert!(labels.contains(&DetectedType::Accronyme));
    assert!(!labels.contains(&DetectedType::Majuscules));
}

#[test]
fn test_number_only_labelled_number() {
    let report = pipeline().detect("Il a 123 chats.").unwrap();
    assert_eq!(labels_of(&report, "123"), vec![DetectedType::Nombre]);
    assert_eq!(labels_of(&report, "chats"), vec![DetectedType::Rare]);
}

#[test]
fn test_long_sentence_threshold() {
    let words: Vec<String> = (0..12).map(|i| format!("mot{i}")).collect();
    let sentence = format!("De {}.", words.join(" "));
    let text = format!("Le chat dort. {sentence}");

    let report = pipeline().detect(&text).unwrap();
    let long: Vec<_> = report.of_type(DetectedType::PhraseLongue).collect();
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].text, sentence);
    assert_eq!(long[0].char_offset, "Le chat dort. ".len());

    let stricter = DetectionConfig {
        long_sentence_threshold: 12,
        ..config()
    };
    let report = pipeline().detect_with(&text, &stricter).unwrap();
    assert_eq!(report.of_type(DetectedType::PhraseLongue).count(), 0);
}

#[test]
fn test_repeated_long_sentences_get_their_own_offset() {
    let words: Vec<String> = (0..12).map(|i| format!("mot{i}")).collect();
    let sentence = format!("{}.", words.join(" "));
    let text = format!("{sentence} {sentence}");

    let report = pipeline().detect(&text).unwrap();
    let offsets: Vec<usize> = report
        .of_type(DetectedType::PhraseLongue)
        .map(|d| d.char_offset)
        .collect();
    assert_eq!(offsets, vec![0, sentence.len() + 1]);
}

#[test]
fn test_english_loanword_with_default_thresholds() {
    let mut english: Vec<String> = (0..1000).map(|i| format!("w{i}")).collect();
    english.push("download".to_string());
    let cache = Arc::new(RankCache::new(
        StaticVocabulary::new()
            .with_words(Language::Fr, Corpus::CommonCrawl, FRENCH)
            .with_words(Language::En, Corpus::CommonCrawl, english),
    ));
    let pipeline = Pipeline::new(Words, cache, DetectionConfig::default());

    let report = pipeline.detect("le download").unwrap();
    assert!(labels_of(&report, "download").contains(&DetectedType::EmpruntAnglais));
}

#[test]
fn test_english_text_has_no_loanwords() {
    let cache = Arc::new(RankCache::new(StaticVocabulary::new().with_words(
        Language::En,
        Corpus::CommonCrawl,
        ENGLISH,
    )));
    let config = DetectionConfig {
        language: Language::En,
        ..config()
    };
    let report = Pipeline::new(Words, cache, config).detect("the download").unwrap();
    assert_eq!(report.of_type(DetectedType::EmpruntAnglais).count(), 0);
}

#[test]
fn test_every_occurrence_is_reported() {
    let report = pipeline()
        .detect("maison ornithorynque maison ornithorynque")
        .unwrap();
    let offsets: Vec<usize> = report
        .detections
        .iter()
        .filter(|d| d.text == "ornithorynque" && d.detected_type == DetectedType::Rare)
        .map(|d| d.char_offset)
        .collect();
    assert_eq!(offsets, vec![7, 28]);
}

#[test]
fn test_word_inside_longer_word_not_reported_there() {
    let report = pipeline().detect("ornithorynques ornithorynque").unwrap();
    let offsets: Vec<usize> = report
        .detections
        .iter()
        .filter(|d| d.text == "ornithorynque")
        .map(|d| d.char_offset)
        .collect();
    assert_eq!(offsets, vec![15]);
}

#[test]
fn test_offsets_point_at_detection_text() {
    let text = "L'été  la   maison\tornithorynque, MDR. Le USA mange 3,14 kiwis.";
    let report = pipeline().detect(text).unwrap();
    assert!(!report.detections.is_empty());

    for detection in &report.detections {
        let found: String = report
            .text
            .chars()
            .skip(detection.char_offset)
            .take(detection.text.chars().count())
            .collect();
        assert_eq!(found, detection.text);
    }
}

#[test]
fn test_offsets_count_chars() {
    let report = pipeline().detect("été ornithorynque").unwrap();
    let rare: Vec<_> = report
        .of_type(DetectedType::Rare)
        .filter(|d| d.text == "ornithorynque")
        .collect();
    assert_eq!(rare[0].char_offset, 4);
}

#[test]
fn test_detection_is_idempotent() {
    let pipeline = pipeline();
    let text = "Le USA mange 42 ornithorynques. MDR.";
    assert_eq!(pipeline.detect(text).unwrap(), pipeline.detect(text).unwrap());
}

#[test]
fn test_whitespace_is_collapsed() {
    let report = pipeline().detect("  Le  chat\n\ndort. ").unwrap();
    assert_eq!(report.text, "Le chat dort.");
}

#[test]
fn test_whitespace_only_text_is_empty() {
    let report = pipeline().detect(" \n\t ").unwrap();
    assert_eq!(report, falc_core::Report::default());
}

/// Drops markdown emphasis before the default normalization
struct StripEmphasis;

impl Preprocessor for StripEmphasis {
    fn process(&self, text: &str) -> String {
        falc_core::preprocess::DefaultPreprocessor.process(&text.replace('*', ""))
    }
}

#[test]
fn test_custom_preprocessor_sets_offsets() {
    let pipeline = pipeline().with_preprocessor(StripEmphasis);
    let report = pipeline.detect("Le **USA** dort.").unwrap();
    assert_eq!(report.text, "Le USA dort.");

    let acronyms: Vec<usize> = report
        .of_type(DetectedType::Accronyme)
        .map(|d| d.char_offset)
        .collect();
    assert_eq!(acronyms, vec![3]);
}

#[test]
fn test_malformed_token_is_a_failure() {
    let pipeline = Pipeline::new(Ghost, cache(), config());
    let report = pipeline.detect("Le chat dort.").unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].text, "fantôme");
    assert!(report.detections.is_empty());
}

#[test]
fn test_missing_vocabulary_fails_the_call() {
    let empty = Arc::new(RankCache::new(StaticVocabulary::new()));
    let pipeline = Pipeline::new(Words, empty, config());
    let err = pipeline.detect("Le chat dort.").unwrap_err();
    assert!(matches!(
        err,
        Error::SourceUnavailable {
            language: Language::Fr,
            corpus: Corpus::CommonCrawl,
            ..
        }
    ));
}

#[test]
fn test_complex_words() {
    let words = pipeline()
        .complex_words("le chat mange un ornithorynque et mange", 2.0)
        .unwrap();
    let found: Vec<(&str, usize)> = words
        .iter()
        .map(|w| (w.text.as_str(), w.char_offset))
        .collect();
    assert_eq!(found, vec![("mange", 8), ("un", 14), ("ornithorynque", 17)]);

    // ln(1 + 7)
    assert_eq!(words[0].log_rank, 2.08);
    assert!(words[2].log_rank.is_infinite());
}

#[test]
fn test_report_serializes_labels() {
    let report = pipeline().detect("Le CHAT mange.").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["detections"][0]["detected_type"], "Majuscules");
    assert_eq!(json["detections"][0]["char_offset"], 3);
}
