use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages with a stop-word list and a fastText vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
    Es,
    It,
    De,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Fr,
        Language::En,
        Language::Es,
        Language::It,
        Language::De,
    ];

    /// ISO 639-1 code, as used in fastText file names
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::It => "it",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "french" => Ok(Language::Fr),
            "en" | "english" => Ok(Language::En),
            "es" | "spanish" => Ok(Language::Es),
            "it" | "italian" => Ok(Language::It),
            "de" | "german" => Ok(Language::De),
            _ => Err(ParseError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Text collection an embedding vocabulary was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corpus {
    CommonCrawl,
    Wikipedia,
}

impl Corpus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Corpus::CommonCrawl => "common_crawl",
            Corpus::Wikipedia => "wikipedia",
        }
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corpus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "common_crawl" | "commoncrawl" | "cc" | "crawl" => Ok(Corpus::CommonCrawl),
            "wikipedia" | "wiki" => Ok(Corpus::Wikipedia),
            _ => Err(ParseError::UnsupportedCorpus(s.to_string())),
        }
    }
}

/// Label attached to a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectedType {
    #[serde(rename = "Rare")]
    Rare,
    #[serde(rename = "Majuscules")]
    Majuscules,
    #[serde(rename = "Emprunt Anglais")]
    EmpruntAnglais,
    #[serde(rename = "Accronyme")]
    Accronyme,
    #[serde(rename = "Abbréviation")]
    Abbreviation,
    #[serde(rename = "Nombre")]
    Nombre,
    #[serde(rename = "Phrase Longue")]
    PhraseLongue,
}

impl DetectedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedType::Rare => "Rare",
            DetectedType::Majuscules => "Majuscules",
            DetectedType::EmpruntAnglais => "Emprunt Anglais",
            DetectedType::Accronyme => "Accronyme",
            DetectedType::Abbreviation => "Abbréviation",
            DetectedType::Nombre => "Nombre",
            DetectedType::PhraseLongue => "Phrase Longue",
        }
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged span of the normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Token surface or full sentence
    pub text: String,
    /// Offset in chars (not bytes) into the normalized text
    pub char_offset: usize,
    pub detected_type: DetectedType,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported corpus: {0}")]
    UnsupportedCorpus(String),
}
