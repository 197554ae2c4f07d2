use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use falc_types::ParseError;
use serde::{Deserialize, Serialize};

use self::detection::DetectionConfig;
use self::logging::LoggingConfig;
use self::vocabulary::VocabularyConfig;

pub mod detection;
pub mod logging;
pub mod vocabulary;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub vocabulary: VocabularyConfig,
    pub logging: LoggingConfig,
    /// Optional `form<TAB>lemma` file used by the lemmatizer
    pub lemmas_path: Option<String>,
}

impl Config {
    /// Defaults overlaid with `FALC_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::default().with_overrides(|name| env::var(name).ok())
    }

    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let detection = &mut self.detection;
        override_parsed(&lookup, "FALC_LANGUAGE", &mut detection.language)?;
        override_parsed(&lookup, "FALC_CORPUS", &mut detection.corpus)?;
        override_number(&lookup, "FALC_VOCAB_SIZE", &mut detection.vocab_size)?;
        override_number(
            &lookup,
            "FALC_RARE_RANK_THRESHOLD",
            &mut detection.rare_rank_threshold,
        )?;
        override_number(
            &lookup,
            "FALC_CAPITALIZED_RANK_THRESHOLD",
            &mut detection.capitalized_rank_threshold,
        )?;
        override_number(
            &lookup,
            "FALC_LONG_SENTENCE_THRESHOLD",
            &mut detection.long_sentence_threshold,
        )?;

        if let Some(dir) = lookup("FALC_CACHE_DIR") {
            self.vocabulary.cache_dir = dir;
        }
        override_number(
            &lookup,
            "FALC_DOWNLOAD_ATTEMPTS",
            &mut self.vocabulary.download_attempts,
        )?;

        if let Some(path) = lookup("FALC_LEMMAS") {
            self.lemmas_path = Some(path);
        }
        if let Some(format) = lookup("FALC_LOG_FORMAT") {
            self.logging.json = format.eq_ignore_ascii_case("json");
        }

        Ok(self)
    }
}

fn override_parsed<F, T>(lookup: &F, name: &str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr<Err = ParseError>,
{
    if let Some(value) = lookup(name) {
        *target = value.parse()?;
    }
    Ok(())
}

fn override_number<F, T>(lookup: &F, name: &str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(value) = lookup(name) {
        *target = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        })?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}
