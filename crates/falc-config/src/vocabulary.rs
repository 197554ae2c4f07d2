use serde::{Deserialize, Serialize};

fn default_cache_dir() -> String {
    "resources/models".to_string()
}

fn default_download_attempts() -> u32 {
    2
}

/// Where fastText vocabularies are cached and how they are fetched
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VocabularyConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Network failures are retried until this many attempts were made
    #[serde(default = "default_download_attempts")]
    pub download_attempts: u32,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            download_attempts: default_download_attempts(),
        }
    }
}
