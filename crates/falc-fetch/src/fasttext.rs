use std::path::{Path, PathBuf};

use falc_config::vocabulary::VocabularyConfig;
use falc_core::{Error, VocabularyLines, VocabularySource};
use falc_types::{Corpus, Language};
use tokio_util::sync::CancellationToken;

use crate::extract::{fetch_and_materialize, move_with_overwrite};
use crate::lines::read_lines;
use crate::{FetchError, FetchOptions, Result};

const VECTORS_DIR: &str = "fasttext-vectors";

/// fastText word vectors, downloaded into a cache directory on first use.
/// Only the word column of each line is used.
#[derive(Debug, Clone)]
pub struct FastTextVocabulary {
    cache_dir: PathBuf,
    attempts: u32,
    cancel: CancellationToken,
}

impl FastTextVocabulary {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            attempts: 2,
            cancel: CancellationToken::new(),
        }
    }

    pub fn from_config(config: &VocabularyConfig) -> Self {
        Self::new(&config.cache_dir).with_attempts(config.download_attempts)
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Downloads stop with [`FetchError::Cancelled`] once `cancel` fires
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn url(language: Language, corpus: Corpus) -> String {
        match corpus {
            Corpus::CommonCrawl => format!(
                "https://dl.fbaipublicfiles.com/fasttext/vectors-crawl/cc.{}.300.vec.gz",
                language.code()
            ),
            Corpus::Wikipedia => format!(
                "https://dl.fbaipublicfiles.com/fasttext/vectors-wiki/wiki.{}.vec",
                language.code()
            ),
        }
    }

    fn file_name(language: Language, corpus: Corpus) -> String {
        match corpus {
            Corpus::CommonCrawl => format!("cc.{}.300.vec", language.code()),
            Corpus::Wikipedia => format!("wiki.{}.vec", language.code()),
        }
    }

    pub fn vectors_dir(&self) -> PathBuf {
        self.cache_dir.join(VECTORS_DIR)
    }

    /// Where the uncompressed vectors for `language` and `corpus` live
    pub fn path(&self, language: Language, corpus: Corpus) -> PathBuf {
        self.vectors_dir().join(Self::file_name(language, corpus))
    }

    /// Local vectors file, downloaded first when missing
    pub fn ensure(&self, language: Language, corpus: Corpus) -> Result<PathBuf> {
        let path = self.path(language, corpus);
        if path.exists() {
            return Ok(path);
        }

        tracing::info!(
            "No {} vectors for {} in {}",
            corpus,
            language,
            self.vectors_dir().display()
        );
        let options = FetchOptions {
            attempts: self.attempts,
            overwrite: true,
        };
        let outputs = fetch_and_materialize(
            &Self::url(language, corpus),
            &self.vectors_dir(),
            &options,
            &self.cancel,
        )?;

        if !path.exists() {
            match outputs.as_slice() {
                [single] => move_with_overwrite(single, &path)?,
                _ => return Err(FetchError::UnsupportedArchive(unexpected(&outputs))),
            }
        }
        Ok(path)
    }
}

fn unexpected(outputs: &[PathBuf]) -> String {
    let names: Vec<String> = outputs
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    format!("unexpected archive contents: [{}]", names.join(", "))
}

/// Lines of `path`; once `cancel` fires the next line is an error, so a
/// table build stops without reading the rest of the file
fn open_lines(
    path: &Path,
    language: Language,
    corpus: Corpus,
    cancel: CancellationToken,
) -> falc_core::Result<VocabularyLines> {
    let lines =
        read_lines(path, false).map_err(|e| Error::source_unavailable(language, corpus, e))?;
    Ok(Box::new(lines.map(move |line| {
        if cancel.is_cancelled() {
            return Err(Error::source_unavailable(language, corpus, FetchError::Cancelled));
        }
        line.map_err(|e| Error::source_unavailable(language, corpus, e))
    })))
}

impl VocabularySource for FastTextVocabulary {
    fn open(&self, language: Language, corpus: Corpus) -> falc_core::Result<VocabularyLines> {
        let path = self
            .ensure(language, corpus)
            .map_err(|e| Error::source_unavailable(language, corpus, e))?;
        tracing::info!("Reading vocabulary from {}", path.display());
        open_lines(&path, language, corpus, self.cancel.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use falc_core::{Rank, RankCache, RankKey};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_urls_and_paths() {
        assert_eq!(
            FastTextVocabulary::url(Language::Fr, Corpus::CommonCrawl),
            "https://dl.fbaipublicfiles.com/fasttext/vectors-crawl/cc.fr.300.vec.gz"
        );
        assert_eq!(
            FastTextVocabulary::url(Language::En, Corpus::Wikipedia),
            "https://dl.fbaipublicfiles.com/fasttext/vectors-wiki/wiki.en.vec"
        );

        let vocabulary = FastTextVocabulary::new("/cache");
        assert_eq!(
            vocabulary.path(Language::Fr, Corpus::CommonCrawl),
            PathBuf::from("/cache/fasttext-vectors/cc.fr.300.vec")
        );
    }

    #[test]
    fn test_cached_vectors_are_ranked() {
        let dir = tempfile::tempdir().unwrap();
        let vocabulary = FastTextVocabulary::new(dir.path());
        let path = vocabulary.path(Language::Fr, Corpus::CommonCrawl);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "3 300\nde 0.1 0.2\nla 0.3 0.1\nmaison 0.5 0.5\n").unwrap();

        let cache = RankCache::new(vocabulary);
        let key = RankKey::new(Language::Fr, Corpus::CommonCrawl, 100);
        assert_eq!(cache.rank("de", key).unwrap(), Rank::Known(0));
        assert_eq!(cache.rank("maison", key).unwrap(), Rank::Known(2));
        assert_eq!(cache.rank("chat", key).unwrap(), Rank::Unknown);
    }

    #[test]
    fn test_cancel_stops_reading_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancellationToken::new();
        let vocabulary = FastTextVocabulary::new(dir.path()).with_cancel(cancel.clone());
        let path = vocabulary.path(Language::Fr, Corpus::CommonCrawl);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "3 300\nde 0.1\nla 0.3\nmaison 0.5\n").unwrap();

        let mut lines = vocabulary.open(Language::Fr, Corpus::CommonCrawl).unwrap();
        assert_eq!(lines.next().unwrap().unwrap(), "3 300");
        cancel.cancel();
        assert!(matches!(lines.next(), Some(Err(Error::SourceUnavailable { .. }))));

        let cache = RankCache::new(vocabulary);
        let key = RankKey::new(Language::Fr, Corpus::CommonCrawl, 100);
        assert!(cache.rank("de", key).is_err());
        assert!(cache.loaded().is_empty());
    }

    #[test]
    fn test_cancelled_fetch_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let vocabulary = FastTextVocabulary::new(dir.path()).with_cancel(cancel);

        let err = vocabulary.open(Language::De, Corpus::Wikipedia).err().unwrap();
        assert!(matches!(
            err,
            Error::SourceUnavailable {
                language: Language::De,
                corpus: Corpus::Wikipedia,
                ..
            }
        ));
        assert!(!vocabulary.path(Language::De, Corpus::Wikipedia).exists());
    }
}
