use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use falc_config::Config;
use falc_types::{Corpus, Language};

/// Flag rare words, loanwords, acronyms and long sentences in plain-language text
#[derive(Parser, Debug)]
#[command(name = "falc", version)]
pub struct Args {
    /// Text to analyse; read from stdin when neither text nor a file is given
    pub text: Vec<String>,

    /// Read the text from a file (UTF-8 or Latin-1)
    #[arg(short, long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// JSON configuration file, FALC_* variables and flags override it
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Language of the text (fr, en, es, it, de)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Vocabulary corpus (common_crawl, wikipedia)
    #[arg(long)]
    pub corpus: Option<Corpus>,

    #[arg(long)]
    pub vocab_size: Option<usize>,

    #[arg(long, value_name = "RANK")]
    pub rare_threshold: Option<usize>,

    #[arg(long, value_name = "RANK")]
    pub capitalized_threshold: Option<usize>,

    /// Content tokens a sentence may hold before it is too long
    #[arg(long, value_name = "TOKENS")]
    pub long_sentence_threshold: Option<usize>,

    /// Tab separated `form<TAB>lemma` file
    #[arg(long, value_name = "PATH")]
    pub lemmas: Option<String>,

    /// Where downloaded vocabularies are cached
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// List complex words and their log-rank instead of detections
    #[arg(long)]
    pub complex_words: bool,

    /// Log-rank past which a word is complex
    #[arg(long, default_value_t = 9.0, requires = "complex_words")]
    pub log_rank_threshold: f64,
}

impl Args {
    /// Flags take precedence over everything in `config`
    pub fn apply(&self, mut config: Config) -> Config {
        let detection = &mut config.detection;
        if let Some(language) = self.language {
            detection.language = language;
        }
        if let Some(corpus) = self.corpus {
            detection.corpus = corpus;
        }
        if let Some(vocab_size) = self.vocab_size {
            detection.vocab_size = vocab_size;
        }
        if let Some(threshold) = self.rare_threshold {
            detection.rare_rank_threshold = threshold;
        }
        if let Some(threshold) = self.capitalized_threshold {
            detection.capitalized_rank_threshold = threshold;
        }
        if let Some(threshold) = self.long_sentence_threshold {
            detection.long_sentence_threshold = threshold;
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.vocabulary.cache_dir = cache_dir.clone();
        }
        if let Some(lemmas) = &self.lemmas {
            config.lemmas_path = Some(lemmas.clone());
        }
        config
    }

    /// File, then inline text, then stdin
    pub fn input(&self) -> anyhow::Result<String> {
        if let Some(path) = &self.input_file {
            return falc_fetch::read_file(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        if !self.text.is_empty() {
            return Ok(self.text.join(" "));
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    }
}

/// Config file or defaults, then the environment, then flags
pub fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?
            .with_overrides(|name| std::env::var(name).ok())?,
        None => Config::from_env()?,
    };
    Ok(args.apply(config))
}
