use crate::summarize::{SummaryOptions, SummaryOrder, DEFAULT_MAX_SENTENCES};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "smart-summarizer")]
#[command(about = "Extractive summaries from word-frequency sentence scoring", long_about = None)]
pub struct AppConfig {
    /// Read the document from this file.
    #[arg(long, short = 'f', env = "SUMMARY_FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Summarize this text instead of reading a file or stdin.
    #[arg(long, short = 't')]
    pub text: Option<String>,

    /// Sentences to keep. Zero or negative values yield an empty summary.
    #[arg(
        long,
        short = 'n',
        env = "SUMMARY_MAX_SENTENCES",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MAX_SENTENCES as i64
    )]
    pub max_sentences: i64,

    #[arg(long, env = "SUMMARY_ORDER", value_enum, default_value_t = SummaryOrder::Score)]
    pub order: SummaryOrder,

    /// Merge byte-identical sentences into one candidate.
    #[arg(long)]
    pub collapse_duplicates: bool,

    /// Extra stopwords, one per line, added to the English list.
    #[arg(long, env = "SUMMARY_STOPWORDS")]
    pub stopwords: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Run as an MCP server on stdio instead of summarizing once.
    #[arg(long, conflicts_with_all = ["file", "text"])]
    pub serve: bool,
}

impl AppConfig {
    pub fn from_env_and_args() -> Self {
        Self::parse()
    }

    pub fn options(&self) -> SummaryOptions {
        SummaryOptions {
            max_sentences: usize::try_from(self.max_sentences).unwrap_or(0),
            order: self.order,
            collapse_duplicates: self.collapse_duplicates,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_sentences <= 0 {
            return Err("max_sentences must be > 0".into());
        }
        if let Some(path) = &self.stopwords {
            if !path.exists() {
                return Err(format!("stopword file {} does not exist", path.display()));
            }
        }
        Ok(())
    }
}
