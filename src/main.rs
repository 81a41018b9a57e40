use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

mod config;
mod errors;
mod input;
mod logging;
mod mcp;
mod summarize;

use crate::config::{AppConfig, OutputFormat};
use crate::mcp::StdioMcpServer;
use crate::summarize::{build_summarizer, StopwordSet, SummarizeResult, Summarizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cfg = AppConfig::from_env_and_args();
    if let Err(e) = cfg.validate() {
        tracing::warn!(config_error=%e, "invalid config");
    }

    let stopwords = load_stopwords(cfg.stopwords.as_deref())?;
    tracing::debug!(stopwords = stopwords.len(), "stopword set loaded");
    let summarizer = build_summarizer(stopwords);

    if cfg.serve {
        let server = StdioMcpServer::new(summarizer, cfg.options());
        // run future is not Send (stdio locks), so select on it in place
        tokio::select! {
            res = server.run() => {
                if let Err(e) = res { tracing::error!(error=?e, "server terminated with error") }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal, stopping server");
            }
        }
        return Ok(());
    }

    let document = match (&cfg.file, &cfg.text) {
        (Some(path), _) => input::read_file(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                eprintln!(
                    "Enter your text (type '{}' on a new line to finish):",
                    input::END_SENTINEL
                );
            }
            input::read_until_sentinel(stdin.lock())?
        }
    };

    let (result, error) = match summarizer.summarize(&document, &cfg.options()) {
        Ok(res) => (res, None),
        Err(e) => {
            tracing::warn!(error=%e, "no summary produced");
            (SummarizeResult::default(), Some(e))
        }
    };

    match cfg.format {
        OutputFormat::Text => println!("{}", result.summary),
        OutputFormat::Json => {
            let mut v = serde_json::to_value(&result)?;
            if let Some(e) = error {
                v["error"] = serde_json::Value::String(e.to_string());
            }
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
    }
    Ok(())
}

fn load_stopwords(extra: Option<&Path>) -> anyhow::Result<Arc<StopwordSet>> {
    let english = StopwordSet::english();
    let Some(path) = extra else {
        return Ok(english);
    };
    let custom = StopwordSet::parse(&input::read_file(path)?);
    if custom.is_empty() {
        tracing::warn!(path = %path.display(), "stopword file has no entries");
    }
    tracing::info!(path = %path.display(), words = custom.len(), "loaded extra stopwords");
    Ok(Arc::new(english.union(&custom)))
}
