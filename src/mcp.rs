use crate::summarize::{Summarizer, SummaryOptions, SummaryOrder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::sync::Arc;

const SERVER_NAME: &str = "smart-summarizer";
const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

const METHOD_NOT_FOUND: i64 = -32601;
const TOOL_FAILED: i64 = -32001;

/// How a client frames its messages. Replies use the same framing; once a
/// client sends a bare JSON line the session stays in ND-JSON mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    ContentLength,
    NdJson,
}

pub struct StdioMcpServer {
    summarizer: Arc<dyn Summarizer>,
    defaults: SummaryOptions,
}

impl StdioMcpServer {
    pub fn new(summarizer: Arc<dyn Summarizer>, defaults: SummaryOptions) -> Self {
        Self {
            summarizer,
            defaults,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut reader = std::io::BufReader::new(stdin.lock());
        let mut writer = std::io::BufWriter::new(stdout.lock());
        let mut framing = Framing::ContentLength;
        tracing::info!("waiting for MCP requests on stdin");

        loop {
            let (body, seen) = match read_message(&mut reader) {
                Ok(Some(m)) => m,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error=?e, "invalid frame, closing session");
                    break;
                }
            };
            if seen == Framing::NdJson {
                framing = Framing::NdJson;
            }
            let req: Value = match serde_json::from_slice(&body) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error=?e, "invalid JSON");
                    continue;
                }
            };
            if let Some(reply) = self.handle_request(&req).await {
                write_message(&mut writer, &reply, framing)?;
            }
        }
        tracing::info!("stdin closed, server exiting");
        Ok(())
    }

    /// Builds the JSON-RPC reply for one request. Notifications (no id) get none.
    async fn handle_request(&self, req: &Value) -> Option<Value> {
        let method = req.get("method").and_then(Value::as_str).unwrap_or("");
        let id = req.get("id").filter(|v| !v.is_null()).cloned();
        let params = req.get("params").cloned().unwrap_or_else(|| json!({}));
        tracing::info!(%method, id=?id, "received request");

        let outcome: Result<Value, (i64, String)> = match method {
            "initialize" => {
                let protocol = params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);
                Ok(json!({
                    "protocolVersion": protocol,
                    "capabilities": {"tools": {"list": true, "call": true}},
                    "serverInfo": server_info(),
                }))
            }
            "server/info" => Ok(json!({"serverInfo": server_info()})),
            "tools/list" => Ok(json!({"tools": [summarize_tool_schema()]})),
            "tools/call" => {
                let name = params.get("name").and_then(Value::as_str).unwrap_or("");
                let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
                match self.call_tool(name, arguments).await {
                    Ok(v) => Ok(json!({"content": [{"type": "json", "json": v}], "isError": false})),
                    Err(e) => {
                        tracing::warn!(tool=%name, error=%e, "tool call failed");
                        Err((TOOL_FAILED, e.to_string()))
                    }
                }
            }
            _ => Err((METHOD_NOT_FOUND, "method not found".to_string())),
        };

        let id = id?;
        Some(match outcome {
            Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            Err((code, message)) => {
                json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
            }
        })
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> anyhow::Result<Value> {
        if name != "summarize_text" {
            anyhow::bail!("unknown tool: {name}");
        }
        let args: SummarizeTextArgs = serde_json::from_value(arguments)?;
        let options = SummaryOptions {
            max_sentences: args.max_sentences.unwrap_or(self.defaults.max_sentences),
            order: args.order.unwrap_or(self.defaults.order),
            collapse_duplicates: args
                .collapse_duplicates
                .unwrap_or(self.defaults.collapse_duplicates),
        };
        let summarizer = self.summarizer.clone();
        let text = args.text;
        let res =
            tokio::task::spawn_blocking(move || summarizer.summarize(&text, &options)).await??;
        Ok(serde_json::to_value(res)?)
    }
}

#[derive(Debug, Deserialize)]
struct SummarizeTextArgs {
    text: String,
    max_sentences: Option<usize>,
    order: Option<SummaryOrder>,
    collapse_duplicates: Option<bool>,
}

fn server_info() -> Value {
    json!({"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")})
}

fn summarize_tool_schema() -> Value {
    json!({
        "name": "summarize_text",
        "description": "Extractive summary of the given text by word-frequency sentence scoring",
        "inputSchema": {
            "type": "object",
            "required": ["text"],
            "properties": {
                "text": {"type": "string"},
                "max_sentences": {"type": "number"},
                "order": {"type": "string", "enum": ["score", "document"]},
                "collapse_duplicates": {"type": "boolean"}
            }
        }
    })
}

/// Reads one message. `Ok(None)` on clean EOF.
fn read_message<R: BufRead>(reader: &mut R) -> anyhow::Result<Option<(Vec<u8>, Framing)>> {
    let mut line = String::new();
    let mut content_length: Option<usize> = None;
    let mut first = true;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            if first {
                return Ok(None);
            }
            anyhow::bail!("eof inside message header");
        }
        let header = line.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            if first {
                // stray blank line between messages
                continue;
            }
            break;
        }
        if first && header.starts_with('{') {
            return Ok(Some((header.as_bytes().to_vec(), Framing::NdJson)));
        }
        first = false;
        tracing::trace!(%header, "frame header");
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = Some(value.trim().parse()?);
            }
        }
    }
    let len = content_length.ok_or_else(|| anyhow::anyhow!("missing Content-Length"))?;
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some((body, Framing::ContentLength)))
}

fn write_message<W: Write>(writer: &mut W, msg: &Value, framing: Framing) -> anyhow::Result<()> {
    let s = serde_json::to_string(msg)?;
    match framing {
        Framing::NdJson => writeln!(writer, "{s}")?,
        Framing::ContentLength => write!(writer, "Content-Length: {}\r\n\r\n{}", s.len(), s)?,
    }
    writer.flush()?;
    Ok(())
}
