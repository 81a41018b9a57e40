use assert_cmd::prelude::*;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

fn write_framed<W: Write>(w: &mut W, v: &serde_json::Value) {
    let s = serde_json::to_string(v).unwrap();
    write!(w, "Content-Length: {}\r\n\r\n{}", s.len(), s).unwrap();
    w.flush().unwrap();
}

fn read_framed<R: std::io::BufRead>(reader: &mut R) -> serde_json::Value {
    let mut header = String::new();
    let mut content_length: Option<usize> = None;
    loop {
        header.clear();
        let n = reader.read_line(&mut header).unwrap();
        assert!(n > 0, "unexpected eof reading header");
        let line = header.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        if let Some(rest) = line.strip_prefix("Content-Length:") {
            content_length = Some(rest.trim().parse::<usize>().unwrap());
        }
    }
    let len = content_length.expect("missing Content-Length");
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[test]
fn mcp_end_to_end() {
    let mut cmd = Command::cargo_bin("smart-summarizer").unwrap();
    let mut child = cmd
        .arg("--serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = std::io::BufReader::new(child.stdout.take().unwrap());

    // initialize
    write_framed(
        &mut stdin,
        &serde_json::json!({"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}),
    );
    let resp = read_framed(&mut stdout);
    assert_eq!(resp.get("id").and_then(|x| x.as_i64()), Some(1));
    assert_eq!(
        resp.pointer("/result/serverInfo/name").and_then(|x| x.as_str()),
        Some("smart-summarizer")
    );

    // tools/list
    write_framed(
        &mut stdin,
        &serde_json::json!({"jsonrpc":"2.0","id":2,"method":"tools/list"}),
    );
    let resp = read_framed(&mut stdout);
    let tools = resp.pointer("/result/tools").and_then(|t| t.as_array()).unwrap();
    assert_eq!(
        tools[0].get("name").and_then(|x| x.as_str()),
        Some("summarize_text")
    );

    // summarize_text
    write_framed(
        &mut stdin,
        &serde_json::json!({
            "jsonrpc":"2.0","id":3,"method":"tools/call",
            "params": {"name":"summarize_text","arguments":{
                "text":"Cats are great. Dogs are great too. Cats and dogs are both pets.",
                "max_sentences": 1
            }}
        }),
    );
    let resp = read_framed(&mut stdout);
    let content = resp.pointer("/result/content/0/json").unwrap();
    assert_eq!(
        content.get("summary").and_then(|x| x.as_str()),
        Some("Cats and dogs are both pets.")
    );
    assert_eq!(
        content.get("backend").and_then(|x| x.as_str()),
        Some("frequency")
    );

    // all-stopword document maps to a JSON-RPC error
    write_framed(
        &mut stdin,
        &serde_json::json!({
            "jsonrpc":"2.0","id":4,"method":"tools/call",
            "params": {"name":"summarize_text","arguments":{"text":"the a an of."}}
        }),
    );
    let resp = read_framed(&mut stdout);
    assert_eq!(
        resp.pointer("/error/code").and_then(|x| x.as_i64()),
        Some(-32001)
    );

    // unknown method
    write_framed(
        &mut stdin,
        &serde_json::json!({"jsonrpc":"2.0","id":5,"method":"resources/list"}),
    );
    let resp = read_framed(&mut stdout);
    assert_eq!(
        resp.pointer("/error/code").and_then(|x| x.as_i64()),
        Some(-32601)
    );

    // close stdin to signal server to exit, then best-effort shutdown
    drop(stdin);
    std::thread::sleep(Duration::from_millis(300));
    let _ = child.try_wait();
    let _ = child.kill();
}
