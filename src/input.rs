use crate::errors::InputError;
use std::io::BufRead;
use std::path::Path;

/// Line that terminates interactive input, compared trimmed and case-insensitively.
pub const END_SENTINEL: &str = "END";

pub fn read_file(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read input file");
    Ok(text)
}

/// Collect lines until the `END` sentinel or EOF and join them with `\n`.
pub fn read_until_sentinel<R: BufRead>(reader: R) -> Result<String, InputError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case(END_SENTINEL) {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
