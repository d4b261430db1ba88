//! JSONL storage: one record per line.
//!
//! Blank lines and lines starting with `#` are skipped, so hand-edited
//! tree files can carry comments.

use crate::record::Record;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read records from a JSONL reader.
pub fn read_records(reader: impl BufRead) -> Result<Vec<Record>, JsonlError> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| JsonlError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: Record = serde_json::from_str(trimmed)
            .map_err(|e| JsonlError::Parse(line_no + 1, e.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Read records from a JSONL file, rejecting corrupted bytes up front.
pub fn read_records_from_path(path: impl AsRef<Path>) -> Result<Vec<Record>, JsonlError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| JsonlError::Io(0, format!("{}: {e}", path.display())))?;
    validate_tree_bytes(path, &bytes)?;
    read_records(BufReader::new(bytes.as_slice()))
}

fn validate_tree_bytes(path: &Path, bytes: &[u8]) -> Result<(), JsonlError> {
    if bytes.contains(&0) {
        return Err(JsonlError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(JsonlError::Corrupt(format!(
            "{}: contains non-UTF-8 byte sequence(s)",
            path.display()
        )));
    }
    Ok(())
}

/// Errors from JSONL operations. Line numbers are 1-based; 0 means the
/// failure is not tied to a line.
#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("corrupted tree file: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "lineage-jsonl-{prefix}-{}-{unique}.jsonl",
            std::process::id()
        ))
    }

    #[test]
    fn read_records_skips_blank_lines_and_comments() {
        let input = "# Smith family\n\n{\"type\":\"individual\",\"id\":\"I1\"}\n   \n{\"type\":\"family\",\"id\":\"F1\"}\n";
        let records = read_records(input.as_bytes()).expect("records should parse");
        let ids: Vec<&str> = records.iter().map(Record::id).collect();
        assert_eq!(ids, vec!["I1", "F1"]);
    }

    #[test]
    fn parse_errors_carry_the_line_number() {
        let input = "{\"type\":\"individual\",\"id\":\"I1\"}\n# ok\n{\"type\":\"individual\"}\n";
        match read_records(input.as_bytes()) {
            Err(JsonlError::Parse(line, message)) => {
                assert_eq!(line, 3);
                assert!(message.contains("id"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn read_records_from_path_rejects_nul_payload() {
        let path = temp_path("nul");
        fs::write(&path, b"{\"type\":\"individual\",\"id\":\"I1\"}\n\0garbage")
            .expect("fixture should write");

        match read_records_from_path(&path) {
            Err(JsonlError::Corrupt(message)) => assert!(message.contains("contains NUL")),
            other => panic!("expected corrupt tree error, got {other:?}"),
        }

        let _ = fs::remove_file(path);
    }

    #[test]
    fn read_records_from_path_rejects_non_utf8_payload() {
        let path = temp_path("non-utf8");
        fs::write(&path, [0xff, 0xfe, 0xfd]).expect("fixture should write");

        match read_records_from_path(&path) {
            Err(JsonlError::Corrupt(message)) => assert!(message.contains("non-UTF-8")),
            other => panic!("expected corrupt tree error, got {other:?}"),
        }

        let _ = fs::remove_file(path);
    }
}
