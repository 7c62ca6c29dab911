//! CNAB file reading
//!
//! Reads a CNAB flat file into raw lines and applies the padding rule from
//! the upload surface: a source line of exactly 80 characters receives one
//! trailing space so it can pass the 81-character shape check. Every other
//! length is left exactly as read; the validator rejects it (reject-only,
//! no repair).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parser::validate::LINE_LENGTH;
use crate::types::CnabError;

/// Read a CNAB file into padded raw lines
///
/// # Errors
///
/// Returns [`CnabError::FileNotFound`] when the path does not exist and
/// [`CnabError::Io`] for other read failures.
pub fn read_cnab_lines(path: &Path) -> Result<Vec<String>, CnabError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CnabError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CnabError::from(e),
    })?;

    let reader = BufReader::new(file);
    let mut lines = Vec::new();

    for line in reader.lines() {
        lines.push(pad_line(line?));
    }

    Ok(lines)
}

/// Apply the 80 -> 81 padding rule to one raw line
fn pad_line(mut line: String) -> String {
    if line.chars().count() == LINE_LENGTH - 1 {
        line.push(' ');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_missing_file_is_typed_not_found() {
        let err = read_cnab_lines(Path::new("nonexistent.txt")).unwrap_err();
        assert!(matches!(err, CnabError::FileNotFound { .. }));
    }

    #[test]
    fn test_pads_exactly_80_char_lines() {
        let file = create_temp_file(&format!("{}\n", "x".repeat(80)));
        let lines = read_cnab_lines(file.path()).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 81);
        assert!(lines[0].ends_with(' '));
    }

    #[test]
    fn test_leaves_other_lengths_unpadded() {
        let content = format!("{}\n{}\n{}\n", "x".repeat(79), "x".repeat(81), "x".repeat(82));
        let file = create_temp_file(&content);
        let lines = read_cnab_lines(file.path()).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 79);
        assert_eq!(lines[1].len(), 81);
        assert_eq!(lines[2].len(), 82);
    }

    #[test]
    fn test_empty_file_yields_no_lines() {
        let file = create_temp_file("");
        let lines = read_cnab_lines(file.path()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_preserves_line_order() {
        let content = format!("{}\n{}\n", "a".repeat(80), "b".repeat(80));
        let file = create_temp_file(&content);
        let lines = read_cnab_lines(file.path()).unwrap();

        assert!(lines[0].starts_with('a'));
        assert!(lines[1].starts_with('b'));
    }
}
