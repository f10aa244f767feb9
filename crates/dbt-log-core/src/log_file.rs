//! Reading the console log and writing its cleaned copy.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::ansi::{strip_ansi, strip_ansi_bytes};
use crate::error::{DbtLogError, Result};

/// Read every line of a console log with escape sequences removed.
///
/// Lines are split on `\n` with a trailing `\r` dropped. A line that is not
/// valid UTF-8 is stripped on its bytes first, so raw 8-bit C1 controls are
/// removed, and whatever is still invalid afterwards is replaced.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|source| DbtLogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = split_lines(&bytes).map(clean_line).collect();
    info!(event = "log.read", path = %path.display(), lines = lines.len());
    Ok(lines)
}

fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let empty = bytes.is_empty();
    body.split(|b| *b == b'\n')
        .filter(move |_| !empty)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn clean_line(line: &[u8]) -> String {
    match std::str::from_utf8(line) {
        Ok(text) => strip_ansi(text),
        Err(_) => String::from_utf8_lossy(&strip_ansi_bytes(line)).into_owned(),
    }
}

/// Sibling path `<dir>/<prefix><file name>` for the cleaned copy of `path`.
pub fn printable_path(path: &Path, prefix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", prefix, file_name))
}

/// Write all cleaned lines, newline terminated, to `path`.
pub fn write_printable_log<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    fs::write(path, content).map_err(|source| DbtLogError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(event = "log.printable_written", path = %path.display(), lines = lines.len());
    Ok(())
}
