use crate::error::ToolError;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Maximum bytes to check for binary content detection
const BINARY_CHECK_SIZE: usize = 8192;

/// Reads a text file as UTF-8.
///
/// # Errors
/// - `FileNotFound` if the file doesn't exist
/// - `PermissionDenied` if the file can't be accessed
/// - `BinaryFile` if the file contains null bytes (likely binary)
/// - `IoError` for other I/O failures, including invalid UTF-8
pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String, ToolError> {
    let path = path.as_ref();

    let mut file = fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => ToolError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::NotFound => ToolError::FileNotFound(path.to_path_buf()),
        _ => ToolError::IoError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut buffer = vec![0u8; BINARY_CHECK_SIZE];
    let bytes_read = file.read(&mut buffer).map_err(|e| ToolError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if buffer[..bytes_read].contains(&0) {
        return Err(ToolError::BinaryFile(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|e| ToolError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads content from stdin
pub fn read_stdin() -> Result<String, ToolError> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| ToolError::IoError {
            path: "-".into(),
            source: e,
        })?;
    Ok(buffer)
}

/// Text passed inline, `-` for stdin, or the contents of `file`.
///
/// A single trailing newline is dropped so piped input splits the same way
/// as inline text.
pub fn resolve_text(text: Option<&str>, file: Option<&Path>) -> Result<String, ToolError> {
    let raw = match (text, file) {
        (_, Some(path)) => read_text_file(path)?,
        (Some("-"), None) => read_stdin()?,
        (Some(text), None) => return Ok(text.to_string()),
        (None, None) => return Err(ToolError::NoInput),
    };
    Ok(strip_trailing_newline(raw))
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
