//! JSON input loading: an explicit file path wins, piped stdin is the
//! fallback.

use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};

type BoxError = Box<dyn std::error::Error>;

/// Load a typed request for `command`, erroring when neither a file
/// nor piped stdin provides one.
pub fn load<T: DeserializeOwned>(path: Option<&str>, command: &str) -> Result<T, BoxError> {
    match try_load(path)? {
        Some(value) => Ok(value),
        None => Err(format!("'{command}' needs --input <file> or JSON on stdin").into()),
    }
}

/// Load a typed record if one was provided, from the file path or from
/// piped stdin. Ok(None) means the caller should fall back to flags.
pub fn try_load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, BoxError> {
    if let Some(path) = path {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("failed to read '{path}': {e}"))?;
        let value =
            serde_json::from_str(&contents).map_err(|e| format!("failed to parse '{path}': {e}"))?;
        return Ok(Some(value));
    }

    match read_piped()? {
        Some(raw) => Ok(Some(
            serde_json::from_str(&raw).map_err(|e| format!("failed to parse stdin: {e}"))?,
        )),
        None => Ok(None),
    }
}

/// Read piped stdin in full. None when stdin is a TTY or empty.
fn read_piped() -> Result<Option<String>, io::Error> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
