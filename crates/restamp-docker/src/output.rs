use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Marker `docker build` prints as its final line on success.
static SUCCESS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Successfully built ([a-f0-9]+)").expect("Invalid success marker regex")
});

/// Image id assigned by docker (lowercase hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the built image id from `docker build` output.
///
/// Only the last line is inspected, after dropping one trailing blank line.
/// Output without the success marker there is an error; the id is never
/// guessed from earlier lines.
pub fn extract_image_id(output: &str) -> Result<ImageId, OutputParseError> {
    let mut lines: Vec<&str> = output.split('\n').collect();
    if lines.len() > 1 && lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let last_line = lines
        .last()
        .map(|line| line.trim_end_matches('\r'))
        .unwrap_or_default();

    SUCCESS_MARKER
        .captures(last_line)
        .and_then(|caps| caps.get(1))
        .map(|m| ImageId(m.as_str().to_owned()))
        .ok_or_else(|| OutputParseError {
            last_line: last_line.to_owned(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse `docker build` output: last line {last_line:?} has no `Successfully built <id>`")]
pub struct OutputParseError {
    pub last_line: String,
}
