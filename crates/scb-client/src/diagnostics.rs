//! Compiler output diagnostics.
//!
//! Scans the raw stderr of a compile run for GCC-style `file:line: error:`
//! lines, keeps the ones that point inside the sketch, rewrites a few
//! notoriously unhelpful messages, and dedups repeats while remembering
//! every place they appeared in the output.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;
use url::Url;

/// Byte span of a diagnostic's `file:line[:col]` prefix in the raw output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputRange {
    pub start: usize,
    pub end: usize,
}

/// One deduplicated compiler error anchored to a sketch file.
///
/// `line` and `column` are zero-based. `details` carries the original
/// compiler message when `message` was rewritten to a friendlier one.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorLocation {
    pub message: String,
    pub details: Option<String>,
    pub file: Url,
    pub line: u32,
    pub column: Option<u32>,
    pub ranges_in_output: Vec<OutputRange>,
}

/// Line/column position inside a text buffer, both zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPosition {
    pub line: u32,
    pub column: u32,
}

/// The sketch whose files are eligible to carry diagnostics.
#[derive(Clone, Debug)]
pub struct Sketch {
    root: PathBuf,
}

impl Sketch {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: normalize(&root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` lies under the sketch root. Purely lexical; the
    /// compiler has already touched these files, re-statting them buys
    /// nothing and breaks on outputs referencing deleted temporaries.
    pub fn is_in_sketch(&self, path: &Path) -> bool {
        normalize(path).starts_with(&self.root)
    }

    fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.root.join(path))
        }
    }
}

/// Lexical path normalization: drops `.`, folds `..` onto its parent,
/// never consults the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn error_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^(?P<path>[^:\n]+?):(?P<line>\d+)(?::(?P<col>\d+))?(?::\d+)*:\s*(?:fatal\s+)?error:\s*(?P<msg>.*)$")
            .unwrap_or_else(|e| panic!("invalid diagnostics pattern: {e}"))
    })
}

/// Messages the toolchain emits for missing core includes, rewritten to
/// say what the user actually has to do. Keys must match exactly.
fn remap_message(message: &str) -> Option<&'static str> {
    static REMAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let table = REMAP.get_or_init(|| {
        HashMap::from([
            (
                "'Mouse' was not declared in this scope",
                "'Mouse' not found. Does your sketch include the line '#include <Mouse.h>'?",
            ),
            (
                "'Keyboard' was not declared in this scope",
                "'Keyboard' not found. Does your sketch include the line '#include <Keyboard.h>'?",
            ),
        ])
    });
    table.get(message).copied()
}

/// Extracts deduplicated sketch errors from raw compiler output.
///
/// Matches outside the sketch are discarded. Repeated occurrences of the
/// same (file, line, column, message) merge into one location that
/// accumulates every occurrence's output range, in first-appearance
/// order. The result is deterministic for a given input.
pub fn extract(raw: &[u8], sketch: &Sketch) -> Vec<ErrorLocation> {
    let text = String::from_utf8_lossy(raw);
    let mut order: Vec<(Url, u32, Option<u32>, String)> = Vec::new();
    let mut seen: HashMap<(Url, u32, Option<u32>, String), ErrorLocation> = HashMap::new();

    for captures in error_line_pattern().captures_iter(&text) {
        let whole = captures.get(0).unwrap_or_else(|| unreachable!());
        let path_match = captures.name("path").unwrap_or_else(|| unreachable!());
        let line_match = captures.name("line").unwrap_or_else(|| unreachable!());
        let raw_message = captures.name("msg").map(|m| m.as_str()).unwrap_or("");

        let path = sketch.resolve(path_match.as_str());
        if !sketch.is_in_sketch(&path) {
            continue;
        }
        let Ok(file) = Url::from_file_path(&path) else {
            warn!(path = %path.display(), "compiler output referenced a non-file path");
            continue;
        };

        let line = match line_match.as_str().parse::<u32>() {
            Ok(n) => n.saturating_sub(1),
            Err(error) => {
                warn!(%error, "unreadable line number in compiler output; dropping match");
                continue;
            }
        };
        let column = match captures.name("col") {
            Some(col) => match col.as_str().parse::<u32>() {
                Ok(n) => Some(n.saturating_sub(1)),
                Err(error) => {
                    warn!(%error, "unreadable column number in compiler output");
                    None
                }
            },
            None => None,
        };

        // Range covers the file:line[:col] prefix of the match.
        let prefix_end = captures
            .name("col")
            .map(|m| m.end())
            .unwrap_or_else(|| line_match.end());
        let range = OutputRange {
            start: whole.start(),
            end: prefix_end + 1,
        };

        let (message, details) = match remap_message(raw_message) {
            Some(friendly) => (friendly.to_string(), Some(raw_message.to_string())),
            None => (raw_message.to_string(), None),
        };

        let key = (file.clone(), line, column, message.clone());
        if let Some(existing) = seen.get_mut(&key) {
            existing.ranges_in_output.push(range);
        } else {
            order.push(key.clone());
            seen.insert(
                key,
                ErrorLocation {
                    message,
                    details,
                    file,
                    line,
                    column,
                    ranges_in_output: vec![range],
                },
            );
        }
    }

    order
        .into_iter()
        .filter_map(|key| seen.remove(&key))
        .collect()
}

/// Converts a byte offset into `text` to a zero-based line/column. Offsets
/// past the end clamp to the last position; offsets inside a multi-byte
/// character snap back to its first byte.
pub fn offset_to_position(text: &str, byte_offset: usize) -> TextPosition {
    let mut offset = byte_offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let prefix = &text[..offset];
    let line = prefix.matches('\n').count() as u32;
    let column = match prefix.rfind('\n') {
        Some(nl) => prefix[nl + 1..].chars().count() as u32,
        None => prefix.chars().count() as u32,
    };
    TextPosition { line, column }
}
