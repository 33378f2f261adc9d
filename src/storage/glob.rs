//! Path glob matching for input discovery
//!
//! Supports `*` and `?` (never crossing `/`), `[abc]` classes negated by
//! `[!abc]` or `[^abc]`, and `{a,b}` alternatives. `**/` matches zero or more
//! whole directories; a bare `**` matches any characters including `/`.
//! A class never matches `/`.

use crate::error::{Error, Result};
use regex::Regex;

/// A compiled path glob, relative to an input base location
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
    literal_prefix: Vec<String>,
}

impl GlobPattern {
    /// Compile a glob such as `song_data/*/*/*/*.json`
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(Error::invalid_glob(pattern, "pattern is empty"));
        }

        let regex_src = translate(trimmed).map_err(|msg| Error::invalid_glob(pattern, msg))?;
        let regex = Regex::new(&format!("^{regex_src}$"))
            .map_err(|e| Error::invalid_glob(pattern, e.to_string()))?;

        // Directory segments before the first wildcard; the file segment is
        // never part of the prefix so listing always happens on a directory.
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let literal_prefix = segments[..segments.len().saturating_sub(1)]
            .iter()
            .take_while(|s| !has_wildcard(s))
            .map(|s| (*s).to_string())
            .collect();

        Ok(Self {
            pattern: trimmed.to_string(),
            regex,
            literal_prefix,
        })
    }

    /// Match a `/`-separated path relative to the base location
    pub fn is_match(&self, relative: &str) -> bool {
        self.regex.is_match(relative)
    }

    /// Wildcard-free leading directories to list under
    pub fn literal_prefix(&self) -> &[String] {
        &self.literal_prefix
    }

    /// The normalised pattern text
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl std::fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

fn translate(glob: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    let mut brace_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("(?:.*/)?");
                    } else {
                        out.push_str(".*");
                    }
                } else {
                    out.push_str("[^/]*");
                }
            }
            '?' => out.push_str("[^/]"),
            '[' => {
                out.push('[');
                if matches!(chars.peek(), Some('!' | '^')) {
                    chars.next();
                    out.push_str("^/");
                }
                let mut closed = false;
                for inner in chars.by_ref() {
                    match inner {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '/' => return Err("'/' inside a character class".to_string()),
                        '\\' | '[' | '^' | '&' | '~' => {
                            out.push('\\');
                            out.push(inner);
                        }
                        _ => out.push(inner),
                    }
                }
                if !closed {
                    return Err("unclosed '['".to_string());
                }
                out.push(']');
            }
            '{' => {
                brace_depth += 1;
                out.push_str("(?:");
            }
            ',' if brace_depth > 0 => out.push('|'),
            '}' if brace_depth > 0 => {
                brace_depth -= 1;
                out.push(')');
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    if brace_depth > 0 {
        return Err("unclosed '{'".to_string());
    }
    Ok(out)
}
