//! Route pattern compilation.

use crate::error::ConfigurationError;
use regex::{Regex, RegexBuilder};

/// The executable form of a route pattern: one regular expression anchored
/// at both ends, case-insensitive, matching the entire candidate path.
/// Built once at registration time and never mutated.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
}

impl CompiledMatcher {
    /// Whether `path` matches in full. Partial matches never count: the
    /// pattern is anchored with `^` and `$`.
    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The anchored pattern string handed to the regex engine.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compile a route template, prefixed by the deployment's base path, into a
/// [`CompiledMatcher`].
///
/// The combined string is split on `/`; empty pieces are dropped and each
/// remaining piece is re-joined prefixed by `/`. Pieces are embedded
/// unescaped, so a template segment may carry an inline regex fragment such
/// as `(\d+)` and it survives into the compiled matcher. Leading and
/// trailing slashes on `base_path` are ignored.
///
/// Malformed inline regex is a configuration bug; it surfaces here, at
/// registration time, as [`ConfigurationError::InvalidPattern`].
pub fn compile(template: &str, base_path: &str) -> Result<CompiledMatcher, ConfigurationError> {
    let prefix = base_path.trim_matches('/');

    let mut combined = String::with_capacity(prefix.len() + template.len() + 1);
    if !prefix.is_empty() {
        combined.push('/');
        combined.push_str(prefix);
    }
    combined.push_str(template);

    let mut pattern = String::with_capacity(combined.len() + 2);
    pattern.push('^');
    for segment in combined.split('/') {
        if segment.is_empty() {
            continue;
        }
        pattern.push('/');
        pattern.push_str(segment);
    }
    pattern.push('$');

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigurationError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

    Ok(CompiledMatcher { regex })
}
