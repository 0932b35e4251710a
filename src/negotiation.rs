//! Accept-header content negotiation.
//!
//! Parses the RFC 2616 weighted preference list from an `Accept`-style
//! header into [`AcceptPreference`] entries ordered by descending quality
//! score, and matches them against a [`FormatRegistry`].
//!
//! The sort is stable: entries with equal quality keep their relative input
//! order, so `text/html,application/xhtml+xml` prefers `text/html` even
//! though both carry the implicit score 1.0.

use crate::format::{FormatRegistry, ResponseFormat};
use std::cmp::Ordering;
use std::sync::Arc;

/// One parsed entry of a weighted preference header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptPreference {
    /// The media type as sent by the client, e.g. `application/xml` or
    /// `*/*`.
    pub media_type: String,
    /// Quality score in `[0, 1]`; 1.0 when the entry carried no `q`
    /// parameter or a malformed one.
    pub quality: f32,
}

/// Parse a weighted preference header into an ordered list, highest quality
/// first. An empty header yields an empty list; the caller falls back to
/// [`FormatRegistry::default_format`].
#[must_use]
pub fn parse(header: &str) -> Vec<AcceptPreference> {
    let mut preferences = Vec::new();
    for entry in header.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let mut pieces = entry.split(';');
        let media_type = pieces.next().map(str::trim).unwrap_or_default();
        if media_type.is_empty() {
            continue;
        }
        preferences.push(AcceptPreference {
            media_type: media_type.to_string(),
            quality: quality_score(pieces),
        });
    }
    // Stable sort; equal scores must compare Equal so ties keep input order.
    preferences.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    preferences
}

/// Scan the `key=value` parameters of one header entry for `q=` and parse
/// the score. Absent or malformed values default to 1.0; parsed values are
/// clamped into `[0, 1]`.
fn quality_score<'a>(params: impl Iterator<Item = &'a str>) -> f32 {
    let mut quality = 1.0;
    for param in params {
        let mut pair = param.splitn(2, '=');
        let key = pair.next().map(str::trim);
        let value = pair.next().map(str::trim);
        if key == Some("q") {
            // Non-finite parses (NaN, inf) count as malformed, not as scores.
            if let Some(parsed) = value
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|q| q.is_finite())
            {
                quality = parsed.clamp(0.0, 1.0);
            }
        }
    }
    quality
}

/// Walk the preference list in order and return the first format the
/// registry serves, or `None` when nothing matches (caller falls back to
/// the default format). Media types compare exactly; `*/*` only matches a
/// registration that literally declared `*/*`.
#[must_use]
pub fn best_match(
    preferences: &[AcceptPreference],
    registry: &FormatRegistry,
) -> Option<Arc<dyn ResponseFormat>> {
    preferences
        .iter()
        .find_map(|p| registry.lookup_by_media_type(&p.media_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::XmlFormat;

    fn types(prefs: &[AcceptPreference]) -> Vec<(&str, f32)> {
        prefs
            .iter()
            .map(|p| (p.media_type.as_str(), p.quality))
            .collect()
    }

    #[test]
    fn parses_browser_accept_header() {
        let prefs = parse("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8");
        assert_eq!(
            types(&prefs),
            vec![
                ("text/html", 1.0),
                ("application/xhtml+xml", 1.0),
                ("application/xml", 0.9),
                ("*/*", 0.8),
            ]
        );
    }

    #[test]
    fn sorts_by_quality_not_position() {
        let prefs = parse("application/json;q=0.9,application/xhtml+xml");
        assert_eq!(
            types(&prefs),
            vec![("application/xhtml+xml", 1.0), ("application/json", 0.9)]
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let prefs = parse("a/b;q=0.5, c/d;q=0.5, e/f;q=0.5");
        assert_eq!(
            types(&prefs),
            vec![("a/b", 0.5), ("c/d", 0.5), ("e/f", 0.5)]
        );
    }

    #[test]
    fn empty_header_yields_no_preferences() {
        assert!(parse("").is_empty());
        assert!(parse("  ").is_empty());
    }

    #[test]
    fn malformed_quality_defaults_to_one() {
        let prefs = parse("application/xml;q=banana,text/plain;q=0.2");
        assert_eq!(
            types(&prefs),
            vec![("application/xml", 1.0), ("text/plain", 0.2)]
        );
    }

    #[test]
    fn non_finite_quality_counts_as_malformed() {
        // "NaN" and "inf" parse as f32 but are not valid quality scores.
        let prefs = parse("application/xml;q=NaN,text/plain;q=inf,a/b;q=-inf");
        assert_eq!(
            types(&prefs),
            vec![("application/xml", 1.0), ("text/plain", 1.0), ("a/b", 1.0)]
        );
        assert!(prefs.iter().all(|p| (0.0..=1.0).contains(&p.quality)));
    }

    #[test]
    fn out_of_range_quality_is_clamped() {
        let prefs = parse("a/b;q=7,c/d;q=-1");
        assert_eq!(types(&prefs), vec![("a/b", 1.0), ("c/d", 0.0)]);
    }

    #[test]
    fn whitespace_around_entries_is_trimmed() {
        let prefs = parse(" application/json ; q=0.4 , text/html ");
        assert_eq!(
            types(&prefs),
            vec![("text/html", 1.0), ("application/json", 0.4)]
        );
    }

    #[test]
    fn best_match_takes_first_registered_hit() {
        let mut registry = FormatRegistry::new();
        registry.register(Arc::new(XmlFormat)).unwrap();

        let prefs = parse("application/xml;q=0.9,application/json;q=0.8");
        let format = best_match(&prefs, &registry).unwrap();
        assert_eq!(format.content_type(), "application/xml");

        let prefs = parse("text/csv,application/vnd.unknown");
        assert!(best_match(&prefs, &registry).is_none());
    }
}
