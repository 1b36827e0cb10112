//! Language matching against a supported set.
//!
//! Policy:
//! 1. Exact canonical equality with a supported identifier -> [`Confidence::Exact`]
//! 2. Same primary language subtag: one candidate -> [`Confidence::High`],
//!    several -> [`Confidence::Low`]; the first in supported order wins
//! 3. Nothing shares the primary subtag -> [`Confidence::None`]
//!
//! Matching is a pure function of its inputs. An empty supported set is
//! "no match", never an error.

use serde::Serialize;

use crate::error::I18nResult;
use crate::tag::LocaleIdentifier;

/// Quality of a language match, ordered `None < Low < High < Exact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    High,
    Exact,
}

/// Threshold for explicit requests: any match above [`Confidence::None`].
///
/// [`MatchResult::accepted`] never accepts `None`, so `Low` is the lowest
/// threshold that admits every real match.
pub const EXPLICIT_THRESHOLD: Confidence = Confidence::Low;

/// Outcome of a single match call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Best supported identifier. `None` only when the supported set is empty.
    pub best: Option<LocaleIdentifier>,
    pub confidence: Confidence,
}

impl MatchResult {
    fn no_match(supported: &[LocaleIdentifier]) -> Self {
        Self {
            best: supported.first().cloned(),
            confidence: Confidence::None,
        }
    }

    /// The matched identifier, if the match is at least `threshold`.
    pub fn accepted(&self, threshold: Confidence) -> Option<&LocaleIdentifier> {
        if self.confidence >= threshold && self.confidence > Confidence::None {
            self.best.as_ref()
        } else {
            None
        }
    }
}

/// Parse `requested` and match it against `supported`.
///
/// A malformed tag is an error, distinct from a [`Confidence::None`] result.
pub fn match_language(requested: &str, supported: &[LocaleIdentifier]) -> I18nResult<MatchResult> {
    let requested = LocaleIdentifier::parse(requested)?;
    Ok(match_identifier(&requested, supported))
}

/// Match an already parsed identifier against `supported`.
pub fn match_identifier(requested: &LocaleIdentifier, supported: &[LocaleIdentifier]) -> MatchResult {
    if let Some(exact) = supported.iter().find(|s| *s == requested) {
        return MatchResult {
            best: Some(exact.clone()),
            confidence: Confidence::Exact,
        };
    }

    let mut same_language = supported.iter().filter(|s| requested.same_language(s));
    match (same_language.next(), same_language.next()) {
        (Some(first), None) => MatchResult {
            best: Some(first.clone()),
            confidence: Confidence::High,
        },
        (Some(first), Some(_)) => MatchResult {
            best: Some(first.clone()),
            confidence: Confidence::Low,
        },
        (None, _) => MatchResult::no_match(supported),
    }
}

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    pub tag: String,
    pub weight: f32,
}

/// Parse an `Accept-Language` header into preferences ordered by weight.
///
/// Entries with `q=0`, an unparseable weight or the `*` wildcard are dropped.
/// Ordering among equal weights follows the header.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut prefs: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let mut weight = 1.0_f32;
            for param in parts {
                let param = param.trim();
                if let Some(q) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    weight = q.trim().parse::<f32>().ok()?;
                }
            }

            if weight <= 0.0 || !weight.is_finite() {
                return None;
            }

            Some(LanguagePreference {
                tag: tag.to_string(),
                weight: weight.min(1.0),
            })
        })
        .collect();

    // sort_by is stable, preserving header order for ties
    prefs.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    prefs
}

/// Pick the first `Accept-Language` preference that matches with confidence above `None`.
///
/// Malformed entries are skipped rather than failing the whole header.
pub fn negotiate_accept_language(
    header: &str,
    supported: &[LocaleIdentifier],
) -> Option<LocaleIdentifier> {
    parse_accept_language(header).into_iter().find_map(|pref| {
        match_language(&pref.tag, supported)
            .ok()
            .and_then(|m| m.accepted(EXPLICIT_THRESHOLD).cloned())
    })
}
