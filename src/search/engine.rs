//! Match engine for log search.
//!
//! Produces non-overlapping [`MatchSpan`]s, in ascending order, for a query
//! against a text snapshot. Literal and whole-word queries use a substring
//! scan; case-insensitive ones compare each char by its simple uppercase
//! form. Regex queries go through the `regex` crate, whose matcher runs in
//! time linear in the input, so a pass always terminates.

use super::types::{MatchSpan, SearchQuery};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::ops::Range;
use thiserror::Error;

/// Errors reported by the matcher.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The pattern failed to compile, or its compiled form exceeds the size limit.
    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Search engine that finds query matches in log text.
pub struct Matcher {
    /// Cached compiled regex for the current query.
    cached_regex: Option<(String, bool, Regex)>, // (pattern, case_sensitive, compiled)
    /// Byte limit on the compiled program and lazy DFA cache.
    size_limit: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("size_limit", &self.size_limit)
            .finish_non_exhaustive()
    }
}

impl Matcher {
    /// Create a matcher with the default pattern size limit.
    pub fn new() -> Self {
        Self::with_size_limit(logpane_config::defaults::regex_size_limit())
    }

    /// Create a matcher that rejects patterns compiling to more than `size_limit` bytes.
    pub fn with_size_limit(size_limit: usize) -> Self {
        Self {
            cached_regex: None,
            size_limit,
        }
    }

    /// Find every match of `query` in `text`.
    ///
    /// An empty query yields no matches without touching any pattern engine.
    /// In regex mode `whole_word` is ignored; zero-length regex matches are
    /// dropped since they cannot be highlighted.
    pub fn find(&mut self, text: &str, query: &SearchQuery) -> Result<Vec<MatchSpan>, MatcherError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if !query.use_regex {
            let (haystack, needle) = if query.case_sensitive {
                (Cow::Borrowed(text), Cow::Borrowed(query.text.as_str()))
            } else {
                (Cow::Owned(fold_case(text)), Cow::Owned(fold_case(&query.text)))
            };
            let ranges = literal_ranges(&haystack, &needle, query.whole_word);
            // Folding maps char to char, so char offsets carry over to `text`
            return Ok(spans_from_byte_ranges(&haystack, ranges.into_iter()));
        }

        let regex = self.get_or_compile_regex(&query.text, query.case_sensitive)?;
        Ok(spans_from_byte_ranges(
            text,
            regex.find_iter(text).map(|m| m.range()),
        ))
    }

    /// Get cached regex or compile a new one.
    fn get_or_compile_regex(
        &mut self,
        pattern: &str,
        case_sensitive: bool,
    ) -> Result<&Regex, MatcherError> {
        let entry = match self.cached_regex.take() {
            Some(cached) if cached.0 == pattern && cached.1 == case_sensitive => cached,
            _ => {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(!case_sensitive)
                    .size_limit(self.size_limit)
                    .dfa_size_limit(self.size_limit)
                    .build()
                    .map_err(|source| MatcherError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })?;
                (pattern.to_string(), case_sensitive, regex)
            }
        };
        Ok(&self.cached_regex.insert(entry).2)
    }

    /// Clear the cached regex.
    pub fn clear_cache(&mut self) {
        self.cached_regex = None;
    }
}

/// Find every match of `query` in `text` with a fresh matcher.
pub fn find_matches(text: &str, query: &SearchQuery) -> Result<Vec<MatchSpan>, MatcherError> {
    Matcher::new().find(text, query)
}

/// Simple uppercase form of `c`; chars whose uppercase is not a single char
/// (such as `ß`) stay as they are.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn fold_case(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` semantics: a word char on exactly one side.
fn is_boundary(before: Option<char>, after: Option<char>) -> bool {
    before.is_some_and(is_word_char) != after.is_some_and(is_word_char)
}

/// Byte ranges of non-overlapping occurrences of `needle`, leftmost first.
///
/// With `whole_word`, an occurrence needs a word boundary at both ends; a
/// rejected occurrence only consumes its first char, so a later overlapping
/// one can still match.
fn literal_ranges(haystack: &str, needle: &str, whole_word: bool) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut pos = 0;
    while let Some(offset) = haystack[pos..].find(needle) {
        let start = pos + offset;
        let end = start + needle.len();
        let accepted = !whole_word
            || (is_boundary(haystack[..start].chars().next_back(), needle.chars().next())
                && is_boundary(needle.chars().next_back(), haystack[end..].chars().next()));
        if accepted {
            ranges.push(start..end);
            pos = end;
        } else {
            pos = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    ranges
}

/// Convert ascending, non-overlapping byte ranges into char-coordinate spans.
///
/// Walks `text` once: each conversion resumes where the previous one stopped.
fn spans_from_byte_ranges<I>(text: &str, ranges: I) -> Vec<MatchSpan>
where
    I: Iterator<Item = Range<usize>>,
{
    let mut byte_pos = 0;
    let mut char_pos = 0;
    let mut advance_to = |byte: usize| {
        char_pos += text[byte_pos..byte].chars().count();
        byte_pos = byte;
        char_pos
    };

    ranges
        .filter(|r| !r.is_empty())
        .map(|r| {
            let start = advance_to(r.start);
            let end = advance_to(r.end);
            MatchSpan::new(start, end - start)
        })
        .collect()
}
