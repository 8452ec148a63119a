//! Terminal rendering of search results.
//!
//! Matches are painted with ANSI 24-bit background colours taken from the
//! [`HighlightStyle`]; the current match gets the current-match colour.

use crate::highlight::HighlightStyle;
use crate::search::{MatchSpan, SearchUpdate};
use std::ops::Range;

const RESET: &str = "\x1b[0m";

fn background(rgb: [u8; 3]) -> String {
    // Black foreground keeps text readable on the light highlight colours
    format!("\x1b[48;2;{};{};{}m\x1b[30m", rgb[0], rgb[1], rgb[2])
}

/// Char ranges of each line in `chars`, excluding the newline.
fn line_ranges(chars: &[char]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, c) in chars.iter().enumerate() {
        if *c == '\n' {
            ranges.push(start..i);
            start = i + 1;
        }
    }
    if start < chars.len() {
        ranges.push(start..chars.len());
    }
    ranges
}

/// Paint `range` of `chars`, highlighting every char covered by a match.
fn paint(
    chars: &[char],
    range: Range<usize>,
    matches: &[MatchSpan],
    current: Option<usize>,
    style: &HighlightStyle,
) -> String {
    let mut out = String::new();
    let mut active: Option<bool> = None; // Some(is_current) while inside a match
    let mut m = matches.partition_point(|s| s.end() <= range.start);

    for pos in range {
        while m < matches.len() && matches[m].end() <= pos {
            m += 1;
        }
        let state = matches
            .get(m)
            .filter(|span| span.start <= pos)
            .map(|_| current == Some(m));

        if state != active {
            if active.is_some() {
                out.push_str(RESET);
            }
            if let Some(is_current) = state {
                let color = if is_current {
                    style.current_color
                } else {
                    style.match_color
                };
                out.push_str(&background(color));
            }
            active = state;
        }
        out.push(chars[pos]);
    }

    if active.is_some() {
        out.push_str(RESET);
    }
    out
}

/// Every line of `text` containing at least one match, as `"{line:>5}: {painted}"`.
pub fn render_matching_lines(text: &str, update: &SearchUpdate, style: &HighlightStyle) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let matches = &update.matches;

    line_ranges(&chars)
        .into_iter()
        .enumerate()
        .filter(|(_, range)| {
            let first = matches.partition_point(|s| s.end() <= range.start);
            matches.get(first).is_some_and(|s| s.start < range.end)
        })
        .map(|(line_no, range)| {
            format!(
                "{:>5}: {}",
                line_no + 1,
                paint(&chars, range, matches, update.current, style)
            )
        })
        .collect()
}

/// The line holding the current match, painted, or `None` without a current match.
pub fn render_current(text: &str, update: &SearchUpdate, style: &HighlightStyle) -> Option<String> {
    let span = update.current_match()?;
    let chars: Vec<char> = text.chars().collect();
    let (line_no, range) = line_ranges(&chars)
        .into_iter()
        .enumerate()
        .find(|(_, range)| span.start <= range.end)?;
    Some(format!(
        "{:>5}: {}",
        line_no + 1,
        paint(&chars, range, &update.matches, update.current, style)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchStatus;
    use std::sync::Arc;

    fn update(matches: &[MatchSpan], current: Option<usize>) -> SearchUpdate {
        SearchUpdate {
            status: SearchStatus::Inactive,
            matches: Arc::from(matches),
            current,
            matches_changed: true,
        }
    }

    fn style() -> HighlightStyle {
        HighlightStyle {
            match_color: [1, 1, 1],
            current_color: [2, 2, 2],
        }
    }

    #[test]
    fn test_line_ranges_skip_newlines() {
        let chars: Vec<char> = "ab\n\ncd".chars().collect();
        assert_eq!(line_ranges(&chars), vec![0..2, 3..3, 4..6]);
    }

    #[test]
    fn test_paint_marks_current_and_other_matches() {
        let chars: Vec<char> = "ab ab".chars().collect();
        let matches = [MatchSpan::new(0, 2), MatchSpan::new(3, 2)];
        let painted = paint(&chars, 0..5, &matches, Some(1), &style());
        assert_eq!(
            painted,
            format!(
                "{}ab{RESET} {}ab{RESET}",
                background([1, 1, 1]),
                background([2, 2, 2])
            )
        );
    }

    #[test]
    fn test_only_matching_lines_are_rendered() {
        let text = "first\nerror here\nthird\n";
        let u = update(&[MatchSpan::new(6, 5)], Some(0));
        let lines = render_matching_lines(text, &u, &style());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("    2: "));
        assert!(lines[0].ends_with(" here"));
    }

    #[test]
    fn test_render_current_finds_its_line() {
        let text = "a\nbb\nccc";
        let u = update(&[MatchSpan::new(5, 3)], Some(0));
        let line = render_current(text, &u, &style()).unwrap();
        assert!(line.starts_with("    3: "));
        assert!(render_current(text, &update(&[], None), &style()).is_none());
    }
}
