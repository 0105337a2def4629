//! Query scoring for the interactive picker.
//!
//! A token is scored against a candidate in four tiers, highest first:
//! exact, prefix, substring and ordered subsequence. Each tier occupies its
//! own score band, so a match in a higher tier always outranks any match in a
//! lower one no matter how long the candidate is.
//!
//! Comparison is case-insensitive; returned positions are character (not
//! byte) offsets into the original candidate.

use std::collections::BTreeSet;

/// Score given to a candidate that equals the token, ignoring case.
pub const EXACT_SCORE: i64 = 100_000;
const PREFIX_SCORE: i64 = 90_000;
const SUBSTRING_SCORE: i64 = 70_000;
/// Width of the prefix and substring bands. Penalties are clamped to it.
const BAND_WIDTH: i64 = 10_000;
/// Subsequence scores never reach the substring band.
const SUBSEQUENCE_CEILING: i64 = SUBSTRING_SCORE - BAND_WIDTH;

const SUBSEQUENCE_BASE: i64 = 1_000;
const MATCH_BONUS: i64 = 10;
const CONTIGUOUS_BONUS: i64 = 15;
const FIRST_CHAR_BONUS: i64 = 12;
const BOUNDARY_BONUS: i64 = 8;
const TIGHTNESS_BONUS: i64 = 30;

const BOUNDARY_CHARS: [char; 7] = ['-', '_', ' ', '.', '/', '\\', ':'];

/// A successful match: its score and the matched character positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Match {
    pub score: i64,
    pub positions: BTreeSet<usize>,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold_all(text: &str) -> Vec<char> {
    text.chars().map(fold).collect()
}

fn clamp_penalty(penalty: usize) -> i64 {
    i64::try_from(penalty).unwrap_or(i64::MAX).min(BAND_WIDTH - 1)
}

fn as_score(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Returns true when `chars[index]` starts a word: it is the first character,
/// follows a separator, or is an upper-case letter following a lower-case one.
pub fn is_word_boundary(chars: &[char], index: usize) -> bool {
    if index == 0 {
        return true;
    }

    let Some(&previous) = chars.get(index - 1) else {
        return false;
    };

    if BOUNDARY_CHARS.contains(&previous) {
        return true;
    }

    chars
        .get(index)
        .is_some_and(|current| previous.is_lowercase() && current.is_uppercase())
}

fn find_window(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn subsequence_positions(token: &[char], candidate: &[char]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(token.len());
    let mut wanted = token.iter().peekable();

    for (i, c) in candidate.iter().enumerate() {
        match wanted.peek() {
            Some(&&w) if w == *c => {
                positions.push(i);
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    wanted.peek().is_none().then_some(positions)
}

fn score_subsequence(positions: &[usize], original: &[char], token_len: usize) -> i64 {
    let mut score = SUBSEQUENCE_BASE;
    let mut last: Option<usize> = None;

    for &pos in positions {
        score += MATCH_BONUS;

        match last {
            Some(l) if pos == l + 1 => score += CONTIGUOUS_BONUS,
            Some(l) => score -= as_score(pos - l - 1),
            None => {}
        }

        if pos == 0 {
            score += FIRST_CHAR_BONUS;
        }

        if is_word_boundary(original, pos) {
            score += BOUNDARY_BONUS;
        }

        last = Some(pos);
    }

    let slack = as_score(original.len().saturating_sub(token_len));
    score += (TIGHTNESS_BONUS - slack).max(0);

    score.min(SUBSEQUENCE_CEILING - 1)
}

/// Scores a single whitespace-free `token` against `candidate`.
///
/// Returns `None` when the token's characters do not all appear, in order,
/// in the candidate. An empty token matches everything with score 0.
pub fn score_token(token: &str, candidate: &str) -> Option<Match> {
    let token = fold_all(token);
    if token.is_empty() {
        return Some(Match::default());
    }

    let original: Vec<char> = candidate.chars().collect();
    let folded: Vec<char> = original.iter().copied().map(fold).collect();

    if folded == token {
        return Some(Match {
            score: EXACT_SCORE,
            positions: (0..original.len()).collect(),
        });
    }

    if folded.starts_with(&token) {
        let slack = original.len() - token.len();
        return Some(Match {
            score: PREFIX_SCORE - clamp_penalty(slack),
            positions: (0..token.len()).collect(),
        });
    }

    if let Some(start) = find_window(&folded, &token) {
        return Some(Match {
            score: SUBSTRING_SCORE - clamp_penalty(start),
            positions: (start..start + token.len()).collect(),
        });
    }

    let positions = subsequence_positions(&token, &folded)?;
    Some(Match {
        score: score_subsequence(&positions, &original, token.len()),
        positions: positions.into_iter().collect(),
    })
}

/// Scores a possibly multi-token `query` against `candidate`.
///
/// Every whitespace separated token has to match on its own. The total score
/// is the sum of the token scores and the positions are the union of theirs.
pub fn score_query(query: &str, candidate: &str) -> Option<Match> {
    query
        .split_whitespace()
        .try_fold(Match::default(), |mut total, token| {
            let scored = score_token(token, candidate)?;
            total.score = total.score.saturating_add(scored.score);
            total.positions.extend(scored.positions);
            Some(total)
        })
}
