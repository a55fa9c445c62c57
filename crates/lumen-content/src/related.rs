//! Related-post scoring.
//!
//! # Algorithm
//!
//! Each candidate gets an integer affinity score against the subject:
//!
//! | Signal                                   | Points          |
//! |------------------------------------------|-----------------|
//! | same category (exact)                    | 10              |
//! | each subject tag the candidate also has  | 5               |
//! | same author (exact)                      | 3               |
//! | dates less than 30 days apart            | 2               |
//! | dates less than 90 days apart            | 1               |
//! | each subject title word (len > 3) shared | 2               |
//!
//! Tags compare case-insensitively; title words are lowercased and split on
//! whitespace with no further normalisation. Only the tightest date band
//! applies, and a date that cannot be parsed contributes nothing.
//! Candidates are ranked by score with a stable sort, so equal scores keep
//! pool order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::post::PostMeta;

/// Number of related posts returned when the caller does not say.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

const CATEGORY_POINTS: u32 = 10;
const TAG_POINTS: u32 = 5;
const AUTHOR_POINTS: u32 = 3;
const RECENT_POINTS: u32 = 2;
const NEARBY_POINTS: u32 = 1;
const TITLE_WORD_POINTS: u32 = 2;

const RECENT_DAYS: i64 = 30;
const NEARBY_DAYS: i64 = 90;
const MIN_TITLE_WORD_LEN: usize = 4;

/// Score `candidate` against `subject`.
pub fn score(subject: &PostMeta, candidate: &PostMeta) -> u32 {
    let mut total = 0;

    if candidate.category == subject.category {
        total += CATEGORY_POINTS;
    }

    total += TAG_POINTS * shared_tags(subject, candidate);

    if candidate.author == subject.author {
        total += AUTHOR_POINTS;
    }

    total += date_points(&subject.date, &candidate.date);

    total += TITLE_WORD_POINTS * shared_title_words(&subject.title, &candidate.title);

    total
}

/// Rank `pool` against `subject` and return at most `limit` posts.
///
/// The subject itself (matched by slug) is never returned. When the pool
/// holds fewer than `limit` other posts, all of them are returned.
pub fn related_to<'a>(subject: &PostMeta, pool: &'a [PostMeta], limit: usize) -> Vec<&'a PostMeta> {
    let mut scored: Vec<(u32, &PostMeta)> = pool
        .iter()
        .filter(|candidate| candidate.slug != subject.slug)
        .map(|candidate| (score(subject, candidate), candidate))
        .collect();

    // Vec::sort_by is stable: ties keep pool order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, post)| post).collect()
}

fn shared_tags(subject: &PostMeta, candidate: &PostMeta) -> u32 {
    let candidate_tags: Vec<String> = candidate.tags.iter().map(|t| t.to_lowercase()).collect();
    subject
        .tags
        .iter()
        .filter(|tag| candidate_tags.contains(&tag.to_lowercase()))
        .count() as u32
}

fn shared_title_words(subject: &str, candidate: &str) -> u32 {
    let subject = subject.to_lowercase();
    let candidate = candidate.to_lowercase();
    let candidate_words: Vec<&str> = candidate.split_whitespace().collect();
    subject
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TITLE_WORD_LEN)
        .filter(|word| candidate_words.contains(word))
        .count() as u32
}

fn date_points(a: &str, b: &str) -> u32 {
    let (Some(a), Some(b)) = (parse_date(a), parse_date(b)) else {
        return 0;
    };
    let distance = (a - b).abs();
    if distance < TimeDelta::days(RECENT_DAYS) {
        RECENT_POINTS
    } else if distance < TimeDelta::days(NEARBY_DAYS) {
        NEARBY_POINTS
    } else {
        0
    }
}

/// Parse the date formats seen in frontmatter: RFC 3339, `YYYY-MM-DD`,
/// and `YYYY-MM-DD[T ]HH:MM:SS`. Naive values are taken as UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}
