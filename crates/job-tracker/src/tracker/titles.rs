//! Job-title cleanup and bucketing.
//!
//! Software roles collapse into a handful of fixed buckets; any other title keeps a
//! de-fluffed, title-cased version of itself so unrelated roles stay distinguishable.

use std::fmt;

use serde::{Serialize, Serializer};

/// Label used when a title is missing or carries no usable text.
pub const OTHER_LABEL: &str = "Other";

/// Seniority and level qualifiers, replaced in this order. Matching is plain substring
/// replacement, so a token can also bite into a longer word ("seniority", "hawaii").
const FLUFF_TOKENS: [&str; 17] = [
    "senior",
    "sr.",
    "sr",
    "junior",
    "jr.",
    "jr",
    "lead",
    "principal",
    "staff",
    "early career",
    "entry level",
    "mid-level",
    "mid level",
    "ii",
    "iii",
    "iv",
    "level",
];

/// Fixed role buckets recognised by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleBucket {
    SoftwareEngineer,
    WebDeveloper,
    FrontEnd,
    BackEnd,
    FullStack,
    DataAnalytics,
}

impl TitleBucket {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SoftwareEngineer => "Software Engineer/Developer",
            Self::WebDeveloper => "Web Developer",
            Self::FrontEnd => "Front End Developer",
            Self::BackEnd => "Back End Developer",
            Self::FullStack => "Full Stack Developer",
            Self::DataAnalytics => "Data / Analytics",
        }
    }
}

type BucketRule = (fn(&str) -> bool, TitleBucket);

/// Evaluated top to bottom; the first matching predicate wins.
const BUCKET_RULES: [BucketRule; 7] = [
    (is_full_stack, TitleBucket::FullStack),
    (is_front_end, TitleBucket::FrontEnd),
    (is_back_end, TitleBucket::BackEnd),
    (is_web_developer, TitleBucket::WebDeveloper),
    (is_software_engineer, TitleBucket::SoftwareEngineer),
    (is_non_data_engineer, TitleBucket::SoftwareEngineer),
    (is_data_role, TitleBucket::DataAnalytics),
];

fn is_full_stack(text: &str) -> bool {
    text.contains("full stack") && is_engineering(text)
}

fn is_front_end(text: &str) -> bool {
    text.contains("front end") || text.contains("frontend") || text.contains("ui engineer")
}

fn is_back_end(text: &str) -> bool {
    text.contains("back end") || text.contains("backend")
}

fn is_web_developer(text: &str) -> bool {
    text.contains("web") && text.contains("developer")
}

fn is_software_engineer(text: &str) -> bool {
    text.contains("software") && is_engineering(text)
}

// A "data" title that only says engineer/developer falls through to the data bucket.
fn is_non_data_engineer(text: &str) -> bool {
    is_engineering(text) && !text.contains("data")
}

fn is_data_role(text: &str) -> bool {
    text.contains("data")
        && (text.contains("engineer") || text.contains("scientist") || text.contains("analyst"))
}

fn is_engineering(text: &str) -> bool {
    text.contains("engineer") || text.contains("developer")
}

/// Outcome of normalizing a single job title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TitleCategory {
    Bucket(TitleBucket),
    /// Title-cased cleaned text, or the trimmed original when cleaning removed everything.
    Custom(String),
    Other,
}

impl TitleCategory {
    pub fn label(&self) -> &str {
        match self {
            Self::Bucket(bucket) => bucket.label(),
            Self::Custom(label) => label,
            Self::Other => OTHER_LABEL,
        }
    }

    pub fn into_label(self) -> String {
        match self {
            Self::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for TitleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TitleCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Classify a raw job title.
pub fn categorize(raw: Option<&str>) -> TitleCategory {
    let original = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return TitleCategory::Other,
    };

    let cleaned = clean_title(original);

    if let Some((_, bucket)) = BUCKET_RULES
        .iter()
        .find(|(rule, _)| rule(cleaned.as_str()))
    {
        return TitleCategory::Bucket(*bucket);
    }

    if !cleaned.is_empty() {
        return TitleCategory::Custom(title_case(&cleaned));
    }

    TitleCategory::Custom(original.to_string())
}

/// Normalize a raw job title straight to its category label.
pub fn normalize_job_title(raw: Option<&str>) -> String {
    categorize(raw).into_label()
}

pub(crate) fn clean_title(value: &str) -> String {
    let mut text = value.to_lowercase();
    for token in FLUFF_TOKENS {
        text = text.replace(token, " ");
    }

    let text = strip_annotations(&text);
    let letters: String = text
        .chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect();

    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace each `(...)` / `[...]` segment with a space. A segment runs from an opener to
/// the nearest closer of either kind on the same line; an unclosed opener is kept.
fn strip_annotations(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        if matches!(ch, '(' | '[') {
            let closer = chars[idx + 1..]
                .iter()
                .take_while(|next| **next != '\n')
                .position(|next| matches!(next, ')' | ']'));
            if let Some(offset) = closer {
                out.push(' ');
                idx += offset + 2;
                continue;
            }
        }
        out.push(ch);
        idx += 1;
    }

    out
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
