use crate::model::{NormalizedPosting, RawPosting};
use crate::utils::{format_thousands, parse_datetime};

/// Descriptions longer than this are cut before being written to a
/// tracking record body.
pub const DESCRIPTION_LIMIT: usize = 1500;
/// Appended after a cut so a reader knows the tail is missing. Not
/// counted against the limit.
pub const TRUNCATION_MARKER: &str = "...";

const DEFAULT_TITLE: &str = "Untitled role";
const DEFAULT_COMPANY: &str = "Unknown company";
const DEFAULT_LOCATION: &str = "Remote";
const DEFAULT_SOURCE: &str = "unknown";

/// Converts one raw feed record into its canonical form. Total: every
/// missing field falls back to a documented default right here, never
/// anywhere downstream.
pub fn normalize(raw: &RawPosting) -> NormalizedPosting {
    NormalizedPosting {
        title: text_or(raw.title.as_deref(), DEFAULT_TITLE),
        company: text_or(raw.company.as_deref(), DEFAULT_COMPANY),
        location: text_or(raw.location.as_deref(), DEFAULT_LOCATION),
        url: raw.job_url.clone().unwrap_or_default(),
        source: text_or(raw.site.as_deref(), DEFAULT_SOURCE),
        description: bound_description(raw.description.as_deref().unwrap_or("")),
        salary: salary_display(raw.min_amount, raw.max_amount),
        company_url: raw
            .company_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        posted_at: raw.date_posted.as_deref().and_then(parse_datetime),
    }
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Cuts at the character limit, never mid-codepoint.
fn bound_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }
    let mut bounded: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    bounded.push_str(TRUNCATION_MARKER);
    bounded
}

/// Both bounds are required for a display string. A lone bound is
/// treated as no salary data at all; that is policy, not an oversight.
fn salary_display(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!(
            "${} - ${}",
            format_thousands(min as u64),
            format_thousands(max as u64)
        ),
        _ => String::new(),
    }
}
