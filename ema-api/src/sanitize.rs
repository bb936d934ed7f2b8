//! Query parameter sanitization.

use ema_auth::{is_domain_char, is_local_part_char};

/// Lowercases ASCII letters of a key and drops everything outside `[a-z0-9_-]`.
#[must_use]
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Strips characters that cannot appear in an email address.
///
/// Returns an empty string when what is left is not shaped like
/// `local@label.label`.
#[must_use]
pub fn sanitize_email(raw: &str) -> String {
    let email = raw.trim();
    if email.len() < 6 {
        return String::new();
    }
    let Some((local, domain)) = email.split_once('@') else {
        return String::new();
    };
    if local.is_empty() {
        return String::new();
    }

    let local: String = local.chars().filter(|c| is_local_part_char(*c)).collect();
    if local.is_empty() {
        return String::new();
    }

    let domain = collapse_dot_runs(domain);
    let labels: Vec<String> = domain
        .trim_matches(|c: char| c == '.' || c.is_whitespace() || c == '\0')
        .split('.')
        .map(|label| {
            label
                .trim_matches(|c: char| c == '-' || c.is_whitespace() || c == '\0')
                .chars()
                .filter(|c| is_domain_char(*c))
                .collect::<String>()
        })
        .filter(|label| !label.is_empty())
        .collect();
    if labels.len() < 2 {
        return String::new();
    }

    format!("{local}@{}", labels.join("."))
}

/// Removes every run of two or more dots.
fn collapse_dot_runs(domain: &str) -> String {
    let mut out = String::with_capacity(domain.len());
    let mut chars = domain.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '.' {
            out.push(c);
            continue;
        }
        let mut run = 1;
        while chars.peek() == Some(&'.') {
            chars.next();
            run += 1;
        }
        if run == 1 {
            out.push('.');
        }
    }
    out
}

/// Sanitizes the `email` parameter, keeping purely numeric values as user ids.
#[must_use]
pub fn sanitize_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.to_string();
    }
    sanitize_email(raw)
}
