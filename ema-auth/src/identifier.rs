//! Caller identifiers: an email address or a numeric account id.

use ema_types::UserId;

/// Characters allowed in the local part of an email address.
const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// How a caller names the account they act for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentifier {
    Email(String),
    Id(UserId),
}

impl UserIdentifier {
    /// Classifies a raw identifier. Returns `None` when it is neither a
    /// plausible email address nor a decimal id.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if is_email(raw) {
            return Some(Self::Email(raw.to_string()));
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return UserId::parse(raw).ok().map(Self::Id);
        }
        None
    }
}

/// Returns true if `c` may appear in the local part of an address.
#[must_use]
pub fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(c)
}

/// Returns true if `c` may appear in a domain label.
#[must_use]
pub fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Structural email check: `local@label.label[...]`, at least 6 characters,
/// restricted character sets, no empty or hyphen-edged labels.
#[must_use]
pub fn is_email(candidate: &str) -> bool {
    if candidate.len() < 6 {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_part_char) {
        return false;
    }
    if domain.contains("..") || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(is_domain_char)
    })
}
