//! Distinguished-name helpers
//!
//! Compound DNs embed the DN of another object between square brackets, e.g.
//! `uni/bd-[uni/tn-t1/BD-b1]-isSvc-no` or
//! `uni/epp/fv-[uni/tn-t1/ap-a1/epg-e1]/node-101/stpathatt-[eth1/1]/...`.

use crate::error::ApicError;

const DELIMITERS: [char; 2] = ['[', ']'];

/// Text between the first delimiter (`[` or `]`) and the next one.
///
/// Equivalent to splitting on either bracket at most twice and taking the
/// second piece, except that a missing closing delimiter is an error instead
/// of silently returning the remainder of the string.
pub fn bracketed_segment(compound: &str) -> Result<&str, ApicError> {
    let (_, rest) = compound
        .split_once(DELIMITERS)
        .ok_or_else(|| missing_bracket(compound))?;
    let (inner, _) = rest
        .split_once(DELIMITERS)
        .ok_or_else(|| missing_bracket(compound))?;
    Ok(inner)
}

fn missing_bracket(compound: &str) -> ApicError {
    ApicError::field_not_found("bracketed dn", format!("`{}`", compound))
}

/// Short display name: `prefix` removed when present, otherwise the DN as-is.
pub fn short_name<'a>(dn: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return dn;
    }
    dn.strip_prefix(prefix).unwrap_or(dn)
}
