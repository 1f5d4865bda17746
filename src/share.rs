//! Share links carry only the type code, never raw answers.

use crate::scoring::TypeCode;

const SHARE_PREFIX: &str = "/share/";

/// Path of the public result page for `code`
pub fn share_path(code: &TypeCode) -> String {
    format!("{}{}", SHARE_PREFIX, code)
}

/// Validate the `[type]` segment of a share URL.
pub fn parse_share_segment(segment: &str) -> Option<TypeCode> {
    segment.trim_matches('/').parse().ok()
}

/// Extract the type code from a full share path such as `/share/MSCI`.
pub fn parse_share_path(path: &str) -> Option<TypeCode> {
    path.strip_prefix(SHARE_PREFIX).and_then(parse_share_segment)
}
