use serde::Serialize;

/// One entry of the substitution table.
///
/// `garbled` is the exact byte sequence as it appears in a damaged file;
/// `corrected` is the Hebrew text it was always meant to be. Matching is
/// literal and case-sensitive, never a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// Stable dotted identifier (user-facing, e.g. "login.email_label").
    pub id: &'static str,
    /// Mojibake fragment to find.
    pub garbled: &'static str,
    /// Text to write in its place.
    pub corrected: &'static str,
}
