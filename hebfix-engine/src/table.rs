//! The compiled-in substitution table.
//!
//! Each entry maps one mojibake fragment (UTF-8 Hebrew misread through a
//! cp1255-family code page) to the text it was meant to be. The fragments are
//! copied verbatim from the damaged assets; do not normalize or re-encode
//! them when editing this file.

use hebfix_types::rule::Substitution;
use thiserror::Error;

/// U+05F3 HEBREW PUNCTUATION GERESH, the telltale character this mojibake
/// family is riddled with.
pub const GERESH: char = '\u{05F3}';

/// Substitutions applied by a fix pass, in table order.
pub static SUBSTITUTIONS: &[Substitution] = &[
    // Login / register form
    Substitution {
        id: "login.email_label",
        garbled: "׳׳™׳׳™׳™׳:",
        corrected: "אימייל:",
    },
    Substitution {
        id: "login.email_placeholder",
        garbled: r#"׳"׳›׳ ׳¡ ׳׳× ׳"׳׳™׳׳™׳™׳ ׳©׳׳"#,
        corrected: "הכנס את האימייל שלך",
    },
    Substitution {
        id: "login.password_label",
        garbled: r#"׳¡׳™׳¡׳׳":"#,
        corrected: "סיסמה:",
    },
    Substitution {
        id: "login.password_placeholder",
        garbled: r#"׳"׳›׳ ׳¡ ׳׳× ׳"׳¡׳™׳¡׳׳" ׳©׳׳"#,
        corrected: "הכנס את הסיסמה שלך",
    },
    Substitution {
        id: "login.new_password_placeholder",
        garbled: r#"׳"׳›׳ ׳¡ ׳¡׳™׳¡׳׳" ׳—׳"׳©׳""#,
        corrected: "הכנס סיסמה חדשה",
    },
    Substitution {
        id: "login.forgot_password",
        garbled: r#"׳©׳›׳—׳× ׳¡׳™׳¡׳׳"?"#,
        corrected: "שכחת סיסמה?",
    },
    Substitution {
        id: "login.confirm_password_label",
        garbled: r#"׳׳™׳©׳•׳¨ ׳¡׳™׳¡׳׳":"#,
        corrected: "אישור סיסמה:",
    },
    Substitution {
        id: "login.confirm_password_placeholder",
        garbled: r#"׳"׳›׳ ׳¡ ׳©׳•׳' ׳׳× ׳"׳¡׳™׳¡׳׳""#,
        corrected: "הכנס שוב את הסיסמה",
    },
    // Chat input
    Substitution {
        id: "chat.message_placeholder",
        garbled: r#"׳›׳×׳•׳' ׳"׳•׳"׳¢׳"..."#,
        corrected: "כתוב הודעה...",
    },
    // Marketplace post form
    Substitution {
        id: "post.offer_prompt",
        garbled: r#"׳׳" ׳׳×׳" ׳׳¦׳™׳¢ ׳׳• ׳׳—׳₪׳©?"#,
        corrected: "מה אתה מציע או מחפש?",
    },
    Substitution {
        id: "post.city_example",
        garbled: r#"׳×׳ ׳׳'׳™׳', ׳ ׳×׳ ׳™׳""#,
        corrected: "למשל, תל אביב",
    },
];

/// Look up a table entry by its id.
pub fn substitution(id: &str) -> Option<&'static Substitution> {
    SUBSTITUTIONS.iter().find(|s| s.id == id)
}

/// Count of geresh markers present in `text`. Nonzero after a pass means
/// mojibake the table does not cover yet.
pub fn residual_markers(text: &str) -> u64 {
    text.chars().filter(|&c| c == GERESH).count() as u64
}

/// Hazards a substitution table can carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableHazard {
    /// `a`'s corrected text contains `b`'s garbled text: one pass manufactures
    /// work for the next and idempotence is gone. Must never ship.
    #[error("{a}: corrected text reintroduces the garbled text of {b}")]
    Reintroduces { a: &'static str, b: &'static str },

    /// `a`'s garbled text contains `b`'s garbled text. Span detection handles
    /// this; naive sequential replace-all would eat `b` out of `a` and strand
    /// half-repaired text.
    #[error("{a}: garbled text contains the garbled text of {b}")]
    Contains { a: &'static str, b: &'static str },
}

/// Audit `table` for the hazards above, in table order.
pub fn audit(table: &[Substitution]) -> Vec<TableHazard> {
    let mut hazards = Vec::new();
    for a in table {
        for b in table {
            if a.id == b.id {
                continue;
            }
            if a.corrected.contains(b.garbled) {
                hazards.push(TableHazard::Reintroduces { a: a.id, b: b.id });
            }
            if a.garbled.contains(b.garbled) {
                hazards.push(TableHazard::Contains { a: a.id, b: b.id });
            }
        }
    }
    hazards
}
