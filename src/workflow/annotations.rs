//! Bed markers embedded in appointment notes.
//!
//! The server has no structured field for bed requests, so the convention
//! is plain-text markers appended to the notes: `(Bed requested)` when the
//! patient asks for one, `(Bed assigned: 12 - General Ward)` once staff
//! places them, and `(Bed released: ...)` written by the server on release.
//! These helpers keep every reader and writer of that convention in one
//! place.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Bed;

/// Marker appended when booking with a bed request.
pub const BED_REQUESTED: &str = "(Bed requested)";

/// Does this appointment still ask for a bed?
///
/// Matches on the phrase rather than the exact parenthesized form so
/// hand-edited notes keep working.
pub fn bed_requested(notes: &str) -> bool {
    notes.contains("Bed requested")
}

/// Append the assignment marker for `bed` to `notes`. Release markers are
/// never written here; the server rewrites notes itself on release.
pub fn append_assignment(notes: &str, bed: &Bed) -> String {
    format!("{}\n(Bed assigned: {})", notes, bed.label())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BedAnnotationKind {
    Assigned,
    Released,
}

/// A parsed bed marker from appointment notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedAnnotation {
    pub kind: BedAnnotationKind,
    pub bed_number: String,
    pub ward: String,
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(Bed (assigned|released): (.+?) - (.+?)\)")
            .expect("bed marker regex is valid")
    })
}

/// Every assignment/release marker in `notes`, in order of appearance.
pub fn bed_history(notes: &str) -> Vec<BedAnnotation> {
    marker_regex()
        .captures_iter(notes)
        .map(|caps| BedAnnotation {
            kind: if &caps[1] == "assigned" {
                BedAnnotationKind::Assigned
            } else {
                BedAnnotationKind::Released
            },
            bed_number: caps[2].to_string(),
            ward: caps[3].to_string(),
        })
        .collect()
}
