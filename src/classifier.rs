//! Keep/delete decision for a listed artist name.
//!
//! The score is the InDel ratio (Levenshtein with substitution cost 2) on a
//! 0-100 scale, computed on lowercased input and rounded half to even.

use rapidfuzz::distance::indel;

/// Threshold used when none is given on the command line
pub const DEFAULT_THRESHOLD: u8 = 40;

/// Recommendation written to the output CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The listed artist matches a catalog entry
    Keep,
    /// No entry or no convincing match
    Delete,
}

impl Decision {
    /// Value of the `delete? Y/N` cell
    #[must_use]
    pub fn as_flag(self) -> &'static str {
        match self {
            Decision::Keep => "N",
            Decision::Delete => "Y",
        }
    }
}

/// Case-insensitive similarity between two names, 0 to 100.
///
/// Returns 0 when either side is empty.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn similarity_ratio(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let total = a.chars().count() + b.chars().count();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let distance = indel::distance(a.chars(), b.chars());
    // the float is rounded as is, 100 * (46 / 80) lands just under 57.5 and gives 57
    let ratio = (total - distance) as f64 / total as f64;
    (100.0 * ratio).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Decide whether the row should be kept given the catalog's top hit
#[must_use]
pub fn classify(name: &str, retrieved: Option<&str>, threshold: u8) -> Decision {
    if name.is_empty() {
        return Decision::Delete;
    }
    match retrieved {
        Some(retrieved) if similarity_ratio(name, retrieved) >= threshold => Decision::Keep,
        _ => Decision::Delete,
    }
}
