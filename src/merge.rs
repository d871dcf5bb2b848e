//! Field-level layering of configuration values.
//!
//! Everything git-profile merges follows one rule: the overlay replaces the
//! base only when it has something to say. For strings that means non-empty,
//! for tri-state booleans it means set, for optional sections and lists it
//! means present.

/// Layer one value on top of another.
pub trait Merge {
    /// Merge with an overlay, where the overlay's values take precedence
    /// wherever they are set.
    fn merge_with(&self, overlay: &Self) -> Self;
}

/// Merge two optional sections.
///
/// - Both present: field-wise merge
/// - Only one present: that one
/// - Neither: `None`
pub fn merge_optional<T: Merge + Clone>(base: Option<&T>, overlay: Option<&T>) -> Option<T> {
    match (base, overlay) {
        (Some(base), Some(overlay)) => Some(base.merge_with(overlay)),
        (Some(base), None) => Some(base.clone()),
        (None, Some(overlay)) => Some(overlay.clone()),
        (None, None) => None,
    }
}

/// Non-empty overlay string wins.
pub fn merge_string(base: &str, overlay: &str) -> String {
    if overlay.is_empty() {
        base.to_string()
    } else {
        overlay.to_string()
    }
}

/// Set overlay flag wins, including an explicit `false`.
pub fn merge_flag(base: Option<bool>, overlay: Option<bool>) -> Option<bool> {
    overlay.or(base)
}

/// Present overlay list wholesale-replaces the base list, even when empty.
pub fn replace_list<T: Clone>(base: &Option<Vec<T>>, overlay: &Option<Vec<T>>) -> Option<Vec<T>> {
    match overlay {
        Some(list) => Some(list.clone()),
        None => base.clone(),
    }
}
