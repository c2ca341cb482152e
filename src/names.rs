//! Rules for announcing changes of road names.
//!
//! A change from one road to another only needs an announcement when a
//! rider would notice it on the signs. Names that only differ by a
//! directional suffix (`Main St N` vs `Main St`), refs that overlap
//! (`A 1` vs `A 1;E 40`) and roads that lose their name or ref are treated
//! as the same road.

use crate::types::Signage;

/// Directional suffixes that do not make a road a different road.
const DIRECTIONAL_SUFFIXES: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw",
    "north", "south", "east", "west",
    "northeast", "northwest", "southeast", "southwest",
];

/// Strip a trailing directional suffix from a name.
fn base_name(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.rsplit_once(' ') {
        Some((base, suffix))
            if !base.trim().is_empty()
                && DIRECTIONAL_SUFFIXES.contains(&suffix.to_lowercase().as_str()) =>
        {
            base.trim_end()
        }
        _ => trimmed,
    }
}

/// Whether two refs share at least one component.
fn refs_overlap(lhs: &str, rhs: &str) -> bool {
    lhs.split(';')
        .map(str::trim)
        .filter(|component| !component.is_empty())
        .any(|component| rhs.split(';').map(str::trim).any(|other| other == component))
}

/// Whether moving from `from` onto `to` requires announcing the new name.
pub fn requires_name_announced(from: &Signage, to: &Signage) -> bool {
    let names_are_equal = from.name == to.name || base_name(&from.name) == base_name(&to.name);
    let names_are_empty = from.name.is_empty() && to.name.is_empty();
    let name_is_removed = !from.name.is_empty() && to.name.is_empty();

    let ref_is_contained = from.reference.is_empty()
        || to.reference.is_empty()
        || refs_overlap(&from.reference, &to.reference);
    let ref_is_removed = !from.reference.is_empty() && to.reference.is_empty();

    let pronunciation_changed = !from.pronunciation.is_empty()
        && !to.pronunciation.is_empty()
        && from.pronunciation != to.pronunciation;

    let obvious_change = ((names_are_equal || names_are_empty)
        && ref_is_contained
        && !pronunciation_changed)
        || name_is_removed
        || ref_is_removed;

    !obvious_change
}
