//! Display metadata and ordering for asset catalogs.
//!
//! These are pure helpers for whatever surface lists badges and logos: category labels with a
//! deterministic fallback, asset names derived from file stems, and reconciliation of a
//! user-arranged order against a changing set of asset IDs.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

/// Icon used for categories missing from the default table.
pub const FALLBACK_ICON: &str = "folder";

/// Label and icon shown for a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    /// Human-readable category name.
    pub label: String,
    /// Icon identifier understood by the presenting surface.
    pub icon: String,
}

const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("aws", "AWS", "cloud"),
    ("azure", "Microsoft Azure", "cloud"),
    ("badge", "Badges", "award"),
    ("badges", "Badges", "award"),
    ("cisco", "Cisco", "network"),
    ("comptia", "CompTIA", "shield"),
    ("gcp", "Google Cloud", "cloud"),
    ("kubernetes", "Kubernetes", "container"),
    ("linux", "Linux", "terminal"),
    ("logo", "Logos", "image"),
    ("logos", "Logos", "image"),
    ("microsoft", "Microsoft", "window"),
    ("security", "Security", "shield"),
];

/// Look up the display config for a category key (case-insensitive).
///
/// Unknown keys get a label synthesized with [`display_name`] and [`FALLBACK_ICON`].
pub fn category_config(key: &str) -> DisplayConfig {
    let normalized = key.trim().to_lowercase();
    match DEFAULT_CATEGORIES
        .iter()
        .find(|(k, _, _)| *k == normalized)
    {
        Some((_, label, icon)) => DisplayConfig {
            label: (*label).to_owned(),
            icon: (*icon).to_owned(),
        },
        None => DisplayConfig {
            label: display_name(key.trim()),
            icon: FALLBACK_ICON.to_owned(),
        },
    }
}

/// Human label for a file stem: `-` and `_` become spaces, then each word is title-cased.
///
/// A letter is upper-cased when it does not follow another letter, so `az-104_admin` becomes
/// `Az 104 Admin` and `3d-design` becomes `3D Design`.
pub fn display_name(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut prev_alpha = false;
    for ch in stem.chars() {
        let ch = if ch == '-' || ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Search tags for a file stem: its lower-cased words, deduplicated in first-seen order.
pub fn asset_tags(stem: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Reconcile a user-arranged order with the current source set.
///
/// IDs of `current` still present in `source` keep their relative order; IDs new in `source`
/// are appended in source order. Vanished IDs are dropped and the result has no duplicates.
pub fn reconcile_order<T: Clone + Eq + Hash>(current: &[T], source: &[T]) -> Vec<T> {
    let available: HashSet<&T> = source.iter().collect();
    let mut placed: HashSet<&T> = HashSet::with_capacity(source.len());

    let mut out = Vec::with_capacity(source.len());
    for id in current.iter().chain(source) {
        if available.contains(id) && placed.insert(id) {
            out.push(id.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/unit/catalog/catalog.rs"]
mod tests;
