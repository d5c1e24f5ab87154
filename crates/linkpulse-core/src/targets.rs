//! Watch-list parsing.
//!
//! Watch lists arrive as comma-separated URN strings
//! (`LINKPULSE_POST_URNS`, `LINKPULSE_ACTIVITY_URNS`) and as repeated
//! `--urn` CLI flags. This module owns the comma-separated form.

/// Splits a comma-separated URN list into individual targets.
///
/// Entries are trimmed; empty entries (from doubled or trailing commas, or
/// an all-whitespace input) are dropped. Order and duplicates are preserved
/// so downstream output follows the configured order.
#[must_use]
pub fn parse_target_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
