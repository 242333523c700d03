use crate::exp_core::branch::Branch;
use crate::exp_core::draft::DraftState;
use crate::exp_core::variant::{BranchField, FieldSetVariant};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const RATIO_MIN: u32 = 1;
pub const RATIO_MAX: u32 = 100;

fn slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("slug pattern"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://\S+$").expect("url pattern"))
}

pub fn check_required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("This field is required".into())
    } else {
        None
    }
}

pub fn check_slug(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return Some("This field is required".into());
    }
    if !slug_re().is_match(v) {
        return Some("Use lowercase letters, numbers and dashes".into());
    }
    None
}

pub fn check_ratio(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return Some("This field is required".into());
    }
    match v.parse::<u32>() {
        Ok(n) if (RATIO_MIN..=RATIO_MAX).contains(&n) => None,
        Ok(_) => Some(format!("Must be between {RATIO_MIN} and {RATIO_MAX}")),
        Err(_) => Some("Invalid integer".into()),
    }
}

pub fn check_release_url(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return Some("This field is required".into());
    }
    if !url_re().is_match(v) {
        return Some("Must be a valid http(s) URL".into());
    }
    None
}

/// Check one branch field under the given variant. Fields the variant does
/// not own never produce a message, so values left over from a mode switch
/// stay dormant instead of blocking the form.
pub fn check_branch_field(
    branch: &Branch,
    field: BranchField,
    variant: FieldSetVariant,
) -> Option<String> {
    if !variant.owns(field) {
        return None;
    }
    match field {
        BranchField::Name => check_required(&branch.name),
        BranchField::Slug => check_slug(&branch.slug),
        BranchField::Ratio => check_ratio(&branch.ratio),
        BranchField::Description => check_required(&branch.description),
        BranchField::AddonReleaseUrl => check_release_url(&branch.addon_release_url),
        BranchField::IsControl => None,
    }
}

/// Whole-draft validation: returns a snapshot with the complete error tree
/// filled in. Field values are untouched.
pub fn validated(draft: &DraftState) -> DraftState {
    let mut next = draft.clone();
    let variant = next.variant();

    // Top-level add-on fields only exist in single-add-on mode
    if next.is_branched_addon {
        next.top_errors.addon_experiment_id = None;
        next.top_errors.addon_release_url = None;
    } else {
        next.top_errors.addon_experiment_id = check_required(&next.addon_experiment_id);
        next.top_errors.addon_release_url = check_release_url(&next.addon_release_url);
    }

    // Slugs must be unique across branches; the later duplicate is flagged
    let mut seen: HashSet<String> = HashSet::new();
    let mut dup_flags: Vec<bool> = Vec::with_capacity(next.branches.len());
    for entry in next.branches.iter() {
        let slug = entry.data.slug.trim().to_string();
        let dup = !slug.is_empty() && !seen.insert(slug);
        dup_flags.push(dup);
    }

    for index in 0..next.branches.len() {
        let entry = match next.branches.entry_mut(index) {
            Ok(e) => e,
            Err(_) => break,
        };
        // Rebuild from scratch so messages for fields the current variant
        // does not own (stale after a mode switch) are dropped
        entry.errors = Default::default();
        for &field in variant.fields() {
            let msg = check_branch_field(&entry.data, field, variant);
            entry.errors.set(field, msg);
        }
        if entry.errors.slug.is_none() && dup_flags[index] {
            entry
                .errors
                .set(BranchField::Slug, Some("Branch slugs must be unique".into()));
        }
    }
    next
}
