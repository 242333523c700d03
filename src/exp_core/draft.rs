use crate::exp_core::branch::{Branch, BranchList};
use crate::exp_core::validate;
use crate::exp_core::variant::{BranchField, FieldSetVariant};
use thiserror::Error;

/// Failures of the draft mutation contract. `MinimumBranchCount` is a normal,
/// user-facing condition; `IndexOutOfRange` indicates a caller bug and should
/// never occur through the UI.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("branch index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("an experiment needs at least {min} branches")]
    MinimumBranchCount { min: usize },
}

/// Validation messages for the single-add-on top-level fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopErrors {
    pub addon_experiment_id: Option<String>,
    pub addon_release_url: Option<String>,
}

impl TopErrors {
    pub fn is_clean(&self) -> bool {
        self.addon_experiment_id.is_none() && self.addon_release_url.is_none()
    }
}

/// The full in-memory form state: an immutable snapshot. The only mutation
/// path is `apply`, which returns a fresh snapshot and never partially
/// updates the one it was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftState {
    pub is_branched_addon: bool,
    pub addon_experiment_id: String,
    pub addon_release_url: String,
    pub top_errors: TopErrors,
    pub branches: BranchList,
}

impl Default for DraftState {
    fn default() -> Self {
        let variant = FieldSetVariant::Generic;
        let mut branches = BranchList::new();
        let mut control = variant.default_branch();
        control.is_control = true;
        branches.push(control);
        branches.push(variant.default_branch());
        Self {
            is_branched_addon: false,
            addon_experiment_id: String::new(),
            addon_release_url: String::new(),
            top_errors: TopErrors::default(),
            branches,
        }
    }
}

impl DraftState {
    pub fn from_branches(is_branched_addon: bool, branches: Vec<Branch>) -> Self {
        let variant = FieldSetVariant::from_flag(is_branched_addon);
        Self {
            is_branched_addon,
            branches: BranchList::from_branches(branches, variant),
            ..Self::default()
        }
    }

    pub fn variant(&self) -> FieldSetVariant {
        FieldSetVariant::from_flag(self.is_branched_addon)
    }

    /// True when no field in the whole error tree carries a message.
    pub fn is_clean(&self) -> bool {
        self.top_errors.is_clean() && self.branches.iter().all(|e| e.errors.is_clean())
    }
}

/// Every way the draft can change. Field edits re-check the touched field
/// inline so its error stays in lock-step with the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftAction {
    SetBranchedAddon(bool),
    SetAddonExperimentId(String),
    SetAddonReleaseUrl(String),
    AddBranch,
    RemoveBranch(usize),
    MoveBranch { from: usize, to: usize },
    SetBranchText {
        index: usize,
        field: BranchField,
        value: String,
    },
    MarkControl(usize),
}

/// Single update entry point: `(state, action) -> state`. On error the input
/// snapshot is untouched, so a failed action can never desynchronize data and
/// errors or corrupt sibling branches.
pub fn apply(state: &DraftState, action: DraftAction) -> Result<DraftState, DraftError> {
    let mut next = state.clone();
    match action {
        DraftAction::SetBranchedAddon(flag) => {
            // Pure display-variant swap: branch field contents are retained,
            // not migrated or stripped.
            next.is_branched_addon = flag;
        }
        DraftAction::SetAddonExperimentId(value) => {
            next.top_errors.addon_experiment_id = validate::check_required(&value);
            next.addon_experiment_id = value;
        }
        DraftAction::SetAddonReleaseUrl(value) => {
            next.top_errors.addon_release_url = validate::check_release_url(&value);
            next.addon_release_url = value;
        }
        DraftAction::AddBranch => {
            let variant = next.variant();
            next.branches.push_default(variant);
        }
        DraftAction::RemoveBranch(index) => {
            next.branches.remove(index)?;
        }
        DraftAction::MoveBranch { from, to } => {
            next.branches.reorder(from, to)?;
        }
        DraftAction::SetBranchText {
            index,
            field,
            value,
        } => {
            let variant = next.variant();
            next.branches.set_text(index, field, value)?;
            let entry = next.branches.entry_mut(index)?;
            let msg = validate::check_branch_field(&entry.data, field, variant);
            entry.errors.set(field, msg);
        }
        DraftAction::MarkControl(index) => {
            next.branches.mark_control(index)?;
        }
    }
    Ok(next)
}
