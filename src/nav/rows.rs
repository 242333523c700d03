use crate::exp_core::draft::DraftState;
use crate::exp_core::variant::BranchField;

/// One navigable row of the flattened form. The row list is recomputed from
/// the draft snapshot every frame, so it always reflects the current mode and
/// branch count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormRow {
    ModeRadio,
    ExperimentId,
    ReleaseUrl,
    BranchHeader(usize),
    BranchField { index: usize, field: BranchField },
    AddBranch,
}

pub fn flatten_rows(draft: &DraftState) -> Vec<FormRow> {
    let mut out = vec![FormRow::ModeRadio];
    if !draft.is_branched_addon {
        out.push(FormRow::ExperimentId);
        out.push(FormRow::ReleaseUrl);
    }
    let variant = draft.variant();
    for index in 0..draft.branches.len() {
        out.push(FormRow::BranchHeader(index));
        for &field in variant.fields() {
            out.push(FormRow::BranchField { index, field });
        }
    }
    out.push(FormRow::AddBranch);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exp_core::draft::{apply, DraftAction, DraftState};

    #[test]
    fn single_mode_shows_top_fields_and_generic_subset() {
        let rows = flatten_rows(&DraftState::default());
        assert_eq!(rows[0], FormRow::ModeRadio);
        assert_eq!(rows[1], FormRow::ExperimentId);
        assert_eq!(rows[2], FormRow::ReleaseUrl);
        assert!(rows.contains(&FormRow::BranchHeader(1)));
        assert!(!rows.iter().any(|r| matches!(
            r,
            FormRow::BranchField {
                field: BranchField::AddonReleaseUrl,
                ..
            }
        )));
        assert_eq!(rows.last(), Some(&FormRow::AddBranch));
    }

    #[test]
    fn branched_mode_drops_top_fields_and_adds_branch_urls() {
        let draft = apply(&DraftState::default(), DraftAction::SetBranchedAddon(true)).unwrap();
        let rows = flatten_rows(&draft);
        assert!(!rows.contains(&FormRow::ExperimentId));
        assert!(!rows.contains(&FormRow::ReleaseUrl));
        let url_rows = rows
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    FormRow::BranchField {
                        field: BranchField::AddonReleaseUrl,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(url_rows, draft.branches.len());
    }
}
