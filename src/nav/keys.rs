use crate::exp_core::draft::DraftState;
use crate::nav::rows::FormRow;

/// Stable focus key for a row. Branch rows are keyed by the branch's
/// position-independent key, so the cursor can follow an arm across
/// add/remove/reorder.
pub fn row_key(row: &FormRow, draft: &DraftState) -> String {
    match row {
        FormRow::ModeRadio => "top:mode".into(),
        FormRow::ExperimentId => "top:experiment-id".into(),
        FormRow::ReleaseUrl => "top:release-url".into(),
        FormRow::BranchHeader(i) => match draft.branches.get(*i) {
            Some(e) => format!("branch:{}", e.key.raw()),
            None => format!("branch:#{i}"),
        },
        FormRow::BranchField { index, field } => match draft.branches.get(*index) {
            Some(e) => format!("branch:{}/{:?}", e.key.raw(), field),
            None => format!("branch:#{index}/{field:?}"),
        },
        FormRow::AddBranch => "top:add-branch".into(),
    }
}
