use super::*;
use crate::exp_core::variant::BranchField;
use crate::model::VariantFile;
use crate::ui::AppState;

fn filled_state() -> AppState {
    let mut st = AppState::default();
    let edits = [
        (0, BranchField::Name, "Control"),
        (0, BranchField::Slug, "control"),
        (0, BranchField::Description, "baseline"),
        (1, BranchField::Name, "Treatment"),
        (1, BranchField::Slug, "treatment"),
        (1, BranchField::Description, "the change"),
    ];
    for (index, field, value) in edits {
        let _ = update(
            &mut st,
            AppMsg::Design(DraftAction::SetBranchText {
                index,
                field,
                value: value.into(),
            }),
        );
    }
    let _ = update(
        &mut st,
        AppMsg::Design(DraftAction::SetAddonExperimentId("exp-1".into())),
    );
    let _ = update(
        &mut st,
        AppMsg::Design(DraftAction::SetAddonReleaseUrl(
            "https://example.com/a.xpi".into(),
        )),
    );
    st
}

#[test]
fn design_actions_replace_the_snapshot_and_mark_dirty() {
    let mut st = AppState::default();
    assert!(!st.dirty);
    let effects = update(&mut st, AppMsg::Design(DraftAction::AddBranch));
    assert!(effects.is_empty());
    assert_eq!(st.draft.branches.len(), 3);
    assert!(st.dirty);
}

#[test]
fn remove_below_minimum_surfaces_a_toast_and_keeps_the_draft() {
    let mut st = AppState::default();
    let effects = update(&mut st, AppMsg::Design(DraftAction::RemoveBranch(0)));
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Error,
            ..
        }]
    ));
    assert_eq!(st.draft.branches.len(), 2);
    assert!(!st.dirty);
}

#[test]
fn out_of_range_action_is_reported_not_fatal() {
    let mut st = AppState::default();
    let effects = update(&mut st, AppMsg::Design(DraftAction::RemoveBranch(42)));
    assert!(matches!(effects.as_slice(), [Effect::ShowToast { .. }]));
    assert_eq!(st.draft.branches.len(), 2);
}

#[test]
fn submit_with_invalid_fields_blocks_the_save() {
    let mut st = AppState::default();
    st.draft_path = Some("draft.yaml".into());
    let effects = update(&mut st, AppMsg::Submit);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Error,
            ..
        }]
    ));
    assert!(!st.submitting);
    // Validation ran: the empty required fields now carry messages
    assert!(!st.draft.is_clean());
}

#[test]
fn submit_clean_draft_emits_save_effect() {
    let mut st = filled_state();
    st.draft_path = Some("out/draft.yaml".into());
    let effects = update(&mut st, AppMsg::Submit);
    match effects.as_slice() {
        [Effect::SaveDraft { path, file }] => {
            assert_eq!(path, &std::path::PathBuf::from("out/draft.yaml"));
            assert_eq!(file.variants.len(), 2);
        }
        _ => panic!("expected a SaveDraft effect"),
    }
    assert!(st.submitting);
    assert!(st.draft.is_clean());
}

#[test]
fn submit_without_a_path_is_an_info_toast() {
    let mut st = filled_state();
    let effects = update(&mut st, AppMsg::Submit);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Info,
            ..
        }]
    ));
    assert!(!st.submitting);
}

#[test]
fn loaded_draft_replaces_state_and_pads_to_minimum() {
    let mut st = AppState::default();
    st.dirty = true;
    let file = DesignFile {
        variants: vec![VariantFile {
            name: "Only".into(),
            slug: Some("only".into()),
            ratio: 50,
            description: "d".into(),
            is_control: true,
            addon_release_url: None,
        }],
        ..DesignFile::default()
    };
    let _ = update(
        &mut st,
        AppMsg::LoadedDraft {
            outcome: Ok(LoadOutcome::Draft(file)),
        },
    );
    assert_eq!(st.draft.branches.len(), 2);
    assert_eq!(st.draft.branches.get(0).unwrap().data.slug, "only");
    assert!(!st.dirty);
    assert!(st.last_error.is_none());
}

#[test]
fn loaded_draft_with_duplicate_slugs_is_rejected() {
    let mut st = AppState::default();
    let v = VariantFile {
        name: "A".into(),
        slug: Some("same".into()),
        ratio: 50,
        description: String::new(),
        is_control: false,
        addon_release_url: None,
    };
    let file = DesignFile {
        variants: vec![v.clone(), v],
        ..DesignFile::default()
    };
    let before = st.draft.clone();
    let _ = update(
        &mut st,
        AppMsg::LoadedDraft {
            outcome: Ok(LoadOutcome::Draft(file)),
        },
    );
    assert!(st.last_error.as_deref().unwrap().contains("duplicate"));
    assert_eq!(st.draft, before);
}

#[test]
fn saved_draft_clears_dirty_and_submitting() {
    let mut st = filled_state();
    st.submitting = true;
    st.status_text = Some("Saving...".into());
    let effects = update(
        &mut st,
        AppMsg::SavedDraft {
            outcome: Ok(LoadOutcome::Saved),
        },
    );
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Success,
            ..
        }]
    ));
    assert!(!st.submitting);
    assert!(!st.dirty);
    assert!(st.status_text.is_none());
}

#[test]
fn failed_save_keeps_the_dirty_flag() {
    let mut st = filled_state();
    st.submitting = true;
    let effects = update(
        &mut st,
        AppMsg::SavedDraft {
            outcome: Err("disk full".into()),
        },
    );
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast {
            level: ToastLevel::Error,
            ..
        }]
    ));
    assert!(!st.submitting);
    assert!(st.dirty);
}
