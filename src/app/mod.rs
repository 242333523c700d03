use crate::exp_core::draft::{apply, DraftAction, DraftError};
use crate::exp_core::validate;
use crate::model::{validate_design_file, DesignFile};
use crate::ui::{AppState, LoadOutcome, ToastLevel};
use std::path::PathBuf;

pub enum AppMsg {
    Design(DraftAction),
    Submit,
    LoadedDraft {
        outcome: Result<LoadOutcome, String>,
    },
    SavedDraft {
        outcome: Result<LoadOutcome, String>,
    },
}

pub enum Effect {
    LoadDraft {
        path: PathBuf,
    },
    SaveDraft {
        path: PathBuf,
        file: DesignFile,
    },
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
}

/// Single update entry point: all draft mutations come through here as
/// whole-snapshot replacements, so every change is traceable and a failed
/// action leaves the previous snapshot in place.
pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        AppMsg::Design(action) => match apply(&state.draft, action) {
            Ok(next) => {
                if next != state.draft {
                    state.dirty = true;
                }
                state.draft = next;
            }
            Err(err @ DraftError::MinimumBranchCount { .. }) => {
                effects.push(Effect::ShowToast {
                    text: err.to_string(),
                    level: ToastLevel::Error,
                    seconds: 3,
                });
            }
            Err(err @ DraftError::IndexOutOfRange { .. }) => {
                // Contract violation from the caller; surface it, keep running
                state.dbg(format!("draft action rejected: {err}"));
                effects.push(Effect::ShowToast {
                    text: err.to_string(),
                    level: ToastLevel::Error,
                    seconds: 3,
                });
            }
        },
        AppMsg::Submit => {
            state.draft = validate::validated(&state.draft);
            if !state.draft.is_clean() {
                effects.push(Effect::ShowToast {
                    text: "Please fix the highlighted errors".into(),
                    level: ToastLevel::Error,
                    seconds: 3,
                });
            } else if let Some(path) = state.draft_path.clone() {
                match DesignFile::from_draft(&state.draft) {
                    Ok(file) => {
                        state.submitting = true;
                        state.status_text = Some("Saving...".into());
                        effects.push(Effect::SaveDraft { path, file });
                    }
                    Err(e) => {
                        effects.push(Effect::ShowToast {
                            text: format!("{e:#}"),
                            level: ToastLevel::Error,
                            seconds: 4,
                        });
                    }
                }
            } else {
                effects.push(Effect::ShowToast {
                    text: "No draft file; start with a path argument to save".into(),
                    level: ToastLevel::Info,
                    seconds: 4,
                });
            }
        }
        AppMsg::LoadedDraft { outcome } => {
            state.loading = false;
            state.status_text = None;
            match outcome {
                Ok(LoadOutcome::Draft(file)) => match validate_design_file(&file) {
                    Ok(()) => {
                        state.draft = file.into_draft();
                        state.dirty = false;
                        state.last_error = None;
                        state.selected = 0;
                        effects.push(Effect::ShowToast {
                            text: "Draft loaded".into(),
                            level: ToastLevel::Success,
                            seconds: 2,
                        });
                    }
                    Err(e) => {
                        state.dbg(format!("rejected draft: {e}"));
                        state.last_error = Some(e.clone());
                        effects.push(Effect::ShowToast {
                            text: e,
                            level: ToastLevel::Error,
                            seconds: 5,
                        });
                    }
                },
                Ok(LoadOutcome::Saved) => {}
                Err(e) => {
                    state.dbg(format!("load failed: {e}"));
                    state.last_error = Some(e.clone());
                    effects.push(Effect::ShowToast {
                        text: e,
                        level: ToastLevel::Error,
                        seconds: 5,
                    });
                }
            }
        }
        AppMsg::SavedDraft { outcome } => {
            state.submitting = false;
            state.status_text = None;
            match outcome {
                Ok(_) => {
                    state.dirty = false;
                    effects.push(Effect::ShowToast {
                        text: "Draft saved".into(),
                        level: ToastLevel::Success,
                        seconds: 2,
                    });
                }
                Err(e) => {
                    state.dbg(format!("save failed: {e}"));
                    effects.push(Effect::ShowToast {
                        text: format!("Save failed: {e}"),
                        level: ToastLevel::Error,
                        seconds: 5,
                    });
                }
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests;
