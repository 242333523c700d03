use crate::app::{update, AppMsg, Effect};
use crate::exp_core::draft::{DraftAction, DraftState};
use crate::exp_core::variant::BranchField;
use crate::model::DesignFile;
use crate::nav::keys::row_key;
use crate::nav::rows::{flatten_rows, FormRow};
use crate::services::loader;
use crate::theme::Theme;
use crate::widgets::addon_form::{draw_form, FormCtx};
use crate::widgets::branch_fields::step_ratio;
use crate::widgets::preview::PreviewState;
use crate::widgets::status_bar::draw_footer;
use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

/// Window of `inner_h` lines that keeps `cursor` visible, preferring to show
/// as much context above it as fits.
pub(crate) fn compute_scroll_window(
    total: usize,
    cursor: usize,
    inner_h: u16,
) -> (usize, usize) {
    if inner_h == 0 || total == 0 {
        return (0, 0);
    }
    let ih = inner_h as usize;
    let cur = cursor.min(total.saturating_sub(1));
    let start = if cur >= ih.saturating_sub(1) {
        cur - ih.saturating_sub(1)
    } else {
        0
    };
    let end = (start + ih).min(total);
    (start, end)
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    #[default]
    Form,
    Preview,
}

#[derive(Clone, Copy)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

pub enum LoadKind {
    Draft,
    Save,
}

pub enum LoadOutcome {
    Draft(DesignFile),
    Saved,
}

pub struct LoadMsg {
    pub kind: LoadKind,
    pub outcome: Result<LoadOutcome, String>,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) draft: DraftState,
    pub(crate) draft_path: Option<PathBuf>,
    pub(crate) view: View,
    // Form cursor/editing state; the draft itself lives only in `draft`
    pub(crate) selected: usize,
    pub(crate) editing: bool,
    pub(crate) edit_undo: Option<String>,
    pub(crate) textarea: Option<TextArea<'static>>,
    pub(crate) textarea_target: Option<usize>,
    pub(crate) preview: PreviewState,
    pub(crate) status_text: Option<String>,
    pub(crate) toast: Option<Toast>,
    pub(crate) submitting: bool,
    pub(crate) dirty: bool,
    pub(crate) loading: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) quit_armed: bool,
    pub(crate) tick: u64,
    pub(crate) theme: Theme,
    tx: Option<Sender<LoadMsg>>,
    rx: Option<Receiver<LoadMsg>>,
    // Debug log (rendered nowhere by default; kept for headless triage)
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::LoadDraft { path } => {
                state.dbg(format!("load draft {}", path.display()));
                state.loading = true;
                state.status_text = Some(format!("Loading {}", path.display()));
                if let Some(tx) = &state.tx {
                    loader::spawn_load_draft(path, tx.clone());
                }
            }
            Effect::SaveDraft { path, file } => {
                state.dbg(format!("save draft {}", path.display()));
                if let Some(tx) = &state.tx {
                    loader::spawn_save_draft(path, file, tx.clone());
                }
            }
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let ticks = seconds.saturating_mul(5); // ~200ms tick
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: state.tick.saturating_add(ticks),
                });
            }
        }
    }
}

fn pump_loader(state: &mut AppState) {
    let mut drained: Vec<LoadMsg> = Vec::new();
    if let Some(rx) = &state.rx {
        while let Ok(msg) = rx.try_recv() {
            drained.push(msg);
        }
    }
    for msg in drained {
        let effects = match msg.kind {
            LoadKind::Draft => update(
                state,
                AppMsg::LoadedDraft {
                    outcome: msg.outcome,
                },
            ),
            LoadKind::Save => update(
                state,
                AppMsg::SavedDraft {
                    outcome: msg.outcome,
                },
            ),
        };
        run_effects(state, effects);
    }
}

fn expire_toast(state: &mut AppState) {
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }
}

pub(crate) fn preview_text(state: &AppState) -> (String, Option<String>) {
    match DesignFile::from_draft(&state.draft) {
        Ok(file) => match serde_yaml::to_string(&file) {
            Ok(s) => (s, None),
            Err(e) => (String::new(), Some(e.to_string())),
        },
        Err(e) => (String::new(), Some(format!("{e:#}"))),
    }
}

fn dispatch(state: &mut AppState, action: DraftAction) {
    let effects = update(state, AppMsg::Design(action));
    run_effects(state, effects);
}

pub(crate) fn text_value_of(draft: &DraftState, row: &FormRow) -> Option<String> {
    match row {
        FormRow::ExperimentId => Some(draft.addon_experiment_id.clone()),
        FormRow::ReleaseUrl => Some(draft.addon_release_url.clone()),
        FormRow::BranchField { index, field } => {
            let entry = draft.branches.get(*index)?;
            match field {
                BranchField::Name => Some(entry.data.name.clone()),
                BranchField::Slug => Some(entry.data.slug.clone()),
                BranchField::Ratio => Some(entry.data.ratio.clone()),
                BranchField::Description => Some(entry.data.description.clone()),
                BranchField::AddonReleaseUrl => Some(entry.data.addon_release_url.clone()),
                BranchField::IsControl => None,
            }
        }
        _ => None,
    }
}

pub(crate) fn text_action_for(row: &FormRow, value: String) -> Option<DraftAction> {
    match row {
        FormRow::ExperimentId => Some(DraftAction::SetAddonExperimentId(value)),
        FormRow::ReleaseUrl => Some(DraftAction::SetAddonReleaseUrl(value)),
        FormRow::BranchField { index, field } if !field.is_flag() => {
            Some(DraftAction::SetBranchText {
                index: *index,
                field: *field,
                value,
            })
        }
        _ => None,
    }
}

fn branch_index_of(row: &FormRow) -> Option<usize> {
    match row {
        FormRow::BranchHeader(i) => Some(*i),
        FormRow::BranchField { index, .. } => Some(*index),
        _ => None,
    }
}

fn activate_row(state: &mut AppState, row: &FormRow) {
    match row {
        FormRow::ModeRadio => {
            let flag = !state.draft.is_branched_addon;
            dispatch(state, DraftAction::SetBranchedAddon(flag));
        }
        FormRow::AddBranch => dispatch(state, DraftAction::AddBranch),
        FormRow::BranchField {
            index,
            field: BranchField::IsControl,
        } => dispatch(state, DraftAction::MarkControl(*index)),
        FormRow::BranchField {
            index,
            field: BranchField::Description,
        } => open_description_editor(state, *index),
        FormRow::BranchHeader(_) => {}
        _ => {
            state.edit_undo = text_value_of(&state.draft, row);
            if state.edit_undo.is_some() {
                state.editing = true;
            }
        }
    }
}

fn open_description_editor(state: &mut AppState, index: usize) {
    let Some(entry) = state.draft.branches.get(index) else {
        return;
    };
    let mut ta = TextArea::default();
    if !entry.data.description.is_empty() {
        ta.insert_str(&entry.data.description);
    }
    ta.set_block(
        ratatui::widgets::Block::default()
            .borders(ratatui::widgets::Borders::ALL)
            .title(format!(
                "Editing: Branch {} description — Ctrl+S Save • Esc Cancel",
                index + 1
            )),
    );
    state.textarea = Some(ta);
    state.textarea_target = Some(index);
}

// The event loop reads with one crossterm version, the textarea is built
// against ratatui's; bridge the key event across.
fn to_textarea_event(key: KeyEvent) -> ratatui::crossterm::event::KeyEvent {
    use ratatui::crossterm::event as rt_event;
    let code = match key.code {
        KeyCode::Char(c) => rt_event::KeyCode::Char(c),
        KeyCode::Backspace => rt_event::KeyCode::Backspace,
        KeyCode::Enter => rt_event::KeyCode::Enter,
        KeyCode::Left => rt_event::KeyCode::Left,
        KeyCode::Right => rt_event::KeyCode::Right,
        KeyCode::Up => rt_event::KeyCode::Up,
        KeyCode::Down => rt_event::KeyCode::Down,
        KeyCode::Home => rt_event::KeyCode::Home,
        KeyCode::End => rt_event::KeyCode::End,
        KeyCode::PageUp => rt_event::KeyCode::PageUp,
        KeyCode::PageDown => rt_event::KeyCode::PageDown,
        KeyCode::Delete => rt_event::KeyCode::Delete,
        KeyCode::Tab => rt_event::KeyCode::Tab,
        _ => rt_event::KeyCode::Null,
    };
    let mut mods = rt_event::KeyModifiers::NONE;
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= rt_event::KeyModifiers::SHIFT;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= rt_event::KeyModifiers::CONTROL;
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        mods |= rt_event::KeyModifiers::ALT;
    }
    rt_event::KeyEvent::new(code, mods)
}

fn handle_textarea_key(state: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match (key.code, ctrl) {
        (KeyCode::Char('s'), true) => {
            if let (Some(ta), Some(index)) = (state.textarea.take(), state.textarea_target.take())
            {
                let text = ta.lines().join("\n");
                dispatch(
                    state,
                    DraftAction::SetBranchText {
                        index,
                        field: BranchField::Description,
                        value: text,
                    },
                );
            }
        }
        (KeyCode::Esc, _) => {
            state.textarea = None;
            state.textarea_target = None;
        }
        _ => {
            if let Some(ta) = &mut state.textarea {
                let _ = ta.input(to_textarea_event(key));
            }
        }
    }
}

fn handle_inline_edit_key(state: &mut AppState, row: &FormRow, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if let Some(orig) = state.edit_undo.take() {
                if let Some(action) = text_action_for(row, orig) {
                    dispatch(state, action);
                }
            }
            state.editing = false;
        }
        KeyCode::Enter => {
            state.editing = false;
            state.edit_undo = None;
        }
        KeyCode::Up | KeyCode::Down => {
            if let FormRow::BranchField {
                field: BranchField::Ratio,
                ..
            } = row
            {
                let delta = if key.code == KeyCode::Up { 1 } else { -1 };
                if let Some(cur) = text_value_of(&state.draft, row) {
                    if let Some(action) = text_action_for(row, step_ratio(&cur, delta)) {
                        dispatch(state, action);
                    }
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(mut cur) = text_value_of(&state.draft, row) {
                cur.pop();
                if let Some(action) = text_action_for(row, cur) {
                    dispatch(state, action);
                }
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(mut cur) = text_value_of(&state.draft, row) {
                cur.push(c);
                if let Some(action) = text_action_for(row, cur) {
                    dispatch(state, action);
                }
            }
        }
        _ => {}
    }
}

fn move_branch(state: &mut AppState, row: &FormRow, delta: i64) {
    let Some(from) = branch_index_of(row) else {
        return;
    };
    let len = state.draft.branches.len() as i64;
    let to = from as i64 + delta;
    if to < 0 || to >= len {
        return;
    }
    // Keep the cursor on the branch that moved
    let follow = row_key(row, &state.draft);
    dispatch(
        state,
        DraftAction::MoveBranch {
            from,
            to: to as usize,
        },
    );
    let rows = flatten_rows(&state.draft);
    if let Some(pos) = rows.iter().position(|r| row_key(r, &state.draft) == follow) {
        state.selected = pos;
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) {
    let rows = flatten_rows(&state.draft);
    if rows.is_empty() {
        return;
    }
    if state.selected >= rows.len() {
        state.selected = rows.len() - 1;
    }
    let row = rows[state.selected].clone();

    if state.editing {
        handle_inline_edit_key(state, &row, key);
        return;
    }
    match key.code {
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.selected + 1 < rows.len() {
                state.selected += 1;
            }
        }
        KeyCode::PageUp => {
            state.selected = state.selected.saturating_sub(10);
        }
        KeyCode::PageDown => {
            state.selected = (state.selected + 10).min(rows.len() - 1);
        }
        KeyCode::Home => {
            state.selected = 0;
        }
        KeyCode::End => {
            state.selected = rows.len() - 1;
        }
        KeyCode::Enter => activate_row(state, &row),
        KeyCode::Char(' ') => {
            if matches!(
                row,
                FormRow::ModeRadio
                    | FormRow::BranchField {
                        field: BranchField::IsControl,
                        ..
                    }
            ) {
                activate_row(state, &row);
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if matches!(row, FormRow::ModeRadio) {
                let flag = matches!(key.code, KeyCode::Right);
                dispatch(state, DraftAction::SetBranchedAddon(flag));
            }
        }
        KeyCode::Char('a') => dispatch(state, DraftAction::AddBranch),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(index) = branch_index_of(&row) {
                dispatch(state, DraftAction::RemoveBranch(index));
            }
        }
        KeyCode::Char('[') => move_branch(state, &row, -1),
        KeyCode::Char(']') => move_branch(state, &row, 1),
        _ => {}
    }
}

fn handle_preview_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        let (text, err) = preview_text(state);
        if err.is_some() {
            run_effects(
                state,
                vec![Effect::ShowToast {
                    text: "Draft does not serialize yet".into(),
                    level: ToastLevel::Error,
                    seconds: 3,
                }],
            );
            return;
        }
        let copied = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .is_ok();
        let toast = if copied {
            Effect::ShowToast {
                text: "Copied draft to clipboard".into(),
                level: ToastLevel::Success,
                seconds: 2,
            }
        } else {
            Effect::ShowToast {
                text: "Clipboard unavailable".into(),
                level: ToastLevel::Error,
                seconds: 3,
            }
        };
        run_effects(state, vec![toast]);
        return;
    }
    state.preview.on_key(key.code);
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    if state.textarea.is_some() {
        handle_textarea_key(state, key);
        return false;
    }
    if key.code != KeyCode::Char('q') {
        state.quit_armed = false;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('s') {
        // Commit any in-flight inline edit, then validate and save
        state.editing = false;
        state.edit_undo = None;
        let effects = update(state, AppMsg::Submit);
        run_effects(state, effects);
        return false;
    }
    if !state.editing {
        match key.code {
            KeyCode::Char('q') => {
                if state.dirty && !state.quit_armed {
                    state.quit_armed = true;
                    run_effects(
                        state,
                        vec![Effect::ShowToast {
                            text: "Unsaved changes — press q again to quit".into(),
                            level: ToastLevel::Info,
                            seconds: 3,
                        }],
                    );
                    return false;
                }
                return true;
            }
            KeyCode::Tab => {
                state.view = match state.view {
                    View::Form => View::Preview,
                    View::Preview => View::Form,
                };
                return false;
            }
            _ => {}
        }
    }
    match state.view {
        View::Form => handle_form_key(state, key),
        View::Preview => handle_preview_key(state, key),
    }
    false
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_title(f: &mut Frame, area: Rect, state: &AppState) {
    let path = state
        .draft_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "new draft".into());
    let dirty = if state.dirty { " *" } else { "" };
    let line = Line::from(vec![
        Span::styled(
            " Experiment Designer ",
            state.theme.title_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("— {path}{dirty}"), state.theme.text_muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn ui(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());
    draw_title(f, chunks[0], state);
    match state.view {
        View::Form => {
            let rows = flatten_rows(&state.draft);
            if state.selected >= rows.len() {
                state.selected = rows.len().saturating_sub(1);
            }
            let cursor_on = state.tick % 2 == 0 && state.textarea.is_none();
            let title = if state.editing {
                "Experiment Design — editing"
            } else {
                "Experiment Design"
            };
            let ctx = FormCtx {
                draft: &state.draft,
                rows: &rows,
                selected: state.selected,
                editing: state.editing,
                cursor_on,
                theme: &state.theme,
            };
            draw_form(f, chunks[1], title, &ctx);
        }
        View::Preview => {
            let (text, err) = preview_text(state);
            let theme = state.theme.clone();
            state
                .preview
                .render(f, chunks[1], "Draft Preview", &text, err.as_deref(), &theme);
        }
    }
    let help = match (state.view, state.editing) {
        (View::Form, true) => "type to edit · Enter done · Esc cancel",
        (View::Form, false) => {
            "↑/↓ move · Enter edit · a add · d remove · [ ] reorder · Tab preview · ^S save · q quit"
        }
        (View::Preview, _) => "↑/↓ scroll · w wrap · ^C copy · Tab form · q quit",
    };
    draw_footer(f, chunks[2], state, help);
    if let Some(ta) = &state.textarea {
        let rect = centered_rect(70, 60, f.area());
        f.render_widget(ratatui::widgets::Clear, rect);
        f.render_widget(ta, rect);
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn run() -> Result<()> {
    let draft_path = std::env::args().nth(1).map(PathBuf::from);
    let mut state = AppState {
        draft_path: draft_path.clone(),
        ..AppState::default()
    };
    let (tx, rx) = mpsc::channel::<LoadMsg>();
    state.tx = Some(tx);
    state.rx = Some(rx);
    if let Some(path) = draft_path {
        run_effects(&mut state, vec![Effect::LoadDraft { path }]);
    }

    // Headless smoke mode: render a fixed number of frames off-terminal
    if env_flag("EXP_TUI_HEADLESS") {
        let ticks: u64 = std::env::var("EXP_TUI_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend)?;
        for _ in 0..ticks {
            terminal.draw(|f| ui(f, &mut state))?;
            pump_loader(&mut state);
            state.tick = state.tick.wrapping_add(1);
            expire_toast(&mut state);
            std::thread::sleep(Duration::from_millis(200));
        }
        if env_flag("EXP_TUI_SMOKE_SUMMARY") {
            let summary = serde_json::json!({
                "ok": state.last_error.is_none(),
                "branches": state.draft.branches.len(),
                "dirty": state.dirty,
                "loading": state.loading,
                "log_tail": state.debug_log.back(),
            });
            println!("{summary}");
        }
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let res = loop {
        terminal.draw(|f| ui(f, &mut state))?;
        pump_loader(&mut state);
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(&mut state, key) {
                    break Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            expire_toast(&mut state);
            last_tick = Instant::now();
        }
    };
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_window_tracks_the_cursor() {
        assert_eq!(compute_scroll_window(5, 0, 10), (0, 5));
        assert_eq!(compute_scroll_window(30, 0, 10), (0, 10));
        assert_eq!(compute_scroll_window(30, 15, 10), (6, 16));
        assert_eq!(compute_scroll_window(30, 29, 10), (20, 30));
        assert_eq!(compute_scroll_window(0, 0, 10), (0, 0));
        assert_eq!(compute_scroll_window(30, 15, 0), (0, 0));
    }

    #[test]
    fn text_helpers_round_trip_through_actions() {
        let draft = DraftState::default();
        let row = FormRow::BranchField {
            index: 1,
            field: BranchField::Slug,
        };
        assert_eq!(text_value_of(&draft, &row).as_deref(), Some(""));
        let action = text_action_for(&row, "variant-b".into()).unwrap();
        let next = crate::exp_core::draft::apply(&draft, action).unwrap();
        assert_eq!(
            text_value_of(&next, &row).as_deref(),
            Some("variant-b")
        );
        // Flag rows are not text-editable
        let flag_row = FormRow::BranchField {
            index: 0,
            field: BranchField::IsControl,
        };
        assert!(text_value_of(&draft, &flag_row).is_none());
        assert!(text_action_for(&flag_row, "x".into()).is_none());
    }

    #[test]
    fn preview_reports_unparseable_ratio_instead_of_yaml() {
        let mut state = AppState::default();
        let (text, err) = preview_text(&state);
        assert!(err.is_none());
        assert!(text.contains("variants:"));

        state.draft = crate::exp_core::draft::apply(
            &state.draft,
            DraftAction::SetBranchText {
                index: 0,
                field: BranchField::Ratio,
                value: "not-a-number".into(),
            },
        )
        .unwrap();
        let (_, err) = preview_text(&state);
        assert!(err.unwrap().contains("ratio"));
    }
}
