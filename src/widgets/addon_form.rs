use crate::exp_core::draft::DraftState;
use crate::exp_core::variant::BranchField;
use crate::nav::rows::FormRow;
use crate::theme::Theme;
use crate::widgets::branch_fields::field_row_lines;
use crate::widgets::branch_manager::{add_branch_line, header_lines, placeholder_line};
use crate::widgets::chrome::panel_block;
use crate::widgets::design_input::{input_lines, InputLine};
use crate::widgets::radio::choice_line;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Everything the form needs to draw one frame. All fields are borrowed
/// snapshots; rendering never mutates them.
pub struct FormCtx<'a> {
    pub draft: &'a DraftState,
    pub rows: &'a [FormRow],
    pub selected: usize,
    pub editing: bool,
    pub cursor_on: bool,
    pub theme: &'a Theme,
}

/// Flatten the whole form into display lines, returning the line index the
/// cursor row starts at so the caller can keep it scrolled into view.
pub fn form_lines(ctx: &FormCtx) -> (Vec<Line<'static>>, usize) {
    let draft = ctx.draft;
    let theme = ctx.theme;
    let branched = draft.is_branched_addon;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor_line = 0usize;
    for (ri, row) in ctx.rows.iter().enumerate() {
        let selected = ri == ctx.selected;
        match row {
            FormRow::ModeRadio => {
                if selected {
                    cursor_line = lines.len();
                }
                lines.push(choice_line(
                    "Experiment type",
                    &[("Single add-on", !branched), ("Branched add-on", branched)],
                    selected,
                    theme,
                ));
            }
            FormRow::ExperimentId => {
                if selected {
                    cursor_line = lines.len();
                }
                lines.extend(input_lines(
                    InputLine {
                        label: "Add-on experiment ID",
                        value: &draft.addon_experiment_id,
                        error: draft.top_errors.addon_experiment_id.as_deref(),
                        required: true,
                    },
                    selected,
                    selected && ctx.editing,
                    ctx.cursor_on,
                    theme,
                ));
            }
            FormRow::ReleaseUrl => {
                if selected {
                    cursor_line = lines.len();
                }
                lines.extend(input_lines(
                    InputLine {
                        label: "Signed add-on URL",
                        value: &draft.addon_release_url,
                        error: draft.top_errors.addon_release_url.as_deref(),
                        required: true,
                    },
                    selected,
                    selected && ctx.editing,
                    ctx.cursor_on,
                    theme,
                ));
            }
            FormRow::BranchHeader(index) => {
                lines.push(Line::from(""));
                if selected {
                    cursor_line = lines.len();
                }
                lines.extend(header_lines(draft, *index, selected, theme));
            }
            FormRow::BranchField { index, field } => {
                if selected {
                    cursor_line = lines.len();
                }
                if let Some(entry) = draft.branches.get(*index) {
                    // Description edits run in the overlay, not inline
                    let inline = selected
                        && ctx.editing
                        && !matches!(field, BranchField::Description);
                    lines.extend(field_row_lines(
                        entry,
                        *field,
                        selected,
                        inline,
                        ctx.cursor_on,
                        theme,
                    ));
                }
            }
            FormRow::AddBranch => {
                if draft.branches.is_empty() {
                    lines.push(placeholder_line(theme));
                }
                lines.push(Line::from(""));
                if selected {
                    cursor_line = lines.len();
                }
                lines.push(add_branch_line(selected, theme));
            }
        }
    }
    (lines, cursor_line)
}

pub fn draw_form(f: &mut Frame, area: Rect, title: &str, ctx: &FormCtx) {
    let (lines, cursor_line) = form_lines(ctx);
    let inner_h = area.height.saturating_sub(2);
    let (start, end) = crate::ui::compute_scroll_window(lines.len(), cursor_line, inner_h);
    let visible: Vec<Line<'static>> = lines[start..end].to_vec();
    let block = panel_block(title, true, ctx.theme);
    let p = Paragraph::new(visible)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
