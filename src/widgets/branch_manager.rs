use crate::exp_core::branch::BranchList;
use crate::exp_core::draft::DraftState;
use crate::theme::Theme;
use ratatui::prelude::*;

/// Header block for one branch: position, slug, control tag and, when the
/// cursor is on it, the available structural operations. The remove hint is
/// greyed out at the minimum count instead of raising anything.
pub fn header_lines(
    draft: &DraftState,
    index: usize,
    selected: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let Some(entry) = draft.branches.get(index) else {
        return vec![Line::from(Span::styled(
            "  (missing branch)".to_string(),
            theme.text_error(),
        ))];
    };
    let sel = if selected { '›' } else { ' ' };
    let slug = if entry.data.slug.trim().is_empty() {
        "(new branch)".to_string()
    } else {
        entry.data.slug.clone()
    };
    let control = if entry.data.is_control {
        "  [control]"
    } else {
        ""
    };
    let style = if selected {
        theme.text_active_bold()
    } else {
        theme.title_style()
    };
    let mut spans = vec![Span::styled(
        format!(
            "{sel} Branch {}/{} — {slug}{control}",
            index + 1,
            draft.branches.len()
        ),
        style,
    )];
    if !entry.errors.is_clean() {
        spans.push(Span::styled("  !".to_string(), theme.text_error()));
    }
    let mut lines = vec![Line::from(spans)];
    if selected {
        let remove = if draft.branches.len() <= BranchList::MIN_BRANCHES {
            format!("d remove (min {})", BranchList::MIN_BRANCHES)
        } else {
            "d remove".to_string()
        };
        lines.push(Line::from(Span::styled(
            format!("  a add · {remove} · [ ] move"),
            theme.text_muted(),
        )));
    }
    lines
}

pub fn add_branch_line(selected: bool, theme: &Theme) -> Line<'static> {
    let style = if selected {
        theme.list_cursor_style()
    } else {
        theme.text_muted()
    };
    Line::from(vec![
        Span::raw(if selected { "› " } else { "  " }),
        Span::styled("[ + Add branch ]".to_string(), style),
    ])
}

/// Guard for a state that the construction rules make unreachable: an empty
/// branch list still renders something rather than nothing.
pub fn placeholder_line(theme: &Theme) -> Line<'static> {
    Line::from(Span::styled("  (no branches)".to_string(), theme.text_muted()))
}
