use crate::theme::Theme;
use ratatui::prelude::*;

/// One labeled form field bound to a (value, error) pair.
pub struct InputLine<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub error: Option<&'a str>,
    pub required: bool,
}

/// Render the field as one value line plus, when present, one error line.
pub fn input_lines(
    input: InputLine<'_>,
    selected: bool,
    editing: bool,
    cursor_on: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let sel = if selected { '›' } else { ' ' };
    let req = if input.required { " *" } else { "" };
    let mut val = input.value.to_string();
    if editing && selected && cursor_on {
        val.push('▏');
    }
    let value_style = if selected {
        if editing {
            theme.text_editing_bold()
        } else {
            theme.text_active_bold()
        }
    } else {
        Style::default()
    };
    let mut lines = vec![Line::from(vec![
        Span::raw(format!("{sel} {}{req}: ", input.label)),
        Span::styled(val, value_style),
    ])];
    if let Some(err) = input.error {
        lines.push(Line::from(Span::styled(
            format!("  ! {err}"),
            theme.text_error(),
        )));
    }
    lines
}
