use crate::theme::Theme;
use ratatui::prelude::*;

/// A one-of-N choice rendered inline: `(•)` marks the active option.
pub fn choice_line(
    label: &str,
    choices: &[(&str, bool)],
    selected: bool,
    theme: &Theme,
) -> Line<'static> {
    let sel = if selected { '›' } else { ' ' };
    let mut spans = vec![Span::raw(format!("{sel} {label}: "))];
    for (i, (name, on)) in choices.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let mark = if *on { "(•)" } else { "( )" };
        let style = if *on {
            if selected {
                theme.text_active_bold()
            } else {
                Style::default()
            }
        } else {
            theme.text_muted()
        };
        spans.push(Span::styled(format!("{mark} {name}"), style));
    }
    Line::from(spans)
}

/// A single binary flag bound to one data key.
pub fn flag_line(label: &str, on: bool, selected: bool, theme: &Theme) -> Line<'static> {
    let sel = if selected { '›' } else { ' ' };
    let mark = if on { "(•)" } else { "( )" };
    let style = if selected {
        theme.text_active_bold()
    } else if on {
        Style::default()
    } else {
        theme.text_muted()
    };
    Line::from(vec![
        Span::raw(format!("{sel} ")),
        Span::styled(format!("{mark} {label}"), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect::<String>()
    }

    #[test]
    fn active_choice_carries_the_filled_mark() {
        let line = choice_line(
            "Experiment type",
            &[("Single add-on", false), ("Branched add-on", true)],
            false,
            &Theme::default(),
        );
        assert_eq!(
            text(&line),
            "  Experiment type: ( ) Single add-on  (•) Branched add-on"
        );
    }

    #[test]
    fn flag_line_marks_state_and_selection() {
        let on = flag_line("Control branch", true, true, &Theme::default());
        assert_eq!(text(&on), "› (•) Control branch");
        let off = flag_line("Control branch", false, false, &Theme::default());
        assert_eq!(text(&off), "  ( ) Control branch");
    }
}
