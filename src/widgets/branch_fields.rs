use crate::exp_core::branch::BranchEntry;
use crate::exp_core::validate::{RATIO_MAX, RATIO_MIN};
use crate::exp_core::variant::BranchField;
use crate::theme::Theme;
use crate::widgets::design_input::{input_lines, InputLine};
use crate::widgets::radio::flag_line;
use ratatui::prelude::*;

/// Render one field row of a branch. A pure function of the entry's
/// (data, errors) pair: fields outside the current variant's subset are
/// simply never passed in, so leftover values from a mode switch stay
/// invisible without being stripped.
pub fn field_row_lines(
    entry: &BranchEntry,
    field: BranchField,
    selected: bool,
    editing: bool,
    cursor_on: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    match field {
        BranchField::IsControl => {
            vec![flag_line(field.label(), entry.data.is_control, selected, theme)]
        }
        BranchField::Description => {
            // Shown as a one-line summary; full editing happens in the overlay
            let value = summary(&entry.data.description);
            input_lines(
                InputLine {
                    label: field.label(),
                    value: &value,
                    error: entry.errors.get(field),
                    required: true,
                },
                selected,
                false,
                false,
                theme,
            )
        }
        BranchField::Name | BranchField::Slug | BranchField::Ratio
        | BranchField::AddonReleaseUrl => {
            let value = match field {
                BranchField::Name => &entry.data.name,
                BranchField::Slug => &entry.data.slug,
                BranchField::Ratio => &entry.data.ratio,
                _ => &entry.data.addon_release_url,
            };
            input_lines(
                InputLine {
                    label: field.label(),
                    value,
                    error: entry.errors.get(field),
                    required: true,
                },
                selected,
                editing,
                cursor_on,
                theme,
            )
        }
    }
}

fn summary(text: &str) -> String {
    match text.split_once('\n') {
        Some((first, _)) => format!("{first} …"),
        None => text.to_string(),
    }
}

/// Step a ratio value up or down, clamped to the valid percentage range.
/// Unparseable text restarts from the midpoint.
pub fn step_ratio(value: &str, delta: i64) -> String {
    let cur: i64 = value.trim().parse().unwrap_or(50);
    let next = (cur + delta).clamp(i64::from(RATIO_MIN), i64::from(RATIO_MAX));
    next.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exp_core::branch::BranchList;
    use crate::exp_core::variant::FieldSetVariant;

    fn entry() -> BranchEntry {
        let mut list = BranchList::new();
        list.push_default(FieldSetVariant::Generic);
        list.set_text(0, BranchField::Name, "Treatment".into()).unwrap();
        list.set_text(0, BranchField::Description, "line one\nline two".into())
            .unwrap();
        list.get(0).unwrap().clone()
    }

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn description_row_summarizes_multiline_text() {
        let lines = field_row_lines(
            &entry(),
            BranchField::Description,
            false,
            false,
            false,
            &Theme::default(),
        );
        assert_eq!(text_of(&lines)[0], "  Description *: line one …");
    }

    #[test]
    fn control_row_renders_as_flag() {
        let lines = field_row_lines(
            &entry(),
            BranchField::IsControl,
            true,
            false,
            false,
            &Theme::default(),
        );
        assert_eq!(text_of(&lines)[0], "› ( ) Control branch");
    }

    #[test]
    fn step_ratio_clamps_to_percentage_range() {
        assert_eq!(step_ratio("50", 1), "51");
        assert_eq!(step_ratio("100", 1), "100");
        assert_eq!(step_ratio("1", -1), "1");
        assert_eq!(step_ratio("garbage", 1), "51");
        assert_eq!(step_ratio(" 25 ", -1), "24");
    }
}
