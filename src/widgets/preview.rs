use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Scrollable read-only view of the serialized draft document.
#[derive(Default)]
pub struct PreviewState {
    pub scroll_y: u16,
    pub wrap: bool,
    last_viewport_h: u16,
    last_total_lines: u16,
}

impl PreviewState {
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        text: &str,
        error: Option<&str>,
        theme: &Theme,
    ) {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(err) = error {
            lines.push(Line::from(Span::styled(err.to_string(), theme.text_error())));
            lines.push(Line::from(""));
        }
        for l in text.lines() {
            lines.push(Line::from(l.to_string()));
        }
        self.last_viewport_h = area.height.saturating_sub(2);
        self.last_total_lines = lines.len() as u16;
        let max_scroll = self.last_total_lines.saturating_sub(self.last_viewport_h);
        if self.scroll_y > max_scroll {
            self.scroll_y = max_scroll;
        }
        let block = panel_block(title, true, theme);
        let p = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: !self.wrap })
            .scroll((self.scroll_y, 0));
        f.render_widget(p, area);
    }

    pub fn on_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                self.scroll_y = self.scroll_y.saturating_sub(1);
            }
            KeyCode::Down => {
                self.scroll_y = self.scroll_y.saturating_add(1);
            }
            KeyCode::PageUp => {
                self.scroll_y = self.scroll_y.saturating_sub(self.last_viewport_h);
            }
            KeyCode::PageDown => {
                self.scroll_y = self.scroll_y.saturating_add(self.last_viewport_h);
            }
            KeyCode::Home => {
                self.scroll_y = 0;
            }
            KeyCode::End => {
                self.scroll_y = self.last_total_lines.saturating_sub(self.last_viewport_h);
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.wrap = !self.wrap;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn end_jumps_to_bottom_and_w_toggles_wrap() {
        let text = (0..30)
            .map(|i| format!("line-{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut pv = PreviewState::default();
        let theme = Theme::default();
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| pv.render(f, f.area(), "Preview", &text, None, &theme))
            .unwrap();
        pv.on_key(KeyCode::End);
        assert_eq!(pv.scroll_y, 30u16.saturating_sub(pv.last_viewport_h));
        assert!(!pv.wrap);
        pv.on_key(KeyCode::Char('w'));
        assert!(pv.wrap);
    }

    #[test]
    fn stale_scroll_is_clamped_on_render() {
        let mut pv = PreviewState {
            scroll_y: 500,
            ..PreviewState::default()
        };
        let theme = Theme::default();
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| pv.render(f, f.area(), "Preview", "one\ntwo", None, &theme))
            .unwrap();
        assert_eq!(pv.scroll_y, 0);
    }
}
