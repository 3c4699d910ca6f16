// src/tui/widgets/filter_bar.rs
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub struct FilterBarWidget;

impl FilterBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let active_title = app
            .engine
            .active_filter_column()
            .map(|c| c.title().to_string());

        let title_string;
        let input_style;
        if app.input_mode == InputMode::Editing {
            let column = active_title.as_deref().unwrap_or("?");
            title_string = format!("Filter on {}: (Enter/Esc to finish)", column);
            input_style = Style::default()
                .fg(theme.filter_bar_text_fg)
                .bg(theme.filter_bar_background);
        } else {
            title_string = match &active_title {
                Some(column) => {
                    format!("Filter on {} — '/' to edit, 'f' for next column", column)
                }
                None => "(no filterable columns)".to_string(),
            };
            input_style = Style::default()
                .fg(theme.secondary_foreground)
                .bg(theme.filter_bar_background);
        }

        let shown_text = if app.input_mode == InputMode::Editing {
            app.current_input.clone()
        } else {
            app.engine.filter_text().to_string()
        };

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.filter_bar_border))
            .title(Line::from(Span::styled(
                title_string,
                Style::default()
                    .fg(theme.primary_foreground)
                    .bg(theme.filter_bar_background),
            )))
            .style(Style::default().bg(theme.filter_bar_background));

        f.render_widget(
            Paragraph::new(Text::from(shown_text))
                .style(input_style)
                .block(input_block),
            area,
        );

        if app.input_mode == InputMode::Editing {
            let before_cursor: String = app
                .current_input
                .chars()
                .take(app.input_cursor_char_idx)
                .collect();
            let x = area.x + 1 + before_cursor.width() as u16;
            f.set_cursor(x.min(area.x + area.width.saturating_sub(2)), area.y + 1);
        }
    }
}
