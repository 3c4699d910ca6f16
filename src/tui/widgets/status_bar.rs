use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::engine::SortDirection;
use crate::tui::app::{App, InputMode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let view_mode_bg = match app.input_mode {
            InputMode::Normal => theme.status_bar_mode_normal_bg,
            InputMode::Editing => theme.status_bar_mode_editing_bg,
        };

        let sort_summary = app
            .engine
            .columns()
            .iter()
            .find_map(|c| {
                let indicator = app.engine.sort_indicator(c.id());
                if !indicator.active {
                    return None;
                }
                let arrow = match indicator.direction {
                    Some(SortDirection::Ascending) => "▲",
                    Some(SortDirection::Descending) => "▼",
                    None => "",
                };
                Some(format!("{} {}", c.title(), arrow))
            })
            .unwrap_or_else(|| "none".to_string());

        let mut status_spans_left = vec![
            Span::styled("rowscope | ", status_bar_style),
            Span::styled("View: ", status_bar_style),
            Span::styled(
                format!("{:?}", app.active_view),
                Style::default()
                    .fg(theme.status_bar_view_name_fg)
                    .bg(theme.status_bar_background)
                    .bold(),
            ),
            Span::styled(" | Input: ", status_bar_style),
            Span::styled(
                format!("{:?}", app.input_mode),
                Style::default().fg(theme.primary_foreground).bg(view_mode_bg).bold(),
            ),
            Span::styled(
                format!(
                    " | Rows: {}/{} ",
                    app.engine.view_len(),
                    app.engine.record_count()
                ),
                status_bar_style,
            ),
            Span::styled(
                format!(
                    "| Page: {}/{} ",
                    app.engine.active_page() + 1,
                    app.engine.total_pages()
                ),
                status_bar_style,
            ),
            Span::styled(format!("| Sort: {} ", sort_summary), status_bar_style),
        ];
        if app.engine.is_loading() {
            status_spans_left.push(Span::styled(
                "| Loading… ",
                Style::default().fg(theme.status_bar_view_name_fg).bg(theme.status_bar_background),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(status_spans_left)).style(status_bar_style),
            status_bar_layout[0],
        );

        let mut status_spans_right = vec![];
        match &app.loaded_at {
            Some(timestamp) => {
                status_spans_right.push(Span::styled("Loaded: ", status_bar_style));
                status_spans_right.push(Span::styled(
                    timestamp.clone(),
                    Style::default().fg(theme.success_text).bg(theme.status_bar_background),
                ));
                status_spans_right.push(Span::raw(" | "));
            }
            None => {
                status_spans_right.push(Span::styled("No data | ", status_bar_style));
            }
        }
        status_spans_right.push(Span::from(Local::now().format("%H:%M:%S").to_string()));

        f.render_widget(
            Paragraph::new(Line::from(status_spans_right))
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}
