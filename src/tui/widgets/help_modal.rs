use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::App;

pub struct HelpModalWidget;

impl HelpModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let popup_area = Rect {
            x: area.x + area.width / 4,
            y: area.y + area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .style(
                Style::default()
                    .fg(theme.primary_foreground)
                    .bg(theme.popup_background),
            )
            .border_style(Style::default().fg(theme.popup_border))
            .title_alignment(Alignment::Center);
        f.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let kb = &app.config.keybindings;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![Span::styled("Quit: ", bold), Span::raw(kb.quit.clone())]),
            Line::from(vec![Span::styled("Help: ", bold), Span::raw(kb.help.clone())]),
            Line::from(vec![
                Span::styled("Next/Prev View: ", bold),
                Span::raw(format!("{} / {}", kb.next_tab, kb.prev_tab)),
            ]),
            Line::from(vec![
                Span::styled("Move Selection: ", bold),
                Span::raw(format!("{} / {}", kb.up, kb.down)),
            ]),
            Line::from(vec![
                Span::styled("Edit Filter Text: ", bold),
                Span::raw(kb.filter.clone()),
            ]),
            Line::from(vec![
                Span::styled("Next Filter Column: ", bold),
                Span::raw(kb.filter_column.clone()),
            ]),
            Line::from(vec![
                Span::styled("Toggle Sort (cursor column): ", bold),
                Span::raw(kb.sort.clone()),
            ]),
            Line::from(vec![
                Span::styled("Move Column Cursor: ", bold),
                Span::raw(format!("{} / {}", kb.prev_col, kb.next_col)),
            ]),
            Line::from(vec![
                Span::styled("Next/Prev Page: ", bold),
                Span::raw(format!("{} / {}", kb.next_page, kb.prev_page)),
            ]),
            Line::from(vec![
                Span::styled("First/Last Page: ", bold),
                Span::raw(format!("{} / {}", kb.first_page, kb.last_page)),
            ]),
            Line::from(vec![
                Span::styled("Reload Dataset: ", bold),
                Span::raw(kb.reload.clone()),
            ]),
            Line::from(""),
        ];
        lines.push(Line::from(vec![Span::styled(
            "Press Esc to close",
            Style::default().fg(theme.help_text),
        )]));

        let para = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(Block::default());
        f.render_widget(para, inner);
    }
}
