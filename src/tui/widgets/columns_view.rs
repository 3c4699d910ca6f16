use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::engine::SortDirection;
use crate::tui::App;

pub struct ColumnsViewWidget;

impl ColumnsViewWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = app.theme.clone();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
            .split(area);

        // Left Pane: column list
        let left_pane_block = Block::default()
            .title(Line::from(Span::styled("Columns", theme.columns_list_title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));
        let left_pane_content_area = left_pane_block.inner(chunks[0]);
        f.render_widget(left_pane_block, chunks[0]);

        let column_items: Vec<ListItem> = app
            .engine
            .columns()
            .iter()
            .map(|column| {
                let filter_color = if column.can_filter() {
                    theme.columns_capability_on
                } else {
                    theme.columns_capability_off
                };
                let order_color = if column.can_order() {
                    theme.columns_capability_on
                } else {
                    theme.columns_capability_off
                };
                let content = Line::from(vec![
                    Span::styled(
                        format!("{} ", column.title()),
                        Style::default().fg(theme.primary_foreground),
                    ),
                    Span::styled(
                        format!("({}) ", column.id()),
                        Style::default().fg(theme.secondary_foreground),
                    ),
                    Span::styled("ƒ", Style::default().fg(filter_color)),
                    Span::styled("↕", Style::default().fg(order_color)),
                ]);
                ListItem::new(content)
            })
            .collect();

        let column_list = List::new(column_items)
            .highlight_style(theme.highlight_style)
            .highlight_symbol(">> ");
        f.render_stateful_widget(column_list, left_pane_content_area, &mut app.columns_list_state);

        // Right Pane: column details
        let right_pane_block = Block::default()
            .title(Line::from(Span::styled(
                "Column Details",
                Style::default().fg(theme.primary_foreground),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_secondary));
        let right_pane_content_area = right_pane_block.inner(chunks[1]);
        f.render_widget(right_pane_block, chunks[1]);

        let selected_column = app
            .columns_list_state
            .selected()
            .and_then(|idx| app.engine.columns().get(idx));
        if let Some(column) = selected_column {
            let yes_no = |flag: bool| if flag { "yes" } else { "no" };
            let indicator = app.engine.sort_indicator(column.id());
            let sort_text = match (indicator.active, indicator.direction) {
                (true, Some(SortDirection::Ascending)) => "ascending",
                (true, Some(SortDirection::Descending)) => "descending",
                _ => "unordered",
            };
            let filter_text = if app.engine.active_filter_column().map(|c| c.id())
                == Some(column.id())
            {
                format!("active (text: {:?})", app.engine.filter_text())
            } else {
                "inactive".to_string()
            };

            let label = theme.detail_label;
            let value = theme.detail_value;
            let details_lines = vec![
                Line::from(vec![Span::styled("Id: ", label), Span::styled(column.id().to_string(), value)]),
                Line::from(vec![Span::styled("Title: ", label), Span::styled(column.title().to_string(), value)]),
                Line::from(vec![
                    Span::styled("Filterable: ", label),
                    Span::styled(yes_no(column.can_filter()), value),
                ]),
                Line::from(vec![
                    Span::styled("Sortable: ", label),
                    Span::styled(yes_no(column.can_order()), value),
                ]),
                Line::from(vec![Span::styled("Sort state: ", label), Span::styled(sort_text, value)]),
                Line::from(vec![Span::styled("Filter: ", label), Span::styled(filter_text, value)]),
            ];
            f.render_widget(
                Paragraph::new(Text::from(details_lines))
                    .style(Style::default().fg(theme.primary_foreground)),
                right_pane_content_area,
            );
        } else {
            f.render_widget(
                Paragraph::new("No column selected")
                    .style(Style::default().fg(theme.secondary_foreground)),
                right_pane_content_area,
            );
        }
    }
}
