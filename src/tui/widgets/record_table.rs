// src/tui/widgets/record_table.rs

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::dataset;
use crate::engine::{Slot, SortDirection};
use crate::tui::App;

pub struct RecordTableWidget;

impl RecordTableWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = app.theme.clone();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Min(13),  // Header row + 10 slots + borders
                    Constraint::Length(8), // Detail pane
                ]
                .as_ref(),
            )
            .split(area);

        let title = match &app.last_load_error {
            Some(message) => Line::from(vec![
                Span::styled("Records ", theme.table_title),
                Span::styled(
                    format!("(load failed: {})", message),
                    Style::default().fg(theme.error_text),
                ),
            ]),
            None => Line::from(Span::styled("Records", theme.table_title)),
        };
        let table_block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));

        // Everything the table needs is read up front so the stateful
        // render below is the only borrow left.
        let columns: Vec<(String, String)> = app
            .engine
            .columns()
            .iter()
            .map(|c| (c.id().to_string(), c.title().to_string()))
            .collect();

        if columns.is_empty() {
            let notice = if app.engine.is_loading() {
                "Loading dataset..."
            } else {
                "No columns to display."
            };
            f.render_widget(
                Paragraph::new(notice)
                    .style(Style::default().fg(theme.secondary_foreground))
                    .block(table_block),
                chunks[0],
            );
            return;
        }

        let page = app.engine.visible_page();
        let active_filter = app
            .engine
            .active_filter_column()
            .map(|c| c.id().to_string());

        let header_cells: Vec<Cell> = columns
            .iter()
            .enumerate()
            .map(|(idx, (id, column_title))| {
                let title_style = if idx == app.cursor_col {
                    theme.table_header_cursor
                } else {
                    theme.table_header
                };
                let mut spans = vec![Span::styled(column_title.clone(), title_style)];
                if active_filter.as_deref() == Some(id.as_str()) {
                    spans.push(Span::styled(" ƒ", theme.table_filter_marker));
                }
                let indicator = app.engine.sort_indicator(id);
                if indicator.active {
                    let arrow = match indicator.direction {
                        Some(SortDirection::Ascending) => " ▲",
                        Some(SortDirection::Descending) => " ▼",
                        None => "",
                    };
                    spans.push(Span::styled(arrow, theme.table_sort_indicator));
                }
                Cell::from(Line::from(spans))
            })
            .collect();
        let header = Row::new(header_cells).bottom_margin(1);

        let rows: Vec<Row> = page
            .slots()
            .iter()
            .map(|slot| match slot {
                Slot::Row(record) => Row::new(
                    columns
                        .iter()
                        .map(|(id, _)| Cell::from(dataset::cell_text(record, id))),
                ),
                Slot::Placeholder => Row::new(
                    columns
                        .iter()
                        .map(|_| Cell::from(Span::styled("·", theme.table_placeholder))),
                ),
                Slot::Loading => Row::new(columns.iter().enumerate().map(|(idx, _)| {
                    if idx == 0 {
                        Cell::from(Span::styled("loading…", theme.table_loading))
                    } else {
                        Cell::from(Span::styled("·", theme.table_placeholder))
                    }
                })),
            })
            .collect();

        let widths: Vec<Constraint> = columns
            .iter()
            .map(|_| Constraint::Ratio(1, columns.len() as u32))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(table_block)
            .highlight_style(theme.highlight_style)
            .highlight_symbol("» ");
        f.render_stateful_widget(table, chunks[0], &mut app.table_state);

        // Detail pane for the selected row
        let detail_block = Block::default()
            .title(Line::from(Span::styled(
                "Record",
                Style::default().fg(theme.primary_foreground),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_secondary));
        let detail_area = detail_block.inner(chunks[1]);
        f.render_widget(detail_block, chunks[1]);

        let selected = app
            .table_state
            .selected()
            .and_then(|i| page.slots().get(i))
            .and_then(Slot::row);
        match selected {
            Some(record) => {
                let detail_lines: Vec<Line> = columns
                    .iter()
                    .map(|(id, column_title)| {
                        Line::from(vec![
                            Span::styled(format!("{}: ", column_title), theme.detail_label),
                            Span::styled(dataset::cell_text(record, id), theme.detail_value),
                        ])
                    })
                    .collect();
                f.render_widget(
                    Paragraph::new(Text::from(detail_lines))
                        .wrap(ratatui::widgets::Wrap { trim: false }),
                    detail_area,
                );
            }
            None => {
                f.render_widget(
                    Paragraph::new("No record selected")
                        .style(Style::default().fg(theme.secondary_foreground)),
                    detail_area,
                );
            }
        }
    }
}
