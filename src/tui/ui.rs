use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::{App, AppView};
use super::widgets::{
    columns_view::ColumnsViewWidget,
    filter_bar::FilterBarWidget,
    help_modal::HelpModalWidget,
    logs::LogsWidget,
    record_table::RecordTableWidget,
    status_bar::StatusBarWidget,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    // Status bar on top, content in the middle, filter bar at the bottom.
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Filter bar
        ])
        .split(f.size());

    StatusBarWidget::render(f, app, main_layout_chunks[0]);

    let main_content_area = main_layout_chunks[1];
    match app.active_view {
        AppView::Records => {
            RecordTableWidget::render(f, app, main_content_area);
        }
        AppView::Columns => {
            ColumnsViewWidget::render(f, app, main_content_area);
        }
        AppView::Logs => {
            LogsWidget::render(f, app, main_content_area);
        }
    }

    FilterBarWidget::render(f, app, main_layout_chunks[2]);

    if app.show_help_modal {
        HelpModalWidget::render(f, app, f.size());
    }
}
