// src/tui/events.rs

use anyhow::Result;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::{error, info};

use crate::dataset;
use super::app::{App, AppEvent, AppView, InputMode};
use super::ui::ui;

pub async fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
) -> Result<()> {
    let mut event_receiver = app.event_receiver.take().unwrap();
    let mut crossterm_events = EventStream::new();

    // Initial dataset fetch; the table shows loading slots meanwhile.
    app.engine.set_loading(true);
    app.event_sender.send(AppEvent::ReloadDataset).ok();

    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        // --- Log Handling ---
        if let Some(ref mut receiver) = app.log_receiver {
            while let Ok(log_entry) = receiver.try_recv() {
                app.log_entries.push(log_entry);
            }
        }
        let max_logs = 1000;
        if app.log_entries.len() > max_logs {
            let overflow = app.log_entries.len() - max_logs;
            app.log_entries.drain(0..overflow);
        }
        if app.active_view == AppView::Logs {
            let is_scrolled_to_bottom = match app.log_list_state.selected() {
                Some(index) => index >= app.log_entries.len().saturating_sub(1),
                None => true,
            };
            if is_scrolled_to_bottom && !app.log_entries.is_empty() {
                app.log_list_state.select(Some(app.log_entries.len() - 1));
            }
        }

        let tick_duration = Duration::from_millis(app.config.interface.refresh_interval_ms);

        tokio::select! {
            // Handle app events from the channel
            Some(event) = event_receiver.recv() => {
                match event {
                    AppEvent::ReloadDataset => {
                        let path = app.data_path.clone();
                        let sender = app.event_sender.clone();
                        tokio::task::spawn_blocking(move || {
                            match dataset::load_records(&path) {
                                Ok(records) => {
                                    sender.send(AppEvent::DatasetLoaded(records)).ok();
                                }
                                Err(e) => {
                                    sender.send(AppEvent::DatasetFailed(e.to_string())).ok();
                                }
                            }
                        });
                    }
                    AppEvent::DatasetLoaded(records) => {
                        info!("Dataset loaded from {}", app.data_path.display());
                        app.apply_loaded_records(records);
                    }
                    AppEvent::DatasetFailed(message) => {
                        error!("Failed to load dataset: {}", message);
                        app.last_load_error = Some(message);
                        app.engine.set_loading(false);
                        app.after_engine_change();
                    }
                }
            }

            // Handle terminal events
            Some(Ok(event)) = crossterm_events.next() => {
                match event {
                    CrosstermEvent::Key(key) => on_key(&mut app, key),
                    CrosstermEvent::Mouse(mouse) => on_mouse_event(&mut app, mouse),
                    _ => {}
                }
            }

            // Tick for periodic updates (clock redraw)
            _ = tokio::time::sleep(tick_duration) => {
                app.tick();
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn on_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => match app.active_view {
            AppView::Records => app.select_previous_row(),
            AppView::Columns => app.select_previous_column_entry(),
            AppView::Logs => app.scroll_logs_up(),
        },
        MouseEventKind::ScrollDown => match app.active_view {
            AppView::Records => app.select_next_row(),
            AppView::Columns => app.select_next_column_entry(),
            AppView::Logs => app.scroll_logs_down(),
        },
        _ => {}
    }
}

fn key_matches(app: &App, action: &str, key_event: &KeyEvent) -> bool {
    if let Some((code, mods)) = app.keybinding_map.get(action) {
        key_event.code == *code && key_event.modifiers == *mods
    } else {
        false
    }
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    if app.show_help_modal {
        if key_matches(app, "help", &key_event) || key_event.code == KeyCode::Esc {
            app.show_help_modal = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode_key(app, key_event),
        InputMode::Editing => handle_editing_mode_key(app, key_event),
    }
}

fn handle_normal_mode_key(app: &mut App, key_event: KeyEvent) {
    if key_matches(app, "quit", &key_event) {
        app.should_quit = true;
    } else if key_matches(app, "help", &key_event) {
        app.show_help_modal = true;
    } else if key_matches(app, "next_tab", &key_event) {
        app.active_view = app.active_view.next();
    } else if key_matches(app, "prev_tab", &key_event) {
        app.active_view = app.active_view.previous();
    } else if key_matches(app, "down", &key_event) || key_event.code == KeyCode::Char('j') {
        match app.active_view {
            AppView::Records => app.select_next_row(),
            AppView::Columns => app.select_next_column_entry(),
            AppView::Logs => app.scroll_logs_down(),
        }
    } else if key_matches(app, "up", &key_event) || key_event.code == KeyCode::Char('k') {
        match app.active_view {
            AppView::Records => app.select_previous_row(),
            AppView::Columns => app.select_previous_column_entry(),
            AppView::Logs => app.scroll_logs_up(),
        }
    } else if key_matches(app, "filter", &key_event) {
        // No filterable column means no filter editing at all.
        if app.engine.filterable_columns().next().is_some() {
            app.current_input = app.engine.filter_text().to_string();
            app.input_mode = InputMode::Editing;
            app.reset_cursor_position();
        }
    } else if key_matches(app, "filter_column", &key_event) {
        app.cycle_filter_column();
    } else if key_matches(app, "sort", &key_event) {
        if let Some(id) = app.cursor_column_id() {
            app.engine.toggle_order(&id);
            app.after_engine_change();
        }
    } else if key_matches(app, "prev_col", &key_event) {
        app.select_previous_column();
    } else if key_matches(app, "next_col", &key_event) {
        app.select_next_column();
    } else if key_matches(app, "next_page", &key_event) || key_event.code == KeyCode::Right {
        app.engine.set_page(app.engine.active_page() + 2);
        app.after_engine_change();
    } else if key_matches(app, "prev_page", &key_event) || key_event.code == KeyCode::Left {
        if app.engine.active_page() > 0 {
            app.engine.set_page(app.engine.active_page());
            app.after_engine_change();
        }
    } else if key_matches(app, "first_page", &key_event) {
        app.engine.set_page(1);
        app.after_engine_change();
    } else if key_matches(app, "last_page", &key_event) {
        app.engine.set_page(app.engine.total_pages().max(1));
        app.after_engine_change();
    } else if key_matches(app, "reload", &key_event) {
        if !app.engine.is_loading() {
            app.last_load_error = None;
            app.engine.set_loading(true);
            app.event_sender.send(AppEvent::ReloadDataset).ok();
        }
    }
}

fn handle_editing_mode_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            let at = byte_index(&app.current_input, app.input_cursor_char_idx);
            app.current_input.insert(at, c);
            app.input_cursor_char_idx += 1;
            apply_filter_text(app);
        }
        KeyCode::Backspace => {
            if app.input_cursor_char_idx > 0 {
                app.input_cursor_char_idx -= 1;
                let at = byte_index(&app.current_input, app.input_cursor_char_idx);
                app.current_input.remove(at);
                apply_filter_text(app);
            }
        }
        KeyCode::Left => {
            if app.input_cursor_char_idx > 0 {
                app.input_cursor_char_idx -= 1;
            }
        }
        KeyCode::Right => {
            if app.input_cursor_char_idx < app.current_input.chars().count() {
                app.input_cursor_char_idx += 1;
            }
        }
        _ => {}
    }
}

/// Filter text is live: every edit flows straight into the engine.
fn apply_filter_text(app: &mut App) {
    app.engine.set_filter_text(app.current_input.clone());
    app.after_engine_change();
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_handles_multibyte_text() {
        let s = "aé→b";
        assert_eq!(byte_index(s, 0), 0);
        assert_eq!(byte_index(s, 1), 1);
        assert_eq!(byte_index(s, 2), 3);
        assert_eq!(byte_index(s, 3), 6);
        assert_eq!(byte_index(s, 4), s.len());
        assert_eq!(byte_index(s, 99), s.len());
    }
}
