// src/tui/app.rs

use ratatui::widgets::{ListState, TableState};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::dataset::{self, Record};
use crate::engine::ViewEngine;

use super::theme::AppTheme;

// Define different views for the TUI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Records,
    Columns,
    Logs,
}

impl AppView {
    pub fn next(&self) -> Self {
        match self {
            Self::Records => Self::Columns,
            Self::Columns => Self::Logs,
            Self::Logs => Self::Records,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Records => Self::Logs,
            Self::Columns => Self::Records,
            Self::Logs => Self::Columns,
        }
    }
}

// Define input modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

// One entry of the in-app log view
#[derive(Clone, Debug)]
pub struct UiLogEntry {
    pub timestamp: String, // Formatted in the tracing layer
    pub level: Level,
    pub target: String,
    pub message: String,
}

// App-level events for async operations
#[derive(Clone)]
pub enum AppEvent {
    ReloadDataset,
    DatasetLoaded(Vec<Record>),
    DatasetFailed(String),
}

pub struct App {
    pub should_quit: bool,
    pub config: Arc<Config>,
    pub theme: Arc<AppTheme>,
    pub data_path: PathBuf,

    /// The view engine; every filter/sort/page interaction goes through it.
    pub engine: ViewEngine<Record>,

    pub active_view: AppView,
    pub input_mode: InputMode,

    /// Which column the sort and filter-column keys act on.
    pub cursor_col: usize,

    /// Row selection within the visible page. Cleared whenever the engine
    /// reports a selection reset.
    pub table_state: TableState,

    // Filter-text editing
    pub current_input: String,
    pub input_cursor_char_idx: usize,

    pub columns_list_state: ListState,

    pub log_entries: Vec<UiLogEntry>,
    pub log_list_state: ListState,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UiLogEntry>>,

    // Channel for sending async commands from sync event handlers
    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,

    pub show_help_modal: bool,
    pub keybinding_map: HashMap<String, (KeyCode, KeyModifiers)>,

    pub last_load_error: Option<String>,
    pub loaded_at: Option<String>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        data_path: PathBuf,
        log_receiver: mpsc::UnboundedReceiver<UiLogEntry>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();

        let keybinding_map = parse_keybindings(&config.keybindings);

        Self {
            should_quit: false,
            config: Arc::clone(&config),
            theme: Arc::new(AppTheme::default()),
            data_path,
            engine: ViewEngine::new(Vec::new()),
            active_view: AppView::Records,
            input_mode: InputMode::Normal,
            cursor_col: 0,
            table_state: TableState::default(),
            current_input: String::new(),
            input_cursor_char_idx: 0,
            columns_list_state: ListState::default(),
            log_entries: Vec::new(),
            log_list_state: ListState::default(),
            log_receiver: Some(log_receiver),
            event_sender: event_tx,
            event_receiver: Some(event_rx),
            show_help_modal: false,
            keybinding_map,
            last_load_error: None,
            loaded_at: None,
        }
    }

    pub fn tick(&mut self) {
        // Periodic updates only redraw the clock for now.
    }

    /// Install a freshly loaded dataset: resolve the descriptor set, hand
    /// both to the engine, and drop the loading state. The engine defers
    /// the recompute until the loading flag clears, so the new view
    /// appears in one step.
    pub fn apply_loaded_records(&mut self, records: Vec<Record>) {
        let specs =
            dataset::resolve_columns(&records, &self.config.columns, self.config.dataset.infer_limit);
        info!(
            "Dataset ready: {} records, {} columns",
            records.len(),
            specs.len()
        );
        self.engine.set_columns(dataset::build_columns(&specs));
        self.engine.set_records(records);
        self.engine.set_loading(false);
        self.last_load_error = None;
        self.loaded_at = Some(chrono::Local::now().format("%H:%M:%S").to_string());
        self.after_engine_change();
    }

    /// Settle app-side state after any engine mutation: drop a reset row
    /// selection and keep the column cursor on a real column.
    pub fn after_engine_change(&mut self) {
        if self.engine.take_selection_reset() {
            self.table_state.select(None);
        }
        let column_count = self.engine.columns().len();
        if column_count == 0 {
            self.cursor_col = 0;
        } else if self.cursor_col >= column_count {
            self.cursor_col = column_count - 1;
        }
    }

    pub fn cursor_column_id(&self) -> Option<String> {
        self.engine
            .columns()
            .get(self.cursor_col)
            .map(|c| c.id().to_string())
    }

    pub fn select_next_column(&mut self) {
        let count = self.engine.columns().len();
        if count > 0 {
            self.cursor_col = (self.cursor_col + 1) % count;
        }
    }

    pub fn select_previous_column(&mut self) {
        let count = self.engine.columns().len();
        if count > 0 {
            self.cursor_col = (self.cursor_col + count - 1) % count;
        }
    }

    /// Advance the active filter column through the filterable set.
    pub fn cycle_filter_column(&mut self) {
        let filterable: Vec<String> = self
            .engine
            .filterable_columns()
            .map(|c| c.id().to_string())
            .collect();
        if filterable.is_empty() {
            return;
        }
        let active = self.engine.active_filter_column().map(|c| c.id().to_string());
        let next = match active.and_then(|id| filterable.iter().position(|f| *f == id)) {
            Some(idx) => filterable[(idx + 1) % filterable.len()].clone(),
            None => filterable[0].clone(),
        };
        self.engine.set_filter_column(&next);
        self.after_engine_change();
    }

    pub fn select_next_row(&mut self) {
        let rows = self.engine.visible_page().row_count();
        if rows == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= rows - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_previous_row(&mut self) {
        let rows = self.engine.visible_page().row_count();
        if rows == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    rows - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_next_column_entry(&mut self) {
        let count = self.engine.columns().len();
        if count == 0 {
            self.columns_list_state.select(None);
            return;
        }
        let i = match self.columns_list_state.selected() {
            Some(i) => {
                if i >= count - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.columns_list_state.select(Some(i));
    }

    pub fn select_previous_column_entry(&mut self) {
        let count = self.engine.columns().len();
        if count == 0 {
            self.columns_list_state.select(None);
            return;
        }
        let i = match self.columns_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    count - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.columns_list_state.select(Some(i));
    }

    pub fn scroll_logs_up(&mut self) {
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection > 0 {
            self.log_list_state.select(Some(current_selection - 1));
        }
    }

    pub fn scroll_logs_down(&mut self) {
        if self.log_entries.is_empty() {
            return;
        }
        let max_index = self.log_entries.len() - 1;
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection < max_index {
            self.log_list_state.select(Some(current_selection + 1));
        }
    }

    pub fn reset_cursor_position(&mut self) {
        self.input_cursor_char_idx = self.current_input.chars().count();
    }
}

fn parse_keybindings(
    cfg: &crate::config::KeyBindingsConfig,
) -> HashMap<String, (KeyCode, KeyModifiers)> {
    let mut map = HashMap::new();
    macro_rules! insert {
        ($action:expr, $binding:expr, $fallback:expr) => {
            map.insert(
                $action.to_string(),
                parse_keybinding(&$binding).unwrap_or($fallback),
            );
        };
    }
    insert!("quit", cfg.quit, (KeyCode::Char('q'), KeyModifiers::NONE));
    insert!("help", cfg.help, (KeyCode::Char('?'), KeyModifiers::NONE));
    insert!("next_tab", cfg.next_tab, (KeyCode::Tab, KeyModifiers::NONE));
    insert!("prev_tab", cfg.prev_tab, (KeyCode::BackTab, KeyModifiers::NONE));
    insert!("up", cfg.up, (KeyCode::Up, KeyModifiers::NONE));
    insert!("down", cfg.down, (KeyCode::Down, KeyModifiers::NONE));
    insert!("filter", cfg.filter, (KeyCode::Char('/'), KeyModifiers::NONE));
    insert!(
        "filter_column",
        cfg.filter_column,
        (KeyCode::Char('f'), KeyModifiers::NONE)
    );
    insert!("sort", cfg.sort, (KeyCode::Char('s'), KeyModifiers::NONE));
    insert!("prev_col", cfg.prev_col, (KeyCode::Char('['), KeyModifiers::NONE));
    insert!("next_col", cfg.next_col, (KeyCode::Char(']'), KeyModifiers::NONE));
    insert!("next_page", cfg.next_page, (KeyCode::Char('n'), KeyModifiers::NONE));
    insert!("prev_page", cfg.prev_page, (KeyCode::Char('p'), KeyModifiers::NONE));
    insert!("first_page", cfg.first_page, (KeyCode::Char('g'), KeyModifiers::NONE));
    insert!(
        "last_page",
        cfg.last_page,
        (KeyCode::Char('G'), KeyModifiers::SHIFT)
    );
    insert!("reload", cfg.reload, (KeyCode::Char('r'), KeyModifiers::NONE));
    map
}

fn parse_keybinding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let s = s.trim();
    let mut mods = KeyModifiers::empty();
    let mut key = s;
    if let Some(stripped) = key.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Alt+") {
        mods |= KeyModifiers::ALT;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Shift+") {
        mods |= KeyModifiers::SHIFT;
        key = stripped;
    }
    let code = match key.to_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            // Single characters keep their case; crossterm reports an
            // uppercase letter with the SHIFT modifier set.
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if c.is_uppercase() {
                mods |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c)
        }
    };
    Some((code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_named_keys() {
        assert_eq!(
            parse_keybinding("q"),
            Some((KeyCode::Char('q'), KeyModifiers::NONE))
        );
        assert_eq!(parse_keybinding("Tab"), Some((KeyCode::Tab, KeyModifiers::NONE)));
        assert_eq!(
            parse_keybinding("BackTab"),
            Some((KeyCode::BackTab, KeyModifiers::NONE))
        );
        assert_eq!(parse_keybinding("Up"), Some((KeyCode::Up, KeyModifiers::NONE)));
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(
            parse_keybinding("Ctrl+r"),
            Some((KeyCode::Char('r'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_keybinding("Alt+Enter"),
            Some((KeyCode::Enter, KeyModifiers::ALT))
        );
    }

    #[test]
    fn test_uppercase_char_implies_shift() {
        assert_eq!(
            parse_keybinding("G"),
            Some((KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
        assert_eq!(
            parse_keybinding("g"),
            Some((KeyCode::Char('g'), KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_unparseable_bindings_fall_back_to_defaults() {
        assert_eq!(parse_keybinding("NoSuchKey"), None);
        let mut cfg = crate::config::KeyBindingsConfig::default();
        cfg.sort = "NoSuchKey".to_string();
        let map = parse_keybindings(&cfg);
        assert_eq!(map["sort"], (KeyCode::Char('s'), KeyModifiers::NONE));
    }

    #[test]
    fn test_view_cycle_is_closed() {
        let mut view = AppView::Records;
        for _ in 0..3 {
            view = view.next();
        }
        assert_eq!(view, AppView::Records);
        assert_eq!(AppView::Records.previous(), AppView::Logs);
    }
}
