use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub border_primary: Color,
    pub border_secondary: Color,
    pub highlight_style: Style, // For list/table selections
    pub error_text: Color,
    pub success_text: Color,

    // Status Bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_mode_normal_bg: Color,
    pub status_bar_mode_editing_bg: Color,
    pub status_bar_view_name_fg: Color,

    // Filter Bar
    pub filter_bar_background: Color,
    pub filter_bar_text_fg: Color,
    pub filter_bar_border: Color,

    // Record Table
    pub table_title: Style,
    pub table_header: Style,
    pub table_header_cursor: Style,
    pub table_sort_indicator: Style,
    pub table_filter_marker: Style,
    pub table_placeholder: Style,
    pub table_loading: Style,
    pub detail_label: Style,
    pub detail_value: Style,

    // Columns View
    pub columns_list_title: Style,
    pub columns_capability_on: Color,
    pub columns_capability_off: Color,

    // Log View
    pub log_title: Style,
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup
    pub popup_border: Color,
    pub popup_background: Color,
    pub help_text: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // General
            primary_foreground: Color::White,
            secondary_foreground: Color::Gray,
            border_primary: Color::DarkGray,
            border_secondary: Color::LightCyan,
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            error_text: Color::Red,
            success_text: Color::Green,

            // Status Bar
            status_bar_background: Color::Blue,
            status_bar_foreground: Color::White,
            status_bar_mode_normal_bg: Color::LightCyan,
            status_bar_mode_editing_bg: Color::LightMagenta,
            status_bar_view_name_fg: Color::Yellow,

            // Filter Bar
            filter_bar_background: Color::DarkGray,
            filter_bar_text_fg: Color::White,
            filter_bar_border: Color::White,

            // Record Table
            table_title: Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            table_header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            table_header_cursor: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            table_sort_indicator: Style::default().fg(Color::LightGreen),
            table_filter_marker: Style::default().fg(Color::LightMagenta),
            table_placeholder: Style::default().fg(Color::DarkGray),
            table_loading: Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            detail_label: Style::default().fg(Color::Gray),
            detail_value: Style::default().fg(Color::White),

            // Columns View
            columns_list_title: Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            columns_capability_on: Color::Green,
            columns_capability_off: Color::DarkGray,

            // Log View
            log_title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Blue),
            log_level_info: Style::default().fg(Color::Green),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Cyan),

            // Popup
            popup_border: Color::Yellow,
            popup_background: Color::DarkGray,
            help_text: Color::Cyan,
        }
    }
}
