use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top system info bar area
    pub system_area: Rect,
    /// Document list (left column)
    pub documents_area: Rect,
    /// Configuration form and job status line
    pub form_area: Rect,
    /// Topic and SDG results
    pub results_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Height of the configuration panel: borders, two fields, a blank line, job status
pub const FORM_HEIGHT: u16 = 6;

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, legend_height: u16) -> LayoutInfo {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // System info bar
            Constraint::Min(6),                // Content area
            Constraint::Length(legend_height), // Legend area (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    // Narrow terminals give the document list less room
    let documents_pct = if main_chunks[1].width < 90 { 40 } else { 30 };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(documents_pct),
            Constraint::Percentage(100 - documents_pct),
        ])
        .split(main_chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(3)])
        .split(columns[1]);

    LayoutInfo {
        system_area: main_chunks[0],
        documents_area: columns[0],
        form_area: right[0],
        results_area: right[1],
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}
