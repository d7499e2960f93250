use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Build the `Label: value | Label: value` line shown in the status bar
pub fn build_status_line(
    focus: &str,
    selected_document: Option<&str>,
    analysis_id: Option<&str>,
    elapsed: Option<&str>,
    config_path: Option<&str>,
) -> String {
    let mut metrics = vec![format!("Focus: {}", focus)];

    match selected_document {
        Some(name) => metrics.push(format!("Document: {}", name)),
        None => metrics.push("No document selected".to_string()),
    }

    if let Some(id) = analysis_id {
        metrics.push(format!("Analysis: {}", id));
    }

    if let Some(elapsed) = elapsed {
        metrics.push(format!("Elapsed: {}", elapsed));
    }

    if let Some(path) = config_path {
        metrics.push(format!("Config: {}", path));
    }

    metrics.join(" | ")
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, status_line: &str) {
    // Color the labels (before colons)
    let mut spans = vec![];
    for (idx, part) in status_line.split(" | ").enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        if let Some(colon_pos) = part.find(':') {
            let label = &part[..=colon_pos];
            let value = &part[colon_pos + 1..];
            spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(value));
        } else {
            spans.push(Span::raw(part));
        }
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}
