use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use sdgdash::api::DocumentSummary;
use sdgdash::logic::formatting::truncate_to_width;

/// Render the document list panel
pub fn render_document_list(
    f: &mut Frame,
    area: Rect,
    documents: &[DocumentSummary],
    state: &mut ListState,
    is_focused: bool,
    loading: bool,
    running_document: Option<&str>,
) {
    let title = if loading { "Documents (loading...)" } else { "Documents" };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        });

    if documents.is_empty() {
        let hint = if loading {
            "Fetching documents..."
        } else {
            "No documents. Upload one to the backend, then press R."
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Leave room for borders, highlight symbol, and the running marker
    let name_width = (area.width as usize).saturating_sub(6);

    let items: Vec<ListItem> = documents
        .iter()
        .map(|doc| {
            let marker = if running_document == Some(doc.id.as_str()) {
                Span::styled("⟳ ", Style::default().fg(Color::Cyan))
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::raw(truncate_to_width(&doc.name, name_width)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}
