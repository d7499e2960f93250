use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sdgdash::model::{ConnectionState, JobStatus};

/// Render connection status span based on connection state
fn render_connection_status(state: &ConnectionState) -> Span<'_> {
    match state {
        ConnectionState::Connected => Span::styled("🟢 Connected", Style::default().fg(Color::Green)),
        ConnectionState::Connecting => {
            Span::styled("🟡 Connecting...", Style::default().fg(Color::Yellow))
        }
        // Raw transport error text
        ConnectionState::Disconnected { message, .. } => {
            Span::styled(format!("🔴 {}", message), Style::default().fg(Color::Red))
        }
    }
}

fn job_status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Idle => Color::Gray,
        JobStatus::Submitting | JobStatus::Running => Color::Cyan,
        JobStatus::Completed => Color::Green,
        JobStatus::Failed => Color::Red,
    }
}

/// Render the system info bar at the top of the screen
pub fn render_system_bar(
    f: &mut Frame,
    area: Rect,
    connection_state: &ConnectionState,
    base_url: &str,
    document_count: usize,
    from_cache: bool,
    job_status: JobStatus,
) {
    let mut spans = vec![render_connection_status(connection_state), Span::raw(" | ")];

    spans.push(Span::styled("API:", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(format!(" {}", base_url)));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled("Documents:", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(format!(" {}", document_count)));
    if from_cache {
        spans.push(Span::styled(" (cached)", Style::default().fg(Color::DarkGray)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled("Job:", Style::default().fg(Color::Yellow)));
    spans.push(Span::styled(
        format!(" {}", job_status.as_str()),
        Style::default().fg(job_status_color(job_status)),
    ));

    let system_widget = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("SDG Analysis"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(system_widget, area);
}
