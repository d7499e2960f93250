use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sdgdash::logic::formatting::format_elapsed;
use sdgdash::model::job::{ITERATION_RANGE, TOPIC_RANGE};
use sdgdash::model::{AnalysisModel, JobState};
use sdgdash::Focus;

fn field_line(label: &str, value: u32, range: (u32, u32), focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" {:>4} ", value), value_style),
        Span::styled(
            format!("  ({}-{})", range.0, range.1),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// One-line summary of the tracked job
pub fn job_status_line(job: &JobState, elapsed: Option<u64>) -> Line<'static> {
    let elapsed = elapsed.map(format_elapsed).unwrap_or_default();

    match job {
        JobState::Idle => Line::from(Span::styled(
            "Ready. Select a document and press Enter.",
            Style::default().fg(Color::Gray),
        )),
        JobState::Submitting => Line::from(Span::styled(
            "⏳ Submitting analysis...",
            Style::default().fg(Color::Cyan),
        )),
        JobState::Running { id } => Line::from(vec![
            Span::styled("⟳ Running ", Style::default().fg(Color::Cyan)),
            Span::raw(id.clone()),
            Span::styled(format!("  {}", elapsed), Style::default().fg(Color::DarkGray)),
        ]),
        JobState::Completed { id, .. } => Line::from(vec![
            Span::styled("✓ Completed ", Style::default().fg(Color::Green)),
            Span::raw(id.clone()),
            Span::styled(format!("  in {}", elapsed), Style::default().fg(Color::DarkGray)),
        ]),
        JobState::Failed { error, .. } => Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.to_string(), Style::default().fg(Color::Red)),
        ]),
    }
}

/// Render the configuration form and job status
pub fn render_analysis_panel(f: &mut Frame, area: Rect, analysis: &AnalysisModel) {
    let is_focused = analysis.focus != Focus::Documents;

    let lines = vec![
        field_line(
            "Topics",
            analysis.num_topics,
            (*TOPIC_RANGE.start(), *TOPIC_RANGE.end()),
            analysis.focus == Focus::Topics,
        ),
        field_line(
            "Iterations",
            analysis.max_iterations,
            (*ITERATION_RANGE.start(), *ITERATION_RANGE.end()),
            analysis.focus == Focus::Iterations,
        ),
        Line::raw(""),
        job_status_line(&analysis.job, analysis.elapsed_secs()),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Analysis")
            .borders(Borders::ALL)
            .border_style(if is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            }),
    );

    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdgdash::logic::errors::AnalysisError;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_running_line_shows_id_and_elapsed() {
        let line = job_status_line(
            &JobState::Running {
                id: "job-42".to_string(),
            },
            Some(65),
        );
        assert_eq!(text(&line), "⟳ Running job-42  1m 5s");
    }

    #[test]
    fn test_failed_line_shows_error() {
        let line = job_status_line(
            &JobState::Failed {
                id: Some("job-42".to_string()),
                error: AnalysisError::JobFailure("bad input".to_string()),
            },
            Some(3),
        );
        assert_eq!(text(&line), "✗ Analysis failed: bad input");
    }
}
