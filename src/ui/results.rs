use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sdgdash::logic::formatting::{format_score, render_bar, truncate_to_width};
use sdgdash::logic::topics::parse_hex_color;
use sdgdash::model::{AnalysisResult, ResultSource};

const BAR_WIDTH: usize = 16;

fn color_of(hex: &str) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}

/// Panel title naming where the result came from
pub fn results_title(source: Option<&ResultSource>, document_name: Option<&str>) -> String {
    let document = document_name.unwrap_or("?");
    match source {
        None => "Results".to_string(),
        Some(ResultSource::Job { analysis_id }) => {
            format!("Results: {} (analysis {})", document, analysis_id)
        }
        Some(ResultSource::Remote) => format!("Results: {} (latest stored)", document),
        Some(ResultSource::Cache { completed_at }) => format!(
            "Results: {} (history, {})",
            document,
            completed_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ),
    }
}

fn topic_lines(result: &AnalysisResult, width: usize) -> Vec<Line<'static>> {
    let max_weight = result
        .topic_distribution
        .iter()
        .map(|t| t.weight)
        .fold(0.0_f64, f64::max);

    let mut lines = Vec::new();
    for topic in &result.topic_distribution {
        let color = color_of(&topic.color);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", truncate_to_width(&topic.label, 10)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                render_bar(topic.weight, max_weight, BAR_WIDTH),
                Style::default().fg(color),
            ),
            Span::raw(format!(" {:>5.1}", topic.weight)),
        ]));

        if !topic.words.is_empty() {
            let words = topic
                .words
                .iter()
                .map(|w| w.word.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(Line::from(Span::styled(
                format!("  ↳ {}", truncate_to_width(&words, width.saturating_sub(4))),
                Style::default().fg(Color::Rgb(150, 150, 150)),
            )));
        }
    }
    lines
}

fn sdg_lines(result: &AnalysisResult, width: usize) -> Vec<Line<'static>> {
    let max_score = result
        .sdg_mapping
        .iter()
        .map(|s| s.score)
        .fold(0.0_f64, f64::max);

    let mut sdgs: Vec<_> = result.sdg_mapping.iter().collect();
    sdgs.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut lines = Vec::new();
    for sdg in sdgs {
        let color = color_of(&sdg.color);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<7}", sdg.code),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(render_bar(sdg.score, max_score, BAR_WIDTH), Style::default().fg(color)),
            Span::raw(format!(" {:>7}", format_score(sdg.score))),
        ]));
        if !sdg.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", truncate_to_width(&sdg.description, width.saturating_sub(2))),
                Style::default().fg(Color::Rgb(150, 150, 150)),
            )));
        }
    }
    lines
}

/// Render topic weights and SDG mapping side by side
pub fn render_results(
    f: &mut Frame,
    area: Rect,
    result: Option<&AnalysisResult>,
    title: &str,
    loading: bool,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    let Some(result) = result.filter(|r| !r.is_empty()) else {
        let hint = match (result.is_some(), loading) {
            (_, true) => "Loading latest analysis...",
            (true, false) => "The analysis finished without topics or SDG matches.",
            (false, false) => "No results yet. Press Enter to analyze or l to load the latest.",
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let topics = Paragraph::new(topic_lines(result, columns[0].width as usize)).block(
        Block::default()
            .title("Topic distribution")
            .borders(Borders::RIGHT),
    );
    let sdgs = Paragraph::new(sdg_lines(result, columns[1].width as usize))
        .block(Block::default().title(" SDG mapping"));

    f.render_widget(topics, columns[0]);
    f.render_widget(sdgs, columns[1]);
}
