use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sdgdash::Focus;

/// Key/label pairs valid for the current focus and job state
fn hotkeys(vim_mode: bool, focus: Focus, job_active: bool) -> Vec<(&'static str, &'static str)> {
    let mut keys = vec![(if vim_mode { "j/k" } else { "↑/↓" }, "Document"), ("Tab", "Focus")];

    if focus != Focus::Documents {
        keys.extend([("←/→", "Adjust"), ("0-9", "Type")]);
    }

    // While a job is submitting or running, r is the only way out
    if job_active {
        keys.push(("r", "Cancel"));
    } else {
        keys.extend([("Enter", "Analyze"), ("r", "Reset")]);
    }

    keys.extend([("l", "Latest"), ("R", "Refresh"), ("q", "Quit")]);
    keys
}

fn build_hotkey_spans(vim_mode: bool, focus: Focus, job_active: bool) -> Vec<Span<'static>> {
    let keys = hotkeys(vim_mode, focus, job_active);
    let last = keys.len().saturating_sub(1);

    keys.into_iter()
        .enumerate()
        .flat_map(|(i, (key, label))| {
            let separator = if i == last { "" } else { "  " };
            [
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::raw(format!(":{}{}", label, separator)),
            ]
        })
        .collect()
}

fn legend_paragraph(vim_mode: bool, focus: Focus, job_active: bool) -> Paragraph<'static> {
    Paragraph::new(Line::from(build_hotkey_spans(vim_mode, focus, job_active)))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, vim_mode: bool, focus: Focus, job_active: bool) {
    let legend = legend_paragraph(vim_mode, focus, job_active)
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"));
    f.render_widget(legend, area);
}

/// Rows needed to show every hotkey at this width, borders included
pub fn calculate_legend_height(
    terminal_width: u16,
    vim_mode: bool,
    focus: Focus,
    job_active: bool,
) -> u16 {
    // line_count() on the bare paragraph; the block's borders are added back below
    let rows = legend_paragraph(vim_mode, focus, job_active)
        .line_count(terminal_width.saturating_sub(2));
    (rows as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend_text(vim_mode: bool, focus: Focus, job_active: bool) -> String {
        build_hotkey_spans(vim_mode, focus, job_active)
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn test_legend_vim_navigation() {
        let text = legend_text(true, Focus::Documents, false);
        assert!(text.contains("j/k:Document"), "got: {}", text);

        let text = legend_text(false, Focus::Documents, false);
        assert!(text.contains("↑/↓:Document"), "got: {}", text);
    }

    #[test]
    fn test_legend_number_keys_only_on_form_fields() {
        let documents = legend_text(false, Focus::Documents, false);
        assert!(!documents.contains("Adjust"));

        let topics = legend_text(false, Focus::Topics, false);
        assert!(topics.contains("←/→:Adjust"));
    }

    #[test]
    fn test_legend_hides_analyze_while_job_active() {
        let text = legend_text(false, Focus::Documents, true);
        assert!(!text.contains("Analyze"), "got: {}", text);
        assert!(text.contains("r:Cancel"));
    }

    #[test]
    fn test_legend_height_grows_when_narrow() {
        let wide = calculate_legend_height(200, false, Focus::Topics, false);
        let narrow = calculate_legend_height(30, false, Focus::Topics, false);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }
}
