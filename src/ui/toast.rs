use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use sdgdash::logic::ui::ToastKind;
use sdgdash::model::ui::Toast;
use unicode_width::UnicodeWidthStr;

const MAX_TOAST_WIDTH: u16 = 80;

fn toast_style(kind: ToastKind) -> (&'static str, Color) {
    match kind {
        ToastKind::Success => ("✓ ", Color::Green),
        ToastKind::Info => ("ℹ ", Color::Cyan),
        ToastKind::Error => ("✗ ", Color::Red),
    }
}

/// Centered box below the system bar, sized to the message
fn toast_area(area: Rect, message: &str) -> Rect {
    let width = ((message.width() + 6) as u16)
        .min(MAX_TOAST_WIDTH)
        .min(area.width);
    // Long messages wrap onto a second line
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let lines = if message.width() + 2 > inner_width { 2 } else { 1 };
    let height = (lines + 2).min(area.height.saturating_sub(3));

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + 3,
        width,
        height,
    }
}

pub fn render_toast(f: &mut Frame, area: Rect, toast: &Toast) {
    let toast_area = toast_area(area, &toast.message);
    f.render_widget(Clear, toast_area);

    let (icon, color) = toast_style(toast.kind);
    let line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(toast.message.as_str()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    f.render_widget(
        Paragraph::new(line)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        toast_area,
    );
}
