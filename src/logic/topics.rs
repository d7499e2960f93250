//! Topic and SDG result normalisation
//!
//! The backend hands back topics either as pre-weighted records or as raw
//! LDA strings such as `Topic 1: 0.050*"water" + 0.030*"energy"`. These pure
//! functions turn both into display-ready `TopicWeight` values and give every
//! topic and SDG a stable color.

use crate::model::job::{TopicWeight, TopicWord};

/// Words kept per topic after sorting by weight
pub const MAX_TOPIC_WORDS: usize = 5;

/// Words summed into the representative topic weight
const WEIGHT_WORDS: usize = 3;

/// Palette indexed by topic position
pub const TOPIC_COLORS: [&str; 25] = [
    "#6366f1", "#8b5cf6", "#a855f7", "#c084fc", "#d946ef", "#e879f9", "#f0abfc", "#f3e8ff",
    "#10b981", "#059669", "#047857", "#065f46", "#064e3b", "#f59e0b", "#d97706", "#b45309",
    "#92400e", "#78350f", "#ef4444", "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#3b82f6",
    "#2563eb",
];

/// Official UN colors for SDG 1 through SDG 17
pub const SDG_COLORS: [&str; 17] = [
    "#E5243B", "#DDA63A", "#4C9F38", "#C5192D", "#FF3A21", "#26BDE2", "#FCC30B", "#A21942",
    "#FD6925", "#DD1367", "#FD9D24", "#BF8B2E", "#3F7E44", "#0A97D9", "#56C02B", "#00689D",
    "#19486A",
];

pub fn topic_color(index: usize) -> &'static str {
    TOPIC_COLORS[index % TOPIC_COLORS.len()]
}

/// Parse one raw LDA topic string
///
/// # Examples
/// ```
/// use sdgdash::logic::topics::parse_lda_topic;
///
/// let topic = parse_lda_topic(r#"Topic 2: 0.050*"water" + 0.030*"energy""#, 0);
/// assert_eq!(topic.label, "Topic 2");
/// assert_eq!(topic.words[0].word, "water");
/// assert!((topic.weight - 8.0).abs() < 1e-9);
/// ```
pub fn parse_lda_topic(raw: &str, index: usize) -> TopicWeight {
    let (label, content) = match split_topic_label(raw) {
        Some((label, content)) => (label.to_string(), content),
        None => (format!("Topic {}", index + 1), raw),
    };

    let mut words: Vec<TopicWord> = content.split('+').filter_map(parse_term).collect();
    let total_weight: f64 = words.iter().map(|w| w.weight).sum();

    words.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    words.truncate(MAX_TOPIC_WORDS);

    let weight = if words.is_empty() {
        total_weight * 100.0
    } else {
        words.iter().take(WEIGHT_WORDS).map(|w| w.weight).sum::<f64>() * 100.0
    };

    TopicWeight {
        label,
        // Keep a visible bar for degenerate topics
        weight: weight.max(1.0),
        words,
        color: topic_color(index).to_string(),
    }
}

/// Split `Topic N:`, `Topic_N:` or `N:` off the front of a topic string
fn split_topic_label(raw: &str) -> Option<(&str, &str)> {
    let (head, rest) = raw.split_once(':')?;
    let number = head
        .strip_prefix("Topic ")
        .or_else(|| head.strip_prefix("Topic_"))
        .unwrap_or(head);

    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((head, rest.trim_start()))
}

/// Parse a single `0.050*"water"` term
fn parse_term(term: &str) -> Option<TopicWord> {
    let (number, word) = term.trim().split_once('*')?;
    let number = number.trim();
    if !number.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let weight: f64 = number.parse().ok()?;

    let word = word
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .split_whitespace()
        .next()?;
    if word.is_empty() {
        return None;
    }

    Some(TopicWord {
        word: word.to_string(),
        weight,
    })
}

/// Extract the goal number from codes like `13`, `SDG 13` or `SDG13: Climate`
pub fn sdg_number(code: &str) -> Option<u8> {
    let digits: String = code
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u8>() {
        Ok(n) if (1..=17).contains(&n) => Some(n),
        _ => None,
    }
}

/// Display form of an SDG code, `13` becomes `SDG 13`
pub fn normalize_sdg_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        format!("SDG {}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Color for an SDG entry: the official goal color, else the topic palette
pub fn sdg_color(code: &str, index: usize) -> String {
    match sdg_number(code) {
        Some(n) => SDG_COLORS[usize::from(n) - 1].to_string(),
        None => topic_color(index).to_string(),
    }
}

/// Parse `#rrggbb` into its components
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
