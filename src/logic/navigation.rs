//! Navigation selection logic
//!
//! Pure functions for moving a list selection with wrapping behavior.

/// Advance the selection, wrapping to the first item after the last
///
/// # Examples
/// ```
/// use sdgdash::logic::navigation::next_selection;
///
/// assert_eq!(next_selection(None, 0), None);
/// assert_eq!(next_selection(None, 3), Some(0));
/// assert_eq!(next_selection(Some(1), 3), Some(2));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i >= list_len - 1 => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

/// Move the selection back, wrapping to the last item before the first
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1,
        Some(i) => i - 1,
    })
}

/// Keep a selection valid after the list was replaced
///
/// Prefers the item with the same id, then the same position clamped to the
/// new length.
pub fn reselect<T>(
    items: &[T],
    previous_id: Option<&str>,
    previous_index: Option<usize>,
    id_of: impl Fn(&T) -> &str,
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    if let Some(id) = previous_id {
        if let Some(idx) = items.iter().position(|item| id_of(item) == id) {
            return Some(idx);
        }
    }

    Some(previous_index.unwrap_or(0).min(items.len() - 1))
}
