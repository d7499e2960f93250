//! UI state transition logic
//!
//! Pure functions for UI state cycling and transitions.

use crate::Focus;

/// What a toast is telling the user, which decides its color and lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    /// Milliseconds the toast stays up; errors linger so they can be read
    pub fn duration_ms(self) -> u128 {
        match self {
            ToastKind::Success => 1500,
            ToastKind::Info => 2500,
            ToastKind::Error => 4000,
        }
    }
}

/// Cycle keyboard focus: Documents → Topics → Iterations → Documents
///
/// # Examples
/// ```
/// use sdgdash::Focus;
/// use sdgdash::logic::ui::cycle_focus;
///
/// assert_eq!(cycle_focus(Focus::Documents), Focus::Topics);
/// assert_eq!(cycle_focus(Focus::Iterations), Focus::Documents);
/// ```
pub fn cycle_focus(current: Focus) -> Focus {
    match current {
        Focus::Documents => Focus::Topics,
        Focus::Topics => Focus::Iterations,
        Focus::Iterations => Focus::Documents,
    }
}

/// Whether a toast shown `elapsed_ms` ago should be taken down
pub fn should_dismiss_toast(elapsed_ms: u128, kind: ToastKind) -> bool {
    elapsed_ms >= kind.duration_ms()
}
