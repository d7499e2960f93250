//! UI Model
//!
//! Preferences, the current toast, and the quit flag.

use std::time::Instant;

use crate::logic::ui::{self, ToastKind};

/// A brief pop-up message
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

#[derive(Clone, Debug)]
pub struct UiModel {
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    pub toast: Option<Toast>,

    /// Config file the session was started with, if any
    pub config_path: Option<String>,

    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            toast: None,
            config_path: None,
            should_quit: false,
        }
    }

    fn show(&mut self, kind: ToastKind, message: String) {
        self.toast = Some(Toast {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Info, message.into());
    }

    pub fn show_error(&mut self, error: impl std::fmt::Display) {
        self.show(ToastKind::Error, error.to_string());
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.toast.as_ref().is_some_and(|toast| {
            ui::should_dismiss_toast(toast.shown_at.elapsed().as_millis(), toast.kind)
        })
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }
}
