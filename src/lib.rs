//! SDG Analysis Dashboard Library
//!
//! Exposes modules for testing

pub mod api;
pub mod cache;
pub mod config;
pub mod logic;
pub mod model;
pub mod services;

/// Dashboard field receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Documents,
    Topics,
    Iterations,
}

impl Focus {
    pub fn as_str(&self) -> &str {
        match self {
            Focus::Documents => "Documents",
            Focus::Topics => "Topics",
            Focus::Iterations => "Iterations",
        }
    }
}
