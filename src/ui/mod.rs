// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (panels, splits, areas)
// - render: Main orchestration function that coordinates all rendering
// - system_bar: Renders top bar (backend URL, connection state, job status)
// - document_list: Renders the left document panel
// - analysis_panel: Renders the configuration form and job status line
// - results: Renders topic weights and SDG mapping
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar
// - toast: Renders toast notifications (brief pop-up messages)

pub mod analysis_panel;
pub mod document_list;
pub mod layout;
pub mod legend;
pub mod render;
pub mod results;
pub mod status_bar;
pub mod system_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
