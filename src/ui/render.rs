use crate::App;
use ratatui::Frame;
use sdgdash::logic::formatting::format_elapsed;
use sdgdash::model::JobState;
use sdgdash::Focus;

use super::{analysis_panel, document_list, layout, legend, results, status_bar, system_bar, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;

    let job_active = model.analysis.job.is_active();
    let legend_height = legend::calculate_legend_height(
        size.width,
        model.ui.vim_mode,
        model.analysis.focus,
        job_active,
    );
    let layout_info = layout::calculate_layout(size, legend_height);

    system_bar::render_system_bar(
        f,
        layout_info.system_area,
        &model.documents.connection_state,
        &app.base_url,
        model.documents.documents.len(),
        model.documents.from_cache,
        model.analysis.job.status(),
    );

    // Create temporary ListState for rendering
    let mut list_state = ratatui::widgets::ListState::default();
    list_state.select(model.documents.selected);
    let running_document = if job_active {
        model
            .analysis
            .submitted
            .as_ref()
            .map(|r| r.document_id.as_str())
    } else {
        None
    };
    document_list::render_document_list(
        f,
        layout_info.documents_area,
        &model.documents.documents,
        &mut list_state,
        model.analysis.focus == Focus::Documents,
        model.documents.loading,
        running_document,
    );

    analysis_panel::render_analysis_panel(f, layout_info.form_area, &model.analysis);

    // A finished job wins; otherwise show whatever was loaded for the selected document
    let selected_id = model.selected_document().map(|d| d.id.as_str());
    let displayed = model.analysis.displayed.as_ref().filter(|shown| {
        matches!(model.analysis.job, JobState::Completed { .. })
            || Some(shown.document_id.as_str()) == selected_id
    });
    let title = results::results_title(
        displayed.map(|shown| &shown.source),
        displayed.and_then(|shown| model.documents.name_of(&shown.document_id)),
    );
    let loading = model.analysis.loading_latest.is_some()
        && model.analysis.loading_latest.as_deref() == selected_id;
    results::render_results(
        f,
        layout_info.results_area,
        displayed.map(|shown| &shown.result),
        &title,
        loading,
    );

    legend::render_legend(
        f,
        layout_info.legend_area,
        model.ui.vim_mode,
        model.analysis.focus,
        job_active,
    );

    let elapsed = model.analysis.elapsed_secs().map(format_elapsed);
    let status_line = status_bar::build_status_line(
        model.analysis.focus.as_str(),
        model.selected_document().map(|d| d.name.as_str()),
        model.analysis.job.id(),
        elapsed.as_deref(),
        model.ui.config_path.as_deref(),
    );
    status_bar::render_status_bar(f, layout_info.status_area, &status_line);

    if let Some(shown) = &model.ui.toast {
        toast::render_toast(f, size, shown);
    }
}
