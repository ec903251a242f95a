use crate::config::Config;
use crate::render::RenderSettings;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Read-only: every generate request clones what it needs into its own render.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Header text and page geometry for every rendered directory.
    pub render_settings: RenderSettings,
}
