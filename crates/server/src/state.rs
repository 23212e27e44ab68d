use axum::http::HeaderMap;
use service::{ResourceService, Window};

/// Header naming the acting principal for audit stamps.
pub const PRINCIPAL_HEADER: &str = "x-principal";

#[derive(Clone)]
pub struct AppState {
    pub service: ResourceService,
    pub default_principal: String,
    pub default_page_size: usize,
}

impl AppState {
    /// Principal from `x-principal`, or the configured default.
    pub fn principal(&self, headers: &HeaderMap) -> String {
        headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_principal.clone())
    }

    pub fn window(&self, position: Option<usize>, size: Option<usize>) -> Window {
        Window::new(position.unwrap_or(0), size.unwrap_or(self.default_page_size))
    }
}
