//! Shared handler state.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::SqliteMappingRepository;
use crate::utils::code_generator::HashCodeGenerator;
use crate::utils::url_verifier::UrlVerifier;

/// Link service wired to the production store and generator.
pub type AppLinkService = LinkService<SqliteMappingRepository, HashCodeGenerator>;

/// State injected into every handler.
///
/// Built once at startup and cloned per request; there is no process-wide
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub verifier: Arc<dyn UrlVerifier>,
}

impl AppState {
    pub fn new(link_service: Arc<AppLinkService>, verifier: Arc<dyn UrlVerifier>) -> Self {
        Self {
            link_service,
            verifier,
        }
    }
}
