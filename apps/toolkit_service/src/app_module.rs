use std::sync::Arc;

use toolkit_llm::CompletionService;

use crate::transform::transform_service::TransformService;

#[derive(Clone)]
pub struct AppService {
    pub transform_service: TransformService,
}

impl AppService {
    pub fn new(completion: Arc<dyn CompletionService + Send + Sync>) -> Self {
        let transform_service = TransformService::new(completion);

        Self { transform_service }
    }
}

/// Shared, read-only state handed to every request. The completion client is
/// created once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionService + Send + Sync>) -> Self {
        Self {
            service: AppService::new(completion),
        }
    }
}
