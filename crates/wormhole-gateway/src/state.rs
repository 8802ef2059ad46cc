use std::sync::Arc;

use crate::service::FrontendService;

#[derive(Clone)]
pub struct AppState {
    frontend: Arc<FrontendService>,
}

impl AppState {
    pub fn new(frontend: FrontendService) -> Self {
        Self {
            frontend: Arc::new(frontend),
        }
    }

    pub fn frontend(&self) -> &FrontendService {
        &self.frontend
    }
}
