use crate::service::ArticleService;

pub struct AppState {
    pub service: ArticleService,
}

impl AppState {
    pub fn new(service: ArticleService) -> Self {
        Self { service }
    }
}
