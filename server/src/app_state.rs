use std::sync::Arc;

use gallery_core::{
    controller::PageState, render::HtmlBuffer, AssetApi, GalleryController,
};

pub struct AppState {
    pub api: Arc<dyn AssetApi>,
}

pub type SharedState = Arc<AppState>;

/// Controller for a single request. It renders into its own buffer, so concurrent requests
/// never see each other's output.
pub type PageController = GalleryController<Arc<dyn AssetApi>, HtmlBuffer, PageState>;

impl AppState {
    pub fn controller(&self, category: Option<String>, search: String) -> PageController {
        GalleryController::new(
            self.api.clone(),
            HtmlBuffer::new(),
            PageState::new(category, search),
        )
    }
}
