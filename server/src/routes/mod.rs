use axum::{
    routing::{get, post},
    Router,
};
use gallery_core::{
    controller::PageInputs,
    model::UploadForm,
    navigation::{self, NavLink},
    render::html::{self, PageView, ViewQuery},
};

use crate::app_state::{PageController, SharedState};

pub mod asset;
pub mod gallery;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(gallery::get_page))
        .route("/assets", get(gallery::get_asset_list))
        .route("/upload", post(asset::post_upload))
        .route("/assets/:id/delete", post(asset::post_delete))
}

fn nav_links(controller: &PageController) -> Vec<NavLink> {
    let mut links = navigation::category_links();
    navigation::mark_active(&mut links, controller.active_category());
    links
}

/// Full page around whatever the controller last rendered.
fn render_page(
    controller: &PageController,
    links: &[NavLink],
    upload_form: &UploadForm,
    notices: &[String],
) -> String {
    let search = controller.inputs().search_text();
    let assets = controller.target().contents();
    html::page(&PageView {
        links,
        view: ViewQuery {
            category: controller.active_category(),
            search: &search,
        },
        upload_form,
        notices,
        assets: &assets,
    })
}

#[cfg(test)]
mod test;
