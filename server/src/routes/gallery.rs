use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use gallery_core::{controller::PageInputs, model::UploadForm};

use crate::app_state::SharedState;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[instrument(skip(app_state))]
pub async fn get_page(
    State(app_state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let controller = app_state.controller(query.category, query.search.unwrap_or_default());
    let (outcome, links) = controller.initial_load().await;
    debug!(?outcome);
    let upload_form = UploadForm {
        category: controller.active_category().as_str().to_owned(),
        ..Default::default()
    };
    Html(super::render_page(&controller, &links, &upload_form, &[]))
}

/// Only the asset region, for clients that redraw the list as the search text changes.
#[instrument(skip(app_state))]
pub async fn get_asset_list(
    State(app_state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let controller = app_state.controller(query.category, query.search.unwrap_or_default());
    let outcome = controller.refresh().await;
    debug!(?outcome, search = %controller.inputs().search_text());
    Html(controller.target().contents())
}
