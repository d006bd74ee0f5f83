use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use gallery_core::{
    controller::ActionOutcome,
    interaction::PresetAnswers,
    model::{AssetId, UploadForm},
};

use crate::app_state::SharedState;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub uploader: String,
    pub view_category: Option<String>,
    #[serde(default)]
    pub view_search: String,
}

#[instrument(skip_all)]
pub async fn post_upload(
    State(app_state): State<SharedState>,
    Form(fields): Form<UploadFields>,
) -> Html<String> {
    let controller = app_state.controller(fields.view_category, fields.view_search);
    let mut upload_form = UploadForm {
        is_open: true,
        name: fields.name,
        category: fields.category,
        link: fields.link,
        uploader: fields.uploader,
    };
    let ui = PresetAnswers::default();
    let outcome = controller.create(&ui, &mut upload_form).await;
    debug!(?outcome);
    if outcome != ActionOutcome::Completed {
        // view stays as it was, the list still has to be drawn for the page
        controller.refresh().await;
    }
    let links = super::nav_links(&controller);
    Html(super::render_page(
        &controller,
        &links,
        &upload_form,
        &ui.alerts(),
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteFields {
    /// Recorded uploader of the asset, as rendered into the card.
    #[serde(default)]
    pub uploader: String,
    /// What the user typed to confirm.
    pub confirm_name: Option<String>,
    pub confirmed: Option<String>,
    pub view_category: Option<String>,
    #[serde(default)]
    pub view_search: String,
}

#[instrument(skip(app_state, fields))]
pub async fn post_delete(
    State(app_state): State<SharedState>,
    Path(id): Path<String>,
    Form(fields): Form<DeleteFields>,
) -> Html<String> {
    let controller = app_state.controller(fields.view_category, fields.view_search);
    let ui = PresetAnswers::new(fields.confirm_name, fields.confirmed.is_some());
    let outcome = controller
        .delete(&ui, &AssetId::from(id), &fields.uploader)
        .await;
    debug!(?outcome);
    if outcome != ActionOutcome::Completed {
        controller.refresh().await;
    }
    let links = super::nav_links(&controller);
    let upload_form = UploadForm {
        category: controller.active_category().as_str().to_owned(),
        ..Default::default()
    };
    Html(super::render_page(
        &controller,
        &links,
        &upload_form,
        &ui.alerts(),
    ))
}
