use std::sync::RwLock;

use reqwest::Url;
use tracing::{debug, info, instrument, warn};

use crate::{
    api::{ApiError, AssetApi},
    filter::filter_assets,
    interaction::{Interaction, LinkOpener},
    model::{Asset, AssetId, CategoryFilter, DeleteAsset, UploadForm},
    navigation::{self, NavLink},
    render::{
        html::{self, ViewQuery},
        RenderTarget,
    },
};

pub const DELETE_PROMPT: &str = "To confirm deletion, please enter your uploader name:";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this asset?";
pub const NOT_UPLOADER: &str = "You can only delete assets you have uploaded.";
pub const DELETED: &str = "Asset deleted successfully.";
pub const DELETE_REJECTED: &str = "Failed to delete asset";
pub const DELETE_FAILED: &str = "Error deleting asset. Try again.";
pub const FIELDS_REQUIRED: &str = "All fields are required.";
pub const UPLOADED: &str = "Asset uploaded successfully.";
pub const UPLOAD_REJECTED: &str = "Failed to upload asset";
pub const UPLOAD_FAILED: &str = "Error uploading asset. Try again.";

/// Live state of the page the controller reads on every render.
pub trait PageInputs: Send + Sync {
    /// Raw `category` query parameter of the current location.
    fn category_param(&self) -> Option<String>;
    fn search_text(&self) -> String;
}

#[derive(Debug, Default)]
pub struct PageState {
    category: RwLock<Option<String>>,
    search: RwLock<String>,
}

impl PageState {
    pub fn new(category: Option<String>, search: String) -> PageState {
        PageState {
            category: RwLock::new(category),
            search: RwLock::new(search),
        }
    }

    pub fn set_location(&self, location: &Url) {
        *self.category.write().expect("lock poisoned") = navigation::category_param(location);
    }

    pub fn set_search(&self, text: impl Into<String>) {
        *self.search.write().expect("lock poisoned") = text.into();
    }
}

impl PageInputs for PageState {
    fn category_param(&self) -> Option<String> {
        self.category.read().expect("lock poisoned").clone()
    }

    fn search_text(&self) -> String {
        self.search.read().expect("lock poisoned").clone()
    }
}

/// How a render cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(usize),
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// Stopped on the client, nothing was sent.
    Blocked,
    /// Backend answered with a non-success status.
    Rejected,
    /// Request did not get through.
    Failed,
}

pub struct GalleryController<A, R, P> {
    api: A,
    target: R,
    inputs: P,
}

impl<A: AssetApi, R: RenderTarget, P: PageInputs> GalleryController<A, R, P> {
    pub fn new(api: A, target: R, inputs: P) -> Self {
        GalleryController {
            api,
            target,
            inputs,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn inputs(&self) -> &P {
        &self.inputs
    }

    pub fn active_category(&self) -> CategoryFilter {
        CategoryFilter::from_param(self.inputs.category_param().as_deref())
    }

    #[instrument(skip(self, category), fields(%category))]
    pub async fn load_and_render(&self, category: CategoryFilter) -> RenderOutcome {
        self.target.replace(html::LOADING.to_owned());
        let assets = match self.api.list_assets().await {
            Ok(assets) => assets,
            Err(err) => {
                warn!(error = ?err, "loading assets failed");
                self.target.replace(html::LOAD_ERROR.to_owned());
                return RenderOutcome::Failed;
            }
        };
        let search = self.inputs.search_text();
        let shown = filter_assets(assets, category, &search);
        debug!(shown = shown.len(), search = %search, "rendering assets");
        let view = ViewQuery {
            category,
            search: &search,
        };
        self.target.replace(html::asset_list(&shown, &view));
        match shown.len() {
            0 => RenderOutcome::Empty,
            n => RenderOutcome::Rendered(n),
        }
    }

    /// Re-renders the view selected by the current location and search text.
    pub async fn refresh(&self) -> RenderOutcome {
        self.load_and_render(self.active_category()).await
    }

    /// First render of a page: also returns the category links with the current one marked.
    pub async fn initial_load(&self) -> (RenderOutcome, Vec<NavLink>) {
        let category = self.active_category();
        let outcome = self.load_and_render(category).await;
        let mut links = navigation::category_links();
        navigation::mark_active(&mut links, category);
        (outcome, links)
    }

    pub async fn find_asset(&self, id: &AssetId) -> Result<Option<Asset>, ApiError> {
        let assets = self.api.list_assets().await?;
        Ok(assets.into_iter().find(|asset| &asset.id == id))
    }

    pub async fn download(&self, opener: &impl LinkOpener, link: &str) -> eyre::Result<()> {
        info!(link, "opening download link");
        opener.open(link).await
    }

    /// The typed uploader name is only a guard against accidental deletes, the backend has to
    /// do the actual authorization.
    #[instrument(skip(self, ui, uploader))]
    pub async fn delete(
        &self,
        ui: &impl Interaction,
        id: &AssetId,
        uploader: &str,
    ) -> ActionOutcome {
        let typed = match ui.prompt(DELETE_PROMPT).await {
            Some(typed) if !typed.is_empty() && typed.trim() == uploader => typed.trim().to_owned(),
            _ => {
                ui.alert(NOT_UPLOADER);
                return ActionOutcome::Blocked;
            }
        };
        if !ui.confirm(DELETE_CONFIRM).await {
            debug!("deletion not confirmed");
            return ActionOutcome::Blocked;
        }
        let body = DeleteAsset { uploader: typed };
        match self.api.delete_asset(id, &body).await {
            Ok(()) => {
                ui.alert(DELETED);
                self.refresh().await;
                ActionOutcome::Completed
            }
            Err(err) => report_failure(ui, err, DELETE_REJECTED, DELETE_FAILED),
        }
    }

    /// Closes and clears `form` on success.
    #[instrument(skip_all)]
    pub async fn create(&self, ui: &impl Interaction, form: &mut UploadForm) -> ActionOutcome {
        let Some(request) = form.to_request().trimmed() else {
            ui.alert(FIELDS_REQUIRED);
            return ActionOutcome::Blocked;
        };
        match self.api.create_asset(&request).await {
            Ok(()) => {
                info!(name = %request.name, category = %request.category, "asset uploaded");
                ui.alert(UPLOADED);
                form.close();
                self.refresh().await;
                ActionOutcome::Completed
            }
            Err(err) => report_failure(ui, err, UPLOAD_REJECTED, UPLOAD_FAILED),
        }
    }
}

fn report_failure(
    ui: &impl Interaction,
    err: ApiError,
    rejected: &str,
    failed: &str,
) -> ActionOutcome {
    warn!(error = ?err, "request failed");
    match err {
        ApiError::Rejected { .. } => {
            ui.alert(err.backend_message().unwrap_or(rejected));
            ActionOutcome::Rejected
        }
        ApiError::Transport(_) => {
            ui.alert(failed);
            ActionOutcome::Failed
        }
    }
}
