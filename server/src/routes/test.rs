use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use gallery_core::{
    controller::{DELETED, FIELDS_REQUIRED, NOT_UPLOADER, UPLOADED},
    model::{Asset, AssetId, CreateAsset, DeleteAsset},
    ApiError, AssetApi,
};

use crate::app_state::AppState;

#[derive(Default)]
struct MemoryApi {
    assets: Mutex<Vec<Asset>>,
    deleted: Mutex<Vec<(AssetId, DeleteAsset)>>,
    reject_delete: Option<String>,
    down: bool,
}

#[async_trait]
impl AssetApi for MemoryApi {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        if self.down {
            return Err(ApiError::Transport(eyre::eyre!("connection refused")));
        }
        Ok(self.assets.lock().unwrap().clone())
    }

    async fn create_asset(&self, asset: &CreateAsset) -> Result<(), ApiError> {
        let mut assets = self.assets.lock().unwrap();
        let id = AssetId::from(assets.len() as i64 + 1);
        assets.push(Asset {
            id,
            name: asset.name.clone(),
            category: asset.category.clone(),
            link: asset.link.clone(),
            uploader: asset.uploader.clone(),
        });
        Ok(())
    }

    async fn delete_asset(&self, id: &AssetId, body: &DeleteAsset) -> Result<(), ApiError> {
        self.deleted.lock().unwrap().push((id.clone(), body.clone()));
        if let Some(message) = &self.reject_delete {
            return Err(ApiError::Rejected {
                status: 404,
                message: Some(message.clone()),
            });
        }
        self.assets.lock().unwrap().retain(|a| &a.id != id);
        Ok(())
    }
}

fn logo() -> Asset {
    Asset {
        id: AssetId::from(1),
        name: "Logo".into(),
        category: "sfx".into(),
        link: "https://x.test/logo.zip".into(),
        uploader: "ann".into(),
    }
}

fn app(api: Arc<MemoryApi>) -> Router {
    super::router().with_state(Arc::new(AppState { api }))
}

async fn body_string(app: Router, req: Request<Body>) -> String {
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap()
}

fn memory_api(assets: Vec<Asset>) -> Arc<MemoryApi> {
    Arc::new(MemoryApi {
        assets: Mutex::new(assets),
        ..Default::default()
    })
}

#[tokio::test]
async fn page_filters_and_marks_category() {
    let api = memory_api(vec![logo()]);
    let html = body_string(app(api.clone()), get("/?category=sfx&search=log")).await;
    assert!(html.contains(r#"data-id="1""#));
    assert!(html.contains(r#"class="category-btn active" href="/?category=sfx""#));

    let html = body_string(app(api), get("/?category=davinci")).await;
    assert!(html.contains("No assets found."));
    assert!(!html.contains("asset-card"));
}

#[tokio::test]
async fn unknown_category_falls_back_to_all() {
    let html = body_string(app(memory_api(vec![logo()])), get("/?category=%3Cb%3E")).await;
    assert!(html.contains(r#"data-id="1""#));
    assert!(html.contains(r#"class="category-btn active" href="/?category=all""#));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn backend_down_shows_error() {
    let api = Arc::new(MemoryApi {
        down: true,
        ..Default::default()
    });
    let html = body_string(app(api), get("/assets")).await;
    assert_eq!(html, gallery_core::render::html::LOAD_ERROR);
}

#[tokio::test]
async fn fragment_uses_search() {
    let api = memory_api(vec![logo()]);
    let html = body_string(app(api.clone()), get("/assets?search=LOG")).await;
    assert!(html.contains("asset-card"));
    assert!(!html.contains("<html"));
    let html = body_string(app(api), get("/assets?search=boom")).await;
    assert_eq!(html, gallery_core::render::html::EMPTY);
}

#[tokio::test]
async fn upload_then_form_is_closed_and_cleared() {
    let api = memory_api(vec![]);
    let html = body_string(
        app(api.clone()),
        post_form(
            "/upload",
            "name=Whoosh&category=sfx&link=https%3A%2F%2Fx.test%2Fw.wav&uploader=ann&view_category=sfx&view_search=",
        ),
    )
    .await;
    assert!(html.contains(UPLOADED));
    assert!(html.contains(r#"<details class="upload-modal">"#));
    assert!(html.contains(r#"<input name="name" placeholder="Asset name" value="">"#));
    assert!(html.contains("Whoosh"));
    assert_eq!(api.assets.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn upload_with_missing_field_keeps_form_open() {
    let api = memory_api(vec![]);
    let html = body_string(
        app(api.clone()),
        post_form("/upload", "name=Whoosh&category=sfx&link=+&uploader=ann"),
    )
    .await;
    assert!(html.contains(FIELDS_REQUIRED));
    assert!(html.contains(r#"<details class="upload-modal" open>"#));
    assert!(html.contains(r#"value="Whoosh""#));
    assert!(api.assets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_requires_matching_name() {
    let api = memory_api(vec![logo()]);
    let html = body_string(
        app(api.clone()),
        post_form("/assets/1/delete", "uploader=ann&confirm_name=bob&confirmed=true"),
    )
    .await;
    assert!(html.contains(NOT_UPLOADER));
    assert!(api.deleted.lock().unwrap().is_empty());
    assert!(html.contains(r#"data-id="1""#));
}

#[tokio::test]
async fn delete_needs_checkbox() {
    let api = memory_api(vec![logo()]);
    body_string(
        app(api.clone()),
        post_form("/assets/1/delete", "uploader=ann&confirm_name=ann"),
    )
    .await;
    assert!(api.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_and_reload_current_view() {
    let api = memory_api(vec![logo()]);
    let html = body_string(
        app(api.clone()),
        post_form(
            "/assets/1/delete",
            "uploader=ann&confirm_name=+ann+&confirmed=true&view_category=sfx&view_search=",
        ),
    )
    .await;
    assert!(html.contains(DELETED));
    assert!(html.contains("No assets found."));
    assert_eq!(
        *api.deleted.lock().unwrap(),
        vec![(
            AssetId::from(1),
            DeleteAsset {
                uploader: "ann".into()
            }
        )]
    );
}

#[tokio::test]
async fn delete_rejection_shows_backend_message() {
    let api = Arc::new(MemoryApi {
        assets: Mutex::new(vec![logo()]),
        reject_delete: Some("not found".into()),
        ..Default::default()
    });
    let html = body_string(
        app(api),
        post_form("/assets/1/delete", "uploader=ann&confirm_name=ann&confirmed=true"),
    )
    .await;
    assert!(html.contains("<li>not found</li>"));
}
