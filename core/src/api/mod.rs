use async_trait::async_trait;

use crate::model::{Asset, AssetId, CreateAsset, DeleteAsset};

mod http;

pub use http::HttpAssetApi;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response: connection errors, undecodable bodies.
    #[error("request to backend failed")]
    Transport(#[from] eyre::Report),
    #[error("backend rejected request with status {status}")]
    Rejected {
        status: u16,
        /// `message` field of the JSON error body, if there was one.
        message: Option<String>,
    },
}

impl ApiError {
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Remote collection of assets. The backend owns persistence and ids.
#[async_trait]
pub trait AssetApi: Send + Sync {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError>;
    async fn create_asset(&self, asset: &CreateAsset) -> Result<(), ApiError>;
    async fn delete_asset(&self, id: &AssetId, body: &DeleteAsset) -> Result<(), ApiError>;
}

#[async_trait]
impl<A: AssetApi + ?Sized> AssetApi for std::sync::Arc<A> {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        (**self).list_assets().await
    }

    async fn create_asset(&self, asset: &CreateAsset) -> Result<(), ApiError> {
        (**self).create_asset(asset).await
    }

    async fn delete_asset(&self, id: &AssetId, body: &DeleteAsset) -> Result<(), ApiError> {
        (**self).delete_asset(id, body).await
    }
}
