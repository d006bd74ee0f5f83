use async_trait::async_trait;
use eyre::Context;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn, Instrument};

use super::{ApiError, AssetApi};
use crate::model::{Asset, AssetId, CreateAsset, DeleteAsset};

#[derive(Debug, Clone)]
pub struct HttpAssetApi {
    client: Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpAssetApi {
    /// `base` must end in a slash, see `config::parse_api_base`.
    pub fn new(base: Url) -> HttpAssetApi {
        HttpAssetApi {
            client: Client::new(),
            base,
        }
    }

    fn assets_url(&self) -> Result<Url, ApiError> {
        Ok(self.base.join("assets").wrap_err("error building assets url")?)
    }

    fn asset_url(&self, id: &AssetId) -> Result<Url, ApiError> {
        let mut url = self.assets_url()?;
        url.path_segments_mut()
            .map_err(|_| eyre::eyre!("backend url {} cannot be a base", self.base))?
            .push(&id.0);
        Ok(url)
    }
}

/// Non-2xx responses become `ApiError::Rejected`, reading `message` from the body if it parses.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    warn!(%status, ?message, "backend rejected request");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AssetApi for HttpAssetApi {
    #[instrument(skip(self), level = "debug")]
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        let response = self
            .client
            .get(self.assets_url()?)
            .send()
            .in_current_span()
            .await
            .wrap_err("error requesting asset list")?;
        let assets: Vec<Asset> = check_status(response)
            .await?
            .json()
            .await
            .wrap_err("error decoding asset list")?;
        debug!(count = assets.len(), "fetched assets");
        Ok(assets)
    }

    #[instrument(skip(self), level = "debug")]
    async fn create_asset(&self, asset: &CreateAsset) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.assets_url()?)
            .json(asset)
            .send()
            .in_current_span()
            .await
            .wrap_err("error sending create request")?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self, body), level = "debug")]
    async fn delete_asset(&self, id: &AssetId, body: &DeleteAsset) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.asset_url(id)?)
            .json(body)
            .send()
            .in_current_span()
            .await
            .wrap_err("error sending delete request")?;
        check_status(response).await?;
        Ok(())
    }
}
