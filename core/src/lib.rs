pub mod api;
pub mod config;
pub mod controller;
pub mod filter;
pub mod interaction;
pub mod model;
pub mod navigation;
pub mod render;
pub mod search;

pub use api::{ApiError, AssetApi, HttpAssetApi};
pub use controller::GalleryController;
pub use reqwest::Url;
