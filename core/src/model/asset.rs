use serde::{Deserialize, Serialize};

use super::AssetId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    /// Not validated: whatever the backend stored is kept.
    pub category: String,
    pub link: String,
    pub uploader: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    pub category: String,
    pub link: String,
    pub uploader: String,
}

impl CreateAsset {
    /// Trims every field, returns None if any of them ends up empty.
    pub fn trimmed(&self) -> Option<CreateAsset> {
        let name = self.name.trim();
        let category = self.category.trim();
        let link = self.link.trim();
        let uploader = self.uploader.trim();
        if [name, category, link, uploader].iter().any(|f| f.is_empty()) {
            return None;
        }
        Some(CreateAsset {
            name: name.to_owned(),
            category: category.to_owned(),
            link: link.to_owned(),
            uploader: uploader.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAsset {
    pub uploader: String,
}

/// Entry form for new assets. Closing it clears everything except the selected category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadForm {
    pub is_open: bool,
    pub name: String,
    pub category: String,
    pub link: String,
    pub uploader: String,
}

impl UploadForm {
    pub fn close(&mut self) {
        self.is_open = false;
        self.name.clear();
        self.link.clear();
        self.uploader.clear();
    }

    pub fn to_request(&self) -> CreateAsset {
        CreateAsset {
            name: self.name.clone(),
            category: self.category.clone(),
            link: self.link.clone(),
            uploader: self.uploader.clone(),
        }
    }
}
