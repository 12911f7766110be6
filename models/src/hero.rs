//! Character entity as returned by the search API.
//!
//! The pipeline treats these as opaque payload: they are decoded, cached and
//! handed to the view unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: HeroThumbnail,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub comics: HeroSubItems,
    #[serde(default)]
    pub events: HeroSubItems,
    #[serde(default)]
    pub series: HeroSubItems,
    #[serde(default)]
    pub stories: HeroSubItems,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeroThumbnail {
    pub path: String,
    pub extension: String,
}

impl HeroThumbnail {
    /// Full image URL (`{path}.{extension}`), or `None` when the API sent no path.
    pub fn url(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.path, self.extension))
    }
}

/// A related collection (comics, events, series or stories).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeroSubItems {
    pub available: u32,
    pub returned: u32,
    #[serde(rename = "collectionURI", default)]
    pub collection_uri: String,
    #[serde(default)]
    pub items: Vec<HeroSubItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSubItem {
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    pub name: String,
    /// Only stories carry a type ("cover", "interiorStory", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
