//! Reference records linking one resource to another.
//!
//! Every tag shape starts with the fields of [`Tag`] and adds a few of its
//! own; the shared prefix is flattened in rather than modelled as a hierarchy.

use serde::{Deserialize, Serialize};

use super::null_default;

/// Minimal reference: where to fetch the target and what it is called.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "null_default")]
    pub api_detail_url: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

/// Named image gallery with the number of images in it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageTag {
    #[serde(flatten)]
    pub tag: Tag,
    #[serde(default)]
    pub total: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameRatingTag {
    #[serde(flatten)]
    pub tag: Tag,
    #[serde(default)]
    pub id: i64,
}

/// Reference to another resource, with its id and web page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompleteTag {
    #[serde(flatten)]
    pub tag: Tag,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub site_detail_url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlatformTag {
    #[serde(flatten)]
    pub complete: CompleteTag,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl PlatformTag {
    pub fn name(&self) -> &str {
        &self.complete.tag.name
    }
}
