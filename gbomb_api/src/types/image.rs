use serde::{Deserialize, Serialize};

/// Set of renditions of one image, smallest to largest.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub icon_url: Option<String>,
    pub medium_url: Option<String>,
    pub screen_url: Option<String>,
    pub screen_large_url: Option<String>,
    pub small_url: Option<String>,
    pub super_url: Option<String>,
    pub thumb_url: Option<String>,
    pub tiny_url: Option<String>,
    pub original_url: Option<String>,
    /// Comma-separated gallery names this image belongs to.
    pub image_tags: Option<String>,
}
