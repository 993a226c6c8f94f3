use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{null_default, Date, Image};

/// A single video from the `videos` resource.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub api_detail_url: String,
    pub site_detail_url: String,
    pub guid: String,
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub associations: Vec<Association>,
    pub deck: Option<String>,
    pub embed_player: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub length_seconds: i64,
    pub name: String,
    pub premium: bool,
    pub publish_date: Date,
    pub user: Option<String>,
    pub hosts: Option<String>,
    pub crew: Option<String>,
    pub video_type: Option<String>,
    pub video_show: Option<VideoShow>,
    #[serde(deserialize_with = "null_default")]
    pub video_categories: Vec<VideoCategory>,
    pub saved_time: Option<String>,
    pub youtube_id: Option<String>,
    pub low_url: Option<String>,
    pub high_url: Option<String>,
    pub hd_url: Option<String>,
    pub url: Option<String>,
    pub image: Option<Image>,
}

impl Video {
    /// Running time of the video.
    pub fn length(&self) -> Duration {
        Duration::from_secs(self.length_seconds.max(0) as u64)
    }

    /// Whether the video is also published on YouTube.
    pub fn on_youtube(&self) -> bool {
        self.youtube_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// High quality URL, falling back to the low quality one.
    pub fn highest_url(&self) -> Option<&str> {
        non_empty(&self.high_url).or_else(|| non_empty(&self.low_url))
    }

    /// HD URL if the video has one, otherwise [`Video::highest_url`].
    pub fn best_quality_url(&self) -> Option<&str> {
        non_empty(&self.hd_url).or_else(|| self.highest_url())
    }
}

fn non_empty(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|u| !u.is_empty())
}

/// The show a video was published under.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoShow {
    pub api_detail_url: String,
    pub id: i64,
    pub title: String,
    pub position: Option<i64>,
    pub site_detail_url: String,
    pub image: Option<Image>,
    pub logo: Option<Image>,
}

/// A game, franchise or person a video is associated with.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Association {
    pub api_detail_url: String,
    pub site_detail_url: String,
    pub guid: String,
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoCategory {
    pub api_detail_url: String,
    pub site_detail_url: String,
    pub id: i64,
    pub name: String,
}
