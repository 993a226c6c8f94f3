//! Podcast RSS feeds and the download links derived from them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{errors::DecodeError, Error};

/// Download URL for an episode, `{}` being the episode id taken from the GUID.
pub const DOWNLOAD_LINK_TEMPLATE: &str =
    "https://dts.podtrac.com/redirect.mp3/www.giantbomb.com/podcasts/download/{}/audio.mp3";

/// A decoded podcast feed.
#[derive(Clone, Debug, Serialize)]
pub struct Channel {
    pub title: String,
    /// Entries in feed order (newest first for the upstream feeds).
    pub entries: Vec<FeedEntry>,
}

/// One episode of a podcast feed.
#[derive(Clone, Debug, Serialize)]
pub struct FeedEntry {
    pub title: String,
    /// `pubDate` exactly as it appears in the feed.
    pub pub_date: String,
    pub guid: String,
    link: String,
}

impl FeedEntry {
    /// Builds an entry, deriving its download link from `guid`.
    pub fn new(title: String, pub_date: String, guid: String) -> Result<Self, DecodeError> {
        let link = download_link(&guid)?;
        Ok(Self {
            title,
            pub_date,
            guid,
            link,
        })
    }

    /// Audio download URL. The feed does not carry it; it is built from the GUID.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Parses `pubDate` (`Tue, 09 Feb 2021 14:52:00 PST` style).
    ///
    /// Unlike [`Date`](super::Date), a malformed value is an error.
    pub fn publish_time(&self) -> Result<DateTime<FixedOffset>, Error> {
        Ok(DateTime::parse_from_rfc2822(self.pub_date.trim())?)
    }
}

impl Channel {
    /// Decodes an RSS document and derives every entry's download link.
    ///
    /// Entries whose GUID has no numeric second segment are skipped with a warning.
    pub fn from_xml(body: &[u8]) -> Result<Self, Error> {
        let rss: Rss = quick_xml::de::from_reader(body).map_err(|e| {
            tracing::error!("Failed to parse feed: {}", e);
            e
        })?;
        let entries = rss
            .channel
            .items
            .into_iter()
            .filter_map(|item| {
                match FeedEntry::new(item.title, item.pub_date, item.guid.value) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::warn!("Skipping feed entry: {}", e);
                        None
                    }
                }
            })
            .collect();
        Ok(Self {
            title: rss.channel.title,
            entries,
        })
    }
}

/// Fills [`DOWNLOAD_LINK_TEMPLATE`] with the second `-`-separated segment of `guid`.
pub fn download_link(guid: &str) -> Result<String, DecodeError> {
    let id = guid
        .split('-')
        .nth(1)
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| DecodeError::Guid(guid.to_string()))?;
    Ok(DOWNLOAD_LINK_TEMPLATE.replace("{}", id))
}

#[derive(Deserialize)]
struct Rss {
    channel: RawChannel,
}

#[derive(Deserialize)]
struct RawChannel {
    #[serde(default)]
    title: String,
    #[serde(rename = "item", default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(default)]
    title: String,
    #[serde(rename = "pubDate", default)]
    pub_date: String,
    #[serde(default)]
    guid: Text,
}

/// Element text, ignoring attributes such as `isPermaLink`.
#[derive(Deserialize, Default)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}
