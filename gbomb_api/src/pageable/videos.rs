use serde::{Deserialize, Serialize};

use crate::types::{null_default, Video};
use crate::Error;

use super::common::{decode_json, log_status, Pageable, ResponsePage};

/// Page size the API uses for the `videos` resource.
pub const VIDEOS_PAGE_LIMIT: i64 = 100;

/// One page of the `videos` resource.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VideosPage {
    #[serde(flatten)]
    pub page: ResponsePage,
    #[serde(rename = "results", default, deserialize_with = "null_default")]
    pub videos: Vec<Video>,
}

impl VideosPage {
    /// An empty page whose first request will be made at `offset`.
    ///
    /// Limit and total are seeded with the API's page size until the first
    /// response replaces them.
    pub fn starting_at(offset: i64) -> Self {
        Self {
            page: ResponsePage {
                offset,
                limit: VIDEOS_PAGE_LIMIT,
                max_results: VIDEOS_PAGE_LIMIT,
                ..ResponsePage::default()
            },
            videos: Vec::new(),
        }
    }
}

impl Pageable for VideosPage {
    fn path(&self) -> String {
        "api/videos".to_string()
    }

    fn page(&self) -> &ResponsePage {
        &self.page
    }

    fn page_mut(&mut self) -> &mut ResponsePage {
        &mut self.page
    }

    fn parse(&mut self, body: &[u8]) -> Result<(), Error> {
        let fresh: VideosPage = decode_json(body)?;
        log_status(&fresh.page);
        self.page = fresh.page;
        self.videos = fresh.videos;
        Ok(())
    }
}
