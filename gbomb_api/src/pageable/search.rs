use serde::{Deserialize, Serialize};

use crate::types::{null_default, Game};
use crate::Error;

use super::common::{decode_json, log_status, Pageable, ResponsePage};

/// One page of a game search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameSearchPage {
    #[serde(flatten)]
    pub page: ResponsePage,
    #[serde(rename = "results", default, deserialize_with = "null_default")]
    pub games: Vec<Game>,
    #[serde(skip)]
    query: String,
}

impl GameSearchPage {
    /// An empty search page for games matching `query`.
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Pageable for GameSearchPage {
    fn path(&self) -> String {
        "api/search".to_string()
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("resources", "game".to_string()),
        ]
    }

    fn page(&self) -> &ResponsePage {
        &self.page
    }

    fn page_mut(&mut self) -> &mut ResponsePage {
        &mut self.page
    }

    fn parse(&mut self, body: &[u8]) -> Result<(), Error> {
        let fresh: GameSearchPage = decode_json(body)?;
        log_status(&fresh.page);
        self.page = fresh.page;
        self.games = fresh.games;
        Ok(())
    }
}
