use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Game;
use crate::Error;

use super::common::{decode_json, log_status, Pageable, ResponsePage};

/// Response of the `game/<id>` resource.
///
/// `game` is `None` when the API has no game with that id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameLookup {
    #[serde(flatten)]
    pub page: ResponsePage,
    #[serde(rename = "results", default, deserialize_with = "object_or_none")]
    pub game: Option<Game>,
    #[serde(skip)]
    target: String,
}

impl GameLookup {
    /// A lookup for the game with the given id (`3030-56733` or `56733`).
    pub fn new(game_id: &str) -> Self {
        Self {
            target: game_id.to_string(),
            ..Self::default()
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Pageable for GameLookup {
    fn path(&self) -> String {
        format!("api/game/{}", self.target)
    }

    fn page(&self) -> &ResponsePage {
        &self.page
    }

    fn page_mut(&mut self) -> &mut ResponsePage {
        &mut self.page
    }

    fn parse(&mut self, body: &[u8]) -> Result<(), Error> {
        let fresh: GameLookup = decode_json(body)?;
        log_status(&fresh.page);
        self.page = fresh.page;
        self.game = fresh.game;
        Ok(())
    }
}

/// The API answers a missing game with `"results": []`; anything that is not
/// an object decodes as `None`.
fn object_or_none<'de, D>(deserializer: D) -> Result<Option<Game>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
