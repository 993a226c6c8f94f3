use serde::{Deserialize, Serialize};

use super::{null_default, CompleteTag, Date, GameRatingTag, Image, ImageTag, PlatformTag};

/// A game from the `game` and `search` resources.
///
/// List fields the API leaves out or sends as `null` decode as empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    pub aliases: Option<String>,
    pub api_detail_url: String,
    pub site_detail_url: String,
    pub guid: String,
    pub id: i64,
    pub date_added: Date,
    pub date_last_updated: Date,
    pub deck: Option<String>,
    pub description: Option<String>,
    pub expected_release_day: Option<i64>,
    pub expected_release_month: Option<i64>,
    pub expected_release_quarter: Option<i64>,
    pub expected_release_year: Option<i64>,
    pub image: Option<Image>,
    #[serde(deserialize_with = "null_default")]
    pub image_tags: Vec<ImageTag>,
    #[serde(deserialize_with = "null_default")]
    pub images: Vec<Image>,
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub number_of_user_reviews: i64,
    #[serde(deserialize_with = "null_default")]
    pub original_game_rating: Vec<GameRatingTag>,
    pub original_release_date: Date,
    #[serde(deserialize_with = "null_default")]
    pub platforms: Vec<PlatformTag>,
    #[serde(deserialize_with = "null_default")]
    pub videos: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub characters: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub concepts: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub developers: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub first_appearance_characters: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub first_appearance_concepts: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub first_appearance_locations: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub first_appearance_people: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub franchises: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub genres: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub killed_characters: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub locations: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub objects: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub people: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub publishers: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub releases: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub dlcs: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub reviews: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub similar_games: Vec<CompleteTag>,
    #[serde(deserialize_with = "null_default")]
    pub themes: Vec<CompleteTag>,
}

impl Game {
    /// Alternative titles, one per line in the API's `aliases` field.
    pub fn alias_list(&self) -> Vec<&str> {
        self.aliases
            .as_deref()
            .map(|a| a.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Abbreviations of the platforms the game was released on.
    pub fn platform_abbreviations(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .filter_map(|p| p.abbreviation.as_deref())
            .collect()
    }
}
