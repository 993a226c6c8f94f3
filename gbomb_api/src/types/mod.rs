mod date;
pub use self::date::{Date, DATE_FORMAT, DATE_TIME_FORMAT};

mod image;
pub use self::image::Image;

mod tag;
pub use self::tag::{CompleteTag, GameRatingTag, ImageTag, PlatformTag, Tag};

mod video;
pub use self::video::{Association, Video, VideoCategory, VideoShow};

mod game;
pub use self::game::Game;

mod feed;
pub use self::feed::{Channel, FeedEntry, DOWNLOAD_LINK_TEMPLATE};

use serde::{Deserialize, Deserializer};

/// Decodes `null` as the field type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
