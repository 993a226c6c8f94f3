mod common;
pub use self::common::{ApiStatus, Pageable, ResponsePage};

mod videos;
pub use self::videos::{VideosPage, VIDEOS_PAGE_LIMIT};

mod game;
pub use self::game::GameLookup;

mod search;
pub use self::search::GameSearchPage;

#[cfg(test)]
mod tests;
