//! Client for the Giant Bomb API: rate-limited JSON resources with offset
//! pagination, plus the podcast RSS feeds.
//!
//! ```no_run
//! use gbomb_api::{Invoker, Pageable};
//!
//! # async fn example() -> Result<(), gbomb_api::Error> {
//! let invoker = Invoker::new("https://www.giantbomb.com", "my-api-key")?;
//! let mut search = invoker.search_games("Bangai-O").await?;
//! while !search.is_complete() {
//!     invoker.next(&mut search).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod pageable;
pub mod rate_limiter;
pub mod transport;
pub mod types;
pub use self::client::{Invoker, InvokerBuilder, DEFAULT_ENDPOINT};
pub use self::errors::{BoxError, DecodeError, Error};
pub use self::pageable::{
    ApiStatus, GameLookup, GameSearchPage, Pageable, ResponsePage, VideosPage, VIDEOS_PAGE_LIMIT,
};
pub use self::rate_limiter::RateLimiter;
pub use self::transport::{ByteStream, HttpResponse, ReqwestTransport, Transport};
