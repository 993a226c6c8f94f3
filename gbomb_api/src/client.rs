//! HTTP client for the Giant Bomb API.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    pageable::{GameLookup, GameSearchPage, Pageable, ResponsePage, VideosPage},
    rate_limiter::{RateLimiter, DEFAULT_INTERVAL},
    transport::{ByteStream, HttpResponse, ReqwestTransport, Transport},
    types::{Channel, FeedEntry, Game},
    Error,
};

/// Production API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.giantbomb.com";

/// Feed name that lives under `feeds/podcast/` instead of `podcast-xml/<name>/`.
const LEGACY_FEED: &str = "bombcast";

/// Sends every request to the API through one shared rate limiter.
///
/// Paginated resources are driven through the [`Pageable`] trait with
/// [`Invoker::get`], [`Invoker::next`] and [`Invoker::previous`]. Each call
/// issues at most one request and spends exactly one rate limiter token on it,
/// whether or not the request succeeds.
pub struct Invoker {
    endpoint: String,
    api_key: String,
    limiter: RateLimiter,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
}

impl Invoker {
    /// Creates an invoker for `endpoint` with the production rate limit and
    /// the reqwest transport.
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).endpoint(endpoint).build()
    }

    /// Starts an [`InvokerBuilder`] for the given API key.
    pub fn builder(api_key: &str) -> InvokerBuilder {
        InvokerBuilder {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
            interval: DEFAULT_INTERVAL,
            transport: None,
            cancel: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The limiter gating this invoker's requests.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Token that aborts pending rate limiter waits when cancelled.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    fn resource_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}/{}", self.endpoint, path)).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::from(e)
        })
    }

    /// Builds the JSON request URL for the pageable's current offset.
    pub fn request_url<P: Pageable + ?Sized>(&self, pageable: &P) -> Result<Url, Error> {
        self.request_url_at(pageable, pageable.current_offset())
    }

    fn request_url_at<P: Pageable + ?Sized>(
        &self,
        pageable: &P,
        offset: i64,
    ) -> Result<Url, Error> {
        let mut url = self.resource_url(&pageable.path())?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("format", "json")
            .append_pair("offset", &offset.to_string());
        for (key, value) in pageable.query_params() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        Ok(url)
    }

    /// Adds only the API key: used for downloads and feeds.
    fn authenticated(&self, mut url: Url) -> Url {
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        url
    }

    /// Waits for a token, then performs the exchange.
    async fn send(&self, url: Url) -> Result<HttpResponse, Error> {
        self.wait_for_token(None).await?;
        self.transport.get(url).await
    }

    /// Takes a limiter token unless the invoker's token, or `cancel` when
    /// given, fires first.
    async fn wait_for_token(&self, cancel: Option<&CancellationToken>) -> Result<(), Error> {
        match cancel {
            None => self.limiter.acquire_or_cancel(&self.cancel).await,
            Some(cancel) => {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(Error::Cancelled),
                    result = self.limiter.acquire_or_cancel(cancel) => result,
                }
            }
        }
    }

    /// Requests the pageable's current page and returns the raw body.
    pub async fn perform<P: Pageable + ?Sized>(&self, pageable: &P) -> Result<Bytes, Error> {
        let url = self.request_url(pageable)?;
        tracing::debug!(
            "GET {} offset={}",
            pageable.path(),
            pageable.current_offset()
        );
        self.send(url).await?.success_bytes().await
    }

    /// Fetches the page at the pageable's current offset and parses it in place.
    pub async fn get<P: Pageable + ?Sized>(&self, pageable: &mut P) -> Result<(), Error> {
        let body = self.perform(pageable).await?;
        pageable.parse(&body)
    }

    /// Moves the pageable one page forward and fetches that page.
    ///
    /// Returns [`Error::Exhausted`] without any request when there is no next
    /// page. The pageable is only modified once the new page has been decoded,
    /// so a failed call, or one whose future is dropped, leaves it as it was.
    pub async fn next<P: Pageable + ?Sized>(&self, pageable: &mut P) -> Result<(), Error> {
        self.fetch_moved(pageable, ResponsePage::advance, None).await
    }

    /// [`Invoker::next`], additionally aborted by `cancel` while waiting for
    /// the rate limiter.
    pub async fn next_with<P: Pageable + ?Sized>(
        &self,
        pageable: &mut P,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.fetch_moved(pageable, ResponsePage::advance, Some(cancel)).await
    }

    /// Moves the pageable backward and fetches that page.
    ///
    /// Returns [`Error::Exhausted`] without any request at offset 0. The step
    /// size is described on [`ResponsePage::retreat`](crate::ResponsePage::retreat).
    /// Like [`Invoker::next`], the pageable is untouched unless the call succeeds.
    pub async fn previous<P: Pageable + ?Sized>(&self, pageable: &mut P) -> Result<(), Error> {
        self.fetch_moved(pageable, ResponsePage::retreat, None).await
    }

    /// [`Invoker::previous`], additionally aborted by `cancel` while waiting
    /// for the rate limiter.
    pub async fn previous_with<P: Pageable + ?Sized>(
        &self,
        pageable: &mut P,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.fetch_moved(pageable, ResponsePage::retreat, Some(cancel)).await
    }

    /// Predicts the target offset on a copy of the header and requests it.
    /// `pageable` is written only by the final `parse`.
    async fn fetch_moved<P: Pageable + ?Sized>(
        &self,
        pageable: &mut P,
        step: fn(&mut ResponsePage) -> Result<i64, Error>,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), Error> {
        let mut moved = pageable.page().clone();
        let offset = step(&mut moved)?;
        let url = self.request_url_at(pageable, offset)?;
        tracing::debug!("GET {} offset={}", pageable.path(), offset);

        self.wait_for_token(cancel).await?;
        let body = self.transport.get(url).await?.success_bytes().await?;
        pageable.parse(&body)
    }

    /// Fetches one page of videos starting at `offset`.
    pub async fn get_videos(&self, offset: i64) -> Result<VideosPage, Error> {
        let mut page = VideosPage::starting_at(offset);
        self.get(&mut page).await?;
        Ok(page)
    }

    /// Looks up a game by id. `Ok(None)` means the API has no such game.
    pub async fn get_game(&self, game_id: &str) -> Result<Option<Game>, Error> {
        let mut lookup = GameLookup::new(game_id);
        self.get(&mut lookup).await?;
        Ok(lookup.game)
    }

    /// Fetches the first page of games matching `query`.
    pub async fn search_games(&self, query: &str) -> Result<GameSearchPage, Error> {
        let mut page = GameSearchPage::new(query);
        self.get(&mut page).await?;
        Ok(page)
    }

    /// Streams an asset (video file, image) from `url` with the API key attached.
    ///
    /// The returned stream owns the connection; drop it to release it.
    pub async fn download_asset(&self, url: &str) -> Result<ByteStream, Error> {
        let url = Url::parse(url)?;
        tracing::debug!("Downloading {}", url);
        self.send(self.authenticated(url)).await?.success_stream().await
    }

    /// Streams the audio of a podcast feed entry.
    pub async fn download_feed_entry(&self, entry: &FeedEntry) -> Result<ByteStream, Error> {
        self.download_asset(entry.link()).await
    }

    /// URL of a podcast feed. `bombcast` is served from `feeds/podcast/`,
    /// every other feed from `podcast-xml/<feed>/`.
    pub fn feed_url(&self, feed: &str) -> Result<Url, Error> {
        let (middle, feed) = if feed == LEGACY_FEED {
            ("feeds", "podcast")
        } else {
            ("podcast-xml", feed)
        };
        let url = self.resource_url(&format!("{}/{}/", middle, feed))?;
        Ok(self.authenticated(url))
    }

    /// Fetches and decodes a podcast feed, deriving each entry's download link.
    pub async fn fetch_feed(&self, feed: &str) -> Result<Channel, Error> {
        let url = self.feed_url(feed)?;
        tracing::debug!("GET feed {}", feed);
        let body = self.send(url).await?.success_bytes().await?;
        Channel::from_xml(&body)
    }
}

/// Configures an [`Invoker`]. Obtained from [`Invoker::builder`].
pub struct InvokerBuilder {
    endpoint: String,
    api_key: String,
    interval: Duration,
    transport: Option<Arc<dyn Transport>>,
    cancel: Option<CancellationToken>,
}

impl InvokerBuilder {
    /// Base URL of the API. A trailing slash is ignored.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Minimum time between two requests. Defaults to 31 seconds.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// HTTP exchange to use instead of the default reqwest client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Token whose cancellation aborts rate limiter waits with [`Error::Cancelled`].
    pub fn cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn build(self) -> Result<Invoker, Error> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        Ok(Invoker {
            endpoint: self.endpoint,
            api_key: self.api_key,
            limiter: RateLimiter::new(self.interval),
            transport,
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
        })
    }
}
