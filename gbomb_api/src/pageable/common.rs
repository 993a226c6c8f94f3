//! Shared pagination infrastructure: the [`Pageable`] trait and the [`ResponsePage`] header.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{transport::truncate_body, Error};

/// Trait implemented by every paginated resource. The [`Invoker`](crate::Invoker)
/// only ever talks to resources through it.
pub trait Pageable {
    /// Path below the endpoint, e.g. `api/videos`.
    fn path(&self) -> String;

    /// Resource-specific query parameters, appended after the standard ones.
    fn query_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Returns a reference to the pagination header.
    fn page(&self) -> &ResponsePage;

    /// Returns a mutable reference to the pagination header.
    fn page_mut(&mut self) -> &mut ResponsePage;

    /// Decodes a response body and replaces the header and payload with it.
    ///
    /// On error the resource is left exactly as it was.
    fn parse(&mut self, body: &[u8]) -> Result<(), Error>;

    /// Offset sent with the next request.
    fn current_offset(&self) -> i64 {
        self.page().offset
    }

    /// True once the offset has reached the reported total.
    fn is_complete(&self) -> bool {
        self.page().is_complete()
    }

    /// Moves the offset one page forward. See [`ResponsePage::advance`].
    fn advance_offset(&mut self) -> Result<i64, Error> {
        self.page_mut().advance()
    }

    /// Moves the offset backward. See [`ResponsePage::retreat`].
    fn retreat_offset(&mut self) -> Result<i64, Error> {
        self.page_mut().retreat()
    }
}

/// Pagination header present in every JSON response.
///
/// `offset` is where the most recently requested page starts, `limit` the
/// page size and `max_results` the total the API reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsePage {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub error: String,
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "number_of_page_results")]
    pub page_results: i64,
    #[serde(rename = "number_of_total_results")]
    pub max_results: i64,
    pub status_code: i64,
}

impl ResponsePage {
    /// True once `offset >= max_results`.
    pub fn is_complete(&self) -> bool {
        self.offset >= self.max_results
    }

    /// Predicts where the next page starts and moves the offset there.
    ///
    /// The step is `min(limit, max_results - offset)`, so the final step lands
    /// exactly on `max_results`. Fails without touching the offset when the
    /// page is already complete or the step would be zero.
    pub fn advance(&mut self) -> Result<i64, Error> {
        let step = self.limit.min(self.max_results - self.offset);
        if self.is_complete() || step <= 0 {
            return Err(self.exhausted());
        }
        self.offset += step;
        Ok(self.offset)
    }

    /// Moves the offset backward by `max_results`, clamping at zero.
    ///
    /// The backward step is the total, not the page size, so a retreat after
    /// an advance does not return to the previous page unless
    /// `limit == max_results`. Fails without touching the offset at offset 0.
    pub fn retreat(&mut self) -> Result<i64, Error> {
        if self.offset - 1 < 0 {
            return Err(self.exhausted());
        }
        self.offset = (self.offset - self.retreat_step()).max(0);
        Ok(self.offset)
    }

    /// Upstream status reported in the envelope.
    pub fn status(&self) -> ApiStatus {
        ApiStatus::from(self.status_code)
    }

    /// Size of one backward step. This is the reported total, not `limit`,
    /// which makes backward paging asymmetric with [`ResponsePage::advance`].
    fn retreat_step(&self) -> i64 {
        self.max_results
    }

    fn exhausted(&self) -> Error {
        Error::Exhausted {
            offset: self.offset,
            total: self.max_results,
        }
    }
}

/// Status codes the API reports inside the JSON envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    InvalidApiKey,
    NotFound,
    UrlFormatError,
    JsonpCallbackMissing,
    FilterError,
    SubscriberOnly,
    RateLimitExceeded,
    Other(i64),
}

impl From<i64> for ApiStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => ApiStatus::Ok,
            100 => ApiStatus::InvalidApiKey,
            101 => ApiStatus::NotFound,
            102 => ApiStatus::UrlFormatError,
            103 => ApiStatus::JsonpCallbackMissing,
            104 => ApiStatus::FilterError,
            105 => ApiStatus::SubscriberOnly,
            107 => ApiStatus::RateLimitExceeded,
            other => ApiStatus::Other(other),
        }
    }
}

/// Decodes a JSON body into a fresh value, logging a body snippet on failure.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        let snippet = truncate_body(&String::from_utf8_lossy(body));
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::from(e)
    })
}

/// Logs envelopes whose status is not OK. These are not errors: a missing
/// resource, for instance, simply decodes with an empty payload.
pub(crate) fn log_status(page: &ResponsePage) {
    match page.status() {
        ApiStatus::Ok => {}
        status => tracing::warn!("API returned {:?}: {}", status, page.error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(limit: i64, offset: i64, max_results: i64) -> ResponsePage {
        ResponsePage {
            limit,
            offset,
            max_results,
            ..ResponsePage::default()
        }
    }

    #[test]
    fn fresh_page_is_complete() {
        let mut p = ResponsePage::default();
        assert!(p.is_complete());
        assert!(p.advance().unwrap_err().is_exhausted());
        assert!(p.retreat().unwrap_err().is_exhausted());
    }

    #[test]
    fn advance_steps_by_limit_then_remainder() {
        let mut p = page(10, 0, 25);
        assert_eq!(p.advance().unwrap(), 10);
        assert_eq!(p.advance().unwrap(), 20);
        assert_eq!(p.advance().unwrap(), 25);
        assert!(p.is_complete());

        let err = p.advance().unwrap_err();
        assert!(matches!(err, Error::Exhausted { offset: 25, total: 25 }));
        assert_eq!(p.offset, 25);
    }

    #[test]
    fn advance_terminates_within_page_count() {
        for (limit, total) in [(1, 1), (10, 95), (100, 100), (7, 50), (3, 1000)] {
            let mut p = page(limit, 0, total);
            let mut steps = 0;
            while !p.is_complete() {
                p.advance().unwrap();
                steps += 1;
            }
            assert!(steps <= (total + limit - 1) / limit);
            assert!(p.offset >= total);
        }
    }

    #[test]
    fn zero_limit_cannot_advance() {
        let mut p = page(0, 0, 40);
        assert!(p.advance().unwrap_err().is_exhausted());
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn retreat_subtracts_total_not_limit() {
        let mut p = page(10, 0, 25);
        p.advance().unwrap();
        p.advance().unwrap();
        let previous = p.offset;
        assert_eq!(previous, 20);

        // 20 - 25 clamps to 0 instead of returning to 10.
        assert_eq!(p.retreat().unwrap(), (previous - 25).max(0));
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn retreat_lands_on_page_when_limit_equals_total() {
        let mut p = page(100, 300, 100);
        assert_eq!(p.retreat().unwrap(), 200);
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiStatus::from(1), ApiStatus::Ok);
        assert_eq!(ApiStatus::from(101), ApiStatus::NotFound);
        assert_eq!(ApiStatus::from(42), ApiStatus::Other(42));
    }

    #[test]
    fn header_field_names() {
        let json = r#"{"error":"OK","limit":10,"offset":0,"number_of_page_results":10,
            "number_of_total_results":27,"status_code":1,"results":[]}"#;
        let p: ResponsePage = serde_json::from_str(json).unwrap();
        assert_eq!(p, ResponsePage {
            error: "OK".to_string(),
            limit: 10,
            offset: 0,
            page_results: 10,
            max_results: 27,
            status_code: 1,
        });
        assert_eq!(p.status(), ApiStatus::Ok);
    }
}
