use std::time::Duration;

use reqwest::{header, StatusCode};
use url::{form_urlencoded, Url};

use crate::error::{CheckinError, Error};
use crate::model::VenueSearch;
use crate::queue::SearchRequest;

/// Default base of the venue API.
pub const DEFAULT_BASE: &str = "https://api.foursquare.com/v2";
/// API version sent with every call.
pub const DEFAULT_VERSION: &str = "20131016";
/// Number of venues requested per search.
pub const DEFAULT_LIMIT: u32 = 50;
/// Timeout applied to every single HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how to reach the venue API.
#[derive(Debug, Clone)]
pub struct Endpoints {
    search: Url,
    checkin: Url,
    version: String,
    limit: u32,
    token: String,
}

impl Endpoints {
    /// Endpoints relative to the given API base, such as [DEFAULT_BASE].
    pub fn new(base: &str, token: impl Into<String>) -> Result<Self, Error> {
        let mut base = Url::parse(base)?;

        // Url::join would otherwise replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            search: base.join("venues/search")?,
            checkin: base.join("checkins/add")?,
            version: DEFAULT_VERSION.to_owned(),
            limit: DEFAULT_LIMIT,
            token: token.into(),
        })
    }

    /// Set the API version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the search page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// The location is taken as raw bytes, which need not be UTF-8, and is
    /// percent-encoded as is.
    fn search_url(&self, location: &[u8]) -> Url {
        let near = form_urlencoded::byte_serialize(location).collect::<String>();

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("v", &self.version)
            .append_pair("limit", &self.limit.to_string())
            .finish();

        let token = form_urlencoded::Serializer::new(String::new())
            .append_pair("oauth_token", &self.token)
            .finish();

        let mut url = self.search.clone();
        url.set_query(Some(&format!("{}&near={}&{}", query, near, token)));
        url
    }

    fn checkin_url(&self, venue_id: &str) -> Url {
        let mut url = self.checkin.clone();
        url.query_pairs_mut()
            .append_pair("v", &self.version)
            .append_pair("venueId", venue_id)
            .append_pair("oauth_token", &self.token);
        url
    }
}

/// HTTP client for the search and check-in endpoints.
///
/// A single connection pool is reused for every call.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl Client {
    /// Construct a new client where every call times out after `timeout`.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Request)?;

        Ok(Self { http, endpoints })
    }

    /// Prepare a search for the given free-text location.
    ///
    /// The location is sent byte for byte. Bytes which are not valid UTF-8
    /// are only replaced in [SearchRequest::location], which is used for logs.
    pub fn search_request(&self, location: impl AsRef<[u8]>) -> Result<SearchRequest, Error> {
        let location = location.as_ref();
        let url = self.endpoints.search_url(location);
        let request = self.http.get(url).build().map_err(Error::Request)?;

        Ok(SearchRequest {
            location: String::from_utf8_lossy(location).into_owned(),
            request,
        })
    }

    /// Perform a prepared search.
    ///
    /// Transport errors and non-success statuses are returned. A body which
    /// cannot be read or decoded results in a search without venues.
    pub async fn search(&self, request: SearchRequest) -> Result<VenueSearch, Error> {
        let SearchRequest { location, request } = request;

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(source) => return Err(Error::Search { location, source }),
        };

        let status = response.status();

        if !status.is_success() {
            return Err(Error::SearchStatus { location, status });
        }

        let body = response.bytes().await.unwrap_or_default();
        Ok(VenueSearch::decode(&body))
    }

    /// Check in to the venue with the given id.
    ///
    /// Only `200 OK` counts as a successful check-in.
    pub async fn checkin(&self, venue_id: &str) -> Result<(), CheckinError> {
        let url = self.endpoints.checkin_url(venue_id);

        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(CheckinError::Transport)?;

        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckinError::Status { status, body });
        }

        Ok(())
    }
}
