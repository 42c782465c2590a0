//! # HTTP User Source
//!
//! Fetches users from `GET {base}/users/{id}`.

use crate::domain::entities::UserRecord;
use crate::domain::value_objects::{SourceName, UserId};
use crate::infrastructure::sources::error::FetchResult;
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{SourceResult, UserSource};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument, warn};

/// User source backed by the user service's REST API.
#[derive(Debug, Clone)]
pub struct HttpUserSource {
    client: HttpClient,
    base_url: Url,
}

impl HttpUserSource {
    /// Creates a source for the user service at `base_url`.
    #[must_use]
    pub fn new(client: HttpClient, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn fetch_user(&self, id: &UserId) -> FetchResult<UserRecord> {
        let url = HttpClient::endpoint(&self.base_url, &["users", id.as_str()])?;
        self.client.get(url).await
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    #[instrument(name = "user_source.fetch", skip_all, fields(user_id = %id))]
    async fn fetch(&self, id: &UserId) -> SourceResult<UserRecord> {
        let result = self.fetch_user(id).await;
        match &result {
            Err(error) if error.is_not_found() => debug!(%error, "user not found"),
            Err(error) => warn!(%error, http_status = ?error.http_status(), "user fetch failed"),
            Ok(_) => {}
        }
        SourceResult::from_fetch(SourceName::UserService, result)
    }
}
