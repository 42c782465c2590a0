//! # HTTP Order Source
//!
//! Fetches order histories from `GET {base}/orders?userId={id}`.

use crate::domain::entities::OrderRecord;
use crate::domain::value_objects::{SourceName, UserId};
use crate::infrastructure::sources::error::FetchResult;
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{OrderSource, SourceResult};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument};

/// Order source backed by the order service's REST API.
#[derive(Debug, Clone)]
pub struct HttpOrderSource {
    client: HttpClient,
    base_url: Url,
}

impl HttpOrderSource {
    /// Creates a source for the order service at `base_url`.
    #[must_use]
    pub fn new(client: HttpClient, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn fetch_orders(&self, id: &UserId) -> FetchResult<Vec<OrderRecord>> {
        let url = HttpClient::endpoint(&self.base_url, &["orders"])?;
        self.client
            .get_with_params(url, &[("userId", id.as_str())])
            .await
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    #[instrument(name = "order_source.fetch", skip_all, fields(user_id = %id))]
    async fn fetch(&self, id: &UserId) -> SourceResult<Vec<OrderRecord>> {
        let result = self.fetch_orders(id).await;
        match &result {
            Ok(orders) => debug!(count = orders.len(), "orders fetched"),
            Err(error) => debug!(
                %error,
                http_status = ?error.http_status(),
                transport = error.is_transport(),
                "order fetch failed"
            ),
        }
        SourceResult::from_fetch(SourceName::OrderService, result)
    }
}
