//! Remote trip service access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{FareLevel, SurchargeOption},
    protocol::{
        HistoryRecord, LiveSnapshot, StartTripRequest, StopTripResponse, ToggleOptionRequest,
    },
};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

#[async_trait]
pub trait TripApi: Send + Sync {
    async fn start_trip(&self, name: &str, level: FareLevel) -> ClientResult<()>;
    async fn fetch_update(&self) -> ClientResult<LiveSnapshot>;
    async fn toggle_state(&self) -> ClientResult<()>;
    async fn toggle_option(&self, option: SurchargeOption, active: bool) -> ClientResult<()>;
    async fn stop_trip(&self) -> ClientResult<f64>;
    async fn history(&self) -> ClientResult<Vec<HistoryRecord>>;
}

pub struct HttpTripApi {
    http: Client,
    server_url: String,
}

impl HttpTripApi {
    pub fn new(server_url: impl Into<String>, request_timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(http, server_url))
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.server_url)
    }
}

#[async_trait]
impl TripApi for HttpTripApi {
    async fn start_trip(&self, name: &str, level: FareLevel) -> ClientResult<()> {
        self.http
            .post(self.endpoint("start"))
            .json(&StartTripRequest {
                name: name.to_string(),
                level,
            })
            .send()
            .await?
            .error_for_status()?;
        debug!(level = level.get(), "start request accepted");
        Ok(())
    }

    async fn fetch_update(&self) -> ClientResult<LiveSnapshot> {
        let body = self
            .http
            .get(self.endpoint("update"))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn toggle_state(&self) -> ClientResult<()> {
        self.http
            .post(self.endpoint("toggle_state"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn toggle_option(&self, option: SurchargeOption, active: bool) -> ClientResult<()> {
        self.http
            .post(self.endpoint("toggle_option"))
            .json(&ToggleOptionRequest { option, active })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn stop_trip(&self) -> ClientResult<f64> {
        let body = self
            .http
            .post(self.endpoint("stop"))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: StopTripResponse = serde_json::from_slice(&body)?;
        Ok(response.fare)
    }

    async fn history(&self) -> ClientResult<Vec<HistoryRecord>> {
        let body = self
            .http
            .get(self.endpoint("history"))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        serde_json::from_slice(&body).map_err(ClientError::from)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
