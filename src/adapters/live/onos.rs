//! Live adapter for the `SdnController` port over the ONOS REST APIs.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::call::CallContext;
use crate::error::{AdapterError, PortError};
use crate::ports::{BandwidthProfile, NetworkPort, PortFuture, ProgrammedSubscriber, SdnController};

/// Default per-request timeout.
pub const ONOS_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Delay between reachability checks.
pub const ONOS_BACKOFF_INTERVAL: Duration = Duration::from_secs(10);

/// ONOS REST client authenticating with basic auth.
pub struct OnosClient {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct SubscribersResponse {
    #[serde(default)]
    entries: Vec<ProgrammedSubscriber>,
}

#[derive(Deserialize)]
struct PortsResponse {
    #[serde(default)]
    ports: Vec<NetworkPort>,
}

#[derive(Deserialize)]
struct BandwidthProfileResponse {
    #[serde(default)]
    entry: Vec<BandwidthProfile>,
}

impl OnosClient {
    /// Creates a client for the API served at `endpoint` (`host:port`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}/onos/{path}", self.endpoint)
    }

    /// Sends a request and returns the body of a 200 response.
    async fn request(&self, method: Method, url: String) -> Result<String, PortError> {
        let response = self
            .client
            .request(method.clone(), &url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| -> PortError { format!("cannot get response: {e}").into() })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| -> PortError {
                format!("error while reading response body: {e}").into()
            })?;

        if status != reqwest::StatusCode::OK {
            return Err(format!("status code not ok: {method} {url} {}", status.as_u16()).into());
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortError> {
        let body = self.request(Method::GET, self.url(path)).await?;
        serde_json::from_str(&body).map_err(|e| -> PortError {
            format!("cannot decode response of {path}: {e}").into()
        })
    }
}

impl SdnController for OnosClient {
    fn get_status(&self) -> PortFuture<'_, String> {
        Box::pin(self.request(Method::GET, self.url("olt/oltapp/status")))
    }

    fn get_programmed_subscribers(&self) -> PortFuture<'_, Vec<ProgrammedSubscriber>> {
        Box::pin(async move {
            let response: SubscribersResponse =
                self.get_json("olt/oltapp/programmed-subscribers").await?;
            Ok(response.entries)
        })
    }

    fn get_ports(&self) -> PortFuture<'_, Vec<NetworkPort>> {
        Box::pin(async move {
            let response: PortsResponse = self.get_json("v1/devices/ports").await?;
            Ok(response.ports)
        })
    }

    fn get_bandwidth_profile<'a>(&'a self, id: &'a str) -> PortFuture<'a, BandwidthProfile> {
        Box::pin(async move {
            let response: BandwidthProfileResponse =
                self.get_json(&format!("sadis/bandwidthprofile/{id}")).await?;
            // The API answers with a list that always holds the one profile.
            match <[BandwidthProfile; 1]>::try_from(response.entry) {
                Ok([profile]) => Ok(profile),
                Err(entries) => Err(format!(
                    "unexpected number of bandwidth profile entries: id={id} len={}",
                    entries.len()
                )
                .into()),
            }
        })
    }

    fn provision_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        let url = self.url(&format!("olt/oltapp/services/{port_name}/{s_tag}/{c_tag}/{tp_id}"));
        Box::pin(async move {
            self.request(Method::POST, url).await?;
            Ok(())
        })
    }

    fn remove_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        let url = self.url(&format!("olt/oltapp/services/{port_name}/{s_tag}/{c_tag}/{tp_id}"));
        Box::pin(async move {
            self.request(Method::DELETE, url).await?;
            Ok(())
        })
    }
}

/// Polls the controller status until it answers, waiting `backoff` between
/// attempts. Only failed status calls are retried.
///
/// # Errors
///
/// Returns [`AdapterError::Cancelled`] or [`AdapterError::DeadlineExceeded`]
/// when `ctx` ends before the controller becomes reachable.
pub async fn wait_until_reachable(
    controller: &dyn SdnController,
    ctx: &CallContext,
    backoff: Duration,
) -> Result<(), AdapterError> {
    debug!("checking connection to onos olt app api");

    loop {
        match ctx.run("get-status", controller.get_status()).await {
            Ok(_) => {
                debug!("onos olt app api reachable");
                return Ok(());
            }
            Err(AdapterError::Upstream { source, .. }) => {
                warn!(error = %source, "onos olt app api not ready");
            }
            Err(err) => return Err(err),
        }

        ctx.run("wait-onos", async {
            tokio::time::sleep(backoff).await;
            Ok::<_, PortError>(())
        })
        .await?;
    }
}
