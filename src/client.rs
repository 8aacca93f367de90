//! Aruba AirWave XML API client implementation.

use crate::error::{AirWaveError, Result};
use crate::query::{id_params, rrd_offset, QueryParams};
use crate::types::{ApGraphParams, ApiRequest, ApiResponse, GraphType, RadioGraphParams};
use crate::DEFAULT_USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

// Endpoint paths, relative to the appliance base URL
const LOGIN_PATH: &str = "LOGIN";
const AP_LIST_PATH: &str = "ap_list.xml";
const AP_DETAIL_PATH: &str = "ap_detail.xml";
const CLIENT_DETAIL_PATH: &str = "client_detail.xml";
const ROGUE_DETAIL_PATH: &str = "rogue_detail.xml";
const REPORT_LIST_PATH: &str = "nf/reports_list";
const REPORT_DETAIL_PATH: &str = "nf/report_detail";
const RRD_GRAPH_PATH: &str = "nf/rrd_graph";

/// Configuration for the AirWave client
#[derive(Debug, Clone)]
pub struct AirWaveClientConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Request timeout in seconds; `None` enforces no timeout, leaving
    /// deadlines to the caller
    pub timeout_seconds: Option<u64>,
    /// Accept self-signed or otherwise invalid TLS certificates.
    /// AirWave appliances commonly run with self-signed certificates on
    /// internal networks; verification stays on unless you opt out.
    pub accept_invalid_certs: bool,
}

impl Default for AirWaveClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
            accept_invalid_certs: false,
        }
    }
}

/// An authenticated session: one HTTP client whose cookie jar carries
/// the login cookie across requests.
#[derive(Debug)]
struct Session {
    http_client: Client,
}

/// Main AirWave XML API client.
///
/// One client owns one session: [`login`](AirWaveClient::login)
/// establishes it, [`logout`](AirWaveClient::logout) releases it, and
/// every resource method requires it. For concurrent request streams,
/// create independent clients.
#[derive(Debug)]
pub struct AirWaveClient {
    /// Appliance base URL, always ending in a slash
    base_url: Url,
    /// AirWave username
    username: String,
    /// AirWave password
    password: String,
    /// Client configuration
    config: AirWaveClientConfig,
    /// Active session, present between a successful login and logout
    session: Option<Session>,
}

impl AirWaveClient {
    /// Create a new AirWave client with default configuration.
    ///
    /// `host` is the appliance address (`192.168.0.100` or
    /// `amp.example.com`), resolved to `https://<host>/`. Pass a full
    /// URL with scheme to override, e.g. for a non-standard port.
    pub fn new(
        host: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(host, username, password, AirWaveClientConfig::default())
    }

    /// Create a new AirWave client with custom configuration
    pub fn with_config(
        host: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
        config: AirWaveClientConfig,
    ) -> Result<Self> {
        let host = host.as_ref();
        let mut base_url = if host.contains("://") {
            Url::parse(host)?
        } else {
            Url::parse(&format!("https://{}/", host))?
        };
        // Endpoint paths join relative to the base, so it must end in a
        // slash or the last path segment would be replaced
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            username: username.into(),
            password: password.into(),
            config,
            session: None,
        })
    }

    /// The appliance base URL all endpoint paths are joined against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check whether a session is currently established
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Log in to the appliance and establish a session.
    ///
    /// Posts the credential fields to `/LOGIN` in the request query,
    /// the appliance's login form protocol; the session cookie it sets
    /// is kept in the client's cookie jar. Any prior session is
    /// dropped as soon as the attempt begins. Rejected credentials do
    /// not fail this call: the appliance's response comes back for the
    /// caller to inspect, and no session is established unless the
    /// status is 2xx. Transport failures do fail with
    /// [`AirWaveError::Network`] and leave the client logged out.
    pub async fn login(&mut self) -> Result<ApiResponse> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(AirWaveError::auth_failed(
                "username and password must be non-empty",
            ));
        }

        // A prior session does not survive a new login attempt
        self.session = None;

        let mut builder = Client::builder()
            .user_agent(&self.config.user_agent)
            .cookie_store(true);
        if let Some(seconds) = self.config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        if self.config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http_client = builder.build()?;

        let mut params = QueryParams::new();
        params.insert("credential_0", self.username.as_str());
        params.insert("credential_1", self.password.as_str());
        params.insert("login", "Log In");
        params.insert("destination", "/");
        params.insert("next_action", "");

        let url = self.endpoint_url(LOGIN_PATH)?;
        debug!("Logging in to {}", url);

        let response = http_client
            .post(format!("{}?{}", url, params.encode()?))
            .send()
            .await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        if (200..300).contains(&status) {
            info!("Logged in to {}", self.base_url);
            self.session = Some(Session { http_client });
        } else {
            warn!("Login to {} rejected with status {}", self.base_url, status);
        }

        Ok(ApiResponse {
            status,
            url: final_url,
            body,
        })
    }

    /// Release the current session.
    ///
    /// The appliance session simply expires server-side; no request is
    /// sent. Calling this without an active session is a state error.
    pub fn logout(&mut self) -> Result<()> {
        match self.session.take() {
            Some(_) => {
                debug!("Dropped session for {}", self.base_url);
                Ok(())
            }
            None => Err(AirWaveError::NotLoggedIn),
        }
    }

    /// Build the access point list request.
    ///
    /// With ids, the query repeats `id=N` pairs in the given order;
    /// with an empty slice there is no query string and the appliance
    /// returns the full inventory.
    pub fn ap_list_request(&self, ap_ids: &[u64]) -> Result<ApiRequest> {
        let query = if ap_ids.is_empty() {
            None
        } else {
            Some(id_params(ap_ids))
        };
        Ok(ApiRequest::new(self.endpoint_url(AP_LIST_PATH)?, query))
    }

    /// Build the access point detail request for one id
    pub fn ap_detail_request(&self, ap_id: u64) -> Result<ApiRequest> {
        let mut params = QueryParams::new();
        params.insert("id", ap_id);
        self.request_with_params(AP_DETAIL_PATH, &params)
    }

    /// Build the client detail request for a wireless client MAC address
    pub fn client_detail_request(&self, mac: &str) -> Result<ApiRequest> {
        let mut params = QueryParams::new();
        params.insert("mac", mac);
        self.request_with_params(CLIENT_DETAIL_PATH, &params)
    }

    /// Build the rogue device detail request for one id
    pub fn rogue_detail_request(&self, ap_id: u64) -> Result<ApiRequest> {
        let mut params = QueryParams::new();
        params.insert("id", ap_id);
        self.request_with_params(ROGUE_DETAIL_PATH, &params)
    }

    /// Build the report list request, optionally filtered by title.
    ///
    /// Report endpoints always request `format=xml`; without it the
    /// appliance serves the interactive XHTML page.
    pub fn report_list_request(&self, reports_search_title: Option<&str>) -> Result<ApiRequest> {
        let mut params = QueryParams::new();
        params.insert("format", "xml");
        if let Some(title) = reports_search_title {
            params.insert("reports_search_title", title);
        }
        self.request_with_params(REPORT_LIST_PATH, &params)
    }

    /// Build the report detail request for one report id
    pub fn report_detail_request(&self, report_id: u64) -> Result<ApiRequest> {
        let mut params = QueryParams::new();
        params.insert("format", "xml");
        params.insert("id", report_id);
        self.request_with_params(REPORT_DETAIL_PATH, &params)
    }

    /// Fetch the access point inventory (`ap_list.xml`).
    ///
    /// Pass ids to restrict the listing, or an empty slice for every
    /// managed access point. Parse the body with
    /// [`ApList::parse`](crate::ApList::parse).
    pub async fn ap_list(&self, ap_ids: &[u64]) -> Result<ApiResponse> {
        self.execute(&self.ap_list_request(ap_ids)?).await
    }

    /// Fetch detail for one access point (`ap_detail.xml`).
    ///
    /// Parse the body with [`ApDetail::parse`](crate::ApDetail::parse).
    pub async fn ap_detail(&self, ap_id: u64) -> Result<ApiResponse> {
        self.execute(&self.ap_detail_request(ap_id)?).await
    }

    /// Fetch detail for one wireless client (`client_detail.xml`)
    pub async fn client_detail(&self, mac: &str) -> Result<ApiResponse> {
        self.execute(&self.client_detail_request(mac)?).await
    }

    /// Fetch detail for one rogue device (`rogue_detail.xml`)
    pub async fn rogue_detail(&self, ap_id: u64) -> Result<ApiResponse> {
        self.execute(&self.rogue_detail_request(ap_id)?).await
    }

    /// Fetch the report list (`nf/reports_list`), optionally filtered
    /// by title
    pub async fn report_list(&self, reports_search_title: Option<&str>) -> Result<ApiResponse> {
        self.execute(&self.report_list_request(reports_search_title)?)
            .await
    }

    /// Fetch one report (`nf/report_detail`)
    pub async fn report_detail(&self, report_id: u64) -> Result<ApiResponse> {
        self.execute(&self.report_detail_request(report_id)?).await
    }

    /// Execute a prepared request on the current session.
    ///
    /// Fails with [`AirWaveError::NotLoggedIn`] when no session is
    /// established, and with [`AirWaveError::AuthenticationFailed`]
    /// when the appliance rejects the session (401/403). Any other
    /// status comes back as-is for the caller to inspect.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let session = self.session.as_ref().ok_or(AirWaveError::NotLoggedIn)?;

        let full_url = request.full_url();
        debug!("GET {}", full_url);

        let response = session.http_client.get(&full_url).send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;

        if status == 401 || status == 403 {
            warn!("Request to {} rejected with status {}", url, status);
            return Err(AirWaveError::auth_failed(format!(
                "request rejected with status {}",
                status
            )));
        }

        debug!("Received {} bytes with status {}", body.len(), status);
        Ok(ApiResponse { status, url, body })
    }

    /// Compose an RRD graph URL from arbitrary parameters.
    ///
    /// The named graph methods cover the documented series; this is the
    /// escape hatch for parameter combinations they don't. The returned
    /// URL embeds no credentials: fetching it needs the session cookie,
    /// or a browser logged in to the appliance.
    pub fn rrd_graph_url(&self, params: &QueryParams) -> Result<String> {
        let url = self.endpoint_url(RRD_GRAPH_PATH)?;
        Ok(format!("{}?{}", url, params.encode()?))
    }

    /// Graph URL for the associated client count of an access point
    pub fn ap_client_count_graph_url(&self, params: &ApGraphParams) -> Result<String> {
        self.ap_graph_url(GraphType::ApClientCount, params)
    }

    /// Graph URL for access point bandwidth
    pub fn ap_bandwidth_graph_url(&self, params: &ApGraphParams) -> Result<String> {
        self.ap_graph_url(GraphType::ApBandwidth, params)
    }

    /// Graph URL for access point 802.11 MAC counters
    pub fn dot11_counters_graph_url(&self, params: &ApGraphParams) -> Result<String> {
        self.ap_graph_url(GraphType::Dot11Counters, params)
    }

    /// Graph URL for a radio's channel assignment history
    pub fn radio_channel_graph_url(&self, params: &RadioGraphParams) -> Result<String> {
        self.radio_graph_url(GraphType::RadioChannel, params)
    }

    /// Graph URL for a radio's noise floor
    pub fn radio_noise_graph_url(&self, params: &RadioGraphParams) -> Result<String> {
        self.radio_graph_url(GraphType::RadioNoise, params)
    }

    /// Graph URL for a radio's transmit power
    pub fn radio_power_graph_url(&self, params: &RadioGraphParams) -> Result<String> {
        self.radio_graph_url(GraphType::RadioPower, params)
    }

    /// Graph URL for a radio's frame error rates
    pub fn radio_errors_graph_url(&self, params: &RadioGraphParams) -> Result<String> {
        self.radio_graph_url(GraphType::RadioErrors, params)
    }

    /// Graph URL for a radio's goodput
    pub fn radio_goodput_graph_url(&self, params: &RadioGraphParams) -> Result<String> {
        self.radio_graph_url(GraphType::RadioGoodput, params)
    }

    /// Graph URL for a radio's channel utilization
    pub fn channel_utilization_graph_url(&self, params: &RadioGraphParams) -> Result<String> {
        self.radio_graph_url(GraphType::ChannelUtilization, params)
    }

    /// Graph URL for any AP-scoped series
    pub fn ap_graph_url(&self, graph_type: GraphType, params: &ApGraphParams) -> Result<String> {
        let mut query = QueryParams::new();
        query.insert("type", graph_type.as_str());
        query.insert("id", params.ap_id);
        query.insert("radio_index", params.radio_index);
        query.insert("start", rrd_offset(params.start));
        query.insert("end", rrd_offset(params.end));
        self.rrd_graph_url(&query)
    }

    /// Graph URL for any radio-scoped series
    pub fn radio_graph_url(
        &self,
        graph_type: GraphType,
        params: &RadioGraphParams,
    ) -> Result<String> {
        let mut query = QueryParams::new();
        query.insert("type", graph_type.as_str());
        query.insert("ap_uid", params.ap_uid.as_str());
        query.insert("radio_index", params.radio_index);
        query.insert("radio_interface", params.radio_interface);
        query.insert("start", rrd_offset(params.start));
        query.insert("end", rrd_offset(params.end));
        self.rrd_graph_url(&query)
    }

    /// Join an endpoint path against the appliance base URL.
    ///
    /// Mostly useful for endpoints this client does not wrap; the
    /// returned URL still needs the session cookie to fetch.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request_with_params(&self, path: &str, params: &QueryParams) -> Result<ApiRequest> {
        Ok(ApiRequest::new(
            self.endpoint_url(path)?,
            Some(params.encode()?),
        ))
    }
}
