//! Request, response, and graph parameter types for the AirWave API.

use serde::Serialize;
use std::fmt;

/// A prepared API request: an absolute endpoint URL plus an optional
/// canonical query string.
///
/// Request builders on [`AirWaveClient`](crate::AirWaveClient) return
/// these so callers can log or embed the exact URL before (or instead
/// of) executing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute endpoint URL, without query string
    pub url: String,
    /// Canonical query string, if the request carries parameters
    pub query: Option<String>,
}

impl ApiRequest {
    /// Create a request from an endpoint URL and optional query string
    pub fn new(url: impl Into<String>, query: Option<String>) -> Self {
        Self {
            url: url.into(),
            query,
        }
    }

    /// The complete URL, with `?query` appended when present
    pub fn full_url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.url, query),
            None => self.url.clone(),
        }
    }
}

/// Raw response from the AirWave appliance.
///
/// The client never interprets response bodies on your behalf: status
/// and body come back as-is, and the XML adapters in [`crate::ap`] are
/// applied explicitly by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Final URL the response was served from, after any redirects
    pub url: String,
    /// Response body, decoded as text
    pub body: String,
}

impl ApiResponse {
    /// Check whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// RRD graph series exposed by the `nf/rrd_graph` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphType {
    /// Associated client count for an access point
    ApClientCount,
    /// Inbound/outbound bandwidth for an access point
    ApBandwidth,
    /// 802.11 MAC counters for an access point
    Dot11Counters,
    /// Channel assignment history for a radio
    RadioChannel,
    /// Noise floor for a radio
    RadioNoise,
    /// Transmit power for a radio
    RadioPower,
    /// Frame error rates for a radio
    RadioErrors,
    /// Goodput for a radio
    RadioGoodput,
    /// Channel utilization for a radio
    ChannelUtilization,
}

impl GraphType {
    /// The `type` parameter value the endpoint expects
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::ApClientCount => "ap_client_count",
            GraphType::ApBandwidth => "ap_bandwidth",
            GraphType::Dot11Counters => "dot11_counters",
            GraphType::RadioChannel => "radio_channel",
            GraphType::RadioNoise => "radio_noise",
            GraphType::RadioPower => "radio_power",
            GraphType::RadioErrors => "radio_errors",
            GraphType::RadioGoodput => "radio_goodput",
            GraphType::ChannelUtilization => "channel_utilization",
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters for AP-scoped graphs (`ap_client_count`, `ap_bandwidth`,
/// `dot11_counters`).
///
/// `start` and `end` are offsets in seconds before now; `end` defaults
/// to 0, i.e. the current moment.
///
/// # Examples
///
/// ```
/// use airwave_xml::ApGraphParams;
///
/// // Last hour, ending now
/// let params = ApGraphParams::new(1, 0, 3600);
/// // The hour before that
/// let earlier = ApGraphParams::new(1, 0, 7200).end(3600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApGraphParams {
    /// Access point id
    pub ap_id: u64,
    /// Radio index on the access point
    pub radio_index: u64,
    /// Graph window start, seconds before now
    pub start: u64,
    /// Graph window end, seconds before now
    pub end: u64,
}

impl ApGraphParams {
    /// Graph parameters for the window from `start` seconds ago to now
    pub fn new(ap_id: u64, radio_index: u64, start: u64) -> Self {
        Self {
            ap_id,
            radio_index,
            start,
            end: 0,
        }
    }

    /// Move the window end to `seconds` before now
    pub fn end(mut self, seconds: u64) -> Self {
        self.end = seconds;
        self
    }
}

/// Parameters for radio-scoped graphs (`radio_channel`, `radio_noise`,
/// `radio_power`, `radio_errors`, `radio_goodput`,
/// `channel_utilization`).
///
/// Radios are addressed by the access point's unique id (typically its
/// MAC address) plus radio index and interface number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioGraphParams {
    /// Access point unique id, e.g. `01:23:45:67:89:AB`
    pub ap_uid: String,
    /// Radio index on the access point
    pub radio_index: u64,
    /// Radio interface number
    pub radio_interface: u64,
    /// Graph window start, seconds before now
    pub start: u64,
    /// Graph window end, seconds before now
    pub end: u64,
}

impl RadioGraphParams {
    /// Graph parameters for the window from `start` seconds ago to now
    pub fn new(
        ap_uid: impl Into<String>,
        radio_index: u64,
        radio_interface: u64,
        start: u64,
    ) -> Self {
        Self {
            ap_uid: ap_uid.into(),
            radio_index,
            radio_interface,
            start,
            end: 0,
        }
    }

    /// Move the window end to `seconds` before now
    pub fn end(mut self, seconds: u64) -> Self {
        self.end = seconds;
        self
    }
}
