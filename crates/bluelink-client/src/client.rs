//! Bluelink session client

use std::sync::Arc;

use bluelink_core::models::decode_vehicles;
use bluelink_core::{Brand, Config, Endpoints};
use bytes::Bytes;
use reqwest::cookie::Jar;
use reqwest::{Client, Response};
use tracing::{debug, instrument, trace, warn};
use url::Url;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::headers::HeaderBuilder;
use crate::options::ClientOptions;
use crate::vehicle::Vehicle;

/// Response bodies longer than this are truncated in trace logs
const MAX_LOGGED_BODY: usize = 2048;

/// One authenticated session against a brand backend
///
/// Owns its cookie store and credentials. `authenticate` takes `&mut self`,
/// so vehicles borrowed from the session keep it from being re-authenticated
/// underneath them.
pub struct BluelinkClient {
    pub(crate) http: Client,
    pub(crate) config: Config,
    pub(crate) options: ClientOptions,
    pub(crate) credentials: Credentials,
}

impl BluelinkClient {
    /// Create an unauthenticated session with default options
    pub fn new(config: Config) -> Result<Self> {
        Self::with_options(config, ClientOptions::default())
    }

    /// Create an unauthenticated session with custom options
    pub fn with_options(config: Config, options: ClientOptions) -> Result<Self> {
        if !config.region.is_supported() {
            warn!(
                region = %config.region,
                "No dedicated backend for region, using the European one"
            );
        }

        let credentials = Credentials::for_brand(config.brand, &options);
        Url::parse(credentials.base_uri())?;
        let http = build_http(&options)?;

        debug!(
            brand = %config.brand,
            base_uri = %credentials.base_uri(),
            "Created Bluelink client"
        );

        Ok(Self {
            http,
            config,
            options,
            credentials,
        })
    }

    pub fn brand(&self) -> Brand {
        self.config.brand
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.options.endpoints
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    pub(crate) fn headers(&self) -> HeaderBuilder<'_> {
        HeaderBuilder::new(self.config.brand, &self.credentials)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.credentials.base_uri, path)
    }

    /// Drop the cookie store by rebuilding the transport around a fresh jar
    pub(crate) fn reset_cookies(&mut self) -> Result<()> {
        self.http = build_http(&self.options)?;
        Ok(())
    }

    // =========================================================================
    // Vehicle Directory
    // =========================================================================

    /// List the vehicles bound to the account
    ///
    /// Fails with `NotAuthenticated` before any request when the session has
    /// no bearer token, and with `NoVehicleFound` when the account is empty.
    #[instrument(skip(self), fields(brand = %self.config.brand))]
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle<'_>>> {
        let headers = self.headers().authenticated()?;
        let url = self.url(&self.options.endpoints.vehicles);
        debug!("Listing vehicles from {}", url);

        let response = self.http.get(url).headers(headers).send().await?;
        let body = read_body(response).await?;
        let vehicles = decode_vehicles(&body)?;

        debug!(count = vehicles.len(), "Listed vehicles");
        Ok(vehicles
            .into_iter()
            .map(|info| Vehicle::new(info, self.config.brand, self))
            .collect())
    }

    /// Authenticated GET of a path relative to the base URI
    pub(crate) async fn get_authenticated(&self, path: &str) -> Result<Response> {
        let headers = self.headers().authenticated()?;
        let url = self.url(path);
        debug!("GET {}", url);
        Ok(self.http.get(url).headers(headers).send().await?)
    }
}

impl std::fmt::Debug for BluelinkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BluelinkClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Build a transport with its own, empty cookie store
fn build_http(options: &ClientOptions) -> Result<Client> {
    let jar = Arc::new(Jar::default());
    let client = Client::builder()
        .cookie_provider(jar)
        .timeout(options.timeout())
        .connect_timeout(options.connect_timeout())
        .build()?;
    Ok(client)
}

/// Read a response body, tracing a truncated copy
pub(crate) async fn read_body(response: Response) -> Result<Bytes> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.bytes().await?;
    trace!(
        %status,
        %url,
        body = %truncate_for_log(&body),
        "Response body"
    );
    Ok(body)
}

fn truncate_for_log(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.len() <= MAX_LOGGED_BODY {
        return text.to_string();
    }
    let mut end = MAX_LOGGED_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluelink_core::Region;

    fn config(brand: Brand) -> Config {
        Config::new("driver@example.com", "hunter2", brand)
    }

    #[test]
    fn test_client_creation() {
        for brand in Brand::ALL {
            let client = BluelinkClient::new(config(brand)).unwrap();
            assert_eq!(client.brand(), brand);
            assert_eq!(client.credentials().base_uri(), brand.profile().base_uri);
            assert!(!client.is_authenticated());
        }
    }

    #[test]
    fn test_unsupported_region_still_builds() {
        let client = BluelinkClient::new(config(Brand::Kia).with_region(Region::Us)).unwrap();
        assert_eq!(client.credentials().base_uri(), Brand::Kia.profile().base_uri);
    }

    #[test]
    fn test_invalid_base_uri() {
        let options = ClientOptions::default().with_base_uri("not a url");
        assert!(BluelinkClient::with_options(config(Brand::Kia), options).is_err());
    }

    #[test]
    fn test_url_join() {
        let options = ClientOptions::default().with_base_uri("http://127.0.0.1:9000");
        let client = BluelinkClient::with_options(config(Brand::Hyundai), options).unwrap();
        assert_eq!(
            client.url(&client.endpoints().status_path("v1")),
            "http://127.0.0.1:9000/api/v1/spa/vehicles/v1/status"
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let client = BluelinkClient::new(config(Brand::Kia)).unwrap();
        assert!(!format!("{:?}", client).contains("hunter2"));
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log(b"  short  "), "short");
        let long = "é".repeat(MAX_LOGGED_BODY);
        let truncated = truncate_for_log(long.as_bytes());
        assert!(truncated.len() <= MAX_LOGGED_BODY + 3);
        assert!(truncated.ends_with("..."));
    }
}
