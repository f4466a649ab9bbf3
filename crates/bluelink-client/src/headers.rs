//! Request header profiles
//!
//! The vendor backend expects a different header set at each stage of the
//! session. Profiles that carry a `Stamp` draw a fresh one on every build.

use bluelink_core::{stamp, Brand};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};

use crate::credentials::Credentials;
use crate::error::{BluelinkError, Result};

pub const CCSP_SERVICE_ID: HeaderName = HeaderName::from_static("ccsp-service-id");
pub const CCSP_DEVICE_ID: HeaderName = HeaderName::from_static("ccsp-device-id");
pub const CCSP_APPLICATION_ID: HeaderName = HeaderName::from_static("ccsp-application-id");
pub const OFFSET: HeaderName = HeaderName::from_static("offset");
pub const STAMP: HeaderName = HeaderName::from_static("stamp");

const APPLICATION_JSON: &str = "application/json";
const APPLICATION_JSON_UTF8: &str = "application/json;charset=UTF-8";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Builds header sets for one session
#[derive(Debug, Clone, Copy)]
pub struct HeaderBuilder<'a> {
    brand: Brand,
    credentials: &'a Credentials,
}

impl<'a> HeaderBuilder<'a> {
    pub fn new(brand: Brand, credentials: &'a Credentials) -> Self {
        Self { brand, credentials }
    }

    /// Plain JSON profile for unauthenticated setup calls
    pub fn json(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers
    }

    /// Device registration: service id and a stamp
    pub fn device_registration(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CCSP_SERVICE_ID,
            HeaderValue::from_str(&self.credentials.service_id)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON_UTF8));
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.credentials.user_agent)?);
        headers.insert(STAMP, self.stamp()?);
        Ok(headers)
    }

    /// Token exchange: HTTP Basic with the brand's client credentials
    pub fn token_exchange(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", self.credentials.token_auth))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.credentials.user_agent)?);
        Ok(headers)
    }

    /// Vehicle calls: bearer token, device and application ids, and a stamp.
    ///
    /// Fails with `NotAuthenticated` when the session holds no bearer token.
    pub fn authenticated(&self) -> Result<HeaderMap> {
        if !self.credentials.is_authenticated() {
            return Err(BluelinkError::NotAuthenticated);
        }

        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&self.credentials.access_token)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CCSP_DEVICE_ID, HeaderValue::from_str(&self.credentials.device_id)?);
        headers.insert(
            CCSP_APPLICATION_ID,
            HeaderValue::from_str(&self.credentials.application_id)?,
        );
        headers.insert(OFFSET, HeaderValue::from_static("1"));
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.credentials.user_agent)?);
        headers.insert(STAMP, self.stamp()?);
        Ok(headers)
    }

    fn stamp(&self) -> Result<HeaderValue> {
        let stamp = stamp::stamp(self.brand)?;
        Ok(HeaderValue::from_str(stamp)?)
    }
}
