//! Vehicle handle

use std::fmt;

use bluelink_core::models::{decode_status, VehicleInfo, VehicleStatus};
use bluelink_core::Brand;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::client::{read_body, BluelinkClient};
use crate::error::{BluelinkError, Result};

/// Options for remote start
#[derive(Debug, Clone, Default)]
pub struct StartOptions {}

/// A vehicle bound to the session it was listed from
///
/// Borrows the session's transport and credentials, so it cannot outlive it.
#[derive(Clone)]
pub struct Vehicle<'a> {
    info: VehicleInfo,
    brand: Brand,
    session: &'a BluelinkClient,
}

impl<'a> Vehicle<'a> {
    pub fn new(info: VehicleInfo, brand: Brand, session: &'a BluelinkClient) -> Self {
        Self {
            info,
            brand,
            session,
        }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn vin(&self) -> &str {
        &self.info.vin
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn vehicle_type(&self) -> &str {
        &self.info.vehicle_type
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    /// Full directory record
    pub fn info(&self) -> &VehicleInfo {
        &self.info
    }

    /// Fetch a fresh status snapshot
    ///
    /// HTTP 401/403 and failure envelopes both mean the session has to be
    /// re-authenticated.
    #[instrument(skip(self), fields(vehicle = %self.info.id))]
    pub async fn status(&self) -> Result<VehicleStatus> {
        let path = self.session.endpoints().status_path(&self.info.id);
        let response = self.session.get_authenticated(&path).await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(%status, "Status request rejected");
            return Err(BluelinkError::NotAuthenticated);
        }

        let body = read_body(response).await?;
        Ok(decode_status(&body)?)
    }

    // =========================================================================
    // Remote Commands
    // =========================================================================

    pub async fn unlock(&self) -> Result<()> {
        Err(BluelinkError::NotImplemented)
    }

    pub async fn lock(&self) -> Result<()> {
        Err(BluelinkError::NotImplemented)
    }

    pub async fn start(&self, _options: StartOptions) -> Result<()> {
        Err(BluelinkError::NotImplemented)
    }

    pub async fn stop(&self) -> Result<()> {
        Err(BluelinkError::NotImplemented)
    }

    pub async fn location(&self) -> Result<String> {
        Err(BluelinkError::NotImplemented)
    }

    pub async fn odometer(&self) -> Result<String> {
        Err(BluelinkError::NotImplemented)
    }
}

impl fmt::Debug for Vehicle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("info", &self.info)
            .field("brand", &self.brand)
            .finish()
    }
}

impl fmt::Display for Vehicle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.brand, self.info.name, self.info.vin, self.info.id
        )
    }
}
