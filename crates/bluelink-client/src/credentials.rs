//! Session credentials
//!
//! Brand identity plus what the handshake produces. A session is
//! authenticated exactly when the bearer token is non-empty; the device id
//! alone never counts.

use std::fmt;

use bluelink_core::Brand;

use crate::options::ClientOptions;

/// Credentials owned by one session
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) base_uri: String,
    pub(crate) service_id: String,
    pub(crate) application_id: String,
    pub(crate) device_id: String,
    pub(crate) access_token: String,
    pub(crate) token_auth: String,
    pub(crate) user_agent: String,
}

impl Credentials {
    /// Unauthenticated credentials for a brand
    pub fn for_brand(brand: Brand, options: &ClientOptions) -> Self {
        let profile = brand.profile();
        Self {
            base_uri: options
                .base_uri
                .clone()
                .unwrap_or_else(|| profile.base_uri.to_string()),
            service_id: profile.service_id.to_string(),
            application_id: profile.application_id.to_string(),
            device_id: String::new(),
            access_token: String::new(),
            token_auth: profile.token_auth(),
            user_agent: options.user_agent.clone(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Device id from registration, empty before the handshake
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Bearer credential, `"<type> <token>"`, empty before the handshake
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_auth(&self) -> &str {
        &self.token_auth
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Forget everything a previous handshake produced
    pub(crate) fn clear_session(&mut self) {
        self.device_id.clear();
        self.access_token.clear();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_uri", &self.base_uri)
            .field("service_id", &self.service_id)
            .field("application_id", &self.application_id)
            .field("device_id", &self.device_id)
            .field("authenticated", &self.is_authenticated())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
