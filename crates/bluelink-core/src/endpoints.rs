//! Endpoint path table
//!
//! Paths are relative to the brand's base URI and identical for both brands.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the vehicle identifier in vehicle-scoped paths
pub const VEHICLE_ID_PLACEHOLDER: &str = "{id}";

/// Logical operation to path mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Device registration: POST
    #[serde(default = "default_device_id")]
    pub device_id: String,
    /// OAuth authorize, used to prime the cookie store: GET
    #[serde(default = "default_authorize")]
    pub authorize: String,
    /// OAuth redirect target, only ever sent as a parameter
    #[serde(default = "default_redirect")]
    pub redirect: String,
    /// Language preference: POST
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Sign in: POST
    #[serde(default = "default_login")]
    pub login: String,
    /// Token exchange: POST (form)
    #[serde(default = "default_access_token")]
    pub access_token: String,
    /// Vehicle list: GET
    #[serde(default = "default_vehicles")]
    pub vehicles: String,
    /// Vehicle status: GET `{id}`
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            device_id: default_device_id(),
            authorize: default_authorize(),
            redirect: default_redirect(),
            lang: default_lang(),
            login: default_login(),
            access_token: default_access_token(),
            vehicles: default_vehicles(),
            status: default_status(),
        }
    }
}

impl Endpoints {
    /// Status path of a vehicle
    pub fn status_path(&self, vehicle_id: &str) -> String {
        self.status.replace(VEHICLE_ID_PLACEHOLDER, vehicle_id)
    }

    /// Absolute OAuth redirect URI for a base URI
    pub fn redirect_uri(&self, base_uri: &str) -> String {
        format!("{}{}", base_uri, self.redirect)
    }

    /// Absolute authorize URL used to seed the session cookies.
    ///
    /// The query is sent unencoded, exactly as the vendor app does.
    pub fn authorize_url(&self, base_uri: &str, service_id: &str) -> String {
        format!(
            "{}{}?response_type=code&state=test&client_id={}&redirect_uri={}",
            base_uri,
            self.authorize,
            service_id,
            self.redirect_uri(base_uri)
        )
    }
}

fn default_device_id() -> String {
    "/api/v1/spa/notifications/register".to_string()
}

fn default_authorize() -> String {
    "/api/v1/user/oauth2/authorize".to_string()
}

fn default_redirect() -> String {
    "/api/v1/user/oauth2/redirect".to_string()
}

fn default_lang() -> String {
    "/api/v1/user/language".to_string()
}

fn default_login() -> String {
    "/api/v1/user/signin".to_string()
}

fn default_access_token() -> String {
    "/api/v1/user/oauth2/token".to_string()
}

fn default_vehicles() -> String {
    "/api/v1/spa/vehicles".to_string()
}

fn default_status() -> String {
    "/api/v1/spa/vehicles/{id}/status".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_path() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.status_path("abc-123"),
            "/api/v1/spa/vehicles/abc-123/status"
        );
    }

    #[test]
    fn test_authorize_url() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.authorize_url("https://host:8080", "svc"),
            "https://host:8080/api/v1/user/oauth2/authorize?response_type=code&state=test\
             &client_id=svc&redirect_uri=https://host:8080/api/v1/user/oauth2/redirect"
        );
    }

    #[test]
    fn test_partial_override() {
        let endpoints: Endpoints =
            serde_json::from_str(r#"{"vehicles": "/api/v2/spa/vehicles"}"#).unwrap();
        assert_eq!(endpoints.vehicles, "/api/v2/spa/vehicles");
        assert_eq!(endpoints.login, "/api/v1/user/signin");
    }
}
