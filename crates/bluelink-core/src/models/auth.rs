//! Handshake request and response bodies

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, CoreResult};

/// Device registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistrationRequest {
    pub push_reg_id: String,
    pub push_type: String,
    pub uuid: String,
}

impl DeviceRegistrationRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            push_reg_id: "1".to_string(),
            push_type: "GCM".to_string(),
            uuid: uuid.into(),
        }
    }
}

/// `resMsg` of the device registration response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    #[serde(default)]
    pub device_id: String,
}

/// Language preference request
#[derive(Debug, Clone, Serialize)]
pub struct LanguageRequest {
    pub lang: String,
}

/// Sign-in request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRedirect {
    #[serde(default)]
    pub redirect_url: String,
}

impl LoginRedirect {
    /// Authorization code carried in the `code` query parameter
    pub fn authorization_code(&self) -> CoreResult<String> {
        let url = Url::parse(&self.redirect_url)
            .map_err(|e| CoreError::InvalidRedirect(format!("{}: {}", self.redirect_url, e)))?;
        url.query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                CoreError::InvalidRedirect(format!("no code in {}", self.redirect_url))
            })
    }
}

/// OAuth token exchange response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub access_token: String,
}

impl TokenResponse {
    /// `Authorization` header value: `"<token_type> <access_token>"`
    pub fn bearer(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_registration_body() {
        let body = serde_json::to_value(DeviceRegistrationRequest::new("u-1")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"pushRegId": "1", "pushType": "GCM", "uuid": "u-1"})
        );
    }

    #[test]
    fn test_authorization_code() {
        let redirect: LoginRedirect = serde_json::from_str(
            r#"{"redirectUrl":"https://prd.eu-ccapi.kia.com:8080/api/v1/user/oauth2/redirect?code=abc123&state=test"}"#,
        )
        .unwrap();
        assert_eq!(redirect.authorization_code().unwrap(), "abc123");
    }

    #[test]
    fn test_missing_redirect_url() {
        let redirect: LoginRedirect = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            redirect.authorization_code(),
            Err(CoreError::InvalidRedirect(_))
        ));
    }

    #[test]
    fn test_redirect_without_code() {
        let redirect = LoginRedirect {
            redirect_url: "https://host/redirect?state=test".to_string(),
        };
        assert!(matches!(
            redirect.authorization_code(),
            Err(CoreError::InvalidRedirect(_))
        ));
    }

    #[test]
    fn test_bearer() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"token_type":"Bearer","access_token":"T1","expires_in":86400}"#)
                .unwrap();
        assert_eq!(token.bearer(), "Bearer T1");
    }
}
