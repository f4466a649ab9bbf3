//! Session handshake
//!
//! Authentication is a fixed sequence of calls, each of which must succeed:
//!
//! 1. reset the cookie store and any previous credentials
//! 2. register a device and keep the returned device id
//! 3. open the OAuth authorize page so the backend sets its session cookies
//! 4. set the account language (response ignored)
//! 5. sign in and pull the authorization code out of the redirect URL
//! 6. exchange the code for a bearer token
//!
//! There are no retries. A failure at any step leaves the session without a
//! bearer token, which every later call treats as unauthenticated.

use bluelink_core::models::{
    DeviceRegistration, DeviceRegistrationRequest, LanguageRequest, LoginRedirect, LoginRequest,
    TokenResponse,
};
use bluelink_core::Envelope;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::client::{read_body, BluelinkClient};
use crate::error::{BluelinkError, Result};

const LANGUAGE_ENGLISH: &str = "en";

impl BluelinkClient {
    /// Run the full handshake and store the bearer token and device id
    #[instrument(skip(self), fields(brand = %self.config.brand))]
    pub async fn authenticate(&mut self) -> Result<()> {
        self.reset_cookies()?;
        self.credentials.clear_session();

        let device_id = self.register_device().await?;
        self.credentials.device_id = device_id;

        self.prime_cookies().await?;
        self.set_language(LANGUAGE_ENGLISH).await?;

        let code = self.login().await?;
        let token = self.request_access_token(&code).await?;
        self.credentials.access_token = token;

        info!("Authenticated");
        Ok(())
    }

    async fn register_device(&self) -> Result<String> {
        let node_id: [u8; 6] = rand::random();
        let uuid = Uuid::now_v1(&node_id);
        let request = DeviceRegistrationRequest::new(uuid.to_string());

        let url = self.url(&self.options.endpoints.device_id);
        debug!("Registering device at {}", url);

        let response = self
            .http
            .post(url)
            .headers(self.headers().device_registration()?)
            .json(&request)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(BluelinkError::authentication_failed(format!(
                "device registration returned HTTP {}",
                response.status()
            )));
        }

        let envelope = Envelope::parse(&read_body(response).await?)?;
        if !envelope.is_ok() {
            return Err(BluelinkError::authentication_failed(format!(
                "device registration returned retCode {:?}",
                envelope.ret_code
            )));
        }
        let registration: DeviceRegistration = envelope.into_payload()?;

        debug!(device_id = %registration.device_id, "Registered device");
        Ok(registration.device_id)
    }

    async fn prime_cookies(&self) -> Result<()> {
        let url = self
            .options
            .endpoints
            .authorize_url(&self.credentials.base_uri, &self.credentials.service_id);
        debug!("Priming session cookies");

        let response = self.http.get(url).send().await?;
        debug!(status = %response.status(), "Authorize page answered");
        Ok(())
    }

    async fn set_language(&self, lang: &str) -> Result<()> {
        let url = self.url(&self.options.endpoints.lang);
        let request = LanguageRequest {
            lang: lang.to_string(),
        };

        let response = self
            .http
            .post(url)
            .headers(self.headers().json())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Language preference not accepted");
        }
        Ok(())
    }

    async fn login(&self) -> Result<String> {
        let url = self.url(&self.options.endpoints.login);
        let request = LoginRequest {
            email: self.config.username.clone(),
            password: self.config.password.clone(),
        };
        debug!("Signing in");

        let response = self
            .http
            .post(url)
            .headers(self.headers().json())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BluelinkError::authentication_failed(format!(
                "sign in returned HTTP {}",
                status
            )));
        }

        let redirect: LoginRedirect = serde_json::from_slice(&response.bytes().await?)?;
        Ok(redirect.authorization_code()?)
    }

    async fn request_access_token(&self, code: &str) -> Result<String> {
        let url = self.url(&self.options.endpoints.access_token);
        let redirect_uri = self
            .options
            .endpoints
            .redirect_uri(&self.credentials.base_uri);
        let params = [
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code", code),
        ];
        debug!("Exchanging authorization code");

        let response = self
            .http
            .post(url)
            .headers(self.headers().token_exchange()?)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BluelinkError::authentication_failed(format!(
                "token exchange returned HTTP {}",
                status
            )));
        }

        let token: TokenResponse = serde_json::from_slice(&response.bytes().await?)?;
        if token.access_token.is_empty() {
            return Err(BluelinkError::authentication_failed(
                "token exchange returned no access token",
            ));
        }
        Ok(token.bearer())
    }
}
