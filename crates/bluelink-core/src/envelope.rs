//! Vendor response envelope
//!
//! Every JSON response is wrapped as `{"retCode": "S"|"F", "resCode": ..,
//! "resMsg": {..}, "msgId": ..}`. Only `retCode` decides success; the
//! payload under `resMsg` is decoded after the check so that failure
//! envelopes with an unexpected `resMsg` shape still map to
//! [`CoreError::NotAuthenticated`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// `retCode` of a successful call
pub const RET_CODE_OK: &str = "S";
/// `retCode` of a failed call
pub const RET_CODE_FAIL: &str = "F";

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "retCode", default)]
    pub ret_code: String,
    #[serde(rename = "resCode", default)]
    pub res_code: Option<String>,
    #[serde(rename = "resMsg", default)]
    pub res_msg: Value,
    #[serde(rename = "msgId", default)]
    pub msg_id: Option<String>,
}

impl Envelope {
    pub fn parse(body: &[u8]) -> CoreResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn is_ok(&self) -> bool {
        self.ret_code == RET_CODE_OK
    }

    /// Decode `resMsg`, failing with `NotAuthenticated` on a non-success code.
    ///
    /// The vendor uses the same failure code for expired sessions and
    /// server-side errors, so both surface as `NotAuthenticated`.
    pub fn into_payload<T: DeserializeOwned + Default>(self) -> CoreResult<T> {
        if !self.is_ok() {
            tracing::debug!(
                ret_code = %self.ret_code,
                res_code = ?self.res_code,
                msg_id = ?self.msg_id,
                "Envelope reported failure"
            );
            return Err(CoreError::NotAuthenticated);
        }
        if self.res_msg.is_null() {
            return Ok(T::default());
        }
        Ok(serde_json::from_value(self.res_msg)?)
    }
}
