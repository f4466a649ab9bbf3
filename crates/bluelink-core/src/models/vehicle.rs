//! Vehicle directory records

use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::{CoreError, CoreResult};

/// One vehicle bound to the account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    #[serde(rename = "vehicleId")]
    pub id: String,
    #[serde(default)]
    pub vin: String,
    #[serde(rename = "vehicleName", default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Whether the account is the vehicle's primary owner
    #[serde(default)]
    pub master: bool,
    #[serde(default)]
    pub car_share: i32,
    #[serde(default)]
    pub reg_date: Option<String>,
    #[serde(default)]
    pub detail_info: Option<DetailInfo>,
}

/// Sales model and trim codes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailInfo {
    #[serde(rename = "saleCarmdlCd")]
    pub model_code: String,
    pub body_type: String,
    pub in_color: String,
    pub out_color: String,
    #[serde(rename = "saleCarmdlEnNm")]
    pub model_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct VehicleList {
    #[serde(default)]
    vehicles: Vec<VehicleInfo>,
}

/// Decode a vehicle list response.
///
/// A success envelope with no vehicles is [`CoreError::NoVehicleFound`],
/// never an empty list.
pub fn decode_vehicles(body: &[u8]) -> CoreResult<Vec<VehicleInfo>> {
    let list: VehicleList = Envelope::parse(body)?.into_payload()?;
    if list.vehicles.is_empty() {
        return Err(CoreError::NoVehicleFound);
    }
    Ok(list.vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    #[test]
    fn test_decode_vehicles() {
        let vehicles = decode_vehicles(&body(json!({
            "retCode": "S",
            "resCode": "0000",
            "resMsg": {
                "vehicles": [{
                    "vehicleId": "v-1",
                    "vin": "KNAC381AFL5000001",
                    "vehicleName": "e-Niro",
                    "type": "EV",
                    "nickname": "Niro",
                    "master": true,
                    "carShare": 1,
                    "regDate": "2020-06-01 10:00:00.000",
                    "detailInfo": {
                        "saleCarmdlCd": "DE",
                        "bodyType": "SUV",
                        "inColor": "WK",
                        "outColor": "ABP",
                        "saleCarmdlEnNm": "e-Niro"
                    },
                    "protocolType": 0
                }]
            },
            "msgId": "m-1"
        })))
        .unwrap();

        assert_eq!(vehicles.len(), 1);
        let v = &vehicles[0];
        assert_eq!(v.id, "v-1");
        assert_eq!(v.vin, "KNAC381AFL5000001");
        assert_eq!(v.name, "e-Niro");
        assert_eq!(v.vehicle_type, "EV");
        assert_eq!(v.nickname.as_deref(), Some("Niro"));
        assert!(v.master);
        assert_eq!(v.detail_info.as_ref().unwrap().body_type, "SUV");
    }

    #[test]
    fn test_minimal_record() {
        let vehicles = decode_vehicles(&body(json!({
            "retCode": "S",
            "resMsg": {"vehicles": [{"vehicleId": "v-2"}]}
        })))
        .unwrap();
        assert_eq!(vehicles[0].id, "v-2");
        assert_eq!(vehicles[0].vin, "");
        assert_eq!(vehicles[0].detail_info, None);
    }

    #[test]
    fn test_empty_list_is_no_vehicle_found() {
        let result = decode_vehicles(&body(json!({"retCode": "S", "resMsg": {"vehicles": []}})));
        assert!(matches!(result, Err(CoreError::NoVehicleFound)));
    }

    #[test]
    fn test_failure_code_is_not_authenticated() {
        let result = decode_vehicles(&body(json!({"retCode": "F", "resMsg": {"vehicles": []}})));
        assert!(matches!(result, Err(CoreError::NotAuthenticated)));
    }
}
