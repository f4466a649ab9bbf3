//! Vehicle status snapshot
//!
//! The status payload mirrors the car's head unit state and is deeply
//! nested. Only the handful of paths below are read; every other field is
//! ignored and any missing field falls back to its default.
//!
//! | Snapshot field | Payload path |
//! |---|---|
//! | door lock | `resMsg.doorLock` |
//! | charging | `resMsg.evStatus.batteryCharge` |
//! | state of charge | `resMsg.evStatus.batteryStatus` |
//! | plug state | `resMsg.evStatus.batteryPlugin` |
//! | range | `resMsg.evStatus.drvDistance[0].rangeByFuel.evModeRange.value` |
//! | AC/DC targets | `resMsg.evStatus.reservChargeInfos.targetSOClist[]` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::CoreResult;

/// Charging plug type of a target state-of-charge entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlugType {
    Ac,
    Dc,
}

impl TryFrom<i64> for PlugType {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlugType::Ac),
            1 => Ok(PlugType::Dc),
            other => Err(other),
        }
    }
}

/// Immutable status snapshot of one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleStatus {
    updated_at: DateTime<Utc>,
    door_is_locked: bool,
    is_charging: bool,
    battery_soc: i32,
    range_left: i32,
    target_soc_ac: i32,
    target_soc_dc: i32,
    /// Raw `batteryPlugin`, 0 when unplugged
    plug_state: i32,
}

impl VehicleStatus {
    /// Decode time of the snapshot, not the vendor's report time
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn door_is_locked(&self) -> bool {
        self.door_is_locked
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    /// Battery state of charge in percent
    pub fn soc(&self) -> i32 {
        self.battery_soc
    }

    pub fn range_left(&self) -> i32 {
        self.range_left
    }

    /// Range extrapolated to a full battery.
    ///
    /// Integer arithmetic, division first: `range_left / soc * 100`,
    /// saturating at the bounds of `i32`.
    pub fn max_range(&self) -> i32 {
        if self.battery_soc <= 0 {
            return 0;
        }
        (self.range_left / self.battery_soc).saturating_mul(100)
    }

    pub fn target_soc_ac(&self) -> i32 {
        self.target_soc_ac
    }

    pub fn target_soc_dc(&self) -> i32 {
        self.target_soc_dc
    }

    pub fn plug_state(&self) -> i32 {
        self.plug_state
    }

    pub fn is_plugged_in(&self) -> bool {
        self.plug_state != 0
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StatusMsg {
    door_lock: bool,
    ev_status: EvStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EvStatus {
    battery_charge: bool,
    battery_status: i32,
    battery_plugin: i32,
    drv_distance: Vec<DrvDistance>,
    reserv_charge_infos: ReservChargeInfos,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DrvDistance {
    range_by_fuel: RangeByFuel,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RangeByFuel {
    ev_mode_range: Measure,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Measure {
    value: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReservChargeInfos {
    #[serde(rename = "targetSOClist")]
    target_soc_list: Vec<TargetSoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TargetSoc {
    #[serde(rename = "targetSOClevel")]
    level: i32,
    #[serde(rename = "plugType")]
    plug_type: i64,
}

/// Decode a status response, stamping the snapshot with the current time
pub fn decode_status(body: &[u8]) -> CoreResult<VehicleStatus> {
    decode_status_at(body, Utc::now())
}

/// Decode a status response with an explicit snapshot time
pub fn decode_status_at(body: &[u8], updated_at: DateTime<Utc>) -> CoreResult<VehicleStatus> {
    let msg: StatusMsg = Envelope::parse(body)?.into_payload()?;
    let ev = msg.ev_status;

    let range_left = ev
        .drv_distance
        .first()
        .map(|d| d.range_by_fuel.ev_mode_range.value)
        .unwrap_or(0);

    let mut target_soc_ac = 0;
    let mut target_soc_dc = 0;
    // Later entries overwrite earlier ones of the same plug type
    for target in &ev.reserv_charge_infos.target_soc_list {
        match PlugType::try_from(target.plug_type) {
            Ok(PlugType::Ac) => target_soc_ac = target.level,
            Ok(PlugType::Dc) => target_soc_dc = target.level,
            Err(other) => tracing::debug!(plug_type = other, "Ignoring unknown plug type"),
        }
    }

    Ok(VehicleStatus {
        updated_at,
        door_is_locked: msg.door_lock,
        is_charging: ev.battery_charge,
        battery_soc: ev.battery_status,
        range_left,
        target_soc_ac,
        target_soc_dc,
        plug_state: ev.battery_plugin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn decode(value: Value) -> CoreResult<VehicleStatus> {
        decode_status(value.to_string().as_bytes())
    }

    fn ev_status(soc: i32, range: i32) -> Value {
        json!({
            "retCode": "S",
            "resMsg": {
                "evStatus": {
                    "batteryStatus": soc,
                    "drvDistance": [{
                        "rangeByFuel": {"evModeRange": {"value": range, "unit": 1}},
                        "type": 2
                    }]
                }
            }
        })
    }

    #[test]
    fn test_full_payload() {
        let status = decode(json!({
            "retCode": "S",
            "resCode": "0000",
            "resMsg": {
                "airCtrlOn": false,
                "engine": false,
                "doorLock": true,
                "doorOpen": {"frontLeft": 0, "frontRight": 0, "backLeft": 0, "backRight": 0},
                "trunkOpen": false,
                "airTemp": {"value": "01H", "unit": 0, "hvacTempType": 1},
                "evStatus": {
                    "batteryCharge": true,
                    "batteryStatus": 64,
                    "batteryPlugin": 1,
                    "remainTime2": {"atc": {"value": 95, "unit": 1}},
                    "drvDistance": [{
                        "rangeByFuel": {
                            "evModeRange": {"value": 250, "unit": 1},
                            "totalAvailableRange": {"value": 250, "unit": 1}
                        },
                        "type": 2
                    }],
                    "reservChargeInfos": {
                        "reservFlag": 0,
                        "targetSOClist": [
                            {"targetSOClevel": 80, "plugType": 0},
                            {"targetSOClevel": 90, "plugType": 1}
                        ]
                    }
                },
                "battery": {"batSoc": 88, "batState": 0},
                "time": "20210101120000"
            },
            "msgId": "m-1"
        }))
        .unwrap();

        assert!(status.door_is_locked());
        assert!(status.is_charging());
        assert_eq!(status.soc(), 64);
        assert_eq!(status.range_left(), 250);
        assert_eq!(status.plug_state(), 1);
        assert!(status.is_plugged_in());
        assert_eq!(status.target_soc_ac(), 80);
        assert_eq!(status.target_soc_dc(), 90);
    }

    #[test]
    fn test_max_range() {
        assert_eq!(decode(ev_status(50, 150)).unwrap().max_range(), 300);
        assert_eq!(decode(ev_status(0, 150)).unwrap().max_range(), 0);
    }

    #[test]
    fn test_max_range_divides_first() {
        // 149 / 50 truncates to 2 before scaling
        assert_eq!(decode(ev_status(50, 149)).unwrap().max_range(), 200);
    }

    #[test]
    fn test_max_range_saturates() {
        let status = decode(ev_status(1, 30_000_000)).unwrap();
        assert_eq!(status.range_left(), 30_000_000);
        assert_eq!(status.max_range(), i32::MAX);
        assert_eq!(decode(ev_status(1, -30_000_000)).unwrap().max_range(), i32::MIN);
    }

    #[test]
    fn test_last_target_wins() {
        let status = decode(json!({
            "retCode": "S",
            "resMsg": {"evStatus": {"reservChargeInfos": {"targetSOClist": [
                {"targetSOClevel": 70, "plugType": 0},
                {"targetSOClevel": 80, "plugType": 1},
                {"targetSOClevel": 90, "plugType": 0},
                {"targetSOClevel": 10, "plugType": 7}
            ]}}}
        }))
        .unwrap();
        assert_eq!(status.target_soc_ac(), 90);
        assert_eq!(status.target_soc_dc(), 80);
    }

    #[test]
    fn test_missing_fields_default() {
        let status = decode(json!({"retCode": "S", "resMsg": {}})).unwrap();
        assert!(!status.door_is_locked());
        assert!(!status.is_charging());
        assert_eq!(status.soc(), 0);
        assert_eq!(status.range_left(), 0);
        assert_eq!(status.target_soc_ac(), 0);
        assert_eq!(status.target_soc_dc(), 0);
        assert!(!status.is_plugged_in());
    }

    #[test]
    fn test_empty_distance_list() {
        let status = decode(json!({
            "retCode": "S",
            "resMsg": {"evStatus": {"batteryStatus": 40, "drvDistance": []}}
        }))
        .unwrap();
        assert_eq!(status.range_left(), 0);
        assert_eq!(status.max_range(), 0);
    }

    #[test]
    fn test_failure_code() {
        let result = decode(json!({"retCode": "F", "resCode": "5091", "resMsg": null}));
        assert!(matches!(result, Err(CoreError::NotAuthenticated)));
    }

    #[test]
    fn test_timestamp_is_decode_time() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let body = json!({"retCode": "S", "resMsg": {"time": "20210101120000"}}).to_string();
        let status = decode_status_at(body.as_bytes(), at).unwrap();
        assert_eq!(status.updated_at(), at);
    }

    #[test]
    fn test_plug_type_conversion() {
        assert_eq!(PlugType::try_from(0), Ok(PlugType::Ac));
        assert_eq!(PlugType::try_from(1), Ok(PlugType::Dc));
        assert_eq!(PlugType::try_from(2), Err(2));
    }
}
