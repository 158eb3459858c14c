//! Socket frames exchanged with the device.
//!
//! Inbound frames are tagged by an `action` field. Only `wifi_list` and
//! `save_ack` are recognised; every other frame, with or without a tag, is the
//! device's configuration snapshot (the firmware tags it `config_data`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::ConfigSnapshot;

const ACTION_WIFI_LIST: &str = "wifi_list";
const ACTION_SAVE_ACK: &str = "save_ack";

/// A decoded frame received from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Result of a network scan, in scan order
    WifiList { ssids: Vec<String> },
    /// The device accepted a new configuration and is applying it
    SaveAck,
    /// The configuration currently stored on the device
    Snapshot(ConfigSnapshot),
}

#[derive(Deserialize)]
struct WifiListPayload {
    #[serde(default)]
    ssids: Vec<String>,
}

impl InboundMessage {
    /// Parses a raw text frame.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(raw).map_err(ProtocolError::InvalidJson)?;
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string);

        let shape_error = |source: serde_json::Error| ProtocolError::InvalidShape {
            action: action.clone(),
            source,
        };

        match action.as_deref() {
            Some(ACTION_WIFI_LIST) => {
                let payload: WifiListPayload =
                    serde_json::from_value(value).map_err(shape_error)?;
                Ok(Self::WifiList {
                    ssids: payload.ssids,
                })
            }
            Some(ACTION_SAVE_ACK) => Ok(Self::SaveAck),
            _ => serde_json::from_value(value)
                .map(Self::Snapshot)
                .map_err(shape_error),
        }
    }
}

/// A frame sent to the device
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutboundMessage {
    GetConfig,
    ScanWifi,
    SaveConfig(ConfigSnapshot),
}

impl OutboundMessage {
    /// Encodes the message as a JSON text frame.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Wire name of the message, for logging
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetConfig => "get_config",
            Self::ScanWifi => "scan_wifi",
            Self::SaveConfig(_) => "save_config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wifi_list_in_scan_order() {
        let msg =
            InboundMessage::parse(r#"{"action":"wifi_list","ssids":["Cafe","Office","Cafe"]}"#)
                .unwrap();

        assert_eq!(
            msg,
            InboundMessage::WifiList {
                ssids: vec!["Cafe".into(), "Office".into(), "Cafe".into()]
            }
        );
    }

    #[test]
    fn wifi_list_without_ssids_is_an_empty_scan() {
        let msg = InboundMessage::parse(r#"{"action":"wifi_list"}"#).unwrap();
        assert_eq!(msg, InboundMessage::WifiList { ssids: vec![] });
    }

    #[test]
    fn parses_save_ack_ignoring_status() {
        let msg = InboundMessage::parse(r#"{"action":"save_ack","status":"ok"}"#).unwrap();
        assert_eq!(msg, InboundMessage::SaveAck);
    }

    #[test]
    fn untagged_and_unknown_actions_are_snapshots() {
        for raw in [
            r#"{"ssidName":"HomeNet"}"#,
            r#"{"action":"config_data","ssidName":"HomeNet"}"#,
        ] {
            let InboundMessage::Snapshot(snapshot) = InboundMessage::parse(raw).unwrap() else {
                panic!("expected snapshot for {raw}");
            };
            assert_eq!(snapshot.ssid_name, "HomeNet");
            assert_eq!(snapshot.mqtt_server_port, 1883);
        }
    }

    #[test]
    fn rejects_non_json_frames() {
        assert!(matches!(
            InboundMessage::parse("not json"),
            Err(ProtocolError::InvalidJson(_))
        ));
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let err = InboundMessage::parse(r#"{"action":"wifi_list","ssids":"Cafe"}"#).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidShape { action: Some(ref a), .. } if a == "wifi_list"
        ));
    }

    #[test]
    fn encodes_requests_with_action_tag() {
        assert_eq!(
            OutboundMessage::GetConfig.encode().unwrap(),
            r#"{"action":"get_config"}"#
        );
        assert_eq!(
            OutboundMessage::ScanWifi.encode().unwrap(),
            r#"{"action":"scan_wifi"}"#
        );
    }

    #[test]
    fn save_config_flattens_snapshot_fields() {
        let snapshot = ConfigSnapshot {
            ssid_name: "HomeNet".into(),
            mqtt_server: "broker.local".into(),
            ..Default::default()
        };

        let frame = OutboundMessage::SaveConfig(snapshot).encode().unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();

        assert_eq!(value["action"], "save_config");
        assert_eq!(value["ssidName"], "HomeNet");
        assert_eq!(value["mqttServer"], "broker.local");
        assert_eq!(value["mqttServerPort"], 1883);
    }
}
