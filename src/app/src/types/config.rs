use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DEFAULT_MQTT_PORT;

/// Device configuration as stored on and reported by the controller.
///
/// Decoding is lenient in the same way the device page always was: a missing or
/// `null` field takes its default, and a broker port that is zero or does not fit
/// a port number falls back to [`DEFAULT_MQTT_PORT`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid_password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mqtt_server: String,
    #[serde(default = "default_mqtt_port", deserialize_with = "port_or_default")]
    pub mqtt_server_port: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mqtt_username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mqtt_password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mqtt_client_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mqtt_topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rgb: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buzzer: bool,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            ssid_name: String::new(),
            ssid_password: String::new(),
            mqtt_server: String::new(),
            mqtt_server_port: DEFAULT_MQTT_PORT,
            mqtt_username: String::new(),
            mqtt_password: String::new(),
            mqtt_client_id: String::new(),
            mqtt_topic: String::new(),
            rgb: false,
            buzzer: false,
        }
    }
}

fn default_mqtt_port() -> u16 {
    DEFAULT_MQTT_PORT
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let port = Option::<i64>::deserialize(deserializer)?;
    Ok(normalize_port(port))
}

/// Maps a raw port number to a usable broker port.
pub fn normalize_port(port: Option<i64>) -> u16 {
    port.and_then(|p| u16::try_from(p).ok())
        .filter(|p| *p != 0)
        .unwrap_or(DEFAULT_MQTT_PORT)
}
