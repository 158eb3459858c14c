use serde::{Deserialize, Serialize};

use crate::types::config::normalize_port;
use crate::types::ConfigSnapshot;

pub const ERR_EMPTY: &str = "Can't be empty.";
pub const ERR_NOT_A_NUMBER: &str = "Must be a number.";

/// Input fields of the configuration form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ConfigField {
    SsidName,
    SsidPassword,
    MqttServer,
    MqttServerPort,
    MqttUsername,
    MqttPassword,
    MqttClientId,
    MqttTopic,
}

impl ConfigField {
    /// Element id of the input in the page
    pub fn element_id(self) -> &'static str {
        match self {
            Self::SsidName => "ssidNames",
            Self::SsidPassword => "ssidPassword",
            Self::MqttServer => "mqttServer",
            Self::MqttServerPort => "mqttServerPort",
            Self::MqttUsername => "mqttUsername",
            Self::MqttPassword => "mqttPassword",
            Self::MqttClientId => "mqttClientId",
            Self::MqttTopic => "mqttTopic",
        }
    }
}

/// Checkbox features of the controller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FeatureToggle {
    Rgb,
    Buzzer,
}

/// Fields checked on submit, in page order
pub const FORM_FIELDS: [(ConfigField, bool); 8] = [
    (ConfigField::SsidName, true),
    (ConfigField::SsidPassword, false),
    (ConfigField::MqttServer, true),
    (ConfigField::MqttServerPort, true),
    (ConfigField::MqttUsername, false),
    (ConfigField::MqttPassword, false),
    (ConfigField::MqttClientId, true),
    (ConfigField::MqttTopic, true),
];

/// Inline error shown next to a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: ConfigField,
    pub message: String,
}

/// Current values of the text inputs and checkboxes.
///
/// The network name is not here: it is whatever entry of the selection list is
/// selected, see [`crate::model::Model::selected_ssid`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    pub ssid_password: String,
    pub mqtt_server: String,
    pub mqtt_server_port: String,
    pub mqtt_username: String,
    pub mqtt_password: String,
    pub mqtt_client_id: String,
    pub mqtt_topic: String,
    pub rgb: bool,
    pub buzzer: bool,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self::from(&ConfigSnapshot::default())
    }
}

impl From<&ConfigSnapshot> for ConfigForm {
    fn from(snapshot: &ConfigSnapshot) -> Self {
        Self {
            ssid_password: snapshot.ssid_password.clone(),
            mqtt_server: snapshot.mqtt_server.clone(),
            mqtt_server_port: snapshot.mqtt_server_port.to_string(),
            mqtt_username: snapshot.mqtt_username.clone(),
            mqtt_password: snapshot.mqtt_password.clone(),
            mqtt_client_id: snapshot.mqtt_client_id.clone(),
            mqtt_topic: snapshot.mqtt_topic.clone(),
            rgb: snapshot.rgb,
            buzzer: snapshot.buzzer,
        }
    }
}

impl ConfigForm {
    /// Blank text inputs with every feature switched on
    pub fn cleared() -> Self {
        Self {
            ssid_password: String::new(),
            mqtt_server: String::new(),
            mqtt_server_port: String::new(),
            mqtt_username: String::new(),
            mqtt_password: String::new(),
            mqtt_client_id: String::new(),
            mqtt_topic: String::new(),
            rgb: true,
            buzzer: true,
        }
    }

    /// Mutable access to a text input; `None` for the network selection.
    pub fn text_mut(&mut self, field: ConfigField) -> Option<&mut String> {
        match field {
            ConfigField::SsidName => None,
            ConfigField::SsidPassword => Some(&mut self.ssid_password),
            ConfigField::MqttServer => Some(&mut self.mqtt_server),
            ConfigField::MqttServerPort => Some(&mut self.mqtt_server_port),
            ConfigField::MqttUsername => Some(&mut self.mqtt_username),
            ConfigField::MqttPassword => Some(&mut self.mqtt_password),
            ConfigField::MqttClientId => Some(&mut self.mqtt_client_id),
            ConfigField::MqttTopic => Some(&mut self.mqtt_topic),
        }
    }

    pub fn set_toggle(&mut self, toggle: FeatureToggle, enabled: bool) {
        match toggle {
            FeatureToggle::Rgb => self.rgb = enabled,
            FeatureToggle::Buzzer => self.buzzer = enabled,
        }
    }

    fn value<'a>(&'a self, field: ConfigField, ssid: &'a str) -> &'a str {
        match field {
            ConfigField::SsidName => ssid,
            ConfigField::SsidPassword => &self.ssid_password,
            ConfigField::MqttServer => &self.mqtt_server,
            ConfigField::MqttServerPort => &self.mqtt_server_port,
            ConfigField::MqttUsername => &self.mqtt_username,
            ConfigField::MqttPassword => &self.mqtt_password,
            ConfigField::MqttClientId => &self.mqtt_client_id,
            ConfigField::MqttTopic => &self.mqtt_topic,
        }
    }

    /// Check every field in [`FORM_FIELDS`] order.
    ///
    /// Returns one error per failing field; an empty list means the form can be
    /// submitted.
    pub fn validate(&self, ssid: &str) -> Vec<FieldError> {
        FORM_FIELDS
            .iter()
            .filter_map(|&(field, required)| {
                check_field(field, required, self.value(field, ssid)).map(|message| FieldError {
                    field,
                    message: message.to_string(),
                })
            })
            .collect()
    }

    /// Assemble the configuration to send, applying defaults to empty values.
    pub fn to_snapshot(&self, ssid: &str) -> ConfigSnapshot {
        ConfigSnapshot {
            ssid_name: ssid.to_string(),
            ssid_password: self.ssid_password.clone(),
            mqtt_server: self.mqtt_server.clone(),
            mqtt_server_port: normalize_port(self.mqtt_server_port.trim().parse().ok()),
            mqtt_username: self.mqtt_username.clone(),
            mqtt_password: self.mqtt_password.clone(),
            mqtt_client_id: self.mqtt_client_id.clone(),
            mqtt_topic: self.mqtt_topic.clone(),
            rgb: self.rgb,
            buzzer: self.buzzer,
        }
    }
}

fn check_field(field: ConfigField, required: bool, value: &str) -> Option<&'static str> {
    let value = value.trim();

    if field == ConfigField::MqttServerPort {
        return if value.is_empty() {
            Some(ERR_EMPTY)
        } else if value.parse::<u16>().is_err() {
            Some(ERR_NOT_A_NUMBER)
        } else {
            None
        };
    }

    (required && value.is_empty()).then_some(ERR_EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ConfigForm {
        ConfigForm {
            ssid_password: "secret".into(),
            mqtt_server: "broker.local".into(),
            mqtt_server_port: "1883".into(),
            mqtt_username: String::new(),
            mqtt_password: String::new(),
            mqtt_client_id: "ABC123".into(),
            mqtt_topic: "garden/pot1".into(),
            rgb: false,
            buzzer: true,
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(filled_form().validate("HomeNet").is_empty());
    }

    #[test]
    fn each_required_field_fails_when_blank() {
        let required: Vec<ConfigField> = FORM_FIELDS
            .iter()
            .filter(|(_, required)| *required)
            .map(|(field, _)| *field)
            .collect();

        for field in required {
            let mut form = filled_form();
            let mut ssid = "HomeNet";
            match form.text_mut(field) {
                Some(value) => *value = "   ".into(),
                None => ssid = " ",
            }

            let errors = form.validate(ssid);

            assert_eq!(
                errors,
                vec![FieldError {
                    field,
                    message: ERR_EMPTY.into()
                }],
                "{field:?}"
            );
        }
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let mut form = filled_form();
        form.ssid_password.clear();
        form.mqtt_username.clear();
        form.mqtt_password.clear();

        assert!(form.validate("HomeNet").is_empty());
    }

    #[test]
    fn port_validation_messages() {
        for (port, expected) in [
            ("1883", None),
            (" 8883 ", None),
            ("", Some(ERR_EMPTY)),
            ("abc", Some(ERR_NOT_A_NUMBER)),
            ("70000", Some(ERR_NOT_A_NUMBER)),
            ("-5", Some(ERR_NOT_A_NUMBER)),
        ] {
            let mut form = filled_form();
            form.mqtt_server_port = port.into();

            let errors = form.validate("HomeNet");

            assert_eq!(
                errors.first().map(|e| e.message.as_str()),
                expected,
                "port {port:?}"
            );
        }
    }

    #[test]
    fn errors_follow_page_order() {
        let errors = ConfigForm::cleared().validate("");
        let fields: Vec<ConfigField> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![
                ConfigField::SsidName,
                ConfigField::MqttServer,
                ConfigField::MqttServerPort,
                ConfigField::MqttClientId,
                ConfigField::MqttTopic,
            ]
        );
    }

    #[test]
    fn snapshot_round_trips_through_form() {
        let snapshot = ConfigSnapshot {
            ssid_name: "HomeNet".into(),
            mqtt_server: "broker.local".into(),
            mqtt_server_port: 8883,
            rgb: true,
            ..Default::default()
        };

        let form = ConfigForm::from(&snapshot);

        assert_eq!(form.mqtt_server_port, "8883");
        assert_eq!(form.to_snapshot("HomeNet"), snapshot);
    }

    #[test]
    fn zero_port_is_sent_as_default() {
        let mut form = filled_form();
        form.mqtt_server_port = "0".into();

        assert_eq!(form.to_snapshot("HomeNet").mqtt_server_port, 1883);
    }

    #[test]
    fn cleared_form_enables_features() {
        let form = ConfigForm::cleared();
        assert!(form.rgb);
        assert!(form.buzzer);
        assert!(form.mqtt_server_port.is_empty());
    }
}
