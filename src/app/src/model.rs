use serde::{Deserialize, Serialize};

use crate::config::ScanSettings;
use crate::types::*;

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Socket state
    pub connection: ConnectionState,
    pub endpoint: Option<String>,

    // Page state
    pub page: PageState,
    pub error_message: Option<String>,

    // Form state
    pub form: ConfigForm,
    pub ssid_options: Vec<SsidOption>,
    pub field_errors: Vec<FieldError>,
    /// Field the shell should scroll to and focus, set by a failed submit
    pub focus: Option<ConfigField>,

    /// Network name last reported by the device, kept across scans
    pub saved_ssid: String,

    // Scan state
    pub scan: ScanState,
    pub scan_settings: ScanSettings,
    pub controls: ScanControls,
    pub next_timer_id: u64,
}

impl Model {
    /// Value the network selection currently submits
    ///
    /// Like a browser select element, the first entry counts as selected when
    /// none is marked.
    pub fn selected_ssid(&self) -> &str {
        self.ssid_options
            .iter()
            .find(|o| o.selected)
            .or_else(|| self.ssid_options.first())
            .map_or("", |o| o.name.as_str())
    }

    /// Mark `name` as the selected network; returns false if it is not listed.
    pub fn select_ssid(&mut self, name: &str) -> bool {
        if !self.ssid_options.iter().any(|o| o.name == name) {
            return false;
        }
        let mut found = false;
        for option in &mut self.ssid_options {
            option.selected = !found && option.name == name;
            found |= option.selected;
        }
        true
    }

    /// Hand out a timer id that has never been used in this session
    pub fn allocate_timer(&mut self) -> TimerId {
        self.next_timer_id += 1;
        TimerId(self.next_timer_id)
    }

    #[cfg(test)]
    pub fn error_for(&self, field: ConfigField) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Set an error message
    pub fn set_error(&mut self, error: String) {
        self.error_message = Some(error);
    }

    /// Set an error message and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(options: &[(&str, bool)]) -> Model {
        Model {
            ssid_options: options
                .iter()
                .map(|(name, selected)| SsidOption::new(*name, *selected))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn selected_ssid_falls_back_to_first_entry() {
        assert_eq!(model_with(&[]).selected_ssid(), "");
        assert_eq!(
            model_with(&[("Cafe", false), ("Office", false)]).selected_ssid(),
            "Cafe"
        );
        assert_eq!(
            model_with(&[("Cafe", false), ("Office", true)]).selected_ssid(),
            "Office"
        );
    }

    #[test]
    fn select_ssid_moves_selection() {
        let mut model = model_with(&[("HomeNet", true), ("Cafe", false)]);

        assert!(model.select_ssid("Cafe"));
        assert_eq!(model.selected_ssid(), "Cafe");
        assert!(!model.ssid_options[0].selected);

        assert!(!model.select_ssid("Unknown"));
        assert_eq!(model.selected_ssid(), "Cafe");
    }

    #[test]
    fn timer_ids_are_unique() {
        let mut model = Model::default();
        let a = model.allocate_timer();
        let b = model.allocate_timer();
        assert_ne!(a, b);
    }
}
