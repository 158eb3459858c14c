use crux_core::{render::render, Command};

use crate::events::{Event, FormEvent};
use crate::model::Model;
use crate::types::{
    saved_only, ConfigField, ConfigForm, ConfigSnapshot, OutboundMessage, PageState,
};
use crate::Effect;

use super::socket;

/// Handle form input, submit and reset
pub fn handle(event: FormEvent, model: &mut Model) -> Command<Effect, Event> {
    if model.page == PageState::Saved {
        log::debug!("Configuration already saved, ignoring {event:?}");
        return Command::done();
    }

    match event {
        FormEvent::FieldChanged {
            field: ConfigField::SsidName,
            value,
        }
        | FormEvent::SsidSelected(value) => {
            if model.controls.ssid_select_disabled || !model.select_ssid(&value) {
                return Command::done();
            }
            render()
        }
        FormEvent::FieldChanged { field, value } => match model.form.text_mut(field) {
            Some(current) if *current != value => {
                *current = value;
                render()
            }
            _ => Command::done(),
        },
        FormEvent::ToggleChanged { toggle, enabled } => {
            model.form.set_toggle(toggle, enabled);
            render()
        }
        FormEvent::Submit => handle_submit(model),
        FormEvent::Reset => {
            if model.controls.reset_disabled {
                return Command::done();
            }
            reset_form_fields(model);
            render()
        }
    }
}

/// Fill the form from a configuration reported by the device
pub fn populate(snapshot: &ConfigSnapshot, model: &mut Model) {
    model.saved_ssid = snapshot.ssid_name.clone();
    model.ssid_options = saved_only(&model.saved_ssid);
    model.form = ConfigForm::from(snapshot);
}

/// Check all fields, record inline errors and request focus on the first one.
///
/// Returns whether the form can be submitted.
pub fn validate(model: &mut Model) -> bool {
    let errors = model.form.validate(model.selected_ssid());
    model.focus = errors.first().map(|e| e.field);
    model.field_errors = errors;
    model.field_errors.is_empty()
}

/// Clear every input, switch all features on and forget the saved network
pub fn reset_form_fields(model: &mut Model) {
    model.form = ConfigForm::cleared();
    model.ssid_options.clear();
    model.field_errors.clear();
    model.focus = None;
    model.saved_ssid.clear();
}

fn handle_submit(model: &mut Model) -> Command<Effect, Event> {
    if model.controls.submit_disabled {
        return Command::done();
    }

    if !validate(model) {
        if let Some(field) = model.focus {
            log::warn!(
                "Validation failed at {}. Please fill in all fields.",
                field.element_id()
            );
        }
        return render();
    }

    let config = model.form.to_snapshot(model.selected_ssid());
    log::debug!("Submitting configuration for network {:?}", config.ssid_name);
    let request = socket::send(OutboundMessage::SaveConfig(config), model);

    Command::all([render(), request])
}
