use serde::{Deserialize, Serialize};

use crate::commands::socket::SocketOutput;
use crate::commands::timer::TimerOutput;
use crate::types::{ConfigField, FeatureToggle};

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page loaded; `host` is the host the page was served from
    Initialize { host: String },
    Socket(SocketEvent),
    Scan(ScanEvent),
    Form(FormEvent),
    Ui(UiEvent),
}

/// Device socket events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// Raw text frame received from the device
    FrameReceived(String),
    /// The shell noticed the connection went away
    Closed,

    // Socket responses (internal events, skipped from serialization)
    #[serde(skip)]
    ConnectResponse(SocketOutput),
    #[serde(skip)]
    SendResponse(SocketOutput),
}

/// Network scan events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// User asked for a fresh network list
    Refresh,

    // Timer responses (internal events)
    #[serde(skip)]
    TimerResponse(TimerOutput),
}

/// Form input events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged { field: ConfigField, value: String },
    ToggleChanged { toggle: FeatureToggle, enabled: bool },
    SsidSelected(String),
    Submit,
    Reset,
}

/// UI housekeeping events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearError,
    /// The shell moved focus to the requested field
    FocusHandled,
}
