use serde::{Deserialize, Serialize};

/// State of the socket to the device
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
}

/// Which panel the page shows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PageState {
    /// The editable configuration form
    #[default]
    Editing,
    /// The device acknowledged a save and is restarting; nothing is editable anymore
    Saved,
}
