use serde::{Deserialize, Serialize};

use crate::config::{scanning_label, REFRESH_LABEL};

/// Identifier of a timer armed by the core
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Which timer of the running cycle an expiry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRole {
    Tick,
    Timeout,
    /// Not part of the running cycle (cancelled, or from an earlier cycle)
    Stale,
}

/// Outcome of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting; the label shows the remaining seconds and the next tick is armed
    Countdown(u32),
    /// Countdown reached zero; the timeout is the only timer left
    Exhausted,
}

/// Network scan workflow state
///
/// `Idle` doubles as the "no timers armed" sentinel: every armed timer id lives
/// inside `Scanning`, so leaving that state is the only way to drop them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScanState {
    #[default]
    Idle,
    Scanning {
        seconds_remaining: u32,
        tick_timer: Option<TimerId>,
        timeout_timer: TimerId,
    },
}

impl ScanState {
    pub fn is_scanning(&self) -> bool {
        matches!(self, Self::Scanning { .. })
    }

    /// Timers armed by the current cycle
    pub fn armed_timers(&self) -> Vec<TimerId> {
        match self {
            Self::Idle => Vec::new(),
            Self::Scanning {
                tick_timer,
                timeout_timer,
                ..
            } => tick_timer.iter().copied().chain([*timeout_timer]).collect(),
        }
    }

    /// Enter `Scanning` with freshly armed timers.
    ///
    /// Returns the timers of a cycle that was still running, which the caller
    /// must cancel before arming the new ones.
    pub fn start(
        &mut self,
        seconds: u32,
        tick_timer: TimerId,
        timeout_timer: TimerId,
    ) -> Vec<TimerId> {
        let stale = self.armed_timers();
        *self = Self::Scanning {
            seconds_remaining: seconds,
            tick_timer: Some(tick_timer),
            timeout_timer,
        };
        stale
    }

    /// Classify an expired timer against the running cycle.
    pub fn role_of(&self, id: TimerId) -> TimerRole {
        match self {
            Self::Scanning {
                tick_timer: Some(tick),
                ..
            } if *tick == id => TimerRole::Tick,
            Self::Scanning { timeout_timer, .. } if *timeout_timer == id => TimerRole::Timeout,
            _ => TimerRole::Stale,
        }
    }

    /// Advance the countdown by one tick, consuming the tick timer.
    ///
    /// Returns `None` when no scan is running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let Self::Scanning {
            seconds_remaining,
            tick_timer,
            ..
        } = self
        else {
            return None;
        };

        *tick_timer = None;
        *seconds_remaining = seconds_remaining.saturating_sub(1);
        if *seconds_remaining > 0 {
            Some(TickOutcome::Countdown(*seconds_remaining))
        } else {
            Some(TickOutcome::Exhausted)
        }
    }

    /// Record the timer armed for the next tick of the running cycle.
    pub fn arm_tick(&mut self, next_tick: TimerId) {
        if let Self::Scanning { tick_timer, .. } = self {
            *tick_timer = Some(next_tick);
        }
    }

    /// Return to `Idle`, handing back every timer that still needs cancelling.
    pub fn finish(&mut self) -> Vec<TimerId> {
        let armed = self.armed_timers();
        *self = Self::Idle;
        armed
    }
}

/// Enabled state of the controls a scan locks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanControls {
    pub refresh_disabled: bool,
    pub ssid_select_disabled: bool,
    pub submit_disabled: bool,
    pub reset_disabled: bool,
    pub refresh_label: String,
}

impl Default for ScanControls {
    fn default() -> Self {
        Self {
            refresh_disabled: false,
            ssid_select_disabled: false,
            submit_disabled: false,
            reset_disabled: false,
            refresh_label: REFRESH_LABEL.to_string(),
        }
    }
}

impl ScanControls {
    /// Controls while a scan counts down from `seconds`
    pub fn locked(seconds: u32) -> Self {
        Self {
            refresh_disabled: true,
            ssid_select_disabled: true,
            submit_disabled: true,
            reset_disabled: true,
            refresh_label: scanning_label(seconds),
        }
    }

    pub fn set_countdown(&mut self, seconds: u32) {
        self.refresh_label = scanning_label(seconds);
    }

    /// Re-enable everything and restore the default label
    pub fn release(&mut self) {
        *self = Self::default();
    }
}

/// One entry of the network selection list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SsidOption {
    pub name: String,
    pub selected: bool,
}

impl SsidOption {
    pub fn new(name: impl Into<String>, selected: bool) -> Self {
        Self {
            name: name.into(),
            selected,
        }
    }
}

/// Build the selection list from scan results and the saved network name.
///
/// A saved name missing from the scan is inserted first and selected. Otherwise
/// the first scanned entry equal to the saved name is the selected one.
pub fn merge_scan_results(ssids: &[String], saved_ssid: &str) -> Vec<SsidOption> {
    let saved_found = !saved_ssid.is_empty() && ssids.iter().any(|s| s == saved_ssid);
    let mut options = Vec::with_capacity(ssids.len() + 1);

    if !saved_ssid.is_empty() && !saved_found {
        options.push(SsidOption::new(saved_ssid, true));
    }

    let mut selected = !saved_found;
    for ssid in ssids {
        let is_saved = !selected && ssid == saved_ssid;
        selected |= is_saved;
        options.push(SsidOption::new(ssid.as_str(), is_saved));
    }

    options
}

/// Selection list shown before the first scan finishes
pub fn saved_only(saved_ssid: &str) -> Vec<SsidOption> {
    if saved_ssid.is_empty() {
        Vec::new()
    } else {
        vec![SsidOption::new(saved_ssid, true)]
    }
}
