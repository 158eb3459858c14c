use crux_core::{render::render, Command};

use crate::commands::timer::TimerOutput;
use crate::events::{Event, ScanEvent};
use crate::model::Model;
use crate::types::{
    merge_scan_results, OutboundMessage, PageState, ScanControls, TickOutcome, TimerId, TimerRole,
};
use crate::{Effect, TimerCmd};

use super::socket;

/// Handle scan events: user refresh and timer expiries
pub fn handle(event: ScanEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ScanEvent::Refresh => {
            if model.controls.refresh_disabled || model.page == PageState::Saved {
                return Command::done();
            }
            start(model)
        }
        ScanEvent::TimerResponse(TimerOutput::Fired { id }) => match model.scan.role_of(id) {
            TimerRole::Tick => handle_tick(model),
            TimerRole::Timeout => handle_timeout(id, model),
            TimerRole::Stale => {
                log::debug!("Ignoring stale timer {id:?}");
                Command::done()
            }
        },
        ScanEvent::TimerResponse(TimerOutput::Cancelled { .. }) => Command::done(),
    }
}

/// Start a scan cycle, cancelling the timers of any cycle still running
pub fn start(model: &mut Model) -> Command<Effect, Event> {
    let settings = model.scan_settings;
    let tick = model.allocate_timer();
    let timeout = model.allocate_timer();

    let stale = model.scan.start(settings.timeout_seconds, tick, timeout);
    model.controls = ScanControls::locked(settings.timeout_seconds);

    let request = socket::send(OutboundMessage::ScanWifi, model);

    Command::all(
        cancel_all(stale, None)
            .chain([
                render(),
                request,
                arm(tick, settings.tick_millis),
                arm(timeout, settings.timeout_millis()),
            ])
            .collect::<Vec<_>>(),
    )
}

/// Scan results arrived: rebuild the selection list and release the controls
pub fn complete(ssids: &[String], model: &mut Model) -> Command<Effect, Event> {
    let armed = model.scan.finish();
    model.ssid_options = merge_scan_results(ssids, &model.saved_ssid);
    model.controls.release();

    Command::all(cancel_all(armed, None).chain([render()]).collect::<Vec<_>>())
}

/// Abandon a running cycle without touching the page
pub fn stop(model: &mut Model) -> Command<Effect, Event> {
    let armed = model.scan.finish();
    Command::all(cancel_all(armed, None).collect::<Vec<_>>())
}

fn handle_tick(model: &mut Model) -> Command<Effect, Event> {
    match model.scan.tick() {
        Some(TickOutcome::Countdown(seconds)) => {
            let next = model.allocate_timer();
            model.scan.arm_tick(next);
            model.controls.set_countdown(seconds);
            Command::all([render(), arm(next, model.scan_settings.tick_millis)])
        }
        Some(TickOutcome::Exhausted) | None => Command::done(),
    }
}

fn handle_timeout(fired: TimerId, model: &mut Model) -> Command<Effect, Event> {
    log::warn!("Scan timeout - restoring UI");
    let armed = model.scan.finish();
    model.controls.release();

    Command::all(cancel_all(armed, Some(fired)).chain([render()]).collect::<Vec<_>>())
}

fn arm(id: TimerId, millis: u64) -> Command<Effect, Event> {
    TimerCmd::start(id, millis)
        .build()
        .then_send(|output| Event::Scan(ScanEvent::TimerResponse(output)))
}

fn cancel_all(
    timers: Vec<TimerId>,
    except: Option<TimerId>,
) -> impl Iterator<Item = Command<Effect, Event>> {
    timers
        .into_iter()
        .filter(move |id| Some(*id) != except)
        .map(|id| {
            TimerCmd::cancel(id)
                .build()
                .then_send(|output| Event::Scan(ScanEvent::TimerResponse(output)))
        })
}
