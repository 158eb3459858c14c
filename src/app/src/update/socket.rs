use crux_core::{render::render, Command};

use crate::commands::socket::SocketOutput;
use crate::config::build_ws_url;
use crate::events::{Event, SocketEvent};
use crate::model::Model;
use crate::types::{ConnectionState, InboundMessage, OutboundMessage, PageState};
use crate::update_field;
use crate::{Effect, SocketCmd};

use super::{form, scan};

/// Handle socket events: connection lifecycle and inbound frames
pub fn handle(event: SocketEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SocketEvent::ConnectResponse(output) => handle_connect_response(output, model),
        SocketEvent::SendResponse(output) => {
            if let SocketOutput::Error { message } = output {
                log::warn!("Failed to send frame: {message}");
            }
            Command::done()
        }
        SocketEvent::Closed => {
            log::warn!("WebSocket closed");
            update_field!(model.connection, ConnectionState::Closed)
        }
        SocketEvent::FrameReceived(raw) => match InboundMessage::parse(&raw) {
            Ok(message) => dispatch(message, model),
            Err(e) => {
                log::warn!("Ignoring frame: {e}");
                Command::done()
            }
        },
    }
}

/// Open the single connection of this session
pub fn connect(host: &str, model: &mut Model) -> Command<Effect, Event> {
    if model.connection != ConnectionState::Closed || model.endpoint.is_some() {
        log::debug!("Socket already initialized, ignoring");
        return Command::done();
    }

    let url = build_ws_url(host);
    log::info!("Connecting to {url}");
    model.connection = ConnectionState::Connecting;
    model.endpoint = Some(url.clone());

    Command::all([
        render(),
        SocketCmd::connect(url)
            .build()
            .then_send(|output| Event::Socket(SocketEvent::ConnectResponse(output))),
    ])
}

/// Send a message if the socket is open; otherwise it is dropped.
pub fn send(message: OutboundMessage, model: &Model) -> Command<Effect, Event> {
    if model.connection != ConnectionState::Open {
        log::debug!("Socket not open, dropping {}", message.action());
        return Command::done();
    }

    match message.encode() {
        Ok(frame) => SocketCmd::send(frame)
            .build()
            .then_send(|output| Event::Socket(SocketEvent::SendResponse(output))),
        Err(e) => {
            log::error!("{e}");
            Command::done()
        }
    }
}

fn handle_connect_response(output: SocketOutput, model: &mut Model) -> Command<Effect, Event> {
    match output {
        SocketOutput::Opened => {
            if model.connection == ConnectionState::Open {
                return Command::done();
            }
            log::info!("WebSocket connected");
            model.connection = ConnectionState::Open;
            let request_config = send(OutboundMessage::GetConfig, model);
            Command::all([render(), request_config])
        }
        SocketOutput::Closed => update_field!(model.connection, ConnectionState::Closed),
        SocketOutput::Error { message } => {
            log::error!("WebSocket connection failed: {message}");
            model.connection = ConnectionState::Closed;
            model.set_error_and_render(format!("Connection to device failed: {message}"))
        }
        SocketOutput::Sent => Command::done(),
    }
}

/// Route a decoded frame by its action
fn dispatch(message: InboundMessage, model: &mut Model) -> Command<Effect, Event> {
    if model.page == PageState::Saved {
        log::debug!("Configuration already saved, ignoring {message:?}");
        return Command::done();
    }

    match message {
        InboundMessage::WifiList { ssids } => scan::complete(&ssids, model),
        InboundMessage::SaveAck => {
            log::info!("Config saved. Restarting...");
            model.page = PageState::Saved;
            Command::all([render(), scan::stop(model)])
        }
        InboundMessage::Snapshot(snapshot) => {
            form::populate(&snapshot, model);
            scan::start(model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::socket::SocketOperation;

    fn sent_frames(cmd: &mut Command<Effect, Event>) -> Vec<String> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Socket(request) => match &request.operation {
                    SocketOperation::Send { frame } => Some(frame.clone()),
                    SocketOperation::Connect { .. } => None,
                },
                _ => None,
            })
            .collect()
    }

    fn open_model() -> Model {
        Model {
            connection: ConnectionState::Open,
            endpoint: Some("ws://192.168.4.1/ws".into()),
            ..Default::default()
        }
    }

    #[test]
    fn connect_targets_ws_path_on_page_host() {
        let mut model = Model::default();

        let mut cmd = connect("192.168.4.1", &mut model);

        let urls: Vec<String> = cmd
            .effects()
            .filter_map(|effect| match effect {
                Effect::Socket(request) => match &request.operation {
                    SocketOperation::Connect { url } => Some(url.clone()),
                    SocketOperation::Send { .. } => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(urls, vec!["ws://192.168.4.1/ws".to_string()]);
        assert_eq!(model.connection, ConnectionState::Connecting);
    }

    #[test]
    fn second_initialize_does_not_reconnect() {
        let mut model = Model::default();
        let _ = connect("192.168.4.1", &mut model);

        let mut cmd = connect("192.168.4.1", &mut model);

        assert_eq!(cmd.effects().count(), 0);
    }

    #[test]
    fn opened_requests_config_once() {
        let mut model = Model {
            connection: ConnectionState::Connecting,
            ..Default::default()
        };

        let mut cmd = handle(SocketEvent::ConnectResponse(SocketOutput::Opened), &mut model);
        assert_eq!(sent_frames(&mut cmd), vec![r#"{"action":"get_config"}"#]);
        assert_eq!(model.connection, ConnectionState::Open);

        let mut again = handle(SocketEvent::ConnectResponse(SocketOutput::Opened), &mut model);
        assert!(sent_frames(&mut again).is_empty());
    }

    #[test]
    fn send_is_dropped_unless_open() {
        for state in [ConnectionState::Closed, ConnectionState::Connecting] {
            let model = Model {
                connection: state,
                ..Default::default()
            };
            let mut cmd = send(OutboundMessage::GetConfig, &model);
            assert_eq!(cmd.effects().count(), 0, "{state:?}");
        }
    }

    #[test]
    fn connect_error_closes_session_and_reports() {
        let mut model = Model {
            connection: ConnectionState::Connecting,
            ..Default::default()
        };

        let _ = handle(
            SocketEvent::ConnectResponse(SocketOutput::Error {
                message: "refused".into(),
            }),
            &mut model,
        );

        assert_eq!(model.connection, ConnectionState::Closed);
        assert_eq!(
            model.error_message.as_deref(),
            Some("Connection to device failed: refused")
        );
    }

    #[test]
    fn malformed_frame_leaves_model_untouched() {
        let mut model = open_model();
        let before = model.clone();

        let mut cmd = handle(SocketEvent::FrameReceived("{oops".into()), &mut model);

        assert_eq!(model, before);
        assert_eq!(cmd.effects().count(), 0);
    }

    #[test]
    fn closed_socket_drops_later_sends() {
        let mut model = open_model();

        let _ = handle(SocketEvent::Closed, &mut model);
        let mut cmd = send(OutboundMessage::ScanWifi, &model);

        assert_eq!(model.connection, ConnectionState::Closed);
        assert_eq!(cmd.effects().count(), 0);
    }

    #[test]
    fn save_ack_shows_success_page() {
        let mut model = open_model();

        let _ = handle(
            SocketEvent::FrameReceived(r#"{"action":"save_ack","status":"ok"}"#.into()),
            &mut model,
        );

        assert_eq!(model.page, PageState::Saved);
    }

    #[test]
    fn snapshot_populates_form_and_starts_scan() {
        let mut model = open_model();

        let mut cmd = handle(
            SocketEvent::FrameReceived(
                r#"{"action":"config_data","ssidName":"HomeNet","mqttServer":"broker.local"}"#
                    .into(),
            ),
            &mut model,
        );

        assert_eq!(model.saved_ssid, "HomeNet");
        assert_eq!(model.form.mqtt_server, "broker.local");
        assert_eq!(model.form.mqtt_server_port, "1883");
        assert!(model.scan.is_scanning());
        assert_eq!(sent_frames(&mut cmd), vec![r#"{"action":"scan_wifi"}"#]);
    }

    #[test]
    fn frames_after_save_are_ignored() {
        let mut model = Model {
            page: PageState::Saved,
            ..open_model()
        };

        let _ = handle(
            SocketEvent::FrameReceived(r#"{"ssidName":"Other"}"#.into()),
            &mut model,
        );

        assert_eq!(model.saved_ssid, "");
        assert!(!model.scan.is_scanning());
    }
}
