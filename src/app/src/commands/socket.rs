//! Socket command definitions.
//!
//! These types define the interface between the Core and the Shell for the
//! device socket. Inbound frames are not a response to any request: the shell
//! forwards them as [`crate::events::SocketEvent::FrameReceived`].

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform on the socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SocketOperation {
    Connect { url: String },
    Send { frame: String },
}

// The output from socket operations (shell tells us what happened)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SocketOutput {
    Opened,
    Closed,
    Sent,
    Error { message: String },
}

impl Operation for SocketOperation {
    type Output = SocketOutput;
}

/// Command-based socket API
pub struct Socket<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Socket<Effect, Event>
where
    Effect: Send + From<crux_core::Request<SocketOperation>> + 'static,
    Event: Send + 'static,
{
    /// Open the connection to the given address
    pub fn connect(url: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(SocketOperation::Connect { url: url.into() })
    }

    /// Write one text frame to the open connection
    pub fn send(frame: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(SocketOperation::Send {
            frame: frame.into(),
        })
    }
}

/// Request builder for socket operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: SocketOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<SocketOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: SocketOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = SocketOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
