//! The stream consumer: state machine plus UI sink dispatch.
//!
//! A [`ChatStream`] is created per outgoing send and driven to a terminal
//! state by [`ChatStream::run`]. All sink callbacks are synchronous; the
//! sink is expected to be cheap (text replacement in a UI).

use crate::error::{StreamError, StreamResult};
use crate::events::ChatStreamEvent;
use crate::stream::EventStream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::fmt;

/// UI-facing callback surface receiving rendering updates.
///
/// `on_update` carries the *complete* accumulated text so far, not a delta;
/// the consumer re-renders wholesale. Exactly one of `on_complete` or
/// `on_error` fires per stream.
pub trait StreamSink {
    /// Generation started; show an in-progress affordance.
    fn on_start(&mut self);

    /// The reply grew; `text` is the full text accumulated so far.
    fn on_update(&mut self, text: &str);

    /// The reply is final; remove any in-progress affordance.
    fn on_complete(&mut self, text: &str);

    /// The stream failed; discard any in-progress rendering.
    fn on_error(&mut self, message: &str);
}

/// Lifecycle of one streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    /// No event consumed yet.
    #[default]
    Idle,
    /// A `start` event arrived.
    Started,
    /// At least one chunk arrived.
    Streaming,
    /// Terminal: the reply completed (explicitly or defensively).
    Completed,
    /// Terminal: the stream failed.
    Failed,
}

impl StreamState {
    /// Whether the stream reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One streaming chat exchange: the accumulating reply plus its state.
///
/// At most one of these should be live per send; the caller serializes
/// sends. The finalize step is once-only, so a defensive finalize after an
/// explicit `end` cannot duplicate output.
#[derive(Debug, Default)]
pub struct ChatStream {
    buffer: String,
    state: StreamState,
    finalized: bool,
}

impl ChatStream {
    /// Create a fresh stream session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Text accumulated so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Apply one decoded event, dispatching to the sink.
    ///
    /// Events arriving after a terminal state are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Server`] for an explicit `error` event; the
    /// read loop must stop.
    pub fn apply<K: StreamSink>(
        &mut self,
        event: ChatStreamEvent,
        sink: &mut K,
    ) -> StreamResult<()> {
        if self.state.is_terminal() {
            return Ok(());
        }

        match event {
            ChatStreamEvent::Start => {
                if self.state == StreamState::Idle {
                    self.state = StreamState::Started;
                }
                sink.on_start();
            }
            ChatStreamEvent::Chunk { content } => {
                self.buffer.push_str(&content);
                self.state = StreamState::Streaming;
                sink.on_update(&self.buffer);
            }
            ChatStreamEvent::End => {
                self.finalize(sink);
            }
            ChatStreamEvent::Error { error } => {
                self.fail(sink, &error);
                return Err(StreamError::Server(error));
            }
        }

        Ok(())
    }

    /// Complete the stream with the accumulated text.
    ///
    /// Fires `on_complete` exactly once per session; later calls are no-ops,
    /// as is finalizing a failed stream.
    pub fn finalize<K: StreamSink>(&mut self, sink: &mut K) {
        if self.finalized || self.state == StreamState::Failed {
            return;
        }
        self.finalized = true;
        self.state = StreamState::Completed;
        sink.on_complete(&self.buffer);
    }

    fn fail<K: StreamSink>(&mut self, sink: &mut K, message: &str) {
        if self.state.is_terminal() {
            return;
        }
        self.state = StreamState::Failed;
        sink.on_error(message);
    }

    /// Drive the read loop over a response byte stream until terminal.
    ///
    /// Terminates on an `end` event (success), an `error` event or transport
    /// failure (failure), or stream exhaustion — which finalizes defensively
    /// with whatever text accumulated rather than leaving the sink stuck
    /// mid-stream.
    ///
    /// # Errors
    ///
    /// Returns the [`StreamError`] that terminated the loop; `on_error` has
    /// already been dispatched and the partial reply is not delivered via
    /// `on_complete`.
    pub async fn run<S, E, K>(mut self, bytes: S, sink: &mut K) -> StreamResult<String>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: fmt::Display,
        K: StreamSink,
    {
        let mut events = std::pin::pin!(EventStream::new(bytes));

        while let Some(next) = events.next().await {
            match next {
                Ok(event) => {
                    self.apply(event, sink)?;
                    if self.state == StreamState::Completed {
                        return Ok(self.buffer);
                    }
                }
                Err(error) => {
                    self.fail(sink, &error.to_string());
                    return Err(error);
                }
            }
        }

        // Stream closed without an end event; degraded success.
        tracing::debug!(
            accumulated = self.buffer.len(),
            "stream closed without end event, finalizing defensively"
        );
        self.finalize(sink);
        Ok(self.buffer)
    }
}

/// Consume a whole response byte stream with a fresh session.
///
/// # Errors
///
/// See [`ChatStream::run`].
pub async fn consume<S, E, K>(bytes: S, sink: &mut K) -> StreamResult<String>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: fmt::Display,
    K: StreamSink,
{
    ChatStream::new().run(bytes, sink).await
}
