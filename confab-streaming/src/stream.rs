//! Stream adapter turning a byte stream into decoded events.

use crate::decoder::EventDecoder;
use crate::error::{StreamError, StreamResult};
use crate::events::ChatStreamEvent;
use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Adapter that yields [`ChatStreamEvent`]s from a response byte stream.
    ///
    /// Transport errors from the underlying stream surface as
    /// [`StreamError::Transport`]; on exhaustion the decoder is flushed so a
    /// trailing unterminated line still produces its event.
    pub struct EventStream<S> {
        #[pin]
        inner: S,
        decoder: EventDecoder,
        finished: bool,
    }
}

impl<S, E> EventStream<S>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    /// Wrap a byte stream.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            decoder: EventDecoder::new(),
            finished: false,
        }
    }
}

impl<S, E> Stream for EventStream<S>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: fmt::Display,
{
    type Item = StreamResult<ChatStreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(event) = this.decoder.next_event() {
                return Poll::Ready(Some(Ok(event)));
            }

            if *this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    if let Err(error) = this.decoder.feed(&bytes) {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(error)));
                    }
                }
                Poll::Ready(Some(Err(error))) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(StreamError::transport(error))));
                }
                Poll::Ready(None) => {
                    *this.finished = true;
                    this.decoder.finish();
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn bytes_ok(chunks: &[&str]) -> Vec<Result<Bytes, std::io::Error>> {
        chunks
            .iter()
            .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
            .collect()
    }

    #[tokio::test]
    async fn test_events_across_chunk_boundaries() {
        let chunks = bytes_ok(&[
            "data: {\"type\":\"start\"}\ndata: {\"type\":\"chu",
            "nk\",\"content\":\"Hel\"}\n",
            "data: {\"type\":\"chunk\",\"content\":\"lo\"}\ndata: {\"type\":\"end\"}\n",
        ]);
        let stream = EventStream::new(futures::stream::iter(chunks));
        let events: Vec<_> = stream.map(|e| e.unwrap()).collect().await;
        assert_eq!(
            events,
            vec![
                ChatStreamEvent::Start,
                ChatStreamEvent::Chunk { content: "Hel".into() },
                ChatStreamEvent::Chunk { content: "lo".into() },
                ChatStreamEvent::End,
            ]
        );
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline() {
        let chunks = bytes_ok(&["data: {\"type\":\"end\"}"]);
        let stream = EventStream::new(futures::stream::iter(chunks));
        let events: Vec<_> = stream.map(|e| e.unwrap()).collect().await;
        assert_eq!(events, vec![ChatStreamEvent::End]);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"data: {\"type\":\"start\"}\n")),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            )),
        ];
        let mut stream = EventStream::new(futures::stream::iter(chunks));
        assert!(matches!(
            stream.next().await,
            Some(Ok(ChatStreamEvent::Start))
        ));
        assert!(matches!(
            stream.next().await,
            Some(Err(StreamError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_stream_yields_nothing() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = Vec::new();
        let mut stream = EventStream::new(futures::stream::iter(chunks));
        assert!(stream.next().await.is_none());
    }
}
