//! Incremental decoding of the line-oriented streaming body.
//!
//! The response body delivers UTF-8 text in arbitrarily sized chunks; one
//! network chunk rarely equals one logical event. The decoder buffers bytes,
//! drains every complete `\n`-terminated line, and parses lines carrying the
//! `data: ` prefix into [`ChatStreamEvent`] values. Splitting on the newline
//! byte before decoding means a multi-byte scalar cut by a chunk boundary is
//! reassembled before it is ever interpreted as text.

use crate::error::{StreamError, StreamResult};
use crate::events::ChatStreamEvent;
use std::collections::VecDeque;

const MAX_BUFFER_SIZE: usize = 10 * 1024 * 1024;
const DATA_PREFIX: &str = "data: ";

/// Incremental line decoder for the streaming chat body.
#[derive(Debug, Default)]
pub struct EventDecoder {
    buffer: Vec<u8>,
    events: VecDeque<ChatStreamEvent>,
}

impl EventDecoder {
    /// Create a new decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed network bytes into the decoder.
    ///
    /// Complete lines are parsed immediately and queued; a trailing partial
    /// line stays buffered until its newline (or [`finish`](Self::finish))
    /// arrives.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::BufferOverflow`] when a single line grows past
    /// the buffer cap.
    pub fn feed(&mut self, bytes: &[u8]) -> StreamResult<()> {
        self.buffer.extend_from_slice(bytes);

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&line[..line.len() - 1]) {
                self.events.push_back(event);
            }
        }

        if self.buffer.len() > MAX_BUFFER_SIZE {
            return Err(StreamError::BufferOverflow);
        }

        Ok(())
    }

    /// Call when the stream ends to flush a trailing unterminated line.
    pub fn finish(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = std::mem::take(&mut self.buffer);
        if let Some(event) = parse_line(&line) {
            self.events.push_back(event);
        }
    }

    /// Get the next decoded event.
    pub fn next_event(&mut self) -> Option<ChatStreamEvent> {
        self.events.pop_front()
    }

    /// Check whether decoded events are pending.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Parse one line, newline already stripped.
///
/// Returns `None` for anything that is not a well-formed `data: {json}`
/// event: lines without the prefix, empty payloads, invalid UTF-8 and
/// malformed JSON are all skipped so one bad line never kills the stream.
fn parse_line(line: &[u8]) -> Option<ChatStreamEvent> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    let line = match std::str::from_utf8(line) {
        Ok(s) => s,
        Err(err) => {
            tracing::debug!(%err, "skipping non-UTF-8 stream line");
            return None;
        }
    };

    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload.is_empty() {
        return None;
    }

    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::debug!(%err, line = payload, "skipping malformed stream event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(decoder: &mut EventDecoder) -> Vec<ChatStreamEvent> {
        let mut out = Vec::new();
        while let Some(event) = decoder.next_event() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_single_event() {
        let mut decoder = EventDecoder::new();
        decoder.feed(b"data: {\"type\":\"start\"}\n").unwrap();
        assert_eq!(drain(&mut decoder), vec![ChatStreamEvent::Start]);
    }

    #[test]
    fn test_multiple_events_one_chunk() {
        let mut decoder = EventDecoder::new();
        decoder
            .feed(b"data: {\"type\":\"chunk\",\"content\":\"a\"}\ndata: {\"type\":\"end\"}\n")
            .unwrap();
        assert_eq!(
            drain(&mut decoder),
            vec![
                ChatStreamEvent::Chunk { content: "a".into() },
                ChatStreamEvent::End,
            ]
        );
    }

    #[test]
    fn test_event_split_across_feeds() {
        let mut decoder = EventDecoder::new();
        decoder.feed(b"data: {\"type\":\"chu").unwrap();
        assert!(!decoder.has_events());
        decoder.feed(b"nk\",\"content\":\"hi\"}\n").unwrap();
        assert_eq!(
            drain(&mut decoder),
            vec![ChatStreamEvent::Chunk { content: "hi".into() }]
        );
    }

    #[test]
    fn test_multibyte_scalar_split_at_seam() {
        // "é" is 0xC3 0xA9; cut between the two bytes.
        let full = "data: {\"type\":\"chunk\",\"content\":\"caf\u{e9}\"}\n".as_bytes();
        let cut = full.len() - 4; // inside the encoded é
        let mut decoder = EventDecoder::new();
        decoder.feed(&full[..cut]).unwrap();
        assert!(!decoder.has_events());
        decoder.feed(&full[cut..]).unwrap();
        assert_eq!(
            drain(&mut decoder),
            vec![ChatStreamEvent::Chunk {
                content: "caf\u{e9}".into()
            }]
        );
    }

    #[test]
    fn test_non_data_lines_ignored() {
        let mut decoder = EventDecoder::new();
        decoder
            .feed(b": comment\nevent: noise\n\ndata: {\"type\":\"end\"}\n")
            .unwrap();
        assert_eq!(drain(&mut decoder), vec![ChatStreamEvent::End]);
    }

    #[test]
    fn test_malformed_json_skipped() {
        let mut decoder = EventDecoder::new();
        decoder
            .feed(b"data: {not json}\ndata: {\"type\":\"chunk\",\"content\":\"ok\"}\n")
            .unwrap();
        assert_eq!(
            drain(&mut decoder),
            vec![ChatStreamEvent::Chunk { content: "ok".into() }]
        );
    }

    #[test]
    fn test_empty_payload_skipped() {
        let mut decoder = EventDecoder::new();
        decoder.feed(b"data: \ndata:\n").unwrap();
        assert!(!decoder.has_events());
    }

    #[test]
    fn test_crlf_lines() {
        let mut decoder = EventDecoder::new();
        decoder.feed(b"data: {\"type\":\"end\"}\r\n").unwrap();
        assert_eq!(drain(&mut decoder), vec![ChatStreamEvent::End]);
    }

    #[test]
    fn test_finish_flushes_trailing_line() {
        let mut decoder = EventDecoder::new();
        decoder.feed(b"data: {\"type\":\"end\"}").unwrap();
        assert!(!decoder.has_events());
        decoder.finish();
        assert_eq!(drain(&mut decoder), vec![ChatStreamEvent::End]);
    }

    #[test]
    fn test_finish_on_empty_buffer_is_noop() {
        let mut decoder = EventDecoder::new();
        decoder.finish();
        assert!(!decoder.has_events());
    }

    #[test]
    fn test_buffer_overflow() {
        let mut decoder = EventDecoder::new();
        let huge = vec![b'a'; MAX_BUFFER_SIZE + 1];
        assert!(matches!(
            decoder.feed(&huge),
            Err(StreamError::BufferOverflow)
        ));
    }
}
