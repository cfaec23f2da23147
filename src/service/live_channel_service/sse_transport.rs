use super::{EventStream, EventStreamTransport};
use crate::error::Error;
use async_trait::async_trait;
use futures::{stream, StreamExt};
use std::collections::VecDeque;

///
/// Server-sent-events style transport over a plain HTTP GET. The
/// endpoint emits newline/event-framed JSON; the credential travels in
/// the url because the transport carries no custom headers.
///
pub struct SseTransport {
    client: reqwest::Client,
}

impl SseTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventStreamTransport for SseTransport {
    async fn open(&self, url: &str) -> Result<EventStream, Error> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;

        let bytes = Box::pin(response.bytes_stream());
        let decoder = FrameDecoder::new();
        let pending = VecDeque::new();

        let frames = stream::unfold(
            (bytes, decoder, pending),
            |(mut bytes, mut decoder, mut pending)| async move {
                loop {
                    if let Some(frame) = pending.pop_front() {
                        return Some((Ok(frame), (bytes, decoder, pending)));
                    }

                    match bytes.next().await {
                        Some(Ok(chunk)) => pending.extend(decoder.feed(&chunk)),
                        Some(Err(err)) => {
                            let err = Error::Transport(err.to_string());
                            return Some((Err(err), (bytes, decoder, pending)));
                        }
                        None => return None,
                    }
                }
            },
        );

        Ok(Box::pin(frames))
    }
}

///
/// Incremental frame decoder. Accepts both classic SSE events
/// (`data:` lines terminated by a blank line) and bare newline-delimited
/// JSON objects; `:` keep-alive comments are skipped.
///
#[derive(Default)]
struct FrameDecoder {
    buffer: String,
    data_lines: Vec<String>,
}

impl FrameDecoder {
    fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk, returns every frame it completed.
    fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut frames = Vec::new();
        while let Some(position) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=position).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if !self.data_lines.is_empty() {
                    frames.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines.push(data.trim_start().to_string());
            } else if line.starts_with(':') {
                // keep-alive comment
            } else if line.starts_with('{') {
                frames.push(line.to_string());
            }
            // other SSE fields (event:, id:, retry:) are not used by the server
        }

        frames
    }
}
