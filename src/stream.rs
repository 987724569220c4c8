//! Pull-based decoder turning a raw response body into normalized results.
//!
//! The decoder owns the transport body: dropping the stream drops the body, which
//! releases the underlying connection and guarantees no further reads after
//! cancellation. Each frame is normalized and emitted before the next line is
//! read; there is no batching and no resynchronization after a malformed frame.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::error::LLMError;
use crate::http::HttpBodyStream;
use crate::result::UnifiedResult;

/// Lazy, forward-only sequence of normalized results.
pub type ResultStream = Pin<Box<dyn Stream<Item = Result<UnifiedResult, LLMError>> + Send>>;

/// Capability-specific mapping from one decoded frame to a [`UnifiedResult`].
pub type Normalizer = Box<dyn Fn(&str) -> Result<UnifiedResult, LLMError> + Send>;

/// Line protocol spoken by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One raw JSON object per line (Ollama). A frame normalizing to
    /// `done == true` terminates the sequence.
    JsonLines,
    /// Server-sent-events envelope (OpenAI): only `data: `-prefixed lines carry
    /// frames, and the literal `[DONE]` sentinel terminates the sequence without
    /// emitting.
    EventStream,
}

/// Frames a streaming body into lines and normalizes each frame.
///
/// A decode failure is terminal: the error is emitted in place of a result and
/// the stream ends. Results emitted before the failure remain valid.
pub struct FrameDecoder {
    body: HttpBodyStream,
    buffer: Vec<u8>,
    framing: Framing,
    normalize: Normalizer,
    provider: &'static str,
    body_closed: bool,
    finished: bool,
}

impl FrameDecoder {
    pub fn new(
        body: HttpBodyStream,
        framing: Framing,
        provider: &'static str,
        normalize: Normalizer,
    ) -> Self {
        Self {
            body,
            buffer: Vec::new(),
            framing,
            normalize,
            provider,
            body_closed: false,
            finished: false,
        }
    }

    /// Boxes the decoder into the public stream alias.
    pub fn into_stream(self) -> ResultStream {
        Box::pin(self)
    }

    fn drain_line(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
        buffer.iter().position(|b| *b == b'\n').map(|pos| {
            let mut line: Vec<u8> = buffer.drain(..=pos).collect();
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            line
        })
    }

    /// Applies the framing filter, returning the frame payload if the line
    /// carries one. Sets `finished` when the line is the `[DONE]` sentinel.
    fn frame_from_line(&mut self, line: Vec<u8>) -> Result<Option<String>, LLMError> {
        let text = String::from_utf8(line).map_err(|err| {
            LLMError::decode(self.provider, format!("invalid UTF-8 in stream line: {err}"))
        })?;

        match self.framing {
            Framing::JsonLines => {
                if text.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(text))
                }
            }
            Framing::EventStream => {
                let Some(rest) = text.strip_prefix("data:") else {
                    return Ok(None);
                };
                let payload = rest.strip_prefix(' ').unwrap_or(rest);
                if payload.trim() == "[DONE]" {
                    self.finished = true;
                    Ok(None)
                } else {
                    Ok(Some(payload.to_string()))
                }
            }
        }
    }

    fn emit_frame(&mut self, frame: &str) -> Result<UnifiedResult, LLMError> {
        let result = (self.normalize)(frame)?;
        if self.framing == Framing::JsonLines && result.done {
            self.finished = true;
        }
        Ok(result)
    }
}

impl Stream for FrameDecoder {
    type Item = Result<UnifiedResult, LLMError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.finished {
                return Poll::Ready(None);
            }

            while let Some(line) = Self::drain_line(&mut this.buffer) {
                match this.frame_from_line(line) {
                    Ok(Some(frame)) => match this.emit_frame(&frame) {
                        Ok(result) => return Poll::Ready(Some(Ok(result))),
                        Err(err) => {
                            this.finished = true;
                            return Poll::Ready(Some(Err(err)));
                        }
                    },
                    Ok(None) => {
                        if this.finished {
                            return Poll::Ready(None);
                        }
                    }
                    Err(err) => {
                        this.finished = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                }
            }

            if this.body_closed {
                // Frame without a trailing newline at end of stream.
                if !this.buffer.is_empty() {
                    let line: Vec<u8> = this.buffer.drain(..).collect();
                    match this.frame_from_line(line) {
                        Ok(Some(frame)) => {
                            let item = this.emit_frame(&frame);
                            this.finished = true;
                            return Poll::Ready(Some(item));
                        }
                        Ok(None) => {}
                        Err(err) => {
                            this.finished = true;
                            return Poll::Ready(Some(Err(err)));
                        }
                    }
                }
                this.finished = true;
                return Poll::Ready(None);
            }

            match this.body.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.buffer.extend_from_slice(&bytes);
                }
                Poll::Ready(Some(Err(err))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => {
                    this.body_closed = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
