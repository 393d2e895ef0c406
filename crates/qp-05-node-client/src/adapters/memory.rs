//! # In-Memory Transport
//!
//! Scripted transport for exercising request flows without a node.
//! Inbound bytes are queued as chunks; each `receive` returns at most one
//! chunk (split when the caller's buffer is smaller). A responder can
//! build replies from each sent buffer, for flows that echo request fields.

use crate::domain::errors::{NodeClientError, Result};
use crate::ports::outbound::Transport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;

type Responder = Box<dyn FnMut(&[u8]) -> Option<Vec<u8>> + Send>;

/// Scripted transport.
#[derive(Default)]
pub struct MockTransport {
    inbound: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    failing_sends: u32,
    send_attempts: u32,
    responder: Option<Responder>,
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("inbound", &self.inbound.len())
            .field("sent", &self.sent.len())
            .field("failing_sends", &self.failing_sends)
            .field("send_attempts", &self.send_attempts)
            .field("responder", &self.responder.is_some())
            .finish()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes the next receives will return.
    pub fn push_inbound(&mut self, bytes: impl Into<Vec<u8>>) {
        self.inbound.push_back(bytes.into());
    }

    /// Queue `responder(sent)` after every successful send that it answers.
    pub fn respond_with<F>(&mut self, responder: F)
    where
        F: FnMut(&[u8]) -> Option<Vec<u8>> + Send + 'static,
    {
        self.responder = Some(Box::new(responder));
    }

    /// Fail the next `count` sends.
    pub fn fail_next_sends(&mut self, count: u32) {
        self.failing_sends = count;
    }

    /// Successfully sent buffers, in order.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Every send call, failed ones included.
    pub fn send_attempts(&self) -> u32 {
        self.send_attempts
    }

    pub fn pending_inbound(&self) -> usize {
        self.inbound.iter().map(Vec::len).sum()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.send_attempts += 1;
        if self.failing_sends > 0 {
            self.failing_sends -= 1;
            return Err(NodeClientError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "scripted send failure",
            )));
        }
        self.sent.push(bytes.to_vec());
        if let Some(reply) = self.responder.as_mut().and_then(|respond| respond(bytes)) {
            self.inbound.push_back(reply);
        }
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let Some(mut chunk) = self.inbound.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            chunk.drain(..n);
            self.inbound.push_front(chunk);
        }
        Ok(n)
    }
}
