//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::Result;
use async_trait::async_trait;

/// Byte-stream connection to a node.
#[async_trait]
pub trait Transport: Send {
    /// Write all of `bytes`.
    async fn send_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read at most `buf.len()` bytes. `Ok(0)` means nothing arrived before
    /// the read timeout or the peer closed the connection.
    async fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Read until the peer goes quiet.
    async fn receive_available(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = self.receive(&mut chunk).await?;
            if n == 0 {
                return Ok(out);
            }
            out.extend_from_slice(&chunk[..n]);
        }
    }

    /// Discard bytes already buffered without waiting for more.
    async fn discard_pending(&mut self) -> Result<usize> {
        Ok(self.receive_available().await?.len())
    }
}
