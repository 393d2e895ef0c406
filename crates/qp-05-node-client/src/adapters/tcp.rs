//! # Tokio TCP Transport

use crate::config::NodeClientConfig;
use crate::domain::errors::{NodeClientError, Result};
use crate::ports::outbound::Transport;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

/// TCP connection to a node.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl TcpTransport {
    /// Connect to `config.host:config.port`.
    pub async fn connect(config: &NodeClientConfig) -> Result<Self> {
        let address = config.address();
        let stream = match timeout(config.connect_timeout(), TcpStream::connect(&address)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(NodeClientError::Connect {
                    address,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(NodeClientError::Connect {
                    address,
                    reason: "timed out".to_string(),
                })
            }
        };
        stream.set_nodelay(true)?;
        info!(%address, "[qp-05] Connected to node");
        Ok(Self {
            stream,
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
        })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send_all(&mut self, bytes: &[u8]) -> Result<()> {
        match timeout(self.write_timeout, self.stream.write_all(bytes)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(NodeClientError::SendTimeout),
        }
    }

    async fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        match timeout(self.read_timeout, self.stream.read(buf)).await {
            Ok(result) => Ok(result?),
            Err(_) => Ok(0),
        }
    }

    async fn discard_pending(&mut self) -> Result<usize> {
        let mut discarded = 0;
        let mut chunk = [0u8; 1024];
        loop {
            match self.stream.try_read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => discarded += n,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(e.into()),
            }
        }
        if discarded > 0 {
            debug!(discarded, "[qp-05] Flushed stale bytes");
        }
        Ok(discarded)
    }
}
