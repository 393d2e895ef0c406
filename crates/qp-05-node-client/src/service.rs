//! # Node Client
//!
//! Request/response flows over an owned [`Transport`].

use crate::adapters::tcp::TcpTransport;
use crate::config::NodeClientConfig;
use crate::domain::errors::{NodeClientError, Result};
use crate::ports::outbound::Transport;
use qp_01_wire_protocol::{
    fresh_dejavu, parse_system_info, system_info_request, ContractFunctionRequest,
    ContractFunctionResponse, MessageType, RequestResponseHeader, SystemInfo, HEADER_SIZE,
};
use qp_02_solution_crypto::{KeystreamDeriver, SolutionPacketBuilder};
use qp_03_payments::{SendToManyResult, TransactionPacketBuilder};
use shared_crypto::MessageSigner;
use shared_types::{Hash, Tick};
use tracing::{debug, error, info, warn};

/// Client for one node connection.
pub struct NodeClient<T: Transport> {
    transport: T,
    config: NodeClientConfig,
}

impl NodeClient<TcpTransport> {
    /// Open a TCP connection and flush stale bytes.
    pub async fn connect(config: NodeClientConfig) -> Result<Self> {
        let transport = TcpTransport::connect(&config).await?;
        Self::with_transport(transport, config).await
    }
}

impl<T: Transport> NodeClient<T> {
    /// Wrap an established transport, discarding anything already buffered.
    pub async fn with_transport(mut transport: T, config: NodeClientConfig) -> Result<Self> {
        transport.discard_pending().await?;
        Ok(Self::new(transport, config))
    }

    /// Wrap a transport as-is.
    pub fn new(transport: T, config: NodeClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &NodeClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Query the node's system info.
    pub async fn system_info(&mut self) -> Result<SystemInfo> {
        let request = system_info_request(fresh_dejavu())?;
        self.transport.send_all(&request).await?;
        let stream = self.transport.receive_available().await?;
        if stream.is_empty() {
            return Err(NodeClientError::NoResponse);
        }
        let info = parse_system_info(&stream)?;
        debug!(tick = info.tick, epoch = info.epoch, "[qp-05] System info received");
        Ok(info)
    }

    /// System info, or the zeroed snapshot when the query fails.
    pub async fn system_info_or_default(&mut self) -> SystemInfo {
        match self.system_info().await {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "[qp-05] System info query failed");
                SystemInfo::default()
            }
        }
    }

    pub async fn current_tick(&mut self) -> Result<Tick> {
        Ok(self.system_info().await?.tick)
    }

    pub async fn mining_seed(&mut self) -> Result<Hash> {
        Ok(self.system_info().await?.random_mining_seed)
    }

    /// Read one frame: the header, then exactly `size - 8` payload bytes.
    ///
    /// # Errors
    ///
    /// `UnexpectedType` when `expected_type` is set and differs,
    /// `IncompleteFrame` when the payload does not arrive within the
    /// configured number of reads.
    pub async fn receive_frame(
        &mut self,
        expected_type: Option<MessageType>,
    ) -> Result<(RequestResponseHeader, Vec<u8>)> {
        let mut header_bytes = [0u8; HEADER_SIZE];
        let got = self.receive_exact(&mut header_bytes).await?;
        if got == 0 {
            return Err(NodeClientError::NoResponse);
        }
        if got < HEADER_SIZE {
            return Err(NodeClientError::IncompleteFrame {
                missing: HEADER_SIZE - got,
                expected: HEADER_SIZE,
            });
        }
        let header = RequestResponseHeader::decode(&header_bytes)?;
        if let Some(expected) = expected_type {
            if header.message_type() != expected.as_u8() {
                return Err(qp_01_wire_protocol::ProtocolError::UnexpectedType {
                    expected: expected.as_u8(),
                    actual: header.message_type(),
                }
                .into());
            }
        }
        if header.size() < HEADER_SIZE {
            return Err(qp_01_wire_protocol::ProtocolError::InvalidDeclaredSize {
                offset: 0,
                size: header.size() as u32,
            }
            .into());
        }

        let mut payload = vec![0u8; header.payload_size()];
        let got = self.receive_exact(&mut payload).await?;
        if got < payload.len() {
            return Err(NodeClientError::IncompleteFrame {
                missing: payload.len() - got,
                expected: header.size(),
            });
        }
        Ok((header, payload))
    }

    /// Fill `buf` using at most `receive_attempts` reads.
    async fn receive_exact(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        let mut attempts = 0;
        while filled < buf.len() && attempts < self.config.receive_attempts.max(1) {
            let n = self.transport.receive(&mut buf[filled..]).await?;
            filled += n;
            attempts += 1;
        }
        Ok(filled)
    }

    /// Send with the configured retry policy.
    pub async fn send_with_retry(&mut self, bytes: &[u8]) -> Result<()> {
        let policy = self.config.send_retry;
        let attempts = policy.total_attempts();
        for attempt in 1..=attempts {
            match self.transport.send_all(bytes).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "[qp-05] Send failed");
                    if attempt < attempts {
                        tokio::time::sleep(policy.backoff()).await;
                    }
                }
            }
        }
        Err(NodeClientError::SendFailed { attempts })
    }

    /// Build, sign and broadcast a solution to `destination`.
    pub async fn send_solution(
        &mut self,
        signer: &dyn MessageSigner,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
    ) -> Result<()> {
        let packet = SolutionPacketBuilder::new(signer, KeystreamDeriver::new(self.config.keystream()))
            .build(destination, mining_seed, nonce)?;
        self.send_with_retry(packet.as_bytes()).await?;
        info!(bytes = packet.len(), "[qp-05] Solution broadcast");
        Ok(())
    }

    /// Ask the utility contract for the SendToManyV1 fee.
    ///
    /// The response must echo the request's dejavu.
    pub async fn send_to_many_fee(&mut self) -> Result<i64> {
        let request = ContractFunctionRequest::send_to_many_fee();
        let dejavu = fresh_dejavu();
        self.transport
            .send_all(&request.to_frame_with_dejavu(dejavu)?)
            .await?;

        let (header, payload) = self
            .receive_frame(Some(MessageType::RespondContractFunction))
            .await?;
        if header.dejavu() != dejavu {
            warn!(
                expected = dejavu,
                actual = header.dejavu(),
                "[qp-05] Fee response does not match request"
            );
            return Err(NodeClientError::DejavuMismatch {
                expected: dejavu,
                actual: header.dejavu(),
            });
        }
        let mut frame = header.encode().to_vec();
        frame.extend_from_slice(&payload);
        let response = ContractFunctionResponse::from_frame(&frame)?;
        if response.is_failure() {
            return Err(NodeClientError::ContractCallFailed {
                contract_index: request.contract_index,
                input_type: request.input_type,
            });
        }
        let fee = response.send_to_many_fee()?;
        debug!(fee, "[qp-05] SendToManyV1 fee");
        Ok(fee)
    }

    /// Pay the recipients in `csv`: fee query, build, send.
    pub async fn try_send_to_many(
        &mut self,
        signer: &dyn MessageSigner,
        csv: &str,
        current_tick: Tick,
    ) -> Result<SendToManyResult> {
        let fee = self.send_to_many_fee().await?;
        let builder = TransactionPacketBuilder::new(signer, self.config.send_to_many());
        let transaction = builder.build_from_csv(csv, fee, current_tick)?;
        self.transport.send_all(transaction.frame()).await?;
        info!(
            tick = transaction.scheduled_tick(),
            tx = %transaction.transaction_hash,
            "[qp-05] Payment broadcast"
        );
        Ok(transaction.result())
    }

    /// [`Self::try_send_to_many`], reporting failure as an empty result.
    pub async fn send_to_many(
        &mut self,
        signer: &dyn MessageSigner,
        csv: &str,
        current_tick: Tick,
    ) -> SendToManyResult {
        match self.try_send_to_many(signer, csv, current_tick).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "[qp-05] Payment failed");
                SendToManyResult::empty()
            }
        }
    }
}
