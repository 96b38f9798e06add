use alloy::rpc::types::Log;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use mockall::automock;
use mockall::predicate::*;

/// A decoded mint event as replayed from the contract's log history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintEvent {
    pub to: Address,
    pub token_id: U256,
    pub token_uri: String,
    pub block_number: u64,
}

/// A transaction that has reached the required number of confirmations.
#[derive(Debug, Clone)]
pub struct ConfirmedTransaction {
    pub block_number: u64,
    pub logs: Vec<Log>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    /// No signing key configured; the write surface is unavailable.
    #[error("{0} is not configured. Set it in the environment or pass it on the command line.")]
    MissingCredential(&'static str),

    /// No NFT contract address configured.
    #[error("{0} is not configured. Set it in the environment or pass it on the command line.")]
    MissingContractAddress(&'static str),

    /// The signer cannot cover gas for the transaction.
    #[error("Insufficient funds in the minting wallet: {0}")]
    InsufficientFunds(String),

    /// The contract restricts minting to its owner and the signer is not it.
    #[error("The minting wallet is not the contract owner: {0}")]
    NotContractOwner(String),

    /// The dry run reverted before anything was broadcast.
    #[error("Mint simulation reverted: {0}")]
    SimulationReverted(String),

    /// Broadcasting the signed transaction failed.
    #[error("Failed to submit mint transaction: {0}")]
    SubmissionFailed(String),

    /// The confirmation budget was exhausted before the transaction settled.
    #[error("Timed out waiting for confirmation of tx {0}")]
    ConfirmationTimeout(B256),

    /// Any other RPC-level failure.
    #[error("Chain RPC error: {0}")]
    Rpc(String),
}

/// Trait for every chain backend to implement.
///
/// The read surface is always available; the write surface requires the
/// process to hold signing authority and fails with `MissingCredential`
/// otherwise.
#[automock]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Resolve the custody address of a registered on-chain identity.
    async fn custody_address_of(&self, fid: u64) -> Result<Address, ChainClientError>;

    /// Replay all mint events emitted by the NFT contract from `from_block`
    /// through the chain head, in ascending block order.
    ///
    /// The range is unbounded at the head; on a long-lived contract this is
    /// the principal scaling ceiling of the system.
    async fn get_mint_events(&self, from_block: u64) -> Result<Vec<MintEvent>, ChainClientError>;

    /// The address the write surface signs with.
    fn signer_address(&self) -> Result<Address, ChainClientError>;

    /// Dry-run the mint call against current state, then broadcast it.
    /// Revert reasons surface as typed errors before anything is paid for.
    async fn simulate_then_send(&self, recipient: Address, token_uri: String) -> Result<B256, ChainClientError>;

    /// Wait until the transaction has `confirmations` blocks on top of its
    /// inclusion block, returning the receipt's block number and logs.
    async fn await_confirmation(
        &self,
        tx_hash: B256,
        confirmations: u64,
    ) -> Result<ConfirmedTransaction, ChainClientError>;

    /// Scan receipt logs for the mint event and decode the token id.
    ///
    /// Absence is not an error: a mint may have succeeded even if the
    /// expected log is missing, so the transaction hash stays the source of
    /// truth.
    fn extract_token_id(&self, logs: &[Log]) -> Option<U256>;
}
