//! Trait definitions for the blockchain SDK boundary.
//!
//! The runner only talks to these traits so the deployment flow can be unit
//! tested with mocks. [`crate::network::Network`] is the production
//! implementation backed by an alloy provider.

use {
    crate::errors::{DeploymentError, ResolutionError},
    alloy::primitives::{Address, TxHash},
};

/// A contract that was created on chain and confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    /// Hash of the contract-creation transaction.
    pub transaction_hash: TxHash,
}

/// Resolves contract names into factories able to deploy them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FactoryResolver: Send + Sync {
    /// Returns the factory for the contract called `name`.
    ///
    /// `name` is either the bare contract name (`SixElements`) or its fully
    /// qualified form (`contracts/SixElements.sol:SixElements`).
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError>;
}

/// Deploys new instances of one specific contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractFactory: Send + Sync {
    /// Submits the contract-creation transaction with the given constructor
    /// arguments and waits until it is confirmed.
    ///
    /// Every call creates a new contract at a new address.
    async fn deploy(&self, args: &[String]) -> Result<DeployedContract, DeploymentError>;
}
