use {
    alloy::{
        primitives::TxHash,
        providers::PendingTransactionError,
        transports::TransportError,
    },
    std::path::PathBuf,
};

/// Failure to obtain a contract factory.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("no artifact found for contract {0:?}")]
    NotFound(String),
    #[error("multiple artifacts found for contract {name:?}, use a fully qualified name: {candidates:?}")]
    Ambiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {path:?} contains invalid bytecode")]
    Bytecode {
        path: PathBuf,
        #[source]
        source: alloy::primitives::hex::FromHexError,
    },
    #[error("contract {name:?} needs to be linked against libraries {libraries:?}")]
    Unlinked {
        name: String,
        libraries: Vec<String>,
    },
    #[error("contract {0:?} is abstract or an interface and cannot be deployed")]
    NotDeployable(String),
    #[error("the node reports no account to deploy from")]
    NoSender,
    #[error("connected to chain {actual} but expected chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure to submit or confirm a deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("contract {contract:?} expects {expected} constructor arguments but got {actual}")]
    ArgumentCount {
        contract: String,
        expected: usize,
        actual: usize,
    },
    #[error("failed to encode constructor arguments")]
    Encoding(#[from] alloy::dyn_abi::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to confirm deployment transaction")]
    Pending(#[from] PendingTransactionError),
    #[error("deployment transaction {0} reverted")]
    Reverted(TxHash),
    #[error("deployment transaction {0} did not create a contract")]
    NotDeployed(TxHash),
}

/// Any failure of a deployment run. Both kinds are handled identically by the
/// binary, the distinction only documents where the run stopped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to resolve contract factory")]
    Resolution(#[from] ResolutionError),
    #[error("failed to deploy contract")]
    Deployment(#[from] DeploymentError),
}
