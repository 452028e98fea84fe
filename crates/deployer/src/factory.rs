use {
    crate::{
        artifacts::Artifact,
        errors::DeploymentError,
        traits::{ContractFactory, DeployedContract},
    },
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
        network::TransactionBuilder,
        primitives::{Address, Bytes},
        providers::{DynProvider, Provider},
        rpc::types::TransactionRequest,
    },
};

/// Deploys one compiled contract through an alloy provider.
pub struct AlloyFactory {
    artifact: Artifact,
    provider: DynProvider,
    sender: Address,
    confirmations: u64,
}

impl AlloyFactory {
    pub fn new(
        artifact: Artifact,
        provider: DynProvider,
        sender: Address,
        confirmations: u64,
    ) -> Self {
        Self {
            artifact,
            provider,
            sender,
            confirmations,
        }
    }
}

#[async_trait::async_trait]
impl ContractFactory for AlloyFactory {
    async fn deploy(&self, args: &[String]) -> Result<DeployedContract, DeploymentError> {
        let code = deployment_code(&self.artifact, args)?;
        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_deploy_code(code);

        let pending = self.provider.send_transaction(tx).await?;
        let transaction_hash = *pending.tx_hash();
        tracing::debug!(
            contract = %self.artifact.contract_name,
            ?transaction_hash,
            confirmations = self.confirmations,
            "waiting for deployment transaction"
        );

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted(receipt.transaction_hash));
        }
        let address = receipt
            .contract_address
            .ok_or(DeploymentError::NotDeployed(receipt.transaction_hash))?;

        Ok(DeployedContract {
            address,
            transaction_hash: receipt.transaction_hash,
        })
    }
}

/// Returns the creation bytecode followed by the ABI encoded constructor
/// arguments.
///
/// Each argument is parsed according to the type of the matching constructor
/// input, so `args` can come straight from the command line.
pub fn deployment_code(artifact: &Artifact, args: &[String]) -> Result<Bytes, DeploymentError> {
    let Some(constructor) = artifact.abi.constructor() else {
        if !args.is_empty() {
            return Err(DeploymentError::ArgumentCount {
                contract: artifact.contract_name.clone(),
                expected: 0,
                actual: args.len(),
            });
        }
        return Ok(artifact.bytecode.clone());
    };

    if constructor.inputs.len() != args.len() {
        return Err(DeploymentError::ArgumentCount {
            contract: artifact.contract_name.clone(),
            expected: constructor.inputs.len(),
            actual: args.len(),
        });
    }

    let values = constructor
        .inputs
        .iter()
        .zip(args)
        .map(|(input, arg)| input.resolve()?.coerce_str(arg))
        .collect::<Result<Vec<DynSolValue>, _>>()?;
    let encoded = constructor.abi_encode_input(&values)?;

    Ok(artifact
        .bytecode
        .iter()
        .copied()
        .chain(encoded)
        .collect())
}
