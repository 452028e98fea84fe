use {
    crate::{
        arguments::Arguments,
        artifacts::Artifacts,
        errors::ResolutionError,
        factory::AlloyFactory,
        traits::{ContractFactory, FactoryResolver},
    },
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        providers::{DynProvider, Provider, ProviderBuilder},
    },
};

/// Resolves contract factories against the artifacts on disk and the node the
/// deployment is sent to.
pub struct Network {
    provider: DynProvider,
    /// Local signer address. `None` deploys from the node's first account.
    sender: Option<Address>,
    artifacts: Artifacts,
    chain_id: Option<u64>,
    confirmations: u64,
}

impl Network {
    pub fn new(
        provider: DynProvider,
        sender: Option<Address>,
        artifacts: Artifacts,
        chain_id: Option<u64>,
        confirmations: u64,
    ) -> Self {
        Self {
            provider,
            sender,
            artifacts,
            chain_id,
            confirmations,
        }
    }

    pub fn from_arguments(args: &Arguments) -> Self {
        let (provider, sender) = match &args.private_key {
            Some(signer) => {
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer.clone()))
                    .connect_http(args.node_url.clone())
                    .erased();
                (provider, Some(signer.address()))
            }
            None => {
                let provider = ProviderBuilder::new()
                    .connect_http(args.node_url.clone())
                    .erased();
                (provider, None)
            }
        };

        Self::new(
            provider,
            sender,
            Artifacts::new(&args.artifacts),
            args.chain_id,
            args.confirmations,
        )
    }

    async fn sender(&self) -> Result<Address, ResolutionError> {
        if let Some(sender) = self.sender {
            return Ok(sender);
        }
        self.provider
            .get_accounts()
            .await?
            .first()
            .copied()
            .ok_or(ResolutionError::NoSender)
    }
}

#[async_trait::async_trait]
impl FactoryResolver for Network {
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError> {
        let artifact = self.artifacts.load(name)?;

        if let Some(expected) = self.chain_id {
            let actual = self.provider.get_chain_id().await?;
            if actual != expected {
                return Err(ResolutionError::ChainMismatch { expected, actual });
            }
        }

        let sender = self.sender().await?;
        tracing::debug!(
            contract = %artifact.contract_name,
            source = %artifact.source_name,
            ?sender,
            "resolved contract factory"
        );

        Ok(Box::new(AlloyFactory::new(
            artifact,
            self.provider.clone(),
            sender,
            self.confirmations,
        )))
    }
}
