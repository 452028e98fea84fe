use crate::{
    config::DeploymentConfig,
    errors::Error,
    traits::{DeployedContract, FactoryResolver},
};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

/// Deploys the configured contract once.
///
/// The factory is resolved before anything is sent to the network and the
/// deployment is attempted exactly once. Errors are returned untouched, the
/// caller decides how to report them.
pub async fn run(
    resolver: &dyn FactoryResolver,
    config: &DeploymentConfig,
) -> Result<DeployedContract, Error> {
    tracing::info!("deploy start");

    let factory = resolver.contract_factory(&config.contract_name).await?;
    let contract = factory.deploy(&config.constructor_args).await?;

    tracing::info!(
        transaction = ?contract.transaction_hash,
        "{} address: {}",
        config.display_name,
        contract.address,
    );
    Ok(contract)
}

/// Process exit code for the outcome of [`run`]. A failure is logged in full
/// at error level, which is routed to stderr.
pub fn exit_code(result: &Result<DeployedContract, Error>) -> i32 {
    match result {
        Ok(_) => SUCCESS,
        Err(err) => {
            tracing::error!(?err, "deployment failed");
            FAILURE
        }
    }
}
