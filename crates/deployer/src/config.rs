/// The contract this binary deploys.
pub const DEFAULT_CONTRACT_NAME: &str = "SixElements";

/// How the deployed contract is named in the address line.
pub const DEFAULT_DISPLAY_NAME: &str = "6 Elements";

/// Proxy registry the contract is constructed with.
pub const DEFAULT_CONSTRUCTOR_ARG: &str = "0x44F3747017Cc79a0D55914C20bf6666194359CD7";

/// What to deploy. The binary always deploys [`DeploymentConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub contract_name: String,
    pub display_name: String,
    /// Passed to the contract's constructor unmodified, in order.
    pub constructor_args: Vec<String>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            contract_name: DEFAULT_CONTRACT_NAME.to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            constructor_args: vec![DEFAULT_CONSTRUCTOR_ARG.to_string()],
        }
    }
}
