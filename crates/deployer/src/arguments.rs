use {
    alloy::signers::local::PrivateKeySigner,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::Level,
    url::Url,
};

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,deployer=info")]
    pub log_filter: String,

    /// Log events at this level or more severe are written to stderr, all
    /// others to stdout. Either `error` or `warn`.
    #[clap(long, env, default_value = "error", value_parser = stderr_threshold)]
    pub log_stderr_threshold: Level,

    /// Output log events as JSON.
    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub use_json_logs: bool,
}

/// Info level output has to stay on stdout.
fn stderr_threshold(value: &str) -> Result<Level, String> {
    let level = value.parse::<Level>().map_err(|err| err.to_string())?;
    if level > Level::WARN {
        return Err(format!(
            "{level} would move deployment output to stderr, expected error or warn"
        ));
    }
    Ok(level)
}

/// Deploys the SixElements contract and prints its address.
#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// The chain ID the node is expected to serve. When set, deployment is
    /// refused on any other chain.
    #[clap(long, env)]
    pub chain_id: Option<u64>,

    /// Private key of the deploying account. Without it the first account
    /// unlocked on the node is used.
    #[clap(long, env)]
    pub private_key: Option<PrivateKeySigner>,

    /// Directory containing the compiled Hardhat artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Number of blocks the deployment transaction has to be confirmed by.
    #[clap(long, env, default_value = "1")]
    pub confirmations: u64,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            chain_id,
            private_key,
            artifacts,
            confirmations,
        } = self;

        writeln!(f, "log_filter: {}", logging.log_filter)?;
        writeln!(f, "log_stderr_threshold: {}", logging.log_stderr_threshold)?;
        writeln!(f, "use_json_logs: {}", logging.use_json_logs)?;
        writeln!(f, "node_url: {node_url}")?;
        display_option(f, "chain_id", chain_id)?;
        display_option(f, "private_key", &private_key.as_ref().map(|_| "SECRET"))?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "confirmations: {confirmations}")?;
        Ok(())
    }
}

fn display_option(f: &mut Formatter<'_>, name: &str, option: &Option<impl Display>) -> fmt::Result {
    match option {
        Some(display) => writeln!(f, "{name}: {display}"),
        None => writeln!(f, "{name}: None"),
    }
}
