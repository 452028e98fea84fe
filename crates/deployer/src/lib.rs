pub mod arguments;
pub mod artifacts;
pub mod config;
pub mod errors;
pub mod factory;
pub mod network;
pub mod runner;
pub mod traits;

use {arguments::Arguments, clap::Parser, config::DeploymentConfig, network::Network};

/// Appended to every configured filter so the start marker, the address line
/// and the failure report are never filtered out.
const RUNNER_LOG_DIRECTIVE: &str = "deployer::runner=info";

/// Parses the command line, deploys the contract and returns the process exit
/// code: [`runner::SUCCESS`] or [`runner::FAILURE`].
pub async fn start(args: impl Iterator<Item = String>) -> i32 {
    let args = match Arguments::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            // Usage errors must not leak clap's own exit code.
            let _ = err.print();
            return if err.use_stderr() {
                runner::FAILURE
            } else {
                runner::SUCCESS
            };
        }
    };

    let obs_config = observe::Config::new(
        &log_filter(&args.logging.log_filter),
        Some(args.logging.log_stderr_threshold),
        args.logging.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    observe::panic_hook::install_exiting(runner::FAILURE);
    deploy(&args).await
}

/// Deploys the contract against the network described by `args` and returns
/// the exit code. Logging has to be initialised by the caller.
pub async fn deploy(args: &Arguments) -> i32 {
    tracing::debug!("running deployer with validated arguments:\n{}", args);

    let network = Network::from_arguments(args);
    let result = runner::run(&network, &DeploymentConfig::default()).await;
    runner::exit_code(&result)
}

/// The configured filter with the runner's output forced back on.
pub fn log_filter(configured: &str) -> String {
    match configured.trim() {
        "" => RUNNER_LOG_DIRECTIVE.to_string(),
        configured => format!("{configured},{RUNNER_LOG_DIRECTIVE}"),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, observe::tracing::CapturedOutput};

    fn args(args: &[&str]) -> std::vec::IntoIter<String> {
        args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[tokio::test]
    async fn usage_errors_exit_with_failure() {
        let code = start(args(&["deployer", "--confirmations", "many"])).await;
        assert_eq!(code, runner::FAILURE);
    }

    #[tokio::test]
    async fn help_exits_with_success() {
        let code = start(args(&["deployer", "--help"])).await;
        assert_eq!(code, runner::SUCCESS);
    }

    #[tokio::test]
    async fn missing_artifact_exits_with_failure_on_stderr() {
        let stdout = CapturedOutput::default();
        let stderr = CapturedOutput::default();
        let config = observe::Config::default().with_env_filter(&log_filter("warn"));
        let _guard = tracing::subscriber::set_default(observe::tracing::subscriber(
            &config,
            stdout.clone(),
            stderr.clone(),
        ));
        let artifacts = tempfile::tempdir().unwrap();
        // The artifact lookup fails before the node is contacted.
        let args = Arguments::parse_from([
            "deployer",
            "--artifacts",
            artifacts.path().to_str().unwrap(),
            "--node-url",
            "http://127.0.0.1:9",
        ]);

        let code = deploy(&args).await;

        assert_eq!(code, runner::FAILURE);
        assert!(stdout.contents().contains("deploy start"));
        assert!(!stdout.contents().contains("address:"));
        let stderr = stderr.contents();
        assert!(stderr.contains("deployment failed"));
        assert!(stderr.contains("NotFound(\"SixElements\")"));
    }

    #[test]
    fn runner_output_cannot_be_filtered_out() {
        assert_eq!(log_filter("off"), "off,deployer::runner=info");
        assert_eq!(
            log_filter("warn,deployer=debug"),
            "warn,deployer=debug,deployer::runner=info"
        );
        assert_eq!(log_filter(" "), "deployer::runner=info");
    }
}
