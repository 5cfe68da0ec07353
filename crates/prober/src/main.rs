use clap::{Args, Parser, Subcommand, ValueEnum};
use prober_core::{ProbeDefinition, ProbeHandler, ProbeOutcome, ProbeResult};
use prober_runtime::{
    resolve::format_pod, CommandExecProber, ProbeError, ProbeTarget, Prober, ProberConfig,
    DEFAULT_USER_AGENT, MAX_RESPONSE_BODY_BYTES,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "prober", about = "Run a single health/readiness probe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a probe once and print the classified result
    Run {
        /// Probe definition file (YAML or JSON)
        #[arg(long)]
        file: PathBuf,
        /// Override the definition's timeoutSeconds
        #[arg(long, env = "PROBER_TIMEOUT_SECONDS")]
        timeout_seconds: Option<u64>,
        #[command(flatten)]
        client: ClientArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Check a probe definition and resolve its port without probing
    Validate {
        /// Probe definition file (YAML or JSON)
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Args)]
struct ClientArgs {
    /// Follow HTTP redirects to other hosts instead of reporting a warning
    #[arg(long, env = "PROBER_FOLLOW_NON_LOCAL_REDIRECTS")]
    follow_non_local_redirects: bool,
    /// User-Agent sent when the probe sets none
    #[arg(long, env = "PROBER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Response bytes kept before truncating
    #[arg(long, env = "PROBER_MAX_BODY_BYTES", default_value_t = MAX_RESPONSE_BODY_BYTES)]
    max_body_bytes: usize,
    /// Verify TLS certificates of HTTPS targets
    #[arg(long, env = "PROBER_VERIFY_TLS")]
    verify_tls: bool,
}

impl ClientArgs {
    fn into_config(self) -> ProberConfig {
        ProberConfig {
            follow_non_local_redirects: self.follow_non_local_redirects,
            user_agent: self.user_agent,
            max_response_body_bytes: self.max_body_bytes,
            insecure_skip_tls_verify: !self.verify_tls,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            timeout_seconds,
            client,
            output,
        } => run_probe(&file, timeout_seconds, client.into_config(), output).await,
        Commands::Validate { file } => validate(&file),
    }
}

/// Run the probe described in `file` once
async fn run_probe(
    file: &Path,
    timeout_seconds: Option<u64>,
    config: ProberConfig,
    output: OutputFormat,
) -> miette::Result<ExitCode> {
    let definition = load_definition(file)?;
    let timeout = timeout_seconds
        .map(Duration::from_secs)
        .unwrap_or_else(|| definition.timeout());

    let prober = Prober::new(config, Arc::new(CommandExecProber))?;

    info!(
        "Probing container '{}' of {} (timeout {:?})",
        definition.container,
        format_pod(definition.pod.as_ref()),
        timeout
    );

    let outcome = match prober
        .run_probe(
            &definition.handler,
            definition.pod.as_ref(),
            &definition.container,
            timeout,
        )
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Probe could not be attempted: {}", e);
            ProbeOutcome::unknown(&e)
        }
    };

    match output {
        OutputFormat::Text => println!("{}: {}", outcome.result, outcome.output),
        OutputFormat::Json => println!("{}", prober_core::to_json_pretty(&outcome)?),
    }

    Ok(exit_code(outcome.result))
}

/// Parse, check structure and resolve the target of `file`
fn validate(file: &Path) -> miette::Result<ExitCode> {
    let definition = load_definition(file)?;

    let handler = ProbeHandler::select(&definition.handler).ok_or_else(|| {
        ProbeError::missing_handler(
            format_pod(definition.pod.as_ref()),
            definition.container.as_str(),
        )
    })?;

    let target = ProbeTarget::resolve(definition.pod.as_ref(), &definition.container)?;
    match handler.port() {
        Some(port) => {
            let port = target.port(port)?;
            println!(
                "{} probe for container '{}' on port {}",
                handler.kind(),
                definition.container,
                port
            );
        }
        None => println!(
            "{} probe for container '{}'",
            handler.kind(),
            definition.container
        ),
    }

    Ok(ExitCode::SUCCESS)
}

/// Load a definition, choosing the parser by file extension
fn load_definition(path: &Path) -> miette::Result<ProbeDefinition> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read probe definition '{}': {}", path.display(), e))?;

    let definition: ProbeDefinition = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => prober_core::from_json(&data)?,
        _ => prober_core::from_yaml(&data)?,
    };
    definition.validate()?;

    Ok(definition)
}

/// 0 for success or warning, 1 for failure, 2 when the probe couldn't run
fn exit_code(result: ProbeResult) -> ExitCode {
    match result {
        ProbeResult::Success | ProbeResult::Warning => ExitCode::SUCCESS,
        ProbeResult::Failure => ExitCode::from(1),
        ProbeResult::Unknown => ExitCode::from(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_definition() {
        let file = write_temp(
            ".yaml",
            r#"
handler:
  httpGet:
    path: /healthz
    port: 8080
container: web
"#,
        );

        let definition = load_definition(file.path()).unwrap();
        assert_eq!(definition.container, "web");
        assert!(definition.handler.http_get.is_some());
    }

    #[test]
    fn test_load_json_definition() {
        let file = write_temp(
            ".json",
            r#"{"handler":{"tcpSocket":{"port":5432}},"container":"db","timeoutSeconds":2}"#,
        );

        let definition = load_definition(file.path()).unwrap();
        assert_eq!(definition.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_load_rejects_invalid_definition() {
        let file = write_temp(".yaml", "handler: {}\ncontainer: \"\"\n");
        assert!(load_definition(file.path()).is_err());
    }

    #[test]
    fn test_validate_resolves_named_port() {
        let file = write_temp(
            ".yaml",
            r#"
handler:
  tcpSocket:
    port: db
pod:
  apiVersion: v1
  kind: Pod
  metadata:
    name: postgres
  spec:
    containers:
      - name: db
        ports:
          - name: db
            containerPort: 5432
container: db
"#,
        );
        assert_eq!(validate(file.path()).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_validate_missing_handler() {
        let file = write_temp(".yaml", "handler: {}\ncontainer: web\n");
        assert!(validate(file.path()).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(ProbeResult::Success), ExitCode::SUCCESS);
        assert_eq!(exit_code(ProbeResult::Warning), ExitCode::SUCCESS);
        assert_eq!(exit_code(ProbeResult::Failure), ExitCode::from(1));
        assert_eq!(exit_code(ProbeResult::Unknown), ExitCode::from(2));
    }

    #[test]
    fn test_client_args_config() {
        let cli = Cli::parse_from([
            "prober",
            "run",
            "--file",
            "probe.yaml",
            "--follow-non-local-redirects",
            "--max-body-bytes",
            "64",
        ]);
        let Commands::Run { client, .. } = cli.command else {
            panic!("expected run command");
        };

        let config = client.into_config();
        assert!(config.follow_non_local_redirects);
        assert!(config.insecure_skip_tls_verify);
        assert_eq!(config.max_response_body_bytes, 64);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
