use crate::server::start_web_server;
use anyhow::{bail, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::select;
use tracing::info;
use web_service::config::ServiceConfig;
use web_service::parser::mount_path_parser;

// Create a reqwest client that will be used to make HTTP requests. This allows
// for keep-alives since every trigger request goes to the same host.
pub(crate) static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("web-service/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Unable to create reqwest client")
});

const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MOUNT_PATH: &str = "/api";

#[derive(Parser, Clone)]
pub struct CliArguments {
    /// The listen address for the web server.
    ///
    /// Defaults to `0.0.0.0:3000` if neither this argument nor the config
    /// file specify one.
    #[clap(short, long, env)]
    listen_address: Option<SocketAddr>,

    /// The path under which the trigger route is mounted.
    ///
    /// Defaults to `/api`, which exposes the route at `POST /api/trigger`.
    #[clap(short, long, env, value_parser = mount_path_parser)]
    mount_path: Option<String>,

    /// Location of the config file. A missing file is ignored.
    #[clap(short, long, env, default_value = "./web-service.toml")]
    config_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
struct Arguments {
    listen_address: SocketAddr,
    mount_path: String,
}

impl Arguments {
    /// Values passed on the command line (or through the environment) take
    /// precedence over the config file, which takes precedence over the
    /// defaults.
    fn new(args: CliArguments, config: ServiceConfig) -> Result<Self> {
        let listen_address = match args.listen_address.or(config.listen_address) {
            Some(listen_address) => listen_address,
            None => DEFAULT_LISTEN_ADDRESS.parse()?,
        };

        let mount_path = args
            .mount_path
            .or(config.mount_path)
            .unwrap_or_else(|| DEFAULT_MOUNT_PATH.to_string());

        Ok(Arguments {
            listen_address,
            mount_path,
        })
    }
}

pub async fn handle_command(args: CliArguments) -> Result<()> {
    let config = ServiceConfig::load(&args.config_file)?;
    let args = Arguments::new(args, config)?;

    let web_server_task =
        async move { start_web_server(&args.listen_address, &args.mount_path).await };

    select! {
        biased;

        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT signal received, exiting...");
            Ok(())
        }

        Err(err) = web_server_task => {
            bail!("Web server exited with an error: {err:?}");
        }

        else => {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Arguments, CliArguments};
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use web_service::config::ServiceConfig;

    fn cli(args: &[&str]) -> CliArguments {
        let mut argv = vec!["start"];
        argv.extend_from_slice(args);
        CliArguments::try_parse_from(argv).expect("expected valid arguments")
    }

    #[rstest]
    #[case(&[], ServiceConfig::default(), "0.0.0.0:3000", "/api")]
    #[case(
        &[],
        ServiceConfig {
            listen_address: Some("127.0.0.1:8000".parse().unwrap()),
            mount_path: Some("/internal".to_string()),
        },
        "127.0.0.1:8000",
        "/internal"
    )]
    #[case(
        &["--listen-address", "127.0.0.1:9000", "--mount-path", "v1/"],
        ServiceConfig {
            listen_address: Some("127.0.0.1:8000".parse().unwrap()),
            mount_path: Some("/internal".to_string()),
        },
        "127.0.0.1:9000",
        "/v1"
    )]
    #[case(&["--mount-path", "/"], ServiceConfig::default(), "0.0.0.0:3000", "")]
    fn arguments_precedence(
        #[case] args: &[&str],
        #[case] config: ServiceConfig,
        #[case] listen_address: &str,
        #[case] mount_path: &str,
    ) {
        let result = Arguments::new(cli(args), config).unwrap();

        assert_eq!(
            result,
            Arguments {
                listen_address: listen_address.parse().unwrap(),
                mount_path: mount_path.to_string(),
            }
        );
    }

    #[rstest]
    #[case("/api?x")]
    #[case("/api/*rest")]
    #[case("/:tenant")]
    fn reject_invalid_mount_path(#[case] mount_path: &str) {
        let result = CliArguments::try_parse_from(["start", "--mount-path", mount_path]);
        assert!(result.is_err());
    }
}
