//! Command-line interface
//!
//! A thin shell over [`SearxngApi`]: every subcommand performs one client
//! call and renders the result as a single JSON document.

use crate::api::{RequestOptions, SearchRequest, SearxngApi};
use crate::config::{self, SearxngConfig};
use crate::error::Result;
use crate::network::OutputFormat;
use crate::plugins::PluginStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition for searxng-cli.
#[derive(Parser, Debug)]
#[command(name = "searxng-cli", version)]
#[command(about = "Query a SearXNG instance from the command line", long_about = None)]
pub struct Cli {
    /// Base URL of the SearXNG instance [default: http://localhost]
    #[arg(short = 'b', long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub timeout: Option<f64>,

    /// Verify TLS certificates (the default)
    #[arg(long, overrides_with = "no_verify_ssl")]
    pub verify_ssl: bool,

    /// Do not verify TLS certificates
    #[arg(long, overrides_with = "verify_ssl")]
    pub no_verify_ssl: bool,

    /// Settings file (YAML); defaults to $SEARXNG_CLI_CONFIG or the user config dir
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search and print the results ranked by score.
    Search(SearchArgs),
    /// Print the server's engine error statistics.
    Errors,
    /// Print the server's configuration.
    Config,
    /// Print the server's search categories.
    Categories,
    /// Print the server's plugins.
    Plugins(PluginsArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Query string.
    pub query: String,

    /// Restrict to a category; may be repeated.
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Use a specific engine; may be repeated.
    #[arg(short = 'e', long = "engine")]
    pub engines: Vec<String>,
}

/// Arguments for the `plugins` subcommand.
#[derive(clap::Args, Debug)]
pub struct PluginsArgs {
    /// enabled, disabled or all (or the flag values 1, 2, 3).
    #[arg(short = 's', long, default_value = "all")]
    pub status: PluginStatus,
}

impl Cli {
    /// TLS verification requested on the command line, if any
    pub fn verify_ssl_override(&self) -> Option<bool> {
        if self.no_verify_ssl {
            Some(false)
        } else if self.verify_ssl {
            Some(true)
        } else {
            None
        }
    }

    /// Settings file and environment, overridden by flags
    pub fn build_config(&self) -> Result<SearxngConfig> {
        let config = config::load(self.config.as_deref())?;
        self.apply_overrides(config)
    }

    /// Apply the global flags to `config`
    pub fn apply_overrides(&self, mut config: SearxngConfig) -> Result<SearxngConfig> {
        if let Some(ref base_url) = self.base_url {
            config.set_base_url(Some(base_url.as_str()));
        }
        if let Some(timeout) = self.timeout {
            config.set_timeout(timeout)?;
        }
        if let Some(verify) = self.verify_ssl_override() {
            config.set_verify_ssl(verify);
        }
        Ok(config)
    }

    /// Run the subcommand and render its result as JSON
    pub async fn run(&self) -> Result<String> {
        let api = SearxngApi::new(self.build_config()?)?;
        let options = RequestOptions::new().with_format(OutputFormat::Json);

        let output = match &self.command {
            Commands::Search(args) => {
                let request = SearchRequest::new(args.query.as_str())
                    .with_categories(args.categories.iter().cloned())
                    .with_engines(args.engines.iter().cloned())
                    .with_options(options);
                serde_json::to_string(&api.search(&request).await?)?
            }
            Commands::Errors => serde_json::to_string(&api.get_server_error_stats(&options).await?)?,
            Commands::Config => serde_json::to_string(&api.get_server_config(&options).await?)?,
            Commands::Categories => {
                serde_json::to_string(&api.get_server_categories(&options).await?)?
            }
            Commands::Plugins(args) => {
                serde_json::to_string(&api.get_server_plugins(args.status, &options).await?)?
            }
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "searxng-cli",
            "-b",
            "https://searx.example.org",
            "-t",
            "5.5",
            "search",
            "rust async",
            "-c",
            "it",
            "--category",
            "science",
            "-e",
            "github",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("https://searx.example.org"));
        assert_eq!(cli.timeout, Some(5.5));
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "rust async");
                assert_eq!(args.categories, vec!["it", "science"]);
                assert_eq!(args.engines, vec!["github"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verify_ssl_flags() {
        let cli = Cli::try_parse_from(["searxng-cli", "errors"]).unwrap();
        assert_eq!(cli.verify_ssl_override(), None);

        let cli = Cli::try_parse_from(["searxng-cli", "--no-verify-ssl", "errors"]).unwrap();
        assert_eq!(cli.verify_ssl_override(), Some(false));

        let cli = Cli::try_parse_from(["searxng-cli", "--no-verify-ssl", "--verify-ssl", "errors"])
            .unwrap();
        assert_eq!(cli.verify_ssl_override(), Some(true));
    }

    #[test]
    fn test_plugins_status() {
        let cli = Cli::try_parse_from(["searxng-cli", "plugins"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Plugins(PluginsArgs {
                status: PluginStatus::All
            })
        ));

        let cli = Cli::try_parse_from(["searxng-cli", "plugins", "--status", "enabled"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Plugins(PluginsArgs {
                status: PluginStatus::Enabled
            })
        ));

        assert!(Cli::try_parse_from(["searxng-cli", "plugins", "-s", "sometimes"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "searxng-cli",
            "--base-url",
            "http://127.0.0.1:8888",
            "--no-verify-ssl",
            "config",
        ])
        .unwrap();
        let config = cli.apply_overrides(SearxngConfig::default()).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:8888");
        assert!(!config.verify_ssl());
        assert_eq!(config.timeout(), 30.0);
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let cli = Cli::try_parse_from(["searxng-cli", "-t", "-1", "errors"]).unwrap();
        let err = cli.apply_overrides(SearxngConfig::default()).unwrap_err();
        assert!(err.is_value_error());
    }

    #[test]
    fn test_out_of_range_timeout_rejected() {
        let cli = Cli::try_parse_from(["searxng-cli", "-t", "1e20", "errors"]).unwrap();
        let err = cli.apply_overrides(SearxngConfig::default()).unwrap_err();
        assert!(err.is_value_error());
    }
}
