use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tweetlens_common::OutputFormat;
use tweetlens_common::observability::init_logging;
use tweetlens_config::{TweetlensConfig, TweetlensConfigLoader};
use tweetlens_social::twitter::load::tweets_from_path;
use tweetlens_social::twitter::{get_mentioned_users, get_timespan};

mod report;
use report::Report;

const DEFAULT_CONFIG_FILE: &str = "tweetlens.yaml";

/// Derive the covering timespan and mentioned users from a tweet fixture.
#[derive(Debug, Parser)]
#[command(name = "tweetlens", version, about)]
struct Cli {
    /// YAML config file; `tweetlens.yaml` is read when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured output format.
    #[arg(long, global = true, value_enum)]
    output: Option<OutputArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the smallest interval containing every tweet.
    Timespan(InputArgs),
    /// Print the distinct users mentioned in the tweets.
    Mentions(InputArgs),
    /// Print tweet count, timespan and mentions.
    Summary(InputArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// JSON array of tweets; falls back to `input` from the config.
    input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

impl Command {
    fn input(&self) -> Option<&Path> {
        match self {
            Command::Timespan(args) | Command::Mentions(args) | Command::Summary(args) => {
                args.input.as_deref()
            }
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<TweetlensConfig> {
    let loader = match explicit {
        Some(path) => TweetlensConfigLoader::new().with_file(path),
        None => TweetlensConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    loader.load().context("failed to load configuration")
}

fn run(command: &Command, cfg: &TweetlensConfig) -> Result<Report> {
    let input = command
        .input()
        .or(cfg.input.as_deref())
        .context("no tweet file given; pass INPUT or set `input` in the config")?;

    let tweets = tweets_from_path(input)
        .with_context(|| format!("failed to load tweets from {}", input.display()))?;
    tracing::info!(path = %input.display(), count = tweets.len(), "loaded tweets");

    let report = match command {
        Command::Timespan(_) => Report {
            timespan: Some(get_timespan(Some(&tweets[..]))?),
            ..Report::default()
        },
        Command::Mentions(_) => Report {
            mentions: Some(report::sorted(get_mentioned_users(Some(&tweets[..])))),
            ..Report::default()
        },
        Command::Summary(_) => Report {
            tweets: Some(tweets.len()),
            timespan: Some(get_timespan(Some(&tweets[..]))?),
            mentions: Some(report::sorted(get_mentioned_users(Some(&tweets[..])))),
        },
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    init_logging(cfg.logging.to_log_config("tweetlens"))?;

    let format = cli.output.map(OutputFormat::from).unwrap_or(cfg.output);
    let report = run(&cli.command, &cfg)?;
    println!("{}", report.render(format)?);
    Ok(())
}
