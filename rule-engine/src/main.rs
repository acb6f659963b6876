//! Rule Engine Binary Entry Point
//!
//! Runs a rule set over one raw request read from a file and prints every
//! candidate request.

use anyhow::{anyhow, Context};
use clap::Parser;
use rule_engine::{
    init_logging, EngineConfig, HttpService, MessageParser, RawMessageParser, RequestContext,
    RuleSet, ToolType,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule set (.json or .toml), overrides the configured one
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Raw HTTP request to process
    #[arg(long)]
    request: PathBuf,

    /// Service host, defaults to the request's Host header
    #[arg(long)]
    host: Option<String>,

    /// Service port
    #[arg(long, default_value_t = 80)]
    port: u16,

    /// Service protocol
    #[arg(long, default_value = "http")]
    protocol: String,

    /// Tool the request is attributed to
    #[arg(long, default_value = "Proxy")]
    tool: ToolType,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(rules) = args.rules.clone() {
        config.rules = Some(rules);
    }
    init_logging(&config.logging)?;

    let rules: RuleSet = config.load_rules().context("Failed to load rule set")?;
    let request = std::fs::read(&args.request)
        .with_context(|| format!("Failed to read request {}", args.request.display()))?;

    let parser = RawMessageParser::new();
    let host = match args.host.clone() {
        Some(host) => host,
        None => host_header(&parser, &request)?,
    };
    let service = HttpService::new(host, args.port, args.protocol.clone());

    let ctx = RequestContext::new(&request, &service, args.tool, &parser, &config.scope)?;
    tracing::info!(
        url = %ctx.url,
        tool = %ctx.tool,
        rules = rules.rules.len(),
        "Processing request"
    );

    let candidates = rules.process(&ctx, &parser)?;

    let mut stdout = std::io::stdout().lock();
    for (index, candidate) in candidates.iter().enumerate() {
        if candidates.len() > 1 {
            writeln!(stdout, "### candidate {} of {}", index + 1, candidates.len())?;
        }
        stdout.write_all(candidate)?;
        writeln!(stdout)?;
    }

    Ok(())
}

/// Host name from the `Host` header, without its port
fn host_header(parser: &dyn MessageParser, request: &[u8]) -> anyhow::Result<String> {
    let message = parser.parse(request)?;
    let host = message
        .header("Host")
        .ok_or_else(|| anyhow!("Request has no Host header, pass --host"))?;

    Ok(host.rsplit_once(':').map_or(host, |(name, _)| name).trim().to_string())
}
