//! Resource Invoker Entry Point
//!
//! Invokes one resource of the sandbox application and prints the response
//! as JSON. Logging goes to stderr so stdout stays machine-readable.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use resource_invoker::core::{Config, ResourceClient};
use resource_invoker::domains::factory::Factory;
use resource_invoker::domains::resources::{
    Binder, Code, ContextSource, Injector, Query, Verb, WebContext,
};
use resource_invoker::domains::sandbox::{self, Database};

#[derive(Parser)]
#[command(name = "resource_invoker")]
#[command(about = "Invoke a resource method by URI")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Request method (get, post, put, patch, delete, head, options)
    #[arg(short = 'X', long, default_value = "get")]
    method: String,

    /// Query parameter as NAME=VALUE, overriding the URI's query (repeatable)
    #[arg(short, long = "query", value_name = "NAME=VALUE")]
    query: Vec<String>,

    /// Web context value as SOURCE:NAME=VALUE, e.g. cookie:token=abc (repeatable)
    #[arg(short, long = "context", value_name = "SOURCE:NAME=VALUE")]
    context: Vec<String>,

    /// Expose the process environment as `env` context values
    #[arg(long)]
    env_context: bool,

    /// Resource URI, e.g. app://self/user?id=1
    uri: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.app.name, config.app.version);
    config.validate()?;

    let verb: Verb = cli.method.parse()?;
    let query = parse_query_args(&cli.query)?;
    let context = parse_context_args(&cli.context, cli.env_context)?;

    let binder: Arc<dyn Binder> = Arc::new(sandbox_binder());
    let factory = Factory::new(sandbox::schemes(binder.clone())?);
    let client = ResourceClient::new(factory, binder, &config.resources);

    let response = client
        .request_with(verb, &cli.uri, query, Arc::new(context))
        .with_context(|| format!("{} {} failed", verb, cli.uri))?;

    info!("{} {}", response.code, Code::reason(response.code));
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Bindings available to sandbox resources.
fn sandbox_binder() -> Injector {
    let dsn = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    Injector::new().bind_instance("db", Database { dsn })
}

fn split_pair(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected NAME=VALUE, got '{}'", arg),
    }
}

fn parse_query_args(args: &[String]) -> Result<Query> {
    args.iter()
        .map(|arg| {
            let (name, value) = split_pair(arg)?;
            Ok((name.to_string(), Value::String(value.to_string())))
        })
        .collect()
}

fn parse_context_args(args: &[String], with_env: bool) -> Result<WebContext> {
    let initial = if with_env {
        WebContext::from_env()
    } else {
        WebContext::new()
    };

    args.iter().try_fold(initial, |context, arg| {
        let (source, pair) = arg
            .split_once(':')
            .with_context(|| format!("Expected SOURCE:NAME=VALUE, got '{}'", arg))?;
        let source: ContextSource = source.parse()?;
        let (name, value) = split_pair(pair)?;
        Ok(context.with(source, name, Value::String(value.to_string())))
    })
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_invoker::domains::resources::ContextKey;
    use serde_json::json;

    #[test]
    fn test_parse_query_args() {
        let query = parse_query_args(&["id=1".to_string(), "name=a=b".to_string()]).unwrap();
        assert_eq!(query.get("id"), Some(&json!("1")));
        assert_eq!(query.get("name"), Some(&json!("a=b")));
        assert!(parse_query_args(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn test_parse_context_args() {
        let context = parse_context_args(&["cookie:token=abc".to_string()], false).unwrap();
        assert_eq!(context.get(&ContextKey::cookie("token")), Some(&json!("abc")));
        assert!(parse_context_args(&["token=abc".to_string()], false).is_err());
        assert!(parse_context_args(&["session:token=abc".to_string()], false).is_err());
    }

    #[test]
    fn test_cli_parses_method_and_uri() {
        let cli = Cli::parse_from(["resource_invoker", "-X", "post", "app://self/user?id=1"]);
        assert_eq!(cli.method, "post");
        assert_eq!(cli.uri, "app://self/user?id=1");
        assert!(cli.query.is_empty());
    }
}
