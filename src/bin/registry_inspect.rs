//! Print what a registry config file would seed.
//!
//! Loads `react-app-registry.config.json` from the working directory (or the
//! file given with `--config`) the same way applications do at startup and
//! prints either a `{ "size", "keys" }` summary or the bucket for `--key` as
//! compact JSON. Load failures are logged and yield an empty registry unless
//! `--strict` is set.

use anyhow::{Context, Result, bail};
use app_registry::{RegistryHandler, SetupOptions, load_config, setup_registry};
use serde_json::{Value, json};
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("REGISTRY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let handler = args.load()?;

    let output = match &args.key {
        Some(key) => {
            let bucket = handler.require_key(key)?;
            Value::Array(bucket.to_vec())
        }
        None => summary(&handler),
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn summary(handler: &RegistryHandler<Value>) -> Value {
    json!({
        "size": handler.size(),
        "keys": handler.keys(),
    })
}

struct CliArgs {
    options: SetupOptions,
    key: Option<String>,
    strict: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut options = SetupOptions::default();
        let mut key: Option<String> = None;
        let mut strict = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--config" => {
                    let path = next_value(&mut args, "--config")?;
                    options = options.with_config_file(PathBuf::from(path));
                }
                "--key" => {
                    if key.is_some() {
                        bail!("--key may only be provided once");
                    }
                    key = Some(next_value(&mut args, "--key")?);
                }
                "--strict" => strict = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            options,
            key,
            strict,
        })
    }

    fn load(&self) -> Result<RegistryHandler<Value>> {
        if !self.strict {
            return Ok(setup_registry(&self.options));
        }
        let path = self.options.resolved_path();
        if !path.exists() {
            bail!("registry config not found: {}", path.display());
        }
        let config = load_config::<Value>(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok(RegistryHandler::from_config(config))
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: registry-inspect [--config PATH] [--key KEY] [--strict]\n\
Loads a registry config (default: ./react-app-registry.config.json) and prints a key summary, or the items under KEY, as compact JSON.\n\
With --strict, a missing or malformed config is an error instead of an empty registry.\n"
}

fn print_usage() {
    print!("{}", usage());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_keys_in_file_order() {
        let mut handler = RegistryHandler::new();
        handler.register_many("zeta", [json!(1)]);
        handler.register_many("alpha", [json!("a"), json!("b")]);
        assert_eq!(
            summary(&handler),
            json!({ "size": 2, "keys": ["zeta", "alpha"] })
        );
    }
}
