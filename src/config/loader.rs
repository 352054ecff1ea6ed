//! Configuration loading with layered precedence.
//!
//! Layers are composed by hand with `MergeComposer` rather than through the
//! derived `load()`, because the CLI owns subcommand dispatch and because
//! typed environment variables must fail fast instead of being ignored.
//!
//! # Environment Variable Handling
//!
//! String fields (e.g. `DOCKHAND_ENGINE_SOCKET`) are always accepted. Typed
//! fields such as `DOCKHAND_SERVER_PORT` must parse, or loading fails with
//! `ConfigError::InvalidValue`.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};
use tracing::debug;

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Port number.
    U16,
    /// Unsigned 64-bit integer.
    U64,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name.
    env_var: &'static str,
    /// The JSON path segments, e.g. `["server", "port"]`.
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "DOCKHAND_ENGINE_SOCKET",
        path: &["engine_socket"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "DOCKHAND_SERVER_BIND_ADDRESS",
        path: &["server", "bind_address"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "DOCKHAND_SERVER_PORT",
        path: &["server", "port"],
        var_type: EnvVarType::U16,
    },
    EnvVarSpec {
        env_var: "DOCKHAND_SERVER_REQUEST_TIMEOUT_SECS",
        path: &["server", "request_timeout_secs"],
        var_type: EnvVarType::U64,
    },
    EnvVarSpec {
        env_var: "DOCKHAND_LOGGING_LEVEL",
        path: &["logging", "level"],
        var_type: EnvVarType::String,
    },
];

/// Returns the environment variable names recognised by the loader.
///
/// Tests use this to clear every `DOCKHAND_*` variable without keeping a
/// second list in sync.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_path());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    debug!(path = %path, "loaded configuration file");
    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Pick the configuration file: an explicit `--config`, else discovery.
fn config_file_path(cli: &Cli) -> Result<Option<Utf8PathBuf>> {
    if let Some(ref explicit) = cli.config {
        if !explicit.exists() {
            return Err(ConfigError::FileNotFound {
                path: explicit.clone().into_std_path_buf(),
            }
            .into());
        }
        return Ok(Some(explicit.clone()));
    }

    let discovery = ConfigDiscovery::builder("dockhand")
        .env_var("DOCKHAND_CONFIG_PATH")
        .config_file_name("config.toml")
        .dotfile_name(".dockhand.toml")
        .build();
    Ok(discovery
        .candidates()
        .into_iter()
        .filter(|p| p.exists())
        .find_map(|p| Utf8PathBuf::try_from(p).ok()))
}

/// Load configuration with full layer precedence.
///
/// Sources, later overriding earlier:
/// 1. Application defaults
/// 2. Configuration file
/// 3. Environment variables prefixed with `DOCKHAND_`
/// 4. Command-line flags
///
/// # Errors
///
/// Returns `ConfigError` when an explicit `--config` path does not exist, a
/// file is malformed, a typed environment variable does not parse, or the
/// merged values fail [`AppConfig::validate`].
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    if let Some(ref path) = config_file_path(cli)? {
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let mut config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;
    config.clear_blank_socket();
    config.validate()?;
    Ok(config)
}

fn invalid_env(spec: &EnvVarSpec, expected: &str, raw_value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: spec.env_var.to_owned(),
        reason: format!("expected {expected}, got '{raw_value}'"),
    }
}

/// Collect `DOCKHAND_*` environment variables into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed variable does not parse.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::U16 => raw_value
                .parse::<u16>()
                .map(|n| Value::Number(n.into()))
                .map_err(|_| invalid_env(spec, "port number", &raw_value))?,
            EnvVarType::U64 => raw_value
                .parse::<u64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|_| invalid_env(spec, "unsigned integer", &raw_value))?,
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Insert a value at a nested path in a JSON map, creating parents as needed.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(field.to_owned(), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    if let Some(ref socket) = cli.engine_socket {
        overrides.insert("engine_socket".to_owned(), Value::String(socket.clone()));
    }
    if let Some(ref address) = cli.bind_address {
        insert_at_path(
            &mut overrides,
            &["server", "bind_address"],
            Value::String(address.clone()),
        );
    }
    if let Some(port) = cli.port {
        insert_at_path(
            &mut overrides,
            &["server", "port"],
            Value::Number(port.into()),
        );
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}
