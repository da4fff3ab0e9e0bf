use config::{Config, ConfigError, Environment as EnvSource, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Profiles compiled into the binary; the base layer of every load.
pub static DEFAULT_ENVIRONMENTS_TOML: &str = include_str!("../../../config/environments.toml");

/// Loads both environment profiles.
///
/// Layers, lowest precedence first: the embedded profile file, the file named
/// by `BOOKCHECK_CONFIG_PATH` (if set), then `BOOKCHECK__*` variables. Any
/// `secret_from_env` markers are resolved last.
pub fn load_environments() -> Result<Environments, ConfigError> {
    ensure_dotenv_loaded();

    let mut builder = Config::builder()
        .add_source(File::from_str(DEFAULT_ENVIRONMENTS_TOML, FileFormat::Toml));

    if let Ok(path) = env::var(env_vars::CONFIG_PATH_VAR) {
        debug!("layering profile file {}", path);
        builder = builder.add_source(File::with_name(&path));
    }

    let builder = builder.add_source(
        EnvSource::with_prefix(env_vars::DEFAULT_PREFIX)
            .prefix_separator(env_vars::CONFIG_SEPARATOR)
            .separator(env_vars::CONFIG_SEPARATOR),
    );

    let environments: Environments = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(environments)
}

/// Parses the embedded profiles alone, without file, env or secret layers.
pub fn embedded_environments() -> Result<Environments, ConfigError> {
    Config::builder()
        .add_source(File::from_str(DEFAULT_ENVIRONMENTS_TOML, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

/// Loads the profile for one environment.
///
/// This is the resolution step scenarios perform once at setup; the result
/// is passed down rather than re-resolved per call.
pub fn load_profile(environment: Environment) -> Result<EnvironmentProfile, ConfigError> {
    let environments = load_environments()?;
    debug!("resolved {} profile", environment);
    Ok(environments.profile(environment).clone())
}

/// Replaces all "secret_from_env" markers with their environment values.
pub fn apply_env_overrides_from_marker(
    environments: Environments,
) -> Result<Environments, ConfigError> {
    let mut json = serde_json::to_value(&environments)
        .map_err(|err| ConfigError::Message(format!("failed to serialize profiles: {err}")))?;
    env_vars::inject_env_vars(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild profiles: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the process environment.
///
/// The path is taken from `DOTENV_OVERRIDE`, then from the first command line
/// argument if it starts with `.env`, and defaults to `.env`. Loading happens
/// at most once per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
