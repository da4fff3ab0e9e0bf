//! Environment variable handling for bookcheck.
//!
//! Configuration overrides use `BOOKCHECK__<PATH>` with `__` as the
//! separator. Secrets referenced by a `secret_from_env` marker in the
//! profile file use `BOOKCHECK_SECRET_<PATH>` with `_` as the separator.

use std::env;
use tracing::warn;

/// The prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BOOKCHECK";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "BOOKCHECK_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by a secret environment variable at load time.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Optional path to an on-disk profile file layered over the embedded one.
pub const CONFIG_PATH_VAR: &str = "BOOKCHECK_CONFIG_PATH";

/// Convert a secret path to an environment variable name
///
/// # Arguments
///
/// * `path` - The secret path (e.g., "production.api.credentials.password")
///
/// # Returns
///
/// The environment variable name
/// (e.g., "BOOKCHECK_SECRET_PRODUCTION_API_CREDENTIALS_PASSWORD")
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Get the secret for a path, if its environment variable is set.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path)).ok()
}

/// Inject secrets into a JSON value
///
/// Recursively walks `value`, replacing every `"secret_from_env"` string
/// with the matching `BOOKCHECK_SECRET_*` variable. Markers without a
/// variable are left in place and logged.
///
/// # Returns
///
/// `true` if any values were replaced, `false` otherwise
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_secret_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!(
                        "secret for {} not found, expected {}",
                        path_str,
                        secret_path_to_env_var(&path_str)
                    );
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}
