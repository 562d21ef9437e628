/// Base address used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Remote,
    Mock,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub backend: BackendKind,
}

impl Settings {
    /// Resolves settings from the environment. CLI flags may override the
    /// backend selection afterwards.
    pub fn from_env() -> Self {
        let api_base_url =
            env_nonempty("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let backend = match env_nonempty("TASKLITE_BACKEND").as_deref() {
            Some("mock") => BackendKind::Mock,
            _ => BackendKind::Remote,
        };
        Self {
            api_base_url,
            backend,
        }
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let previous: Vec<_> = vars
            .iter()
            .map(|(name, value)| {
                let old = std::env::var_os(name);
                match value {
                    Some(value) => std::env::set_var(name, value),
                    None => std::env::remove_var(name),
                }
                (name.to_string(), old)
            })
            .collect();
        f();
        for (name, old) in previous {
            match old {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
    }

    #[test]
    fn defaults_apply_when_env_is_unset() {
        with_env(
            &[("API_BASE_URL", None), ("TASKLITE_BACKEND", None)],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
                assert_eq!(settings.backend, BackendKind::Remote);
            },
        );
    }

    #[test]
    fn env_overrides_base_url_and_backend() {
        with_env(
            &[
                ("API_BASE_URL", Some("https://tasks.example.com/api")),
                ("TASKLITE_BACKEND", Some("mock")),
            ],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings.api_base_url, "https://tasks.example.com/api");
                assert_eq!(settings.backend, BackendKind::Mock);
            },
        );
    }

    #[test]
    fn blank_env_values_fall_back_to_defaults() {
        with_env(
            &[("API_BASE_URL", Some("  ")), ("TASKLITE_BACKEND", Some(""))],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
                assert_eq!(settings.backend, BackendKind::Remote);
            },
        );
    }
}
