use std::env;

const DEFAULT_LOG_FILTER: &str = "info";

/// Process configuration, read from CLI flags and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Populate the store with the demo records at startup.
    pub seed: bool,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let args: Vec<String> = env::args().collect();
        Self::from_parts(&args, |key| env::var(key).ok())
    }

    /// `--no-seed` wins over `BLOGGRAPH_SEED`. The log filter comes from
    /// `BLOGGRAPH_LOG`, then `RUST_LOG`.
    pub fn from_parts<F>(args: &[String], var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = var("BLOGGRAPH_SEED") {
            config.seed = !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        if args.iter().any(|arg| arg == "--no-seed") {
            config.seed = false;
        }

        if let Some(filter) = var("BLOGGRAPH_LOG").or_else(|| var("RUST_LOG")) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }
}
