use tracing::{debug, info};

use super::{CodeguardConfig, ConfigSource, CONFIG_ENV_KEY, DEFAULT_CONFIG_FILE};

pub fn log_source(source: &ConfigSource) {
    match source {
        ConfigSource::Cli(path) => info!(
            target: "codeguard::config",
            path = %path.display(),
            "Loading configuration from --config"
        ),
        ConfigSource::Env(path) => info!(
            target: "codeguard::config",
            path = %path.display(),
            "Loading configuration using CODEGUARD_CONFIG environment variable"
        ),
        ConfigSource::ProjectDefault(path) => debug!(
            target: "codeguard::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_FILE,
            exists = path.is_file(),
            "CODEGUARD_CONFIG not set; using project codeguard.toml when present"
        ),
    }
}

pub fn log_loaded(config: &CodeguardConfig) {
    info!(
        target: "codeguard::config",
        path = ?config.source_path,
        src_dir_name = %config.layout.src_dir_name,
        tests_dir_name = %config.layout.tests_dir_name,
        ref_dir_name = %config.layout.ref_dir_name,
        module_extension = %config.conventions.module_extension,
        test_prefix = %config.conventions.test_prefix,
        name_exceptions = config.conventions.name_exceptions.len(),
        "Configuration file loaded successfully"
    );
}
