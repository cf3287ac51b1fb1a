use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::template::VariableEnvironment;
use crate::value::DynamicValue;

/// Default configuration file name, resolved relative to the working directory.
pub const CONFIG_FILE_NAME: &str = "restamp.toml";

/// restamp.toml configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestampConfig {
    /// User variables, available to templates as `user.<name>`
    #[serde(default)]
    pub variables: VariableEnvironment,
    /// Structured recipe fields
    #[serde(default)]
    pub image: ImageConfig,
    /// Raw recipe instructions. When set, these replace the structured
    /// [image] fields entirely.
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
    #[serde(default)]
    pub docker: DockerConfig,
}

/// Directives layered on top of the imported image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageConfig {
    /// Ports to expose, joined verbatim into one EXPOSE line
    #[serde(default)]
    pub expose: Vec<String>,
    #[serde(default)]
    pub user: Option<String>,
    /// Environment variables; values are rendered as templates.
    /// Emitted in key order.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub volume: Vec<String>,
    #[serde(default)]
    pub workdir: Option<String>,
    #[serde(default)]
    pub entrypoint: DynamicValue,
    #[serde(default)]
    pub cmd: DynamicValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockerConfig {
    /// Docker executable (name on PATH or absolute path)
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Kill the build after this many seconds. No limit when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            timeout_secs: None,
        }
    }
}

impl ImageConfig {
    /// Names of the fields that would emit a directive.
    pub fn active_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.expose.is_empty() {
            fields.push("expose");
        }
        if self.user.as_deref().is_some_and(|u| !u.is_empty()) {
            fields.push("user");
        }
        if !self.env.is_empty() {
            fields.push("env");
        }
        if !self.volume.is_empty() {
            fields.push("volume");
        }
        if self.workdir.as_deref().is_some_and(|w| !w.is_empty()) {
            fields.push("workdir");
        }
        if self.entrypoint.is_active() {
            fields.push("entrypoint");
        }
        if self.cmd.is_active() {
            fields.push("cmd");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.active_fields().is_empty()
    }
}

impl RestampConfig {
    /// Load from the given path, or return defaults if the file does not exist.
    pub fn load(config_path: &Path) -> crate::Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that mix raw instructions with structured fields.
    pub fn validate(&self) -> crate::Result<()> {
        if self.instructions.is_some() {
            let fields = self.image.active_fields();
            if !fields.is_empty() {
                return Err(crate::Error::MixedRecipeModes { fields });
            }
        }
        Ok(())
    }
}

fn default_executable() -> String {
    "docker".to_owned()
}
