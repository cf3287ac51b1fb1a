use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "`instructions` cannot be combined with structured [image] fields: {}",
        fields.join(", ")
    )]
    MixedRecipeModes { fields: Vec<&'static str> },

    #[error("invalid variable assignment {raw:?}: expected KEY=VALUE")]
    InvalidVariable { raw: String },
}
