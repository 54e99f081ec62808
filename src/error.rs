use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("path {path:?} is neither drive-letter style nor slash-rooted")]
    PathMapping { path: String },

    #[error("duplicate sequence name {name:?} in one submission")]
    DuplicateSequence { name: String },
}
