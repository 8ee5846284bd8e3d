#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
