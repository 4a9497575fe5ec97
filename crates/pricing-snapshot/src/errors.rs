/// Errors building a pricing request or reading the service's answer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("no material has been staged")]
    NoMaterial,

    #[error("the project has no pieces")]
    NoPieces,

    #[error("failed to serialize request: {0}")]
    Serialize(String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("unknown response format: {0}")]
    UnknownFormat(String),

    #[error("response version {response_version} is newer than supported version {supported_version}")]
    FutureVersion {
        response_version: u32,
        supported_version: u32,
    },
}
