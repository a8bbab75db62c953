use strum_macros::Display;

/// Failures at the checkpoint boundary. Steady-state tracking has no error path.
#[derive(Debug, Display)]
pub enum ScenarioError {
    Io(std::io::Error),
    Encode(bincode::error::EncodeError),
    Decode(bincode::error::DecodeError),
}

impl std::error::Error for ScenarioError {}

impl From<std::io::Error> for ScenarioError {
    fn from(value: std::io::Error) -> Self { ScenarioError::Io(value) }
}

impl From<bincode::error::EncodeError> for ScenarioError {
    fn from(value: bincode::error::EncodeError) -> Self { ScenarioError::Encode(value) }
}

impl From<bincode::error::DecodeError> for ScenarioError {
    fn from(value: bincode::error::DecodeError) -> Self { ScenarioError::Decode(value) }
}
