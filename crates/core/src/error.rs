#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse template payload: {0}")]
    Parse(String),
    #[error("failed to serialize templates: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to read template file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write template file: {0}")]
    FileWrite(std::io::Error),

    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
    #[error("invalid text: {0}")]
    Text(#[from] care_types::TextError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
