use super::types::HashKind;
use super::MembershipParams;
use crate::field::FieldError;
use crate::hash::poseidon::{PoseidonError, PoseidonHasher};

/// Error enumeration for parameter validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    /// Parameter schema version is not understood by this build.
    #[error("unsupported params version {got} (expected {expected})")]
    UnsupportedVersion { expected: u16, got: u16 },
    /// Field selection does not describe a usable prime field.
    #[error("invalid field: {0}")]
    Field(#[from] FieldError),
    /// Poseidon parameters are unusable over the selected field.
    #[error("invalid poseidon parameters: {0}")]
    Poseidon(#[from] PoseidonError),
    /// JSON document could not be parsed or produced.
    #[error("params json: {message}")]
    Json { message: String },
}

impl From<serde_json::Error> for ParamsError {
    fn from(err: serde_json::Error) -> Self {
        ParamsError::Json {
            message: err.to_string(),
        }
    }
}

/// Checks every parameter invariant.
///
/// The field must be prime and the Poseidon parameters (if selected) must
/// define a permutation over it.
pub fn validate(params: &MembershipParams) -> Result<(), ParamsError> {
    if params.params_version() != MembershipParams::VERSION {
        return Err(ParamsError::UnsupportedVersion {
            expected: MembershipParams::VERSION,
            got: params.params_version(),
        });
    }
    let domain = params.field().domain()?;
    if let HashKind::Poseidon { parameters } = params.hash() {
        PoseidonHasher::new(domain, parameters.clone())?;
    }
    Ok(())
}
