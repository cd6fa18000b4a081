use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::MembershipParamsBuilder;
use super::types::{FieldKind, HashKind};
use super::validate::{validate, ParamsError};
use crate::field::FieldDomain;
use crate::hash::{AnyHasher, Blake2sFieldHasher, PoseidonHasher, Sha256FieldHasher};

/// Validated parameter set shared by tree builders, provers and verifiers.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `params_version` | `u16` | Version of the parameter schema. |
/// | `field` | [`FieldKind`] | Prime field all leaves are reduced into. |
/// | `hash` | [`HashKind`] | Two-to-one node hash. |
/// | `parallel` | `bool` | Allow rayon for level hashing and batch openings. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipParams {
    pub(crate) params_version: u16,
    pub(crate) field: FieldKind,
    pub(crate) hash: HashKind,
    #[serde(default = "default_parallel")]
    pub(crate) parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl MembershipParams {
    /// Schema version understood by this build.
    pub const VERSION: u16 = 1;

    pub(crate) fn try_from_builder(builder: &MembershipParamsBuilder) -> Result<Self, ParamsError> {
        let params = MembershipParams {
            params_version: builder.params_version,
            field: builder.field.clone(),
            hash: builder.hash.clone(),
            parallel: builder.parallel,
        };
        validate(&params)?;
        Ok(params)
    }

    pub const fn params_version(&self) -> u16 {
        self.params_version
    }

    pub const fn field(&self) -> &FieldKind {
        &self.field
    }

    pub const fn hash(&self) -> &HashKind {
        &self.hash
    }

    pub const fn parallel(&self) -> bool {
        self.parallel
    }

    /// Parses and validates a JSON parameter document.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: MembershipParams = serde_json::from_str(json)?;
        validate(&params)?;
        debug!(field = ?params.field, family = %params.hash.family(), "params loaded");
        Ok(params)
    }

    /// Pretty-printed JSON form accepted by [`MembershipParams::from_json`].
    pub fn to_json(&self) -> Result<String, ParamsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Field domain described by these parameters.
    pub fn domain(&self) -> Result<FieldDomain, ParamsError> {
        Ok(self.field.domain()?)
    }

    /// Node hasher bound to [`MembershipParams::domain`].
    pub fn hasher(&self) -> Result<AnyHasher, ParamsError> {
        let domain = self.domain()?;
        Ok(match &self.hash {
            HashKind::Sha256 => AnyHasher::Sha256(Sha256FieldHasher::new(domain)),
            HashKind::Blake2s => AnyHasher::Blake2s(Blake2sFieldHasher::new(domain)),
            HashKind::Poseidon { parameters } => {
                AnyHasher::Poseidon(PoseidonHasher::new(domain, parameters.clone())?)
            }
        })
    }
}
