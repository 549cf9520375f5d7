use crate::error::AnteError;
use crate::param_source::GlobalFeeParamSource;
use crate::params::Params;

/// The globalfee section of a chain's genesis file
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisState {
    pub params: Params,
}

pub fn default_genesis() -> GenesisState {
    GenesisState::default()
}

pub fn validate_genesis(state: &GenesisState) -> Result<(), AnteError> {
    state.params.validate_basic()
}

/// Parses and validates the raw JSON of the module's genesis section
pub fn genesis_from_json(raw: &[u8]) -> Result<GenesisState, AnteError> {
    let state: GenesisState = serde_json::from_slice(raw)?;
    validate_genesis(&state)?;
    Ok(state)
}

pub fn init_genesis(source: &GlobalFeeParamSource, state: &GenesisState) -> Result<(), AnteError> {
    source.set_params(&state.params)
}

pub fn export_genesis(source: &GlobalFeeParamSource) -> Result<GenesisState, AnteError> {
    Ok(GenesisState {
        params: source.get_params()?,
    })
}
