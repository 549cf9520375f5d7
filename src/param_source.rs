use crate::coin::DecCoin;
use crate::error::AnteError;
use crate::params::{
    Params, KEY_BOND_DENOM, PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES,
    PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE, PARAM_STORE_KEY_MIN_GAS_PRICES,
};
use crate::store::Subspace;
use rust_decimal::Decimal;

/// Read access to the globalfee params, plus the staking bond denom needed to
/// fill in the default zero price. This is also the governance write path.
#[derive(Clone)]
pub struct GlobalFeeParamSource {
    globalfee: Subspace,
    staking: Subspace,
}

impl GlobalFeeParamSource {
    /// Both subspaces must have their key tables registered, otherwise no
    /// transaction could be evaluated and the node should not start.
    pub fn new(globalfee: Subspace, staking: Subspace) -> Result<Self, AnteError> {
        if !globalfee.has_key_table() {
            return Err(AnteError::Logic(
                "global fee paramspace was not set up via module".to_string(),
            ));
        }
        if !staking.has_key_table() {
            return Err(AnteError::Logic(
                "staking paramspace was not set up via module".to_string(),
            ));
        }
        Ok(GlobalFeeParamSource { globalfee, staking })
    }

    /// The stored global minimum gas prices, or a single zero price in the
    /// bond denom when none are stored
    pub fn effective_minimum_gas_prices(&self) -> Result<Vec<DecCoin>, AnteError> {
        let prices: Vec<DecCoin> = self
            .globalfee
            .get(PARAM_STORE_KEY_MIN_GAS_PRICES)?
            .unwrap_or_default();
        if !prices.is_empty() {
            return Ok(prices);
        }
        self.default_zero_global_fee()
    }

    pub fn default_zero_global_fee(&self) -> Result<Vec<DecCoin>, AnteError> {
        let bond_denom = self.bond_denom()?;
        Ok(vec![DecCoin::new(Decimal::ZERO, &bond_denom)])
    }

    fn bond_denom(&self) -> Result<String, AnteError> {
        let denom: Option<String> = self.staking.get(KEY_BOND_DENOM)?;
        match denom {
            Some(d) if !d.is_empty() => Ok(d),
            _ => Err(AnteError::Logic(
                "empty staking bond denomination".to_string(),
            )),
        }
    }

    pub fn bypass_min_fee_msg_types(&self) -> Result<Vec<String>, AnteError> {
        Ok(self
            .globalfee
            .get(PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES)?
            .unwrap_or_default())
    }

    pub fn max_total_bypass_min_fee_msg_gas_usage(&self) -> Result<u64, AnteError> {
        Ok(self
            .globalfee
            .get(PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE)?
            .unwrap_or_default())
    }

    /// The params exactly as stored, unset fields read as empty or zero
    pub fn get_params(&self) -> Result<Params, AnteError> {
        Ok(Params {
            minimum_gas_prices: self
                .globalfee
                .get(PARAM_STORE_KEY_MIN_GAS_PRICES)?
                .unwrap_or_default(),
            bypass_min_fee_msg_types: self.bypass_min_fee_msg_types()?,
            max_total_bypass_min_fee_msg_gas_usage: self.max_total_bypass_min_fee_msg_gas_usage()?,
        })
    }

    /// Governance write, params are validated before anything is stored
    pub fn set_params(&self, params: &Params) -> Result<(), AnteError> {
        params.validate_basic()?;
        self.globalfee
            .set(PARAM_STORE_KEY_MIN_GAS_PRICES, &params.minimum_gas_prices)?;
        self.globalfee.set(
            PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES,
            &params.bypass_min_fee_msg_types,
        )?;
        self.globalfee.set(
            PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE,
            &params.max_total_bypass_min_fee_msg_gas_usage,
        )?;
        info!(
            "Updated globalfee params, min gas prices {}",
            DecCoin::display_list(&params.minimum_gas_prices)
        );
        Ok(())
    }
}
