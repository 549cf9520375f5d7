//! The governance controlled globalfee parameters

use crate::coin::validate_dec_coins;
use crate::coin::DecCoin;
use crate::error::AnteError;
use crate::store::KeyTable;
use crate::type_urls::{
    MSG_ACKNOWLEDGEMENT_TYPE_URL, MSG_RECV_PACKET_TYPE_URL, MSG_TIMEOUT_ON_CLOSE_TYPE_URL,
    MSG_TIMEOUT_TYPE_URL, MSG_UPDATE_CLIENT_TYPE_URL,
};

pub const MODULE_NAME: &str = "globalfee";

pub const PARAM_STORE_KEY_MIN_GAS_PRICES: &[u8] = b"MinimumGasPricesParam";
pub const PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES: &[u8] = b"BypassMinFeeMsgTypes";
pub const PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE: &[u8] =
    b"MaxTotalBypassMinFeeMsgGasUsage";

/// The staking module subspace and the one key of it we read
pub const STAKING_MODULE_NAME: &str = "staking";
pub const KEY_BOND_DENOM: &[u8] = b"BondDenom";

/// The allowed maximum gas usage for all the bypass msgs in a transaction.
/// A transaction that contains only bypass message types and whose gas does
/// not exceed this can be accepted with a zero fee.
pub const DEFAULT_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE: u64 = 1_000_000;

pub fn default_bypass_min_fee_msg_types() -> Vec<String> {
    vec![
        MSG_RECV_PACKET_TYPE_URL.to_string(),
        MSG_ACKNOWLEDGEMENT_TYPE_URL.to_string(),
        MSG_UPDATE_CLIENT_TYPE_URL.to_string(),
        MSG_TIMEOUT_TYPE_URL.to_string(),
        MSG_TIMEOUT_ON_CLOSE_TYPE_URL.to_string(),
    ]
}

/// Globalfee params. An empty `minimum_gas_prices` is valid and means a zero
/// price in the bond denom, that default is filled in at read time since the
/// bond denom lives in the staking params.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub minimum_gas_prices: Vec<DecCoin>,
    pub bypass_min_fee_msg_types: Vec<String>,
    pub max_total_bypass_min_fee_msg_gas_usage: u64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            minimum_gas_prices: Vec::new(),
            bypass_min_fee_msg_types: default_bypass_min_fee_msg_types(),
            max_total_bypass_min_fee_msg_gas_usage: DEFAULT_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE,
        }
    }
}

impl Params {
    pub fn key_table() -> KeyTable {
        KeyTable::new()
            .register(PARAM_STORE_KEY_MIN_GAS_PRICES)
            .register(PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES)
            .register(PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE)
    }

    /// Gates writes of new params, reads never run this
    pub fn validate_basic(&self) -> Result<(), AnteError> {
        validate_dec_coins(&self.minimum_gas_prices)
            .map_err(|e| AnteError::InvalidParams(e.to_string()))?;
        validate_bypass_min_fee_msg_types(&self.bypass_min_fee_msg_types)
    }
}

pub fn staking_key_table() -> KeyTable {
    KeyTable::new().register(KEY_BOND_DENOM)
}

fn validate_bypass_min_fee_msg_types(msg_types: &[String]) -> Result<(), AnteError> {
    for msg_type in msg_types {
        if msg_type.is_empty() {
            return Err(AnteError::InvalidParams(
                "invalid empty bypass msg type".to_string(),
            ));
        }
        if !msg_type.starts_with('/') {
            return Err(AnteError::InvalidParams(format!(
                "invalid bypass msg type name {}",
                msg_type
            )));
        }
    }
    Ok(())
}
