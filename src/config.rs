//! Node operator options read at startup

use crate::coin::DecCoin;
use crate::error::AnteError;
use crate::gas_price::parse_dec_coins;
use crate::msgs::DEFAULT_MAX_MSG_NESTING_DEPTH;

/// Options of the fee decorator that are fixed when it is built
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeDecoratorOptions {
    /// When false the decorator forwards every transaction without checking
    /// fees, for simulation and test networks
    pub enforce_fee_floor: bool,
    /// How many levels of wrapper messages are followed before a
    /// transaction is rejected
    pub max_msg_nesting_depth: usize,
}

impl Default for FeeDecoratorOptions {
    fn default() -> Self {
        FeeDecoratorOptions {
            enforce_fee_floor: true,
            max_msg_nesting_depth: DEFAULT_MAX_MSG_NESTING_DEPTH,
        }
    }
}

/// The fee related part of the node's app config
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NodeConfig {
    /// The local price floor, for example "0.0025uatom,0.001photon"
    #[serde(rename = "minimum-gas-prices")]
    pub minimum_gas_prices: String,
    #[serde(rename = "enforce-fee-floor")]
    pub enforce_fee_floor: bool,
    #[serde(rename = "max-msg-nesting-depth")]
    pub max_msg_nesting_depth: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let options = FeeDecoratorOptions::default();
        NodeConfig {
            minimum_gas_prices: String::new(),
            enforce_fee_floor: options.enforce_fee_floor,
            max_msg_nesting_depth: options.max_msg_nesting_depth,
        }
    }
}

impl NodeConfig {
    pub fn from_json(raw: &str) -> Result<Self, AnteError> {
        let config: NodeConfig = serde_json::from_str(raw)?;
        // surface a bad price list at startup rather than per transaction
        config.local_min_gas_prices()?;
        Ok(config)
    }

    pub fn local_min_gas_prices(&self) -> Result<Vec<DecCoin>, AnteError> {
        Ok(parse_dec_coins(&self.minimum_gas_prices)?)
    }

    pub fn decorator_options(&self) -> FeeDecoratorOptions {
        FeeDecoratorOptions {
            enforce_fee_floor: self.enforce_fee_floor,
            max_msg_nesting_depth: self.max_msg_nesting_depth,
        }
    }
}
