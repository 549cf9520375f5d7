use crate::coin::DecCoin;
use std::collections::BTreeMap;

/// Set on the context when a transaction was admitted through the bypass
/// path, its value is the gas limit
pub const BYPASS_MIN_FEE_MARKER: &str = "globalfee/bypass-min-fee";
/// Set on the context after the normal path, its value is the combined
/// required fee that was enforced
pub const REQUIRED_FEES_MARKER: &str = "globalfee/required-fees";

/// Execution mode of the current call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// admission into the mempool
    CheckTx,
    /// execution inside a block
    DeliverTx,
}

/// What the fee checks know about the call they are running in. Created by
/// the host per transaction; checks only ever add to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    mode: ExecMode,
    block_height: u64,
    /// this node's `minimum-gas-prices`, sorted by denom
    min_gas_prices: Vec<DecCoin>,
    priority: i64,
    markers: BTreeMap<String, String>,
}

impl Context {
    pub fn new(mode: ExecMode, block_height: u64, min_gas_prices: Vec<DecCoin>) -> Self {
        Context {
            mode,
            block_height,
            min_gas_prices,
            priority: 0,
            markers: BTreeMap::new(),
        }
    }

    pub fn is_check_tx(&self) -> bool {
        self.mode == ExecMode::CheckTx
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn min_gas_prices(&self) -> &[DecCoin] {
        &self.min_gas_prices
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a marker for later stages. A marker that is already present is
    /// kept as is.
    pub fn with_marker(mut self, key: &str, value: String) -> Self {
        self.markers.entry(key.to_string()).or_insert(value);
        self
    }

    pub fn marker(&self, key: &str) -> Option<&str> {
        self.markers.get(key).map(|v| v.as_str())
    }
}
