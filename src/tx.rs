use crate::coin::sort_coins;
use crate::coin::Coin;
use crate::coin::Fee;
use crate::error::AnteError;
use crate::msgs::flatten_msg_types;
use cosmos_sdk_proto::cosmos::tx::v1beta1::Fee as ProtoFee;
use cosmos_sdk_proto::cosmos::tx::v1beta1::Tx;
use prost_types::Any;
use std::convert::TryFrom;

/// The parts of a decoded transaction that the fee checks read. Decoding and
/// signature verification happen before this, elsewhere.
pub trait FeeTx {
    /// The fee section, `None` if the transaction has none
    fn get_fee(&self) -> Option<ProtoFee>;
    fn get_msgs(&self) -> Vec<Any>;
}

impl FeeTx for Tx {
    fn get_fee(&self) -> Option<ProtoFee> {
        self.auth_info.as_ref().and_then(|info| info.fee.clone())
    }

    fn get_msgs(&self) -> Vec<Any> {
        match &self.body {
            Some(body) => body.messages.clone(),
            None => Vec::new(),
        }
    }
}

/// A per transaction view of what was paid, how much gas was asked for and
/// which message types the transaction runs, wrapped messages included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxFeeContext {
    /// paid fee, sorted by denom
    pub fee: Vec<Coin>,
    pub gas: u64,
    pub message_types: Vec<String>,
}

impl TxFeeContext {
    pub fn from_tx(tx: &dyn FeeTx, max_msg_nesting_depth: usize) -> Result<Self, AnteError> {
        let proto_fee = tx.get_fee().ok_or_else(|| {
            AnteError::TxDecode("Tx must carry a fee and gas limit".to_string())
        })?;
        let fee = Fee::try_from(proto_fee)
            .map_err(|e| AnteError::TxDecode(format!("invalid fee: {}", e)))?;
        let amount = sort_coins(fee.amount);
        if amount.windows(2).any(|w| w[0].denom == w[1].denom) {
            return Err(AnteError::TxDecode(format!(
                "duplicate fee denom in {}",
                Coin::display_list(&amount)
            )));
        }
        let message_types = flatten_msg_types(&tx.get_msgs(), max_msg_nesting_depth)?;
        Ok(TxFeeContext {
            fee: amount,
            gas: fee.gas_limit,
            message_types,
        })
    }

    /// True if nothing, or only zero coins, were paid
    pub fn is_zero_fee(&self) -> bool {
        self.fee.iter().all(|c| c.is_zero())
    }
}
