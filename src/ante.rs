//! The fee admission check.
//!
//! `FeeDecorator` checks that a transaction's fee is at least as large as the
//! combination of the global fee (governance params) and this node's local
//! minimum gas prices, and that the fee denoms are ones the global fee
//! accepts. This only applies when admitting into the mempool, in CheckTx,
//! and never during simulation.
//!
//! Transactions made only of bypass message types whose gas stays within the
//! bypass bound may pay nothing. If such a transaction does carry a fee, its
//! denoms must still be accepted by the global fee.

use crate::coin::Coin;
use crate::config::FeeDecoratorOptions;
use crate::context::{Context, BYPASS_MIN_FEE_MARKER, REQUIRED_FEES_MARKER};
use crate::error::AnteError;
use crate::fee_utils::{
    combined_fee_requirement, denoms_subset_of_including_zero, is_any_gte_including_zero,
};
use crate::gas_price::{required_fees, tx_priority};
use crate::param_source::GlobalFeeParamSource;
use crate::store::Subspace;
use crate::tx::{FeeTx, TxFeeContext};

/// The rest of the admission pipeline
pub trait AnteHandler {
    fn handle(&self, ctx: Context, tx: &dyn FeeTx, simulate: bool) -> Result<Context, AnteError>;
}

impl<F> AnteHandler for F
where
    F: Fn(Context, &dyn FeeTx, bool) -> Result<Context, AnteError>,
{
    fn handle(&self, ctx: Context, tx: &dyn FeeTx, simulate: bool) -> Result<Context, AnteError> {
        self(ctx, tx, simulate)
    }
}

/// One stage of the admission pipeline. A decorator either rejects the
/// transaction or hands it to `next`.
pub trait AnteDecorator {
    fn ante_handle(
        &self,
        ctx: Context,
        tx: &dyn FeeTx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<Context, AnteError>;
}

#[derive(Clone)]
pub struct FeeDecorator {
    params: GlobalFeeParamSource,
    options: FeeDecoratorOptions,
}

impl FeeDecorator {
    /// Fails when either subspace has no key table, the node must not start
    /// in that state
    pub fn new(
        globalfee: Subspace,
        staking: Subspace,
        options: FeeDecoratorOptions,
    ) -> Result<Self, AnteError> {
        Ok(FeeDecorator {
            params: GlobalFeeParamSource::new(globalfee, staking)?,
            options,
        })
    }

    pub fn param_source(&self) -> &GlobalFeeParamSource {
        &self.params
    }

    /// The global fee for the given gas, might be `0denom` if the global
    /// minimum gas price is zero
    pub fn global_fee(&self, gas: u64) -> Result<Vec<Coin>, AnteError> {
        let prices = self.params.effective_minimum_gas_prices()?;
        required_fees(&prices, gas)
    }

    /// The combined requirement of the global fee and this node's local
    /// minimum gas prices
    pub fn tx_fee_required(&self, ctx: &Context, gas: u64) -> Result<Vec<Coin>, AnteError> {
        let global_fees = self.global_fee(gas)?;
        if ctx.min_gas_prices().is_empty() {
            return Ok(global_fees);
        }
        let local_fees = required_fees(ctx.min_gas_prices(), gas)?;
        Ok(combined_fee_requirement(&global_fees, &local_fees))
    }

    fn allowed_to_bypass_min_fee(&self, fee_ctx: &TxFeeContext) -> Result<bool, AnteError> {
        let bypass_types = self.params.bypass_min_fee_msg_types()?;
        let max_gas = self.params.max_total_bypass_min_fee_msg_gas_usage()?;
        Ok(crate::bypass::qualifies(
            &fee_ctx.message_types,
            &bypass_types,
            fee_ctx.gas,
            max_gas,
        ))
    }
}

impl AnteDecorator for FeeDecorator {
    fn ante_handle(
        &self,
        ctx: Context,
        tx: &dyn FeeTx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<Context, AnteError> {
        let fee_ctx = TxFeeContext::from_tx(tx, self.options.max_msg_nesting_depth)?;

        // simulation estimates gas, it does not gate admission
        if simulate || !ctx.is_check_tx() || !self.options.enforce_fee_floor {
            return next.handle(ctx, tx, simulate);
        }

        let paid = Coin::display_list(&fee_ctx.fee);
        debug!(
            "tx received at height {}: {:?} gas: {} fee: {}",
            ctx.block_height(),
            fee_ctx.message_types,
            fee_ctx.gas,
            paid
        );
        let priority = tx_priority(&fee_ctx.fee);

        if self.allowed_to_bypass_min_fee(&fee_ctx)? {
            if fee_ctx.is_zero_fee() {
                trace!("Zero fee bypass tx with gas {}", fee_ctx.gas);
                let ctx = ctx
                    .with_priority(priority)
                    .with_marker(BYPASS_MIN_FEE_MARKER, fee_ctx.gas.to_string());
                return next.handle(ctx, tx, simulate);
            }
            // a bypass tx may not sneak in a fee denom the chain does not accept
            let global_fees = self.global_fee(fee_ctx.gas)?;
            if !denoms_subset_of_including_zero(&fee_ctx.fee, &global_fees) {
                return Err(AnteError::InsufficientFee(format!(
                    "fees denom is wrong; got: {} required: {}",
                    paid,
                    Coin::display_list(&global_fees)
                )));
            }
            let ctx = ctx
                .with_priority(priority)
                .with_marker(BYPASS_MIN_FEE_MARKER, fee_ctx.gas.to_string());
            return next.handle(ctx, tx, simulate);
        }

        let fee_required = self.tx_fee_required(&ctx, fee_ctx.gas)?;
        let required = Coin::display_list(&fee_required);

        if !denoms_subset_of_including_zero(&fee_ctx.fee, &fee_required) {
            return Err(AnteError::InsufficientFee(format!(
                "fee is not a subset of required fees; got {}, required: {}",
                paid, required
            )));
        }
        // at least one paid coin must cover its denom's requirement
        if !is_any_gte_including_zero(&fee_ctx.fee, &fee_required) {
            return Err(AnteError::InsufficientFee(format!(
                "insufficient fees; got: {} required: {}",
                paid, required
            )));
        }

        let ctx = ctx
            .with_priority(priority)
            .with_marker(REQUIRED_FEES_MARKER, required);
        next.handle(ctx, tx, simulate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::DecCoin;
    use crate::context::ExecMode;
    use crate::error::SdkErrorCode;
    use crate::msgs::tests::{exec_msg, plain_msg};
    use crate::params::{
        staking_key_table, Params, KEY_BOND_DENOM, MODULE_NAME, STAKING_MODULE_NAME,
    };
    use crate::store::{KvStore, MemStore};
    use crate::tx::tests::build_tx;
    use crate::type_urls::{MSG_RECV_PACKET_TYPE_URL, MSG_SEND_TYPE_URL};
    use std::cell::Cell;
    use std::str::FromStr;
    use std::sync::Arc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn prices(list: &[&str]) -> Vec<DecCoin> {
        list.iter().map(|p| DecCoin::from_str(p).unwrap()).collect()
    }

    /// A decorator over a fresh store with bond denom `uatom`, the given
    /// global prices and the default bypass params
    fn decorator(global_prices: &[&str]) -> FeeDecorator {
        decorator_with_options(global_prices, FeeDecoratorOptions::default())
    }

    fn decorator_with_options(global_prices: &[&str], options: FeeDecoratorOptions) -> FeeDecorator {
        init_logging();
        let store: Arc<dyn KvStore> = Arc::new(MemStore::new());
        let globalfee = Subspace::new(store.clone(), MODULE_NAME).with_key_table(Params::key_table());
        let staking =
            Subspace::new(store, STAKING_MODULE_NAME).with_key_table(staking_key_table());
        staking.set(KEY_BOND_DENOM, &"uatom").unwrap();
        let decorator = FeeDecorator::new(globalfee, staking, options).unwrap();
        decorator
            .param_source()
            .set_params(&Params {
                minimum_gas_prices: prices(global_prices),
                ..Params::default()
            })
            .unwrap();
        decorator
    }

    fn check_ctx(local_prices: &[&str]) -> Context {
        Context::new(ExecMode::CheckTx, 10, prices(local_prices))
    }

    fn accept(ctx: Context, _tx: &dyn FeeTx, _simulate: bool) -> Result<Context, AnteError> {
        Ok(ctx)
    }

    fn send_tx(fee: &[&str], gas: u64) -> cosmos_sdk_proto::cosmos::tx::v1beta1::Tx {
        build_tx(fee, gas, vec![plain_msg(MSG_SEND_TYPE_URL)])
    }

    fn expect_insufficient(result: Result<Context, AnteError>) -> String {
        match result {
            Err(e) => {
                assert_eq!(e.code(), SdkErrorCode::ErrInsufficientFee);
                e.to_string()
            }
            Ok(_) => panic!("expected the fee to be rejected"),
        }
    }

    #[test]
    fn test_global_floor_admitted() {
        let d = decorator(&["0.004uatom"]);
        let tx = send_tx(&["800uatom"], 200_000);
        let ctx = d.ante_handle(check_ctx(&[]), &tx, false, &accept).unwrap();
        assert_eq!(ctx.marker(REQUIRED_FEES_MARKER), Some("800uatom"));
        assert_eq!(ctx.priority(), 800);
    }

    #[test]
    fn test_global_floor_rejected() {
        let d = decorator(&["0.004uatom"]);
        let tx = send_tx(&["150uatom"], 200_000);
        let msg = expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));
        assert!(msg.starts_with("insufficient fees; got: 150uatom required: 800uatom"));
    }

    #[test]
    fn test_zero_floor_with_zero_fee() {
        let d = decorator(&["0photon", "0uatom"]);
        let tx = send_tx(&["0photon", "0uatom"], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());

        // paying nothing at all is fine against a zero floor too
        let tx = send_tx(&[], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());
    }

    #[test]
    fn test_zero_floor_wrong_denom() {
        let d = decorator(&["0photon", "0uatom"]);
        let tx = send_tx(&["0stake"], 200_000);
        let msg = expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));
        assert!(msg.starts_with("fee is not a subset of required fees"));
    }

    #[test]
    fn test_bypass_msg_with_empty_fee() {
        let d = decorator(&["0.004uatom"]);
        let tx = build_tx(&[], 50_000, vec![plain_msg(MSG_RECV_PACKET_TYPE_URL)]);
        let ctx = d.ante_handle(check_ctx(&["1uatom"]), &tx, false, &accept).unwrap();
        assert_eq!(ctx.marker(BYPASS_MIN_FEE_MARKER), Some("50000"));
        assert_eq!(ctx.marker(REQUIRED_FEES_MARKER), None);
    }

    #[test]
    fn test_bypass_msg_over_gas_bound() {
        let d = decorator(&["0.004uatom"]);
        let tx = build_tx(&[], 1_000_001, vec![plain_msg(MSG_RECV_PACKET_TYPE_URL)]);
        expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));
    }

    #[test]
    fn test_bypass_msg_wrong_fee_denom() {
        let d = decorator(&["0.004uatom"]);
        let tx = build_tx(&["5stake"], 50_000, vec![plain_msg(MSG_RECV_PACKET_TYPE_URL)]);
        let msg = expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));
        assert!(msg.starts_with("fees denom is wrong; got: 5stake required: 200uatom"));

        // a low fee in an accepted denom is still fine
        let tx = build_tx(&["1uatom"], 50_000, vec![plain_msg(MSG_RECV_PACKET_TYPE_URL)]);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());
    }

    #[test]
    fn test_local_floor_combination() {
        let gas = 100_000;
        // local floor below global, global wins
        let d = decorator(&["0.004uatom"]);
        let tx = send_tx(&["300uatom"], gas);
        let msg = expect_insufficient(d.ante_handle(check_ctx(&["0.002uatom"]), &tx, false, &accept));
        assert!(msg.starts_with("insufficient fees; got: 300uatom required: 400uatom"));
        let tx = send_tx(&["400uatom"], gas);
        assert!(d
            .ante_handle(check_ctx(&["0.002uatom"]), &tx, false, &accept)
            .is_ok());

        // local floor above global, local wins
        let tx = send_tx(&["500uatom"], gas);
        expect_insufficient(d.ante_handle(check_ctx(&["0.006uatom"]), &tx, false, &accept));
        let tx = send_tx(&["600uatom"], gas);
        assert!(d
            .ante_handle(check_ctx(&["0.006uatom"]), &tx, false, &accept)
            .is_ok());

        // a local only denom does not widen what is accepted
        let tx = send_tx(&["1000photon"], gas);
        expect_insufficient(d.ante_handle(check_ctx(&["0.001photon"]), &tx, false, &accept));
    }

    #[test]
    fn test_any_denom_may_cover() {
        let d = decorator(&["0.01photon", "0.004uatom"]);
        let tx = send_tx(&["1photon", "800uatom"], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());
        let tx = send_tx(&["2000photon"], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());
        let tx = send_tx(&["1999photon", "799uatom"], 200_000);
        expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));
    }

    #[test]
    fn test_default_global_fee_is_zero_bond_denom() {
        let d = decorator(&[]);
        assert_eq!(d.global_fee(200_000).unwrap(), vec![Coin::zero("uatom")]);
        let tx = send_tx(&[], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());
        let tx = send_tx(&["10photon"], 200_000);
        expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));
        // the local floor still applies inside the bond denom
        let tx = send_tx(&["10uatom"], 200_000);
        expect_insufficient(d.ante_handle(check_ctx(&["0.001uatom"]), &tx, false, &accept));
    }

    #[test]
    fn test_simulate_and_deliver_skip_checks() {
        let d = decorator(&["0.004uatom"]);
        let tx = send_tx(&["1uatom"], 200_000);
        let ctx = d.ante_handle(check_ctx(&[]), &tx, true, &accept).unwrap();
        assert_eq!(ctx.marker(REQUIRED_FEES_MARKER), None);

        let deliver = Context::new(ExecMode::DeliverTx, 10, Vec::new());
        assert!(d.ante_handle(deliver, &tx, false, &accept).is_ok());
    }

    #[test]
    fn test_fee_floor_disabled_by_option() {
        let options = FeeDecoratorOptions {
            enforce_fee_floor: false,
            ..FeeDecoratorOptions::default()
        };
        let d = decorator_with_options(&["0.004uatom"], options);
        let tx = send_tx(&["1stake"], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &accept).is_ok());
        // a second decorator in the same process is unaffected
        let strict = decorator(&["0.004uatom"]);
        expect_insufficient(strict.ante_handle(check_ctx(&[]), &tx, false, &accept));
    }

    #[test]
    fn test_next_not_called_on_reject() {
        let d = decorator(&["0.004uatom"]);
        let called = Cell::new(false);
        let next = |ctx: Context, _tx: &dyn FeeTx, _simulate: bool| -> Result<Context, AnteError> {
            called.set(true);
            Ok(ctx)
        };
        let tx = send_tx(&["1uatom"], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &next).is_err());
        assert!(!called.get());
        let tx = send_tx(&["800uatom"], 200_000);
        assert!(d.ante_handle(check_ctx(&[]), &tx, false, &next).is_ok());
        assert!(called.get());
    }

    #[test]
    fn test_next_error_propagates() {
        let d = decorator(&["0.004uatom"]);
        let fail = |_ctx: Context, _tx: &dyn FeeTx, _simulate: bool| -> Result<Context, AnteError> {
            Err(AnteError::Logic("later stage".to_string()))
        };
        let tx = send_tx(&["800uatom"], 200_000);
        assert_eq!(
            d.ante_handle(check_ctx(&[]), &tx, false, &fail),
            Err(AnteError::Logic("later stage".to_string()))
        );
    }

    #[test]
    fn test_tx_without_fee() {
        let d = decorator(&["0.004uatom"]);
        let tx = cosmos_sdk_proto::cosmos::tx::v1beta1::Tx {
            body: None,
            auth_info: None,
            signatures: Vec::new(),
        };
        // decoding problems are reported even when simulating
        let err = d.ante_handle(check_ctx(&[]), &tx, true, &accept).err().unwrap();
        assert_eq!(err.code(), SdkErrorCode::ErrTxDecode);
    }

    #[test]
    fn test_nested_bypass_messages() {
        let d = decorator(&["0.004uatom"]);
        // MsgExec is not a bypass type, so wrapping a relayer msg loses the bypass
        let tx = build_tx(
            &[],
            50_000,
            vec![exec_msg(vec![plain_msg(MSG_RECV_PACKET_TYPE_URL)])],
        );
        expect_insufficient(d.ante_handle(check_ctx(&[]), &tx, false, &accept));

        let mut deep = plain_msg(MSG_RECV_PACKET_TYPE_URL);
        for _ in 0..10 {
            deep = exec_msg(vec![deep]);
        }
        let tx = build_tx(&["800uatom"], 200_000, vec![deep]);
        let err = d.ante_handle(check_ctx(&[]), &tx, false, &accept).err().unwrap();
        assert_eq!(err.code(), SdkErrorCode::ErrInvalidRequest);
    }

    #[test]
    fn test_missing_bond_denom_is_logic_error() {
        let store: Arc<dyn KvStore> = Arc::new(MemStore::new());
        let globalfee = Subspace::new(store.clone(), MODULE_NAME).with_key_table(Params::key_table());
        let staking =
            Subspace::new(store, STAKING_MODULE_NAME).with_key_table(staking_key_table());
        let d = FeeDecorator::new(globalfee, staking, FeeDecoratorOptions::default()).unwrap();
        let tx = send_tx(&["800uatom"], 200_000);
        let err = d.ante_handle(check_ctx(&[]), &tx, false, &accept).err().unwrap();
        assert_eq!(err.code(), SdkErrorCode::ErrLogic);
    }

    #[test]
    fn test_construction_requires_key_tables() {
        let store: Arc<dyn KvStore> = Arc::new(MemStore::new());
        let globalfee = Subspace::new(store.clone(), MODULE_NAME);
        let staking =
            Subspace::new(store, STAKING_MODULE_NAME).with_key_table(staking_key_table());
        let err = FeeDecorator::new(globalfee, staking, FeeDecoratorOptions::default())
            .err()
            .unwrap();
        assert_eq!(err.code(), SdkErrorCode::ErrLogic);
    }
}
