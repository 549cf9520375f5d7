//! Store migrations for the globalfee params

pub mod v2 {
    use crate::error::AnteError;
    use crate::params::{
        default_bypass_min_fee_msg_types, DEFAULT_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE,
        PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES,
        PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE,
    };
    use crate::store::Subspace;

    /// Backfills the bypass params that the v1 schema did not have. Keys that
    /// already hold a value and the minimum gas prices are left alone, so
    /// running this twice is the same as running it once.
    pub fn migrate_store(subspace: &Subspace) -> Result<(), AnteError> {
        if !subspace.has(PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES)? {
            subspace.set(
                PARAM_STORE_KEY_BYPASS_MIN_FEE_MSG_TYPES,
                &default_bypass_min_fee_msg_types(),
            )?;
        }
        if !subspace.has(PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE)? {
            subspace.set(
                PARAM_STORE_KEY_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE,
                &DEFAULT_MAX_TOTAL_BYPASS_MIN_FEE_MSG_GAS_USAGE,
            )?;
        }
        info!("Migrated {} params to v2", subspace.name());
        Ok(())
    }

    /// An upgrade scheduled at a fixed block height
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UpgradePlan {
        pub height: u64,
    }

    impl UpgradePlan {
        /// Runs the migration if `current_height` is the upgrade height,
        /// returns whether it ran
        pub fn apply_if_due(
            &self,
            current_height: u64,
            subspace: &Subspace,
        ) -> Result<bool, AnteError> {
            if current_height != self.height {
                return Ok(false);
            }
            migrate_store(subspace)?;
            Ok(true)
        }
    }

}
