/// Returns true if the transaction may skip the minimum fee: every message
/// type is listed in `bypass_types` and the total gas does not exceed
/// `max_bypass_gas`. A transaction with no messages only has the gas bound.
///
/// Matching is exact, an unknown or merely similar type url never bypasses.
pub fn qualifies(
    message_types: &[String],
    bypass_types: &[String],
    gas: u64,
    max_bypass_gas: u64,
) -> bool {
    let only_bypass_msgs = message_types
        .iter()
        .all(|msg_type| bypass_types.iter().any(|b| b == msg_type));
    only_bypass_msgs && gas <= max_bypass_gas
}
