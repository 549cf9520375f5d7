//! Set functions over coin lists that treat a zero amount coin as a real
//! entry. `0uatom` in a fee requirement means "uatom is accepted, any amount
//! including zero", which is different from uatom being absent.
//!
//! Every function here expects its inputs sorted by denom with no duplicate
//! denoms and does not re-sort them, except `combined_fee_requirement` which
//! sorts its output.

use crate::coin::sort_coins;
use crate::coin::Coin;

/// Binary search for `denom` in a sorted coin list
pub fn find<'a>(coins: &'a [Coin], denom: &str) -> Option<&'a Coin> {
    coins
        .binary_search_by(|c| c.denom.as_str().cmp(denom))
        .ok()
        .map(|idx| &coins[idx])
}

/// Returns true if the coins are empty or contain at least one zero coin
pub fn contains_zero_coins(coins: &[Coin]) -> bool {
    coins.is_empty() || coins.iter().any(|c| c.is_zero())
}

/// Returns true if every denom of `coins` is present in `superset`.
/// Amounts are not compared.
///
/// An empty `coins` is only a subset of a superset that is itself empty or
/// that has a zero coin in it, e.g. `[]` is a subset of `[0stake,1uatom]` but
/// not of `[1uatom]`. A list with more entries than `superset` can never be a
/// subset.
pub fn denoms_subset_of_including_zero(coins: &[Coin], superset: &[Coin]) -> bool {
    if coins.len() > superset.len() {
        return false;
    }
    if coins.is_empty() {
        return contains_zero_coins(superset);
    }
    coins.iter().all(|c| find(superset, &c.denom).is_some())
}

/// Returns true if at least one coin in `coins` has an amount greater than or
/// equal to the amount of the same denom in `superset`.
///
/// Callers must check `denoms_subset_of_including_zero` first, a coin whose
/// denom is missing from `superset` is simply skipped.
///
/// - both empty: true
/// - `superset` empty: false, nothing is gte the empty set
/// - `coins` empty: true if `superset` has a zero coin
pub fn is_any_gte_including_zero(coins: &[Coin], superset: &[Coin]) -> bool {
    match (coins.is_empty(), superset.is_empty()) {
        (true, true) => true,
        (false, true) => false,
        (true, false) => contains_zero_coins(superset),
        (false, false) => coins.iter().any(|coin| match find(superset, &coin.denom) {
            Some(required) => coin.amount >= required.amount,
            None => false,
        }),
    }
}

/// Merges the global fee requirement with the node local one.
///
/// The global fees decide which denoms are accepted at all. For each of them
/// the local requirement is used instead when it is strictly higher. Denoms
/// that only appear in `local_fees` are dropped, so the output always has
/// exactly the denoms of `global_fees`. An empty `global_fees` gives an empty
/// result.
pub fn combined_fee_requirement(global_fees: &[Coin], local_fees: &[Coin]) -> Vec<Coin> {
    if global_fees.is_empty() {
        warn!("Combining fee requirements with an empty global fee");
        return Vec::new();
    }
    if local_fees.is_empty() {
        return global_fees.to_vec();
    }

    let all_fees = global_fees
        .iter()
        .map(|fee| match find(local_fees, &fee.denom) {
            Some(local) if local.amount > fee.amount => local.clone(),
            _ => fee.clone(),
        })
        .collect();
    sort_coins(all_fees)
}
