//! Turning per gas prices into fee amounts

use crate::coin::sort_coins;
use crate::coin::sort_dec_coins;
use crate::coin::validate_dec_coins;
use crate::coin::Coin;
use crate::coin::DecCoin;
use crate::error::AnteError;
use crate::error::CoinParseError;
use num256::Uint256;
use num_traits::ToPrimitive;
use num_traits::Zero;
use std::convert::TryFrom;

/// Determines the required fees by multiplying each minimum gas price by the
/// gas limit, where fee = ceil(minGasPrice * gasLimit).
///
/// The product is taken on integers, the price's mantissa times the gas
/// limit divided by 10^scale and rounded up. A 96 bit mantissa times a u64
/// always fits in a Uint256, so no digit is ever dropped and the result
/// never under collects.
///
/// One coin is produced per price, so an all zero price list yields explicit
/// zero coins while an empty price list yields an empty requirement. The
/// output is sorted by denom.
pub fn required_fees(prices: &[DecCoin], gas_limit: u64) -> Result<Vec<Coin>, AnteError> {
    let mut fees = Vec::with_capacity(prices.len());
    for price in prices {
        let mantissa = u128::try_from(price.amount.mantissa()).map_err(|_| {
            AnteError::InvalidCoins(format!("negative gas price {}", price))
        })?;
        let product = Uint256::from(mantissa) * Uint256::from(gas_limit);
        let divisor = Uint256::from(10u128.pow(price.amount.scale()));
        let mut amount = product / divisor;
        if !(product % divisor).is_zero() {
            amount += Uint256::from(1u8);
        }
        fees.push(Coin::new(amount, price.denom.clone()));
    }
    Ok(sort_coins(fees))
}

/// Parses a comma separated price list such as the `minimum-gas-prices`
/// node option, "0.0025uatom,0.001photon". The result is sorted by denom.
pub fn parse_dec_coins(input: &str) -> Result<Vec<DecCoin>, CoinParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let prices = input
        .split(',')
        .map(|p| p.parse())
        .collect::<Result<Vec<DecCoin>, CoinParseError>>()?;
    let prices = sort_dec_coins(prices);
    validate_dec_coins(&prices)?;
    Ok(prices)
}

/// A naive tx priority, the amount of the smallest coin in the fee. Amounts
/// that do not fit are capped at i64::MAX.
pub fn tx_priority(fee: &[Coin]) -> i64 {
    fee.iter()
        .map(|c| c.amount.to_i64().unwrap_or(i64::MAX))
        .min()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn price(p: &str) -> DecCoin {
        DecCoin::from_str(p).unwrap()
    }

    fn coin(amount: u64, denom: &str) -> Coin {
        Coin::new(amount.into(), denom.to_string())
    }

    #[test]
    fn test_required_fees() {
        let fees = required_fees(&[price("0.004uatom")], 200_000).unwrap();
        assert_eq!(fees, vec![coin(800, "uatom")]);

        // ceil, never round down
        let fees = required_fees(&[price("0.0025uatom")], 1_001).unwrap();
        assert_eq!(fees, vec![coin(3, "uatom")]);

        let fees = required_fees(&[price("0.1uatom"), price("0.5photon")], 3).unwrap();
        assert_eq!(fees, vec![coin(2, "photon"), coin(1, "uatom")]);

        let fees = required_fees(&[], 200_000).unwrap();
        assert!(fees.is_empty());
    }

    #[test]
    fn test_required_fees_zero_prices() {
        let fees = required_fees(&[price("0photon"), price("0uatom")], 200_000).unwrap();
        assert_eq!(fees, vec![coin(0, "photon"), coin(0, "uatom")]);
        let fees = required_fees(&[price("0.004uatom")], 0).unwrap();
        assert_eq!(fees, vec![coin(0, "uatom")]);
    }

    #[test]
    fn test_required_fees_largest_inputs() {
        let huge = DecCoin::new(Decimal::MAX, "uatom");
        let fees = required_fees(&[huge], u64::MAX).unwrap();
        let expected = Uint256::from(u128::MAX >> 32) * Uint256::from(u64::MAX);
        assert_eq!(fees, vec![Coin::new(expected, "uatom".to_string())]);
    }

    #[test]
    fn test_required_fees_negative_price() {
        let negative = DecCoin::new(Decimal::new(-25, 4), "uatom");
        match required_fees(&[negative], 100) {
            Err(AnteError::InvalidCoins(_)) => {}
            other => panic!("expected invalid coins got {:?}", other),
        }
    }

    #[test]
    fn test_required_fees_full_precision() {
        // products with more digits than a Decimal can hold must still round up
        let fees = required_fees(&[price("0.9090909090909090909090909091uatom")], 11).unwrap();
        assert_eq!(fees, vec![coin(11, "uatom")]);

        let fees = required_fees(&[price("9090909090.909090909090909091uatom")], 11).unwrap();
        assert_eq!(fees, vec![coin(100_000_000_001, "uatom")]);

        // 18 decimal places, the precision of an sdk Dec
        let fees = required_fees(&[price("0.000000000000000001uatom")], u64::MAX).unwrap();
        assert_eq!(fees, vec![coin(19, "uatom")]);
    }

    #[test]
    fn test_required_fees_random_against_integer_math() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let mantissa: u64 = rng.gen_range(0..u64::MAX >> 4);
            let scale: u32 = rng.gen_range(0..=18);
            let gas: u64 = rng.gen_range(0..u64::MAX >> 4);
            let p = DecCoin::new(Decimal::from_i128_with_scale(mantissa as i128, scale), "uatom");

            let product = mantissa as u128 * gas as u128;
            let divisor = 10u128.pow(scale);
            let expected = (product + divisor - 1) / divisor;

            let fees = required_fees(&[p], gas).unwrap();
            assert_eq!(fees[0].amount, Uint256::from(expected));
            // never under collects
            assert!(expected * divisor >= product);
        }
    }

    #[test]
    fn test_required_fees_monotonic_in_gas() {
        let prices = vec![price("0.0025photon"), price("0.004uatom"), price("1.5stake")];
        let mut last = required_fees(&prices, 0).unwrap();
        for gas in (1..200_000u64).step_by(997) {
            let current = required_fees(&prices, gas).unwrap();
            for (a, b) in last.iter().zip(current.iter()) {
                assert_eq!(a.denom, b.denom);
                assert!(b.amount >= a.amount);
            }
            last = current;
        }
    }

    #[test]
    fn test_parse_dec_coins() {
        let prices = parse_dec_coins("0.0025uatom, 0.001photon").unwrap();
        assert_eq!(prices, vec![price("0.001photon"), price("0.0025uatom")]);
        assert!(parse_dec_coins("").unwrap().is_empty());
        assert!(parse_dec_coins("  ").unwrap().is_empty());
        assert_eq!(
            parse_dec_coins("1uatom,2uatom"),
            Err(CoinParseError::DuplicateDenom("uatom".to_string()))
        );
        assert!(parse_dec_coins("1uatom,,").is_err());
    }

    #[test]
    fn test_tx_priority() {
        assert_eq!(tx_priority(&[]), 0);
        assert_eq!(tx_priority(&[coin(800, "uatom")]), 800);
        assert_eq!(tx_priority(&[coin(800, "photon"), coin(30, "uatom")]), 30);
        let big = Coin::new(
            "100000000000000000000000".parse().unwrap(),
            "uatom".to_string(),
        );
        assert_eq!(tx_priority(&[big.clone()]), i64::MAX);
        assert_eq!(tx_priority(&[coin(5, "photon"), big]), 5);
        assert_eq!(tx_priority(&[coin(i64::MAX as u64, "uatom")]), i64::MAX);
    }
}
