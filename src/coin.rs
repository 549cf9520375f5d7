use crate::error::CoinParseError;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmos_sdk_proto::cosmos::tx::v1beta1::Fee as ProtoFee;
use num256::Uint256;
use rust_decimal::Decimal;
use std::convert::TryFrom;
use std::convert::TryInto;
use std::fmt;
use std::str::FromStr;

/// Coin holds some amount of one currency we convert from ProtoCoin to do more
/// validation and provide a generally nicer interface
#[derive(Serialize, Debug, Default, Clone, Deserialize, Eq, PartialEq, Hash)]
pub struct Coin {
    pub amount: Uint256,
    pub denom: String,
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount_denom(value)?;
        match amount.parse() {
            Ok(v) => Ok(Coin {
                amount: v,
                denom: denom.to_string(),
            }),
            Err(e) => Err(CoinParseError::InvalidAmount {
                input: value.to_string(),
                error: e.to_string(),
            }),
        }
    }
}

impl Coin {
    pub fn new(amount: Uint256, denom: String) -> Coin {
        Coin { amount, denom }
    }

    pub fn zero(denom: &str) -> Coin {
        Coin {
            amount: Uint256::from(0u64),
            denom: denom.to_string(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == Uint256::from(0u64)
    }

    /// utility function to display a list of coins the way the Cosmos sdk
    /// does, comma separated and with an empty list shown as nothing
    pub fn display_list(input: &[Coin]) -> String {
        input
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }
}

impl TryFrom<ProtoCoin> for Coin {
    type Error = CoinParseError;

    fn try_from(value: ProtoCoin) -> Result<Self, Self::Error> {
        validate_denom(&value.denom)?;
        match value.amount.parse() {
            Ok(amount) => Ok(Coin {
                denom: value.denom,
                amount,
            }),
            Err(e) => Err(CoinParseError::InvalidAmount {
                input: value.amount,
                error: e.to_string(),
            }),
        }
    }
}

impl From<Coin> for ProtoCoin {
    fn from(value: Coin) -> Self {
        ProtoCoin {
            denom: value.denom,
            amount: value.amount.to_string(),
        }
    }
}

/// The paid side of a Cosmos transaction fee, the coins and the gas limit
/// they pay for. Payer and granter play no part in admission.
#[derive(Serialize, Debug, Default, Clone, Deserialize, Eq, PartialEq, Hash)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
}

impl TryFrom<ProtoFee> for Fee {
    type Error = CoinParseError;

    fn try_from(value: ProtoFee) -> Result<Self, Self::Error> {
        let mut converted_coins = Vec::new();
        for coin in value.amount {
            converted_coins.push(coin.try_into()?);
        }
        Ok(Fee {
            amount: converted_coins,
            gas_limit: value.gas_limit,
        })
    }
}

/// DecCoin is a price per unit of gas in one denom. Amounts are exact
/// decimals, never floats, since every node has to derive the same fee
#[derive(Serialize, Debug, Default, Clone, Deserialize, Eq, PartialEq, Hash)]
pub struct DecCoin {
    pub amount: Decimal,
    pub denom: String,
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount.normalize(), self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = CoinParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount_denom(value)?;
        let amount = Decimal::from_str(amount).map_err(|e| CoinParseError::InvalidAmount {
            input: value.to_string(),
            error: e.to_string(),
        })?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CoinParseError::NegativeAmount(value.to_string()));
        }
        Ok(DecCoin {
            amount,
            denom: denom.to_string(),
        })
    }
}

impl DecCoin {
    pub fn new(amount: Decimal, denom: &str) -> DecCoin {
        DecCoin {
            amount,
            denom: denom.to_string(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn display_list(input: &[DecCoin]) -> String {
        input
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }
}

fn split_amount_denom(value: &str) -> Result<(&str, &str), CoinParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoinParseError::EmptyInput);
    }
    let mut split_idx = None;
    for (idx, char) in value.char_indices() {
        if char.is_alphabetic() {
            split_idx = Some(idx);
            break;
        }
    }
    let split_idx = match split_idx {
        Some(0) => return Err(CoinParseError::MissingAmount(value.to_string())),
        Some(v) => v,
        None => return Err(CoinParseError::InvalidDenom(value.to_string())),
    };
    let (amount, denom) = value.split_at(split_idx);
    validate_denom(denom)?;
    Ok((amount.trim(), denom))
}

/// Checks a denom against the sdk rules, a letter followed by 2 to 127
/// letters, digits or one of `/:._-`
pub fn validate_denom(denom: &str) -> Result<(), CoinParseError> {
    let len = denom.len();
    let mut chars = denom.chars();
    let first_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !(3..=128).contains(&len) || !first_ok || !rest_ok {
        return Err(CoinParseError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

/// Sorts a coin list by denom, the order every set function in this crate
/// expects
pub fn sort_coins(mut coins: Vec<Coin>) -> Vec<Coin> {
    coins.sort_by(|a, b| a.denom.cmp(&b.denom));
    coins
}

pub fn sort_dec_coins(mut coins: Vec<DecCoin>) -> Vec<DecCoin> {
    coins.sort_by(|a, b| a.denom.cmp(&b.denom));
    coins
}

/// Validates that the price list is sorted, has no duplicate or malformed
/// denoms and no negative amounts. An empty list is valid.
pub fn validate_dec_coins(coins: &[DecCoin]) -> Result<(), CoinParseError> {
    let mut low_denom: Option<&str> = None;
    for coin in coins {
        validate_denom(&coin.denom)?;
        if let Some(low) = low_denom {
            if coin.denom.as_str() == low {
                return Err(CoinParseError::DuplicateDenom(coin.denom.clone()));
            }
            if coin.denom.as_str() < low {
                return Err(CoinParseError::UnsortedDenom(coin.denom.clone()));
            }
        }
        if coin.amount.is_sign_negative() && !coin.amount.is_zero() {
            return Err(CoinParseError::NegativeAmount(coin.to_string()));
        }
        low_denom = Some(&coin.denom);
    }
    Ok(())
}
