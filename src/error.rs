use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Errors produced while running a transaction through the fee checks. Every
/// variant maps onto an error code from the 'sdk' codespace so that callers
/// can report the failure to the submitter the same way the chain does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnteError {
    /// The transaction does not expose a fee, a gas limit, or one of its
    /// messages could not be decoded
    TxDecode(String),
    /// The paid fee is in the wrong denoms or below the required amount
    InsufficientFee(String),
    /// A coin amount or price could not be used, for example because the
    /// product of a gas price and a gas limit overflowed
    InvalidCoins(String),
    /// Wrapper messages nested deeper than the configured bound
    MsgNestingTooDeep { depth: usize, max: usize },
    /// A stored value could not be decoded
    JsonUnmarshal(String),
    /// Params failed basic validation on the governance write path
    InvalidParams(String),
    /// Deployment defect, the node can't safely evaluate any transaction
    Logic(String),
}

impl AnteError {
    pub fn code(&self) -> SdkErrorCode {
        match self {
            AnteError::TxDecode(_) => SdkErrorCode::ErrTxDecode,
            AnteError::InsufficientFee(_) => SdkErrorCode::ErrInsufficientFee,
            AnteError::InvalidCoins(_) => SdkErrorCode::ErrInvalidCoins,
            AnteError::MsgNestingTooDeep { .. } => SdkErrorCode::ErrInvalidRequest,
            AnteError::JsonUnmarshal(_) => SdkErrorCode::ErrJsonUnmarshal,
            AnteError::InvalidParams(_) => SdkErrorCode::ErrInvalidType,
            AnteError::Logic(_) => SdkErrorCode::ErrLogic,
        }
    }
}

impl Display for AnteError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            AnteError::TxDecode(val) => write!(f, "{}: tx parse error", val),
            AnteError::InsufficientFee(val) => write!(f, "{}: insufficient fee", val),
            AnteError::InvalidCoins(val) => write!(f, "{}: invalid coins", val),
            AnteError::MsgNestingTooDeep { depth, max } => write!(
                f,
                "message nesting too deep; depth: {} max: {}: invalid request",
                depth, max
            ),
            AnteError::JsonUnmarshal(val) => write!(f, "{}: failed to unmarshal JSON bytes", val),
            AnteError::InvalidParams(val) => write!(f, "{}: invalid type", val),
            AnteError::Logic(val) => write!(f, "{}: internal logic error", val),
        }
    }
}

impl Error for AnteError {}

impl From<serde_json::Error> for AnteError {
    fn from(error: serde_json::Error) -> Self {
        AnteError::JsonUnmarshal(error.to_string())
    }
}

impl From<CoinParseError> for AnteError {
    fn from(error: CoinParseError) -> Self {
        AnteError::InvalidCoins(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoinParseError {
    EmptyInput,
    MissingAmount(String),
    InvalidAmount { input: String, error: String },
    InvalidDenom(String),
    NegativeAmount(String),
    DuplicateDenom(String),
    UnsortedDenom(String),
}

impl fmt::Display for CoinParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoinParseError::EmptyInput => write!(f, "CoinParseError empty input"),
            CoinParseError::MissingAmount(val) => {
                write!(f, "CoinParseError no amount in {}", val)
            }
            CoinParseError::InvalidAmount { input, error } => {
                write!(f, "CoinParseError bad amount in {} {}", input, error)
            }
            CoinParseError::InvalidDenom(val) => write!(f, "invalid denom: {}", val),
            CoinParseError::NegativeAmount(val) => write!(f, "coin {} amount is negative", val),
            CoinParseError::DuplicateDenom(val) => write!(f, "duplicate denomination {}", val),
            CoinParseError::UnsortedDenom(val) => {
                write!(f, "denomination {} is not sorted", val)
            }
        }
    }
}

impl Error for CoinParseError {}

/// Cosmos sdk errors from the 'sdk' codespace that this crate can produce.
/// Each maps to the code found in a TxResponse
/// https://github.com/cosmos/cosmos-sdk/blob/ed01c21584ab63efe0e505cd281cbc680f7623da/types/errors/errors.go
#[derive(Clone, PartialEq, Eq, Copy, Debug)]
pub enum SdkErrorCode {
    ErrTxDecode,
    ErrInvalidCoins,
    ErrInsufficientFee,
    ErrJsonUnmarshal,
    ErrInvalidRequest,
    ErrInvalidType,
    ErrLogic,
}

impl SdkErrorCode {
    pub fn get_code(&self) -> u32 {
        match self {
            SdkErrorCode::ErrTxDecode => 2,
            SdkErrorCode::ErrInvalidCoins => 10,
            SdkErrorCode::ErrInsufficientFee => 13,
            SdkErrorCode::ErrJsonUnmarshal => 17,
            SdkErrorCode::ErrInvalidRequest => 18,
            SdkErrorCode::ErrInvalidType => 29,
            SdkErrorCode::ErrLogic => 35,
        }
    }
    pub fn from_code(code: u32) -> Option<SdkErrorCode> {
        match code {
            2 => Some(SdkErrorCode::ErrTxDecode),
            10 => Some(SdkErrorCode::ErrInvalidCoins),
            13 => Some(SdkErrorCode::ErrInsufficientFee),
            17 => Some(SdkErrorCode::ErrJsonUnmarshal),
            18 => Some(SdkErrorCode::ErrInvalidRequest),
            29 => Some(SdkErrorCode::ErrInvalidType),
            35 => Some(SdkErrorCode::ErrLogic),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        let err = AnteError::InsufficientFee("insufficient fees; got: 150uatom required: 400uatom".to_string());
        assert_eq!(err.code(), SdkErrorCode::ErrInsufficientFee);
        assert_eq!(err.code().get_code(), 13);
        assert_eq!(SdkErrorCode::from_code(13), Some(SdkErrorCode::ErrInsufficientFee));
        assert_eq!(SdkErrorCode::from_code(111), None);
        // only codes this crate can produce are known
        assert_eq!(SdkErrorCode::from_code(38), None);
        assert_eq!(
            AnteError::MsgNestingTooDeep { depth: 6, max: 5 }.code().get_code(),
            18
        );
        assert_eq!(
            err.to_string(),
            "insufficient fees; got: 150uatom required: 400uatom: insufficient fee"
        );
    }
}
