//! Minimum fee admission for CosmosSDK chains. A governance controlled global
//! price floor is combined with each node's own `minimum-gas-prices` and
//! checked against transactions entering the mempool, with an allow list of
//! message types (IBC relaying by default) that may go through for free.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod ante;
pub mod bypass;
pub mod coin;
pub mod config;
pub mod context;
pub mod error;
pub mod fee_utils;
pub mod gas_price;
pub mod genesis;
pub mod migrations;
pub mod msgs;
pub mod param_source;
pub mod params;
pub mod store;
pub mod tx;
pub mod type_urls;

pub use ante::AnteDecorator;
pub use ante::AnteHandler;
pub use ante::FeeDecorator;
pub use coin::Coin;
pub use coin::DecCoin;
pub use coin::Fee;
pub use config::FeeDecoratorOptions;
pub use config::NodeConfig;
pub use context::Context;
pub use context::ExecMode;
pub use error::AnteError;
pub use genesis::GenesisState;
pub use param_source::GlobalFeeParamSource;
pub use params::Params;
pub use store::MemStore;
pub use store::Subspace;
