//! # Price Feed
//!
//! The oracle FundMe consults is any contract exposing an aggregator-style
//! read surface. FundMe never writes to it.

use soroban_sdk::{contractclient, contracttype, Env};

/// One answer of the aggregator.
///
/// `answer` is the native asset's USD price scaled by `10^decimals()`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    /// Number of decimals `RoundData::answer` is scaled by.
    fn decimals(env: Env) -> u32;

    /// Aggregator interface version.
    fn version(env: Env) -> u32;

    /// Most recent answer.
    fn latest_round_data(env: Env) -> RoundData;
}
