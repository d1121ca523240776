//! Aggregator stand-in for local and test deployments.
//!
//! Answers are set by whoever calls [`MockPriceFeed::update_answer`]; there is
//! no access control.

use soroban_sdk::{contract, contractimpl, contracttype, Env};

use crate::price_feed::{PriceFeedInterface, RoundData};

/// Interface version reported by the mock.
const VERSION: u32 = 0;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum MockKey {
    Decimals,
    Round,
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn __constructor(env: Env, decimals: u32, initial_answer: i128) {
        env.storage().instance().set(&MockKey::Decimals, &decimals);
        Self::update_answer(env, initial_answer);
    }

    /// Publish a new answer as the next round.
    pub fn update_answer(env: Env, answer: i128) {
        let round_id = env
            .storage()
            .instance()
            .get::<_, RoundData>(&MockKey::Round)
            .map(|round| round.round_id + 1)
            .unwrap_or(1);
        let now = env.ledger().timestamp();
        let round = RoundData {
            round_id,
            answer,
            started_at: now,
            updated_at: now,
            answered_in_round: round_id,
        };
        env.storage().instance().set(&MockKey::Round, &round);
    }
}

#[contractimpl]
impl PriceFeedInterface for MockPriceFeed {
    fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::Decimals)
            .unwrap_or(0)
    }

    fn version(_env: Env) -> u32 {
        VERSION
    }

    fn latest_round_data(env: Env) -> RoundData {
        env.storage()
            .instance()
            .get(&MockKey::Round)
            .expect("no round published")
    }
}
