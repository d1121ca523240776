//! # FundMe Contract
//!
//! A crowdfunding contract: anyone may fund it with at least [`MINIMUM_USD`]
//! worth of the configured asset, priced through an external aggregator, and
//! only the owner may drain it.
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Deployment   | `__constructor(owner, price_feed, token)`             |
//! | Funding      | [`FundMe::fund`]                                      |
//! | Withdrawal   | [`FundMe::withdraw`], [`FundMe::cheaper_withdraw`]    |
//! | Queries      | `get_owner`, `get_price_feed`, `get_token`, `get_version`, `get_address_to_amount_funded`, `get_funder`, `get_funders_count`, `get_minimum_usd` |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`], conversion to
//! [`price_converter`], and the two state-changing flows to `funding` and
//! `withdraw`. This file only holds the public entry points.
//!
//! Every entry point runs inside a single Soroban invocation. A returned
//! [`Error`] or a failed cross-contract call (oracle read, token transfer)
//! rolls back every write the invocation made.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

mod events;
mod funding;
pub mod price_converter;
mod price_feed;
mod storage;
mod withdraw;

#[cfg(any(test, all(feature = "testutils", not(target_family = "wasm"))))]
pub mod mock_price_feed;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod testutils;
#[cfg(test)]
mod test_events;

pub use events::{Funded, Withdrawn};
pub use price_feed::{PriceFeedClient, PriceFeedInterface, RoundData};

/// Smallest accepted contribution, in whole US dollars.
pub const MINIMUM_USD: i128 = 50;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contribution is worth less than [`MINIMUM_USD`].
    BelowMinimum          = 1,
    /// Caller is not the owner.
    NotOwner              = 2,
    /// `get_funder` index is past the end of the funder list.
    FunderIndexOutOfRange = 3,
    /// The price feed reported a zero or negative answer.
    InvalidPrice          = 4,
    Overflow              = 5,
    /// A funder list slot below the list length has no entry.
    MissingFunder         = 6,
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    /// Fix the owner, price feed and accepted asset for the contract's lifetime.
    pub fn __constructor(env: Env, owner: Address, price_feed: Address, token: Address) {
        storage::init(&env, &owner, &price_feed, &token);
    }

    // ─────────────────────────────────────────────────────────
    // Mutating entry points
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` base units of the configured asset.
    ///
    /// - `funder` must authorize the call and hold `amount`.
    /// - Fails with `Error::BelowMinimum` when `amount` is worth less than
    ///   [`MINIMUM_USD`] at the feed's latest answer.
    /// - Repeat contributions add to the funder's ledger entry and append the
    ///   funder to the list again.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), Error> {
        funder.require_auth();
        funding::fund(&env, &funder, amount)
    }

    /// Send the whole balance to the owner and reset the ledger.
    ///
    /// `caller` must authorize and be the owner, otherwise `Error::NotOwner`.
    pub fn withdraw(env: Env, caller: Address) -> Result<(), Error> {
        withdraw::withdraw(&env, &caller)
    }

    /// Same effect as [`FundMe::withdraw`] with fewer storage reads.
    pub fn cheaper_withdraw(env: Env, caller: Address) -> Result<(), Error> {
        withdraw::cheaper_withdraw(&env, &caller)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Address {
        storage::get_owner(&env)
    }

    pub fn get_price_feed(env: Env) -> Address {
        storage::get_price_feed(&env)
    }

    pub fn get_token(env: Env) -> Address {
        storage::get_token(&env)
    }

    /// Interface version of the configured price feed.
    pub fn get_version(env: Env) -> u32 {
        PriceFeedClient::new(&env, &storage::get_price_feed(&env)).version()
    }

    /// Cumulative contribution of `funder`, zero if it never funded.
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        storage::get_amount_funded(&env, &funder)
    }

    /// Funder list slot `index`.
    pub fn get_funder(env: Env, index: u32) -> Result<Address, Error> {
        if index >= storage::get_funder_count(&env) {
            return Err(Error::FunderIndexOutOfRange);
        }
        storage::load_funder(&env, index).ok_or(Error::FunderIndexOutOfRange)
    }

    pub fn get_funders_count(env: Env) -> u32 {
        storage::get_funder_count(&env)
    }

    /// [`MINIMUM_USD`] in base units of the configured asset.
    pub fn get_minimum_usd(env: Env) -> Result<i128, Error> {
        let token = token::Client::new(&env, &storage::get_token(&env));
        price_converter::minimum_in_base_units(token.decimals())
    }
}
