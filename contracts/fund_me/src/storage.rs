//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by FundMe.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type      | Description                         |
//! |---------------|-----------|-------------------------------------|
//! | `Owner`       | `Address` | Account allowed to withdraw         |
//! | `PriceFeed`   | `Address` | Oracle consulted on every `fund`    |
//! | `Token`       | `Address` | Asset accepted by `fund`            |
//! | `FunderCount` | `u32`     | Length of the funder list           |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type      | Description                       |
//! |-------------------------|-----------|-----------------------------------|
//! | `Funder(i)`             | `Address` | Slot `i` of the funder list       |
//! | `AmountFunded(address)` | `i128`    | Cumulative contribution (absent = 0) |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! The funder list is stored one slot per key so that appending on `fund` is a
//! single small write, and so that the two withdrawal paths differ only in how
//! often they go back to storage for the list length and its slots.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Owner address, fixed at construction (Instance).
    Owner,
    /// Price feed contract address, fixed at construction (Instance).
    PriceFeed,
    /// Accepted asset contract address, fixed at construction (Instance).
    Token,
    /// Current funder list length (Instance).
    FunderCount,
    /// Funder list slot (Persistent).
    Funder(u32),
    /// Funder ledger entry (Persistent).
    AmountFunded(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Write the construction-time configuration and an empty funder list.
pub fn init(env: &Env, owner: &Address, price_feed: &Address, token: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage().instance().set(&DataKey::PriceFeed, price_feed);
    env.storage().instance().set(&DataKey::Token, token);
    env.storage().instance().set(&DataKey::FunderCount, &0u32);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("owner not set")
}

pub fn get_price_feed(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PriceFeed)
        .expect("price feed not set")
}

pub fn get_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .expect("token not set")
}

/// Current length of the funder list. Every call is a storage read.
pub fn get_funder_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FunderCount)
        .unwrap_or(0)
}

fn set_funder_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::FunderCount, &count);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Append `funder` to the funder list and return the slot it was written to.
pub fn push_funder(env: &Env, funder: &Address) -> u32 {
    let index = get_funder_count(env);
    let key = DataKey::Funder(index);
    env.storage().persistent().set(&key, funder);
    bump_persistent(env, &key);
    set_funder_count(env, index + 1);
    index
}

/// Load a single funder list slot.
pub fn load_funder(env: &Env, index: u32) -> Option<Address> {
    let key = DataKey::Funder(index);
    let funder: Option<Address> = env.storage().persistent().get(&key);
    if funder.is_some() {
        bump_persistent(env, &key);
    }
    funder
}

/// Read a funder list slot that is about to be cleared. No TTL bump.
pub fn take_funder(env: &Env, index: u32) -> Result<Address, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Funder(index))
        .ok_or(Error::MissingFunder)
}

/// Copy the first `count` funder list slots into memory for clearing.
pub fn take_funders(env: &Env, count: u32) -> Result<Vec<Address>, Error> {
    let mut funders = Vec::new(env);
    for index in 0..count {
        funders.push_back(take_funder(env, index)?);
    }
    Ok(funders)
}

/// Drop the first `count` funder list slots and reset the length to zero.
pub fn clear_funders(env: &Env, count: u32) {
    for index in 0..count {
        env.storage().persistent().remove(&DataKey::Funder(index));
    }
    set_funder_count(env, 0);
}

/// Cumulative amount contributed by `funder`; zero when it never funded.
pub fn get_amount_funded(env: &Env, funder: &Address) -> i128 {
    let key = DataKey::AmountFunded(funder.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Add `amount` to the ledger entry of `funder`, returning the new total.
pub fn add_amount_funded(env: &Env, funder: &Address, amount: i128) -> Result<i128, Error> {
    let total = get_amount_funded(env, funder)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    let key = DataKey::AmountFunded(funder.clone());
    env.storage().persistent().set(&key, &total);
    bump_persistent(env, &key);
    Ok(total)
}

/// Zero the ledger entry of `funder`.
pub fn clear_amount_funded(env: &Env, funder: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::AmountFunded(funder.clone()));
}
