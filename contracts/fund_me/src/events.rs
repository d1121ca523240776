//! # Events
//!
//! | Topics                  | Data          |
//! |-------------------------|---------------|
//! | (`funded`, funder)      | [`Funded`]    |
//! | (`withdrawn`, owner)    | [`Withdrawn`] |
//!
//! The off-chain indexer keys on the leading topic symbol and reads the data
//! fields by name, so renaming a field here is a breaking change for it.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// An accepted contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funded {
    pub funder: Address,
    pub amount: i128,
}

/// A completed withdrawal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub owner: Address,
    /// Whole contract balance sent to the owner.
    pub amount: i128,
    /// Funder list length that was cleared.
    pub funders: u32,
}

pub fn publish_funded(env: &Env, funder: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("funded"), funder.clone()),
        Funded {
            funder: funder.clone(),
            amount,
        },
    );
}

pub fn publish_withdrawn(env: &Env, owner: &Address, amount: i128, funders: u32) {
    env.events().publish(
        (symbol_short!("withdrawn"), owner.clone()),
        Withdrawn {
            owner: owner.clone(),
            amount,
            funders,
        },
    );
}
