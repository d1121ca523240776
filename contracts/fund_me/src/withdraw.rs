//! Owner withdrawals.
//!
//! Both paths zero every ledger entry named in the funder list, then run the
//! same completion step: drop the list, send the whole balance to the owner,
//! publish `withdrawn`. They differ only in storage traffic:
//!
//! - [`withdraw`] goes back to storage for the list length and for each slot
//!   on every iteration.
//! - [`cheaper_withdraw`] copies the list into memory once and iterates over
//!   the copy.
//!
//! A list slot missing below the list length fails with
//! `Error::MissingFunder`. If that or the final transfer fails the invocation
//! aborts and the host discards the ledger and list writes made before it.

use soroban_sdk::{log, token, Address, Env};

use crate::{events, storage, Error};

/// Authenticate `caller` and confirm it is the owner.
fn require_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    caller.require_auth();
    let owner = storage::get_owner(env);
    if *caller != owner {
        return Err(Error::NotOwner);
    }
    Ok(owner)
}

pub fn withdraw(env: &Env, caller: &Address) -> Result<(), Error> {
    let owner = require_owner(env, caller)?;

    let mut index = 0;
    while index < storage::get_funder_count(env) {
        let funder = storage::take_funder(env, index)?;
        storage::clear_amount_funded(env, &funder);
        index += 1;
    }

    complete_withdrawal(env, &owner, storage::get_funder_count(env));
    Ok(())
}

pub fn cheaper_withdraw(env: &Env, caller: &Address) -> Result<(), Error> {
    let owner = require_owner(env, caller)?;

    let count = storage::get_funder_count(env);
    let funders = storage::take_funders(env, count)?;
    for funder in funders.iter() {
        storage::clear_amount_funded(env, &funder);
    }

    complete_withdrawal(env, &owner, count);
    Ok(())
}

fn complete_withdrawal(env: &Env, owner: &Address, funder_count: u32) {
    storage::clear_funders(env, funder_count);

    let token = token::Client::new(env, &storage::get_token(env));
    let contract = env.current_contract_address();
    let balance = token.balance(&contract);
    if balance > 0 {
        token.transfer(&contract, owner, &balance);
    }
    log!(env, "withdrawn", owner.clone(), balance, funder_count);

    events::publish_withdrawn(env, owner, balance, funder_count);
}
