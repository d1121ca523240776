//! Contribution path: USD gate, deposit, ledger update.

use soroban_sdk::{log, token, Address, Env};

use crate::{events, price_converter, storage, Error};

/// Accept `amount` of the configured asset from `funder`.
///
/// The USD check happens before any token moves. The deposit and the ledger
/// update share the invocation, so either both land or neither does.
pub fn fund(env: &Env, funder: &Address, amount: i128) -> Result<(), Error> {
    let token = token::Client::new(env, &storage::get_token(env));
    let minimum = price_converter::minimum_in_base_units(token.decimals())?;

    // Nothing sent: reject without consulting the oracle.
    if amount <= 0 {
        return Err(Error::BelowMinimum);
    }
    let usd = price_converter::conversion_rate(env, &storage::get_price_feed(env), amount)?;
    if usd < minimum {
        return Err(Error::BelowMinimum);
    }

    token.transfer(funder, &env.current_contract_address(), &amount);

    let total = storage::add_amount_funded(env, funder, amount)?;
    storage::push_funder(env, funder);
    log!(env, "funded", funder.clone(), amount, total);

    events::publish_funded(env, funder, amount);
    Ok(())
}
