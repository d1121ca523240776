#![allow(dead_code)]

extern crate std;

use std::vec::Vec;

use soroban_sdk::Address;

use crate::testutils::Fixture;
use crate::Error;

/// Distinct addresses currently in the funder list, in first-seen order.
pub fn distinct_funders(fx: &Fixture) -> Vec<Address> {
    let mut funders: Vec<Address> = Vec::new();
    for index in 0..fx.fund_me.get_funders_count() {
        let funder = fx.fund_me.get_funder(&index);
        if !funders.contains(&funder) {
            funders.push(funder);
        }
    }
    funders
}

/// The ledger accounts for every base unit the contract holds.
pub fn assert_ledger_matches_balance(fx: &Fixture) {
    let ledger_total: i128 = distinct_funders(fx)
        .iter()
        .map(|funder| fx.fund_me.get_address_to_amount_funded(funder))
        .sum();
    assert_eq!(
        ledger_total,
        fx.contract_balance(),
        "ledger total {} does not match contract balance {}",
        ledger_total,
        fx.contract_balance()
    );
}

/// A deposit of `amount` moves a ledger entry by exactly `amount`.
pub fn assert_deposit_invariant(before: i128, after: i128, amount: i128) {
    assert_eq!(
        after,
        before + amount,
        "deposit invariant broken: {} + {} != {}",
        before,
        amount,
        after
    );
}

/// Post-withdrawal state: empty balance, empty list, zeroed ledger.
pub fn assert_reset(fx: &Fixture, funders: &[Address]) {
    assert_eq!(fx.contract_balance(), 0, "contract still holds funds");
    assert_eq!(fx.fund_me.get_funders_count(), 0, "funder list not cleared");
    assert_eq!(
        fx.fund_me.try_get_funder(&0),
        Err(Ok(Error::FunderIndexOutOfRange))
    );
    for funder in funders {
        assert_eq!(
            fx.fund_me.get_address_to_amount_funded(funder),
            0,
            "ledger entry not zeroed"
        );
    }
}
