extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal, Val, Vec,
};

use crate::testutils::{Fixture, UNIT};
use crate::{Funded, Withdrawn};

#[test]
fn test_funded_event() {
    let fx = Fixture::new();
    let env = &fx.env;
    let funder = Address::generate(env);
    fx.fund_as(&funder, UNIT);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("funded"), funder)
    assert_eq!(last_event.0, fx.fund_me.address);
    let expected_topics: Vec<Val> = vec![
        env,
        symbol_short!("funded").into_val(env),
        funder.into_val(env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Funded = last_event.2.try_into_val(env).unwrap();
    assert_eq!(
        event_data,
        Funded {
            funder: funder.clone(),
            amount: UNIT,
        }
    );
}

#[test]
fn test_withdrawn_event() {
    let fx = Fixture::new();
    let env = &fx.env;
    let funder = fx.new_funder(UNIT);
    fx.fund_as(&funder, 2 * UNIT);

    fx.fund_me.withdraw(&fx.owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("withdrawn"), owner)
    assert_eq!(last_event.0, fx.fund_me.address);
    let expected_topics: Vec<Val> = vec![
        env,
        symbol_short!("withdrawn").into_val(env),
        fx.owner.into_val(env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Withdrawn = last_event.2.try_into_val(env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            owner: fx.owner.clone(),
            amount: 3 * UNIT,
            funders: 2,
        }
    );
}

#[test]
fn test_cheaper_withdraw_emits_same_event() {
    let fx = Fixture::new();
    let env = &fx.env;
    fx.new_funder(UNIT);
    fx.new_funder(UNIT);
    fx.new_funder(UNIT);

    fx.fund_me.cheaper_withdraw(&fx.owner);

    let last_event = env.events().all().last().expect("No events found");
    let event_data: Withdrawn = last_event.2.try_into_val(env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            owner: fx.owner.clone(),
            amount: 3 * UNIT,
            funders: 3,
        }
    );
}
