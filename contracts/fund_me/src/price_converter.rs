//! Native-asset to USD conversion.
//!
//! All values stay in the asset's own base units: a USD value of `50 * 10^d`
//! means fifty dollars when the asset has `d` decimals.

use soroban_sdk::{Address, Env};

use crate::price_feed::PriceFeedClient;
use crate::{Error, MINIMUM_USD};

/// Read the feed's current answer and its scale. One read per call, no caching.
pub fn latest_price(env: &Env, price_feed: &Address) -> (i128, u32) {
    let feed = PriceFeedClient::new(env, price_feed);
    let round = feed.latest_round_data();
    (round.answer, feed.decimals())
}

/// `amount * price / 10^price_decimals`, floored.
pub fn usd_value(amount: i128, price: i128, price_decimals: u32) -> Result<i128, Error> {
    if price <= 0 {
        return Err(Error::InvalidPrice);
    }
    let scale = 10i128.checked_pow(price_decimals).ok_or(Error::Overflow)?;
    let scaled = amount.checked_mul(price).ok_or(Error::Overflow)?;
    Ok(scaled / scale)
}

/// USD value of `amount` at the feed's current price.
pub fn conversion_rate(env: &Env, price_feed: &Address, amount: i128) -> Result<i128, Error> {
    let (price, decimals) = latest_price(env, price_feed);
    usd_value(amount, price, decimals)
}

/// [`MINIMUM_USD`] expressed in base units of an asset with `asset_decimals`.
pub fn minimum_in_base_units(asset_decimals: u32) -> Result<i128, Error> {
    10i128
        .checked_pow(asset_decimals)
        .and_then(|unit| unit.checked_mul(MINIMUM_USD))
        .ok_or(Error::Overflow)
}
