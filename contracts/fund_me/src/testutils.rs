extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use crate::mock_price_feed::{MockPriceFeed, MockPriceFeedClient};
use crate::{FundMe, FundMeClient};

/// Aggregator scale used by local deployments.
pub const DECIMALS: u32 = 8;
/// $2000.00000000
pub const INITIAL_PRICE: i128 = 200_000_000_000;
/// One whole unit of a Stellar asset (7 decimals).
pub const UNIT: i128 = 10_000_000;

/// A deployed FundMe wired to a mock aggregator and a fresh Stellar asset.
pub struct Fixture {
    pub env: Env,
    pub fund_me: FundMeClient<'static>,
    pub price_feed: MockPriceFeedClient<'static>,
    pub token: token::Client<'static>,
    pub token_admin: token::StellarAssetClient<'static>,
    pub owner: Address,
}

impl Fixture {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let price_feed_id = env.register(MockPriceFeed, (DECIMALS, INITIAL_PRICE));
        let asset = env.register_stellar_asset_contract_v2(Address::generate(&env));
        let token_id = asset.address();
        let fund_me_id = env.register(
            FundMe,
            (owner.clone(), price_feed_id.clone(), token_id.clone()),
        );

        Fixture {
            fund_me: FundMeClient::new(&env, &fund_me_id),
            price_feed: MockPriceFeedClient::new(&env, &price_feed_id),
            token: token::Client::new(&env, &token_id),
            token_admin: token::StellarAssetClient::new(&env, &token_id),
            owner,
            env,
        }
    }

    /// Mint `amount` to `funder` and fund the contract with it.
    pub fn fund_as(&self, funder: &Address, amount: i128) {
        self.token_admin.mint(funder, &amount);
        self.fund_me.fund(funder, &amount);
    }

    /// Fund from a freshly generated address.
    pub fn new_funder(&self, amount: i128) -> Address {
        let funder = Address::generate(&self.env);
        self.fund_as(&funder, amount);
        funder
    }

    pub fn contract_balance(&self) -> i128 {
        self.token.balance(&self.fund_me.address)
    }

    pub fn owner_balance(&self) -> i128 {
        self.token.balance(&self.owner)
    }
}
