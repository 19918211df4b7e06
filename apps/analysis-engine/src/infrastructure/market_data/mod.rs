//! Market data adapters.

mod fixture;
mod live;
mod mock;
mod robinhood;
mod yahoo;

pub use fixture::FixtureMarketData;
pub use live::LiveMarketData;
pub use mock::MockMarketData;
pub use robinhood::{Credentials, RobinhoodClient, RobinhoodConfig};
pub use yahoo::{YahooFinanceClient, YahooFinanceConfig};
