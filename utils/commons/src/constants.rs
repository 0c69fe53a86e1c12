/// Tag for the AuctionCreated event.
pub const AUCTION_CREATED_TAG: u8 = u8::MAX - 5;

/// Tag for the BidPlaced event.
pub const BID_PLACED_TAG: u8 = u8::MAX - 6;

/// Tag for the AuctionEnded event.
pub const AUCTION_ENDED_TAG: u8 = u8::MAX - 7;

/// Tag for the AuctionCancelled event.
pub const AUCTION_CANCELLED_TAG: u8 = u8::MAX - 8;

/// Tag for the PriceFeedSet event.
pub const PRICE_FEED_SET_TAG: u8 = u8::MAX - 9;

/// Tag for the PriceFeedRemoved event.
pub const PRICE_FEED_REMOVED_TAG: u8 = u8::MAX - 10;

/// Tag for the RoleUpdated event.
pub const ROLE_UPDATED_TAG: u8 = u8::MAX - 11;

/// Tag for the PriceUpdated event.
pub const PRICE_UPDATED_TAG: u8 = u8::MAX - 12;

/// Oracle entrypoint returning the latest price of a currency.
pub const LATEST_PRICE_ENTRYPOINT: &str = "latestPrice";

/// Hook the auction contract exposes so CIS-2 contracts accept it as receiver.
pub const ON_RECEIVING_CIS2_ENTRYPOINT: &str = "onReceivingCIS2";
