use commons::{AuctionId, Currency, Token};
use concordium_std::*;

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct CreateAuctionParams {
    /// Bidding window, counted from creation.
    pub duration: Duration,
    /// Smallest acceptable first bid, valued in USD through the CCD feed.
    pub start_price: Amount,
    /// NFT to auction. The seller must own it and have made the auction
    /// contract an operator.
    pub asset: Token,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct BidParams {
    pub auction_id: AuctionId,
    /// Amount in the smallest unit of `currency`.
    pub amount: u64,
    pub currency: Currency,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct SetPriceFeedParams {
    pub currency: Currency,
    pub oracle: ContractAddress,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct UsdValueParams {
    pub currency: Currency,
    pub amount: u64,
}
