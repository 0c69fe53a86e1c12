use commons::{
    AuctionId, Currency, RoleUpdateParams, Token, AUCTION_CANCELLED_TAG, AUCTION_CREATED_TAG,
    AUCTION_ENDED_TAG, BID_PLACED_TAG, PRICE_FEED_REMOVED_TAG, PRICE_FEED_SET_TAG,
    ROLE_UPDATED_TAG,
};
use concordium_std::*;

use crate::state::{Auction, Bid};

/// New auction event data.
#[derive(Debug, Serial)]
pub struct AuctionCreatedEvent<'a> {
    pub auction_id: AuctionId,
    pub seller: &'a AccountAddress,
    /// Token put up for auction.
    pub asset: &'a Token,
    pub start_price: Amount,
    pub end_time: Timestamp,
}

/// Accepted bid event data.
#[derive(Debug, Serial)]
pub struct BidPlacedEvent<'a> {
    pub auction_id: AuctionId,
    pub bid: &'a Bid,
    /// Previous leader, refunded in full.
    pub refunded: &'a Option<Bid>,
}

/// Auction settlement event data.
#[derive(Debug, Serial)]
pub struct AuctionEndedEvent<'a> {
    pub auction_id: AuctionId,
    pub seller: &'a AccountAddress,
    /// Winning bid. `None` if the token went back to the seller.
    pub winning_bid: &'a Option<Bid>,
}

/// Auction cancellation event data.
#[derive(Debug, Serial)]
pub struct AuctionCancelledEvent<'a> {
    pub auction_id: AuctionId,
    pub seller: &'a AccountAddress,
}

/// Price feed event data.
#[derive(Debug, Serial)]
pub struct PriceFeedEvent<'a> {
    pub currency: &'a Currency,
    pub oracle: &'a ContractAddress,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvents<'a> {
    AuctionCreated(AuctionCreatedEvent<'a>),
    BidPlaced(BidPlacedEvent<'a>),
    AuctionEnded(AuctionEndedEvent<'a>),
    AuctionCancelled(AuctionCancelledEvent<'a>),
    PriceFeedSet(PriceFeedEvent<'a>),
    PriceFeedRemoved(PriceFeedEvent<'a>),
    RoleUpdated(&'a RoleUpdateParams),
}

impl<'a> AuctionEvents<'a> {
    pub fn created(auction: &'a Auction) -> Self {
        Self::AuctionCreated(AuctionCreatedEvent {
            auction_id: auction.id,
            seller: &auction.seller,
            asset: &auction.asset,
            start_price: auction.start_price,
            end_time: auction.end_time,
        })
    }

    pub fn bid(auction_id: AuctionId, bid: &'a Bid, refunded: &'a Option<Bid>) -> Self {
        Self::BidPlaced(BidPlacedEvent {
            auction_id,
            bid,
            refunded,
        })
    }

    pub fn ended(auction: &'a Auction) -> Self {
        Self::AuctionEnded(AuctionEndedEvent {
            auction_id: auction.id,
            seller: &auction.seller,
            winning_bid: &auction.highest_bid,
        })
    }

    pub fn cancelled(auction: &'a Auction) -> Self {
        Self::AuctionCancelled(AuctionCancelledEvent {
            auction_id: auction.id,
            seller: &auction.seller,
        })
    }

    pub fn feed_set(currency: &'a Currency, oracle: &'a ContractAddress) -> Self {
        Self::PriceFeedSet(PriceFeedEvent { currency, oracle })
    }

    pub fn feed_removed(currency: &'a Currency, oracle: &'a ContractAddress) -> Self {
        Self::PriceFeedRemoved(PriceFeedEvent { currency, oracle })
    }
}

impl<'a> Serial for AuctionEvents<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvents::AuctionCreated(event) => {
                out.write_u8(AUCTION_CREATED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::BidPlaced(event) => {
                out.write_u8(BID_PLACED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::AuctionEnded(event) => {
                out.write_u8(AUCTION_ENDED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::AuctionCancelled(event) => {
                out.write_u8(AUCTION_CANCELLED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::PriceFeedSet(event) => {
                out.write_u8(PRICE_FEED_SET_TAG)?;
                event.serial(out)
            }
            AuctionEvents::PriceFeedRemoved(event) => {
                out.write_u8(PRICE_FEED_REMOVED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::RoleUpdated(update) => {
                out.write_u8(ROLE_UPDATED_TAG)?;
                update.serial(out)
            }
        }
    }
}
