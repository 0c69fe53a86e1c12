use commons::{usd_value, CustomContractError, Funds};
use concordium_std::*;

use crate::registry::current_price;
use crate::state::{Auction, State};

/// USD values of an offered bid and of the funds it competes against.
///
/// Taken once per call, before any funds move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSnapshot {
    pub offered: u128,
    pub reference: u128,
}

impl PriceSnapshot {
    pub fn take<S: HasStateApi>(
        host: &impl HasHost<State<S>, StateApiType = S>,
        offered: &Funds,
        reference: &Funds,
    ) -> Result<Self, CustomContractError> {
        let offered_price = current_price(host, &offered.currency)?;
        let reference_price = if reference.currency == offered.currency {
            offered_price
        } else {
            current_price(host, &reference.currency)?
        };

        Ok(Self {
            offered: usd_value(offered.amount, &offered_price)?,
            reference: usd_value(reference.amount, &reference_price)?,
        })
    }
}

/// Checks that do not need any price.
pub fn validate(
    auction: &Auction,
    bidder: &AccountAddress,
    funds: &Funds,
    now: Timestamp,
) -> Result<(), CustomContractError> {
    ensure!(funds.amount > 0, CustomContractError::InvalidAmount);
    auction.ensure_open(now)?;
    ensure_ne!(
        bidder,
        &auction.seller,
        CustomContractError::SelfBidForbidden
    );
    Ok(())
}

/// The first bid has to reach the start price, any later one has to beat the
/// leader strictly. Both sides are compared in truncated quote units.
pub fn evaluate(snapshot: &PriceSnapshot, has_leader: bool) -> Result<(), CustomContractError> {
    if has_leader {
        ensure!(
            snapshot.offered > snapshot.reference,
            CustomContractError::BidTooLow
        );
    } else {
        ensure!(
            snapshot.offered >= snapshot.reference,
            CustomContractError::BidTooLow
        );
    }
    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::state::Bid;
    use commons::{Currency, Token};
    use concordium_cis2::TokenIdVec;

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const BIDDER: AccountAddress = AccountAddress([2; 32]);

    fn test_auction() -> Auction {
        Auction::new(
            0,
            SELLER,
            Token {
                contract: ContractAddress {
                    index: 1,
                    subindex: 0,
                },
                id: TokenIdVec(vec![1]),
            },
            Amount::from_micro_ccd(10_000),
            Duration::from_seconds(10),
            Timestamp::from_timestamp_millis(0),
        )
        .expect_report("Failed to create auction")
    }

    fn native(amount: u64) -> Funds {
        Funds {
            currency: Currency::Native,
            amount,
        }
    }

    #[concordium_test]
    fn test_validate() {
        let auction = test_auction();
        let now = Timestamp::from_timestamp_millis(5_000);

        claim_eq!(validate(&auction, &BIDDER, &native(1), now), Ok(()));
        claim_eq!(
            validate(&auction, &BIDDER, &native(0), now),
            Err(CustomContractError::InvalidAmount)
        );
        claim_eq!(
            validate(&auction, &SELLER, &native(1), now),
            Err(CustomContractError::SelfBidForbidden)
        );
        claim_eq!(
            validate(
                &auction,
                &BIDDER,
                &native(1),
                Timestamp::from_timestamp_millis(10_000)
            ),
            Err(CustomContractError::AuctionEnded)
        );
    }

    #[concordium_test]
    fn test_validate_after_settlement() {
        let mut auction = test_auction();
        let _ = auction.place_bid(Bid {
            bidder: BIDDER,
            funds: native(10_000),
            timestamp: Timestamp::from_timestamp_millis(1_000),
        });
        let _ = auction.settle(&SELLER, Timestamp::from_timestamp_millis(10_000));

        claim_eq!(
            validate(
                &auction,
                &BIDDER,
                &native(20_000),
                Timestamp::from_timestamp_millis(1_000)
            ),
            Err(CustomContractError::AuctionAlreadyEnded)
        );
    }

    #[concordium_test]
    fn test_first_bid_may_equal_start_price() {
        let snapshot = PriceSnapshot {
            offered: 100,
            reference: 100,
        };
        claim_eq!(evaluate(&snapshot, false), Ok(()));

        let snapshot = PriceSnapshot {
            offered: 99,
            reference: 100,
        };
        claim_eq!(
            evaluate(&snapshot, false),
            Err(CustomContractError::BidTooLow)
        );
    }

    #[concordium_test]
    fn test_later_bids_must_beat_leader() {
        let snapshot = PriceSnapshot {
            offered: 100,
            reference: 100,
        };
        claim_eq!(
            evaluate(&snapshot, true),
            Err(CustomContractError::BidTooLow)
        );

        let snapshot = PriceSnapshot {
            offered: 101,
            reference: 100,
        };
        claim_eq!(evaluate(&snapshot, true), Ok(()));
    }
}
