use commons::{AccessControl, AuctionId, Currency, CustomContractError, Funds, Token};
use concordium_std::*;

use crate::registry::PriceFeedRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub enum AuctionState {
    /// Accepting bids until the end time.
    Active,
    /// Settled. Token and funds have been handed out.
    Ended,
    /// Withdrawn by the seller before any bid. Token was returned.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Bid {
    pub bidder: AccountAddress,
    /// Funds held by the contract, in the currency they were bid in.
    pub funds: Funds,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Auction {
    pub id: AuctionId,
    pub seller: AccountAddress,
    pub asset: Token,
    /// Minimum acceptable first bid.
    pub start_price: Amount,
    pub start_time: Timestamp,
    pub duration: Duration,
    pub end_time: Timestamp,
    /// Current leader.
    pub highest_bid: Option<Bid>,
    pub state: AuctionState,
}

/// Outcome of settling an auction.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Token goes to the bidder, funds to the seller.
    Sold(Bid),
    /// No bids, token goes back to the seller.
    Unsold,
}

impl Auction {
    pub fn new(
        id: AuctionId,
        seller: AccountAddress,
        asset: Token,
        start_price: Amount,
        duration: Duration,
        now: Timestamp,
    ) -> Result<Self, CustomContractError> {
        ensure!(duration.millis() > 0, CustomContractError::InvalidDuration);
        ensure!(
            start_price > Amount::zero(),
            CustomContractError::InvalidStartPrice
        );
        let end_time = now
            .checked_add(duration)
            .ok_or(CustomContractError::InvalidDuration)?;

        Ok(Self {
            id,
            seller,
            asset,
            start_price,
            start_time: now,
            duration,
            end_time,
            highest_bid: None,
            state: AuctionState::Active,
        })
    }

    pub fn highest_bid_amount(&self) -> Option<u64> {
        self.highest_bid.as_ref().map(|bid| bid.funds.amount)
    }

    pub fn highest_bidder(&self) -> Option<AccountAddress> {
        self.highest_bid.as_ref().map(|bid| bid.bidder)
    }

    pub fn highest_bid_currency(&self) -> Option<&Currency> {
        self.highest_bid.as_ref().map(|bid| &bid.funds.currency)
    }

    fn ensure_active(&self) -> Result<(), CustomContractError> {
        match self.state {
            AuctionState::Active => Ok(()),
            AuctionState::Ended => bail!(CustomContractError::AuctionAlreadyEnded),
            AuctionState::Cancelled => bail!(CustomContractError::AuctionCancelled),
        }
    }

    /// Active and still inside the bidding window.
    pub fn ensure_open(&self, now: Timestamp) -> Result<(), CustomContractError> {
        self.ensure_active()?;
        ensure!(now < self.end_time, CustomContractError::AuctionEnded);
        Ok(())
    }

    /// Funds a new bid has to beat: the leader, or the start price in CCD.
    pub fn reference_funds(&self) -> Funds {
        self.highest_bid
            .as_ref()
            .map(|bid| bid.funds.clone())
            .unwrap_or_else(|| Funds::native(self.start_price))
    }

    /// Make `bid` the leader, returning the previous leader that MUST be refunded.
    pub fn place_bid(&mut self, bid: Bid) -> Option<Bid> {
        self.highest_bid.replace(bid)
    }

    pub fn settle(
        &mut self,
        sender: &AccountAddress,
        now: Timestamp,
    ) -> Result<Settlement, CustomContractError> {
        ensure_eq!(sender, &self.seller, CustomContractError::Unauthorized);
        self.ensure_active()?;
        ensure!(
            now >= self.end_time,
            CustomContractError::AuctionNotYetEnded
        );

        self.state = AuctionState::Ended;
        Ok(self
            .highest_bid
            .clone()
            .map(Settlement::Sold)
            .unwrap_or(Settlement::Unsold))
    }

    pub fn cancel(
        &mut self,
        sender: &AccountAddress,
        now: Timestamp,
    ) -> Result<(), CustomContractError> {
        ensure_eq!(sender, &self.seller, CustomContractError::Unauthorized);
        self.ensure_open(now)?;
        ensure!(
            self.highest_bid.is_none(),
            CustomContractError::AuctionHasBids
        );

        self.state = AuctionState::Cancelled;
        Ok(())
    }
}

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Admin and price feed manager roles.
    pub access: AccessControl<S>,
    /// Oracle per accepted currency.
    pub registry: PriceFeedRegistry<S>,
    /// Every auction ever created, by id.
    auctions: StateMap<AuctionId, Auction, S>,
    /// Id of the next auction. Ids are never reused.
    next_auction_id: AuctionId,
}

impl<S: HasStateApi> State<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, origin: AccountAddress) -> Self {
        State {
            access: AccessControl::new(state_builder, Address::Account(origin)),
            registry: PriceFeedRegistry::new(state_builder),
            auctions: state_builder.new_map(),
            next_auction_id: 0,
        }
    }

    /// Number of auctions created so far, which is also the id of the next one.
    pub fn auction_count(&self) -> u64 {
        self.next_auction_id
    }

    /// Copy of the stored auction.
    pub fn auction(&self, id: AuctionId) -> Result<Auction, CustomContractError> {
        self.auctions
            .get(&id)
            .map(|auction| (*auction).clone())
            .ok_or(CustomContractError::AuctionNotFound)
    }

    /// Store a freshly created auction under the next id.
    pub fn create(&mut self, auction: Auction) {
        self.next_auction_id = auction.id + 1;
        self.auctions.insert(auction.id, auction);
    }

    /// Write back an updated auction.
    pub fn store(&mut self, auction: Auction) {
        self.auctions.insert(auction.id, auction);
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const BIDDER: AccountAddress = AccountAddress([2; 32]);
    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    fn test_auction() -> Auction {
        Auction::new(
            0,
            SELLER,
            Token {
                contract: NFT_CONTRACT,
                id: TokenIdVec(vec![1]),
            },
            Amount::from_micro_ccd(10_000),
            Duration::from_seconds(10),
            Timestamp::from_timestamp_millis(1_000),
        )
        .expect_report("Failed to create auction")
    }

    fn test_bid(amount: u64) -> Bid {
        Bid {
            bidder: BIDDER,
            funds: Funds {
                currency: Currency::Native,
                amount,
            },
            timestamp: Timestamp::from_timestamp_millis(2_000),
        }
    }

    #[concordium_test]
    fn test_new_auction() {
        let auction = test_auction();
        claim_eq!(auction.end_time, Timestamp::from_timestamp_millis(11_000));
        claim_eq!(auction.state, AuctionState::Active);
        claim_eq!(auction.highest_bid, None);
        claim_eq!(
            auction.reference_funds(),
            Funds::native(Amount::from_micro_ccd(10_000))
        );

        let token = auction.asset.clone();
        claim_eq!(
            Auction::new(
                1,
                SELLER,
                token.clone(),
                Amount::from_ccd(1),
                Duration::from_millis(0),
                Timestamp::from_timestamp_millis(0),
            ),
            Err(CustomContractError::InvalidDuration)
        );
        claim_eq!(
            Auction::new(
                1,
                SELLER,
                token,
                Amount::zero(),
                Duration::from_seconds(1),
                Timestamp::from_timestamp_millis(0),
            ),
            Err(CustomContractError::InvalidStartPrice)
        );
    }

    #[concordium_test]
    fn test_bidding_window() {
        let auction = test_auction();
        claim_eq!(
            auction.ensure_open(Timestamp::from_timestamp_millis(10_999)),
            Ok(())
        );
        // Time decides even though the state is still active
        claim_eq!(
            auction.ensure_open(Timestamp::from_timestamp_millis(11_000)),
            Err(CustomContractError::AuctionEnded)
        );
    }

    #[concordium_test]
    fn test_place_bid_returns_previous_leader() {
        let mut auction = test_auction();
        claim_eq!(auction.place_bid(test_bid(10_000)), None);
        claim_eq!(auction.place_bid(test_bid(20_000)), Some(test_bid(10_000)));
        claim_eq!(auction.highest_bid_amount(), Some(20_000));
        claim_eq!(auction.highest_bidder(), Some(BIDDER));
        claim_eq!(auction.highest_bid_currency(), Some(&Currency::Native));
        claim_eq!(auction.reference_funds(), test_bid(20_000).funds);
    }

    #[concordium_test]
    fn test_settle_once() {
        let mut auction = test_auction();
        let _ = auction.place_bid(test_bid(10_000));

        claim_eq!(
            auction.settle(&BIDDER, Timestamp::from_timestamp_millis(11_000)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(
            auction.settle(&SELLER, Timestamp::from_timestamp_millis(10_999)),
            Err(CustomContractError::AuctionNotYetEnded)
        );
        claim_eq!(auction.state, AuctionState::Active);

        claim_eq!(
            auction.settle(&SELLER, Timestamp::from_timestamp_millis(11_000)),
            Ok(Settlement::Sold(test_bid(10_000)))
        );
        claim_eq!(auction.state, AuctionState::Ended);
        claim_eq!(
            auction.settle(&SELLER, Timestamp::from_timestamp_millis(12_000)),
            Err(CustomContractError::AuctionAlreadyEnded)
        );
    }

    #[concordium_test]
    fn test_settle_without_bids() {
        let mut auction = test_auction();
        claim_eq!(
            auction.settle(&SELLER, Timestamp::from_timestamp_millis(20_000)),
            Ok(Settlement::Unsold)
        );
    }

    #[concordium_test]
    fn test_cancel() {
        let mut auction = test_auction();
        claim_eq!(
            auction.cancel(&BIDDER, Timestamp::from_timestamp_millis(2_000)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(
            auction.cancel(&SELLER, Timestamp::from_timestamp_millis(11_000)),
            Err(CustomContractError::AuctionEnded)
        );
        claim_eq!(
            auction.cancel(&SELLER, Timestamp::from_timestamp_millis(2_000)),
            Ok(())
        );
        claim_eq!(auction.state, AuctionState::Cancelled);
        claim_eq!(
            auction.ensure_open(Timestamp::from_timestamp_millis(2_000)),
            Err(CustomContractError::AuctionCancelled)
        );
        claim_eq!(
            auction.settle(&SELLER, Timestamp::from_timestamp_millis(11_000)),
            Err(CustomContractError::AuctionCancelled)
        );

        let mut auction = test_auction();
        let _ = auction.place_bid(test_bid(10_000));
        claim_eq!(
            auction.cancel(&SELLER, Timestamp::from_timestamp_millis(2_000)),
            Err(CustomContractError::AuctionHasBids)
        );
    }
}
