use commons::{
    AuctionId, ContractTokenAmount, ContractTokenId, Currency, CustomContractError, Funds,
    HostCis2Ext, HostCurrencyExt, Role, RoleUpdateParams, RoleViewParams, Token,
    ON_RECEIVING_CIS2_ENTRYPOINT,
};
use concordium_cis2::{OnReceivingCis2Params, Receiver, TokenAmountU64};
use concordium_std::*;

use crate::bid::{self, PriceSnapshot};
use crate::events::AuctionEvents;
use crate::external::*;
use crate::registry::current_usd_value;
use crate::state::{Auction, Bid, Settlement, State};

/// Initialize the auction contract. The init origin becomes the first admin.
#[init(contract = "NftAuction")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::new(state_builder, ctx.init_origin()))
}

fn sender_account(ctx: &impl HasReceiveContext) -> Result<AccountAddress, CustomContractError> {
    if let Address::Account(account) = ctx.sender() {
        Ok(account)
    } else {
        Err(CustomContractError::OnlyAccountAddress)
    }
}

/// Move the auctioned token from `from` into the custody of this contract.
fn take_asset<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    asset: &Token,
    from: AccountAddress,
    custodian: ContractAddress,
) -> Result<(), CustomContractError> {
    host.cis2_transfer(
        asset,
        TokenAmountU64(1),
        Address::Account(from),
        Receiver::Contract(
            custodian,
            OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2_ENTRYPOINT.into()),
        ),
    )
    .map_err(|_| CustomContractError::TransferFailed)
}

/// Hand the auctioned token held by this contract over to `to`.
fn release_asset<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    asset: &Token,
    custodian: ContractAddress,
    to: AccountAddress,
) -> Result<(), CustomContractError> {
    host.cis2_transfer(
        asset,
        TokenAmountU64(1),
        Address::Contract(custodian),
        Receiver::Account(to),
    )
    .map_err(|_| CustomContractError::TransferFailed)
}

/// List a token for auction. The token is moved to the contract right away.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender is not an account;
/// - Duration or start price is zero;
/// - Sender does not own the token or the contract is not its operator;
/// - Token transfer fails;
/// - Fails to log `AuctionCreated` event.
#[receive(
    mutable,
    contract = "NftAuction",
    name = "createAuction",
    parameter = "CreateAuctionParams",
    return_value = "u64",
    enable_logger
)]
fn contract_create_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<AuctionId> {
    let params = CreateAuctionParams::deserial(&mut ctx.parameter_cursor())?;
    let seller = sender_account(ctx)?;
    let custodian = ctx.self_address();

    let auction = Auction::new(
        host.state().auction_count(),
        seller,
        params.asset,
        params.start_price,
        params.duration,
        ctx.metadata().slot_time(),
    )?;

    let balance = host
        .cis2_balance_of(&auction.asset, Address::Account(seller))
        .map_err(CustomContractError::from)?;
    ensure!(balance.0 >= 1, CustomContractError::NotAssetOwner.into());

    let approved = host
        .cis2_operator_of(
            &auction.asset.contract,
            Address::Account(seller),
            Address::Contract(custodian),
        )
        .map_err(CustomContractError::from)?;
    ensure!(approved, CustomContractError::NotApproved.into());

    take_asset(host, &auction.asset, seller, custodian)?;

    logger.log(&AuctionEvents::created(&auction))?;

    let auction_id = auction.id;
    host.state_mut().create(auction);

    Ok(auction_id)
}

#[receive(
    contract = "NftAuction",
    name = "viewAuction",
    parameter = "u64",
    return_value = "Auction"
)]
fn contract_view_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Auction> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().auction(auction_id)?)
}

#[receive(contract = "NftAuction", name = "auctionCount", return_value = "u64")]
fn contract_auction_count<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<u64> {
    Ok(host.state().auction_count())
}

/// Bid on an auction in any currency with a registered price feed.
///
/// CCD bids attach exactly the bid amount. Token bids attach nothing, the
/// contract pulls the tokens from the bidder and must be the bidder's
/// operator. The replaced leader is refunded in the currency of its bid.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender is not an account or is the seller;
/// - Auction is unknown, settled, cancelled or past its end time;
/// - Either currency has no price feed or its oracle fails;
/// - Bid is not worth more USD than the leader, or less than the start price;
/// - Collecting the bid or refunding the previous leader fails;
/// - Fails to log `BidPlaced` event.
#[receive(
    mutable,
    payable,
    contract = "NftAuction",
    name = "bid",
    parameter = "BidParams",
    enable_logger
)]
fn contract_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = BidParams::deserial(&mut ctx.parameter_cursor())?;
    let bidder = sender_account(ctx)?;
    let now = ctx.metadata().slot_time();
    let custodian = ctx.self_address();
    let funds = Funds {
        currency: params.currency,
        amount: params.amount,
    };

    let mut auction = host.state().auction(params.auction_id)?;
    bid::validate(&auction, &bidder, &funds, now)?;

    let snapshot = PriceSnapshot::take(&*host, &funds, &auction.reference_funds())?;
    bid::evaluate(&snapshot, auction.highest_bid.is_some())?;

    host.collect_funds(&funds, &bidder, amount, &custodian)?;

    let new_bid = Bid {
        bidder,
        funds,
        timestamp: now,
    };
    let previous_bid = auction.place_bid(new_bid.clone());

    // Refund previous bid
    if let Some(previous) = previous_bid.as_ref() {
        host.pay_out(&previous.funds, &previous.bidder, &custodian)?;
    }

    logger.log(&AuctionEvents::bid(auction.id, &new_bid, &previous_bid))?;

    host.state_mut().store(auction);

    Ok(())
}

/// Settle an auction after its end time. Only the seller can do this, and
/// only once.
///
/// With a leader, the held funds go to the seller and the token to the
/// leader. Without, the token goes back to the seller.
#[receive(
    mutable,
    contract = "NftAuction",
    name = "endAuction",
    parameter = "u64",
    enable_logger
)]
fn contract_end_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;
    let sender = sender_account(ctx)?;
    let custodian = ctx.self_address();

    let mut auction = host.state().auction(auction_id)?;
    let settlement = auction.settle(&sender, ctx.metadata().slot_time())?;

    match settlement {
        Settlement::Sold(winning_bid) => {
            host.pay_out(&winning_bid.funds, &auction.seller, &custodian)?;
            release_asset(host, &auction.asset, custodian, winning_bid.bidder)?;
        }
        Settlement::Unsold => release_asset(host, &auction.asset, custodian, auction.seller)?,
    }

    logger.log(&AuctionEvents::ended(&auction))?;

    host.state_mut().store(auction);

    Ok(())
}

/// Withdraw an auction nobody has bid on yet and return the token to the
/// seller.
#[receive(
    mutable,
    contract = "NftAuction",
    name = "cancelAuction",
    parameter = "u64",
    enable_logger
)]
fn contract_cancel_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;
    let sender = sender_account(ctx)?;

    let mut auction = host.state().auction(auction_id)?;
    auction.cancel(&sender, ctx.metadata().slot_time())?;

    release_asset(host, &auction.asset, ctx.self_address(), auction.seller)?;

    logger.log(&AuctionEvents::cancelled(&auction))?;

    host.state_mut().store(auction);

    Ok(())
}

#[receive(
    mutable,
    contract = "NftAuction",
    name = "setPriceFeed",
    parameter = "SetPriceFeedParams",
    enable_logger
)]
fn contract_set_price_feed<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = SetPriceFeedParams::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();

    state.access.ensure_role(&ctx.sender(), Role::FeedManager)?;

    logger.log(&AuctionEvents::feed_set(&params.currency, &params.oracle))?;

    state.registry.set_feed(params.currency, params.oracle);

    Ok(())
}

#[receive(
    mutable,
    contract = "NftAuction",
    name = "removePriceFeed",
    parameter = "Currency",
    enable_logger
)]
fn contract_remove_price_feed<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let currency = Currency::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();

    state.access.ensure_role(&ctx.sender(), Role::FeedManager)?;

    let oracle = state.registry.remove_feed(&currency)?;

    logger.log(&AuctionEvents::feed_removed(&currency, &oracle))?;

    Ok(())
}

#[receive(
    contract = "NftAuction",
    name = "viewPriceFeed",
    parameter = "Currency",
    return_value = "ContractAddress"
)]
fn contract_view_price_feed<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ContractAddress> {
    let currency = Currency::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().registry.oracle(&currency)?)
}

/// USD value of an amount of a currency at the latest price of its feed.
#[receive(
    contract = "NftAuction",
    name = "getUsdValue",
    parameter = "UsdValueParams",
    return_value = "u128"
)]
fn contract_get_usd_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<u128> {
    let params = UsdValueParams::deserial(&mut ctx.parameter_cursor())?;
    let funds = Funds {
        currency: params.currency,
        amount: params.amount,
    };
    Ok(current_usd_value(host, &funds)?)
}

/// Accept CIS-2 tokens, which only arrive as auctioned assets or token bids.
///
/// Both flows pull tokens from an account, so transfers from contracts are
/// rejected. Tokens an account sends here outside of an auction are not
/// tracked and cannot be recovered.
#[receive(
    contract = "NftAuction",
    name = "onReceivingCIS2",
    parameter = "OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>"
)]
fn contract_on_receiving_cis2<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<()> {
    ensure!(
        matches!(ctx.sender(), Address::Contract(_)),
        CustomContractError::ContractOnly.into()
    );
    let params = OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount>::deserial(
        &mut ctx.parameter_cursor(),
    )?;
    ensure!(
        matches!(params.from, Address::Account(_)),
        CustomContractError::UnexpectedTransfer.into()
    );
    Ok(())
}

#[receive(
    mutable,
    contract = "NftAuction",
    name = "updateRoles",
    parameter = "RoleUpdateParams",
    enable_logger
)]
fn contract_update_roles<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = RoleUpdateParams::deserial(&mut ctx.parameter_cursor())?;
    host.state_mut()
        .access
        .handle_update(ctx.sender(), &params)?;
    logger.log(&AuctionEvents::RoleUpdated(&params))?;
    Ok(())
}

#[receive(
    contract = "NftAuction",
    name = "viewRoles",
    parameter = "RoleViewParams",
    return_value = "Vec<Address>"
)]
fn contract_view_roles<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<Address>> {
    let params = RoleViewParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().access.handle_view(params))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::state::AuctionState;
    use commons::test::*;
    use commons::{PriceData, RoleUpdateKind};
    use concordium_cis2::{
        AdditionalData, BalanceOfQueryParams, BalanceOfQueryResponse, OperatorOfQueryParams,
        OperatorOfQueryResponse, TokenIdVec, TransferParams,
    };
    use concordium_std::test_infrastructure::*;
    use std::{cell::RefCell, rc::Rc};

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const SELLER: AccountAddress = AccountAddress([2; 32]);
    const BUYER: AccountAddress = AccountAddress([3; 32]);
    const BUYER_2: AccountAddress = AccountAddress([4; 32]);
    const USER: AccountAddress = AccountAddress([5; 32]);

    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 100,
        subindex: 0,
    };
    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const USDC_CONTRACT: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const ORACLE: ContractAddress = ContractAddress {
        index: 3,
        subindex: 0,
    };

    /// 0.01 CCD, worth 100 at the test CCD price.
    const START_PRICE: u64 = 10_000;
    const END_TIME: u64 = 10_000;

    type TransferLog = Rc<RefCell<Vec<TransferParams<ContractTokenId, ContractTokenAmount>>>>;

    struct TestEnv {
        host: TestHost<State<TestStateApi>>,
        nft_transfers: TransferLog,
        usdc_transfers: TransferLog,
    }

    fn entrypoint(name: &str) -> OwnedEntrypointName {
        OwnedEntrypointName::new_unchecked(name.into())
    }

    fn nft() -> Token {
        Token {
            contract: NFT_CONTRACT,
            id: TokenIdVec(vec![7]),
        }
    }

    fn usdc() -> Currency {
        Currency::Cis2(Token {
            contract: USDC_CONTRACT,
            id: TokenIdVec(vec![]),
        })
    }

    fn native(amount: u64) -> Funds {
        Funds {
            currency: Currency::Native,
            amount,
        }
    }

    fn usdc_funds(amount: u64) -> Funds {
        Funds {
            currency: usdc(),
            amount,
        }
    }

    fn test_oracle(currency: &Currency) -> Option<PriceData> {
        match currency {
            Currency::Native => Some(PriceData {
                value: 10_000,
                decimals: 6,
            }),
            currency if *currency == usdc() => Some(PriceData {
                value: 1,
                decimals: 6,
            }),
            _ => None,
        }
    }

    fn new_env() -> TestEnv {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN);
        let mut state_builder = TestStateBuilder::new();

        let state =
            contract_init(&ctx, &mut state_builder).expect_report("Failed during init_NftAuction");

        let mut host = TestHost::new(state, state_builder);
        host.state_mut()
            .registry
            .set_feed(Currency::Native, ORACLE);
        host.state_mut().registry.set_feed(usdc(), ORACLE);

        host.setup_mock_entrypoint(
            ORACLE,
            entrypoint("latestPrice"),
            parse_and_map_mock(test_oracle),
        );
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            entrypoint("balanceOf"),
            parse_and_map_mock(|_: &BalanceOfQueryParams<ContractTokenId>| {
                Some(BalanceOfQueryResponse(vec![TokenAmountU64(1)]))
            }),
        );
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            entrypoint("operatorOf"),
            parse_and_map_mock(|_: &OperatorOfQueryParams| {
                Some(OperatorOfQueryResponse(vec![true]))
            }),
        );

        let nft_transfers = TransferLog::default();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            entrypoint("transfer"),
            recording_mock(nft_transfers.clone()),
        );
        let usdc_transfers = TransferLog::default();
        host.setup_mock_entrypoint(
            USDC_CONTRACT,
            entrypoint("transfer"),
            recording_mock(usdc_transfers.clone()),
        );

        TestEnv {
            host,
            nft_transfers,
            usdc_transfers,
        }
    }

    fn create_auction_with(
        host: &mut TestHost<State<TestStateApi>>,
        params: &CreateAuctionParams,
    ) -> ReceiveResult<AuctionId> {
        let bytes = to_bytes(params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(0))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        contract_create_auction(&ctx, host, &mut logger)
    }

    fn default_params() -> CreateAuctionParams {
        CreateAuctionParams {
            duration: Duration::from_millis(END_TIME),
            start_price: Amount::from_micro_ccd(START_PRICE),
            asset: nft(),
        }
    }

    /// Environment with one active auction ending at `END_TIME`.
    fn env_with_auction() -> TestEnv {
        let mut env = new_env();
        let auction_id = create_auction_with(&mut env.host, &default_params())
            .expect_report("Failed to create auction");
        claim_eq!(auction_id, 0);
        env
    }

    fn place_bid(
        host: &mut TestHost<State<TestStateApi>>,
        bidder: AccountAddress,
        funds: Funds,
        attached: Amount,
        now: u64,
    ) -> ReceiveResult<()> {
        let params = BidParams {
            auction_id: 0,
            amount: funds.amount,
            currency: funds.currency,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(bidder))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(now))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        contract_bid(&ctx, host, attached, &mut logger)
    }

    /// CCD bid with the matching amount attached and credited to the contract.
    fn place_native_bid(
        host: &mut TestHost<State<TestStateApi>>,
        bidder: AccountAddress,
        amount: u64,
        now: u64,
    ) -> ReceiveResult<()> {
        let balance = host.self_balance();
        host.set_self_balance(balance + Amount::from_micro_ccd(amount));
        place_bid(
            host,
            bidder,
            native(amount),
            Amount::from_micro_ccd(amount),
            now,
        )
    }

    fn end_auction(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        now: u64,
    ) -> (ReceiveResult<()>, TestLogger) {
        let bytes = to_bytes(&0u64);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(now))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = contract_end_auction(&ctx, host, &mut logger);
        (result, logger)
    }

    fn cancel_auction(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        now: u64,
    ) -> ReceiveResult<()> {
        let bytes = to_bytes(&0u64);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(now))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        contract_cancel_auction(&ctx, host, &mut logger)
    }

    fn stored_auction(host: &TestHost<State<TestStateApi>>) -> Auction {
        host.state()
            .auction(0)
            .expect_report("Auction must be stored")
    }

    fn claim_transfer(
        log: &TransferLog,
        index: usize,
        from: Address,
        to: Address,
        amount: u64,
    ) {
        let transfers = log.borrow();
        let transfer = &transfers[index].0[0];
        claim_eq!(transfer.from, from);
        claim_eq!(transfer.to.address(), to);
        claim_eq!(transfer.amount, TokenAmountU64(amount));
    }

    #[concordium_test]
    fn test_create_auction() {
        let mut env = new_env();

        let bytes = to_bytes(&default_params());
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(0))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = contract_create_auction(&ctx, &mut env.host, &mut logger);
        claim_eq!(result, Ok(0));

        let auction = stored_auction(&env.host);
        claim_eq!(auction.seller, SELLER);
        claim_eq!(auction.asset, nft());
        claim_eq!(auction.start_price, Amount::from_micro_ccd(START_PRICE));
        claim_eq!(auction.end_time, Timestamp::from_timestamp_millis(END_TIME));
        claim_eq!(auction.state, AuctionState::Active);
        claim_eq!(auction.highest_bid, None);
        claim_eq!(env.host.state().auction_count(), 1);

        // Token is in custody from the start
        claim_eq!(env.nft_transfers.borrow().len(), 1);
        claim_transfer(
            &env.nft_transfers,
            0,
            Address::Account(SELLER),
            Address::Contract(SELF_ADDRESS),
            1,
        );

        claim_eq!(logger.logs.len(), 1);
        claim_eq!(logger.logs[0], to_bytes(&AuctionEvents::created(&auction)));

        // Ids are sequential
        claim_eq!(
            create_auction_with(&mut env.host, &default_params()),
            Ok(1)
        );
        claim_eq!(env.host.state().auction_count(), 2);
    }

    #[concordium_test]
    fn test_create_auction_invalid_params() {
        let mut env = new_env();

        let mut params = default_params();
        params.duration = Duration::from_millis(0);
        claim_eq!(
            create_auction_with(&mut env.host, &params),
            Err(CustomContractError::InvalidDuration.into())
        );

        let mut params = default_params();
        params.start_price = Amount::zero();
        claim_eq!(
            create_auction_with(&mut env.host, &params),
            Err(CustomContractError::InvalidStartPrice.into())
        );

        claim_eq!(env.host.state().auction_count(), 0);
        claim!(env.nft_transfers.borrow().is_empty());
    }

    #[concordium_test]
    fn test_create_auction_requires_owner() {
        let mut env = new_env();
        env.host.setup_mock_entrypoint(
            NFT_CONTRACT,
            entrypoint("balanceOf"),
            parse_and_map_mock(|_: &BalanceOfQueryParams<ContractTokenId>| {
                Some(BalanceOfQueryResponse(vec![TokenAmountU64(0)]))
            }),
        );

        claim_eq!(
            create_auction_with(&mut env.host, &default_params()),
            Err(CustomContractError::NotAssetOwner.into())
        );
        claim_eq!(env.host.state().auction_count(), 0);
        claim!(env.nft_transfers.borrow().is_empty());
    }

    #[concordium_test]
    fn test_create_auction_requires_approval() {
        let mut env = new_env();
        env.host.setup_mock_entrypoint(
            NFT_CONTRACT,
            entrypoint("operatorOf"),
            parse_and_map_mock(|_: &OperatorOfQueryParams| {
                Some(OperatorOfQueryResponse(vec![false]))
            }),
        );

        claim_eq!(
            create_auction_with(&mut env.host, &default_params()),
            Err(CustomContractError::NotApproved.into())
        );
        claim_eq!(env.host.state().auction_count(), 0);
    }

    #[concordium_test]
    fn test_create_auction_transfer_failure() {
        let mut env = new_env();
        env.host
            .setup_mock_entrypoint(NFT_CONTRACT, entrypoint("transfer"), failing_mock());

        claim_eq!(
            create_auction_with(&mut env.host, &default_params()),
            Err(CustomContractError::TransferFailed.into())
        );
        claim_eq!(env.host.state().auction_count(), 0);
    }

    #[concordium_test]
    fn test_create_auction_by_contract() {
        let mut env = new_env();
        let bytes = to_bytes(&default_params());
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(USDC_CONTRACT))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(0))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = contract_create_auction(&ctx, &mut env.host, &mut logger);
        claim_eq!(
            result,
            Err(CustomContractError::OnlyAccountAddress.into())
        );
    }

    /// CCD bid first, then a higher valued USDC bid wins and is paid out.
    #[concordium_test]
    fn test_multi_currency_auction() {
        let mut env = env_with_auction();

        // 0.01 CCD is worth exactly the start price
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );
        let auction = stored_auction(&env.host);
        claim_eq!(auction.highest_bidder(), Some(BUYER));
        claim_eq!(auction.highest_bid_amount(), Some(START_PRICE));
        claim_eq!(auction.highest_bid_currency(), Some(&Currency::Native));

        // 101 USDC is worth 101, more than the 100 of the leading CCD bid
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER,
                usdc_funds(101_000_000),
                Amount::zero(),
                2_000
            ),
            Ok(())
        );
        claim_transfer(
            &env.usdc_transfers,
            0,
            Address::Account(BUYER),
            Address::Contract(SELF_ADDRESS),
            101_000_000,
        );
        claim!(env
            .host
            .transfer_occurred(&BUYER, Amount::from_micro_ccd(START_PRICE)));

        let auction = stored_auction(&env.host);
        claim_eq!(auction.highest_bidder(), Some(BUYER));
        claim_eq!(auction.highest_bid_amount(), Some(101_000_000));
        claim_eq!(auction.highest_bid_currency(), Some(&usdc()));

        let (result, logger) = end_auction(&mut env.host, SELLER, END_TIME);
        claim_eq!(result, Ok(()));

        // Funds to the seller in the bid currency, token to the winner
        claim_eq!(env.usdc_transfers.borrow().len(), 2);
        claim_transfer(
            &env.usdc_transfers,
            1,
            Address::Contract(SELF_ADDRESS),
            Address::Account(SELLER),
            101_000_000,
        );
        claim_eq!(env.nft_transfers.borrow().len(), 2);
        claim_transfer(
            &env.nft_transfers,
            1,
            Address::Contract(SELF_ADDRESS),
            Address::Account(BUYER),
            1,
        );

        let auction = stored_auction(&env.host);
        claim_eq!(auction.state, AuctionState::Ended);
        claim_eq!(auction.highest_bidder(), Some(BUYER));
        claim_eq!(logger.logs, vec![to_bytes(&AuctionEvents::ended(&auction))]);
    }

    #[concordium_test]
    fn test_bid_event() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );
        let first = stored_auction(&env.host).highest_bid;

        let params = BidParams {
            auction_id: 0,
            amount: 20_000,
            currency: Currency::Native,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BUYER_2))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(3_000))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();
        env.host
            .set_self_balance(Amount::from_micro_ccd(START_PRICE + 20_000));

        let result = contract_bid(&ctx, &mut env.host, Amount::from_micro_ccd(20_000), &mut logger);
        claim_eq!(result, Ok(()));

        let new_bid = Bid {
            bidder: BUYER_2,
            funds: native(20_000),
            timestamp: Timestamp::from_timestamp_millis(3_000),
        };
        claim_eq!(stored_auction(&env.host).highest_bid, Some(new_bid.clone()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvents::bid(0, &new_bid, &first))]
        );
        claim!(env
            .host
            .transfer_occurred(&BUYER, Amount::from_micro_ccd(START_PRICE)));
    }

    #[concordium_test]
    fn test_equal_value_bid_rejected() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );

        // 100 USDC ties with the leader
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER_2,
                usdc_funds(100_000_000),
                Amount::zero(),
                2_000
            ),
            Err(CustomContractError::BidTooLow.into())
        );
        claim!(env.usdc_transfers.borrow().is_empty());
        claim_eq!(stored_auction(&env.host).highest_bidder(), Some(BUYER));
        claim_eq!(stored_auction(&env.host).highest_bid_amount(), Some(START_PRICE));
    }

    #[concordium_test]
    fn test_first_bid_below_start_price() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE - 1, 1_000),
            Err(CustomContractError::BidTooLow.into())
        );
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER,
                usdc_funds(99_000_000),
                Amount::zero(),
                1_000
            ),
            Err(CustomContractError::BidTooLow.into())
        );
        claim_eq!(stored_auction(&env.host).highest_bid, None);
    }

    #[concordium_test]
    fn test_self_bid_rejected() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, SELLER, 50_000, 1_000),
            Err(CustomContractError::SelfBidForbidden.into())
        );
        claim_eq!(stored_auction(&env.host).highest_bid, None);
    }

    #[concordium_test]
    fn test_bid_after_end_rejected() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, 50_000, END_TIME),
            Err(CustomContractError::AuctionEnded.into())
        );
        claim_eq!(stored_auction(&env.host).highest_bid, None);
    }

    #[concordium_test]
    fn test_bid_on_unknown_auction() {
        let mut env = new_env();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, 50_000, 1_000),
            Err(CustomContractError::AuctionNotFound.into())
        );
    }

    #[concordium_test]
    fn test_bid_amount_checks() {
        let mut env = env_with_auction();

        claim_eq!(
            place_bid(&mut env.host, BUYER, native(0), Amount::zero(), 1_000),
            Err(CustomContractError::InvalidAmount.into())
        );
        // Attached CCD must match a CCD bid
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER,
                native(50_000),
                Amount::from_micro_ccd(40_000),
                1_000
            ),
            Err(CustomContractError::AmountMismatch.into())
        );
        // and be absent for a token bid
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER,
                usdc_funds(200_000_000),
                Amount::from_micro_ccd(1),
                1_000
            ),
            Err(CustomContractError::AmountMismatch.into())
        );
        claim!(env.usdc_transfers.borrow().is_empty());
        claim_eq!(stored_auction(&env.host).highest_bid, None);
    }

    #[concordium_test]
    fn test_bid_in_unregistered_currency() {
        let mut env = env_with_auction();
        let unknown = Funds {
            currency: Currency::Cis2(Token {
                contract: ContractAddress {
                    index: 50,
                    subindex: 0,
                },
                id: TokenIdVec(vec![]),
            }),
            amount: 1_000_000_000,
        };

        claim_eq!(
            place_bid(&mut env.host, BUYER, unknown, Amount::zero(), 1_000),
            Err(CustomContractError::UnregisteredCurrency.into())
        );
        claim_eq!(stored_auction(&env.host).highest_bid, None);
    }

    #[concordium_test]
    fn test_failed_token_pull_rejects_bid() {
        let mut env = env_with_auction();
        env.host
            .setup_mock_entrypoint(USDC_CONTRACT, entrypoint("transfer"), failing_mock());

        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER,
                usdc_funds(200_000_000),
                Amount::zero(),
                1_000
            ),
            Err(CustomContractError::TransferFailed.into())
        );
        claim_eq!(stored_auction(&env.host).highest_bid, None);
    }

    #[concordium_test]
    fn test_failed_refund_rejects_bid() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );
        let leader = stored_auction(&env.host).highest_bid;

        // Contract can not pay the refund
        env.host.set_self_balance(Amount::zero());

        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER_2,
                usdc_funds(200_000_000),
                Amount::zero(),
                2_000
            ),
            Err(CustomContractError::TransferFailed.into())
        );
        claim_eq!(stored_auction(&env.host).highest_bid, leader);
    }

    #[concordium_test]
    fn test_token_leader_refunded_in_tokens() {
        let mut env = env_with_auction();
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER,
                usdc_funds(101_000_000),
                Amount::zero(),
                1_000
            ),
            Ok(())
        );

        // 0.02 CCD is worth 200
        claim_eq!(
            place_native_bid(&mut env.host, BUYER_2, 20_000, 2_000),
            Ok(())
        );

        claim_eq!(env.usdc_transfers.borrow().len(), 2);
        claim_transfer(
            &env.usdc_transfers,
            1,
            Address::Contract(SELF_ADDRESS),
            Address::Account(BUYER),
            101_000_000,
        );
        claim_eq!(stored_auction(&env.host).highest_bidder(), Some(BUYER_2));

        let (result, _) = end_auction(&mut env.host, SELLER, END_TIME);
        claim_eq!(result, Ok(()));
        claim!(env
            .host
            .transfer_occurred(&SELLER, Amount::from_micro_ccd(20_000)));
        claim_transfer(
            &env.nft_transfers,
            1,
            Address::Contract(SELF_ADDRESS),
            Address::Account(BUYER_2),
            1,
        );
    }

    #[concordium_test]
    fn test_end_auction_too_early() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );

        let (result, logger) = end_auction(&mut env.host, SELLER, END_TIME - 1);
        claim_eq!(result, Err(CustomContractError::AuctionNotYetEnded.into()));
        claim!(logger.logs.is_empty());
        claim_eq!(stored_auction(&env.host).state, AuctionState::Active);
        claim_eq!(env.nft_transfers.borrow().len(), 1);
    }

    #[concordium_test]
    fn test_end_auction_only_seller() {
        let mut env = env_with_auction();
        let (result, _) = end_auction(&mut env.host, BUYER, END_TIME);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim_eq!(stored_auction(&env.host).state, AuctionState::Active);
    }

    #[concordium_test]
    fn test_end_auction_once() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );

        let (result, _) = end_auction(&mut env.host, SELLER, END_TIME);
        claim_eq!(result, Ok(()));
        claim!(env
            .host
            .transfer_occurred(&SELLER, Amount::from_micro_ccd(START_PRICE)));

        let (result, logger) = end_auction(&mut env.host, SELLER, END_TIME + 1_000);
        claim_eq!(
            result,
            Err(CustomContractError::AuctionAlreadyEnded.into())
        );
        claim!(logger.logs.is_empty());
        claim_eq!(env.nft_transfers.borrow().len(), 2);

        // No bids after settlement either
        claim_eq!(
            place_native_bid(&mut env.host, BUYER_2, 50_000, 1_000),
            Err(CustomContractError::AuctionAlreadyEnded.into())
        );
    }

    #[concordium_test]
    fn test_end_auction_without_bids() {
        let mut env = env_with_auction();

        let (result, _) = end_auction(&mut env.host, SELLER, END_TIME);
        claim_eq!(result, Ok(()));

        claim_transfer(
            &env.nft_transfers,
            1,
            Address::Contract(SELF_ADDRESS),
            Address::Account(SELLER),
            1,
        );
        let auction = stored_auction(&env.host);
        claim_eq!(auction.state, AuctionState::Ended);
        claim_eq!(auction.highest_bid, None);
    }

    #[concordium_test]
    fn test_end_auction_payout_failure() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );
        env.host.set_self_balance(Amount::zero());

        let (result, _) = end_auction(&mut env.host, SELLER, END_TIME);
        claim_eq!(result, Err(CustomContractError::TransferFailed.into()));
        claim_eq!(stored_auction(&env.host).state, AuctionState::Active);
    }

    #[concordium_test]
    fn test_cancel_auction() {
        let mut env = env_with_auction();

        claim_eq!(
            cancel_auction(&mut env.host, BUYER, 1_000),
            Err(CustomContractError::Unauthorized.into())
        );
        claim_eq!(cancel_auction(&mut env.host, SELLER, 1_000), Ok(()));

        claim_transfer(
            &env.nft_transfers,
            1,
            Address::Contract(SELF_ADDRESS),
            Address::Account(SELLER),
            1,
        );
        claim_eq!(stored_auction(&env.host).state, AuctionState::Cancelled);

        claim_eq!(
            place_native_bid(&mut env.host, BUYER, 50_000, 2_000),
            Err(CustomContractError::AuctionCancelled.into())
        );
        let (result, _) = end_auction(&mut env.host, SELLER, END_TIME);
        claim_eq!(result, Err(CustomContractError::AuctionCancelled.into()));
    }

    #[concordium_test]
    fn test_cancel_auction_with_bids() {
        let mut env = env_with_auction();
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );

        claim_eq!(
            cancel_auction(&mut env.host, SELLER, 2_000),
            Err(CustomContractError::AuctionHasBids.into())
        );
        claim_eq!(stored_auction(&env.host).state, AuctionState::Active);
    }

    #[concordium_test]
    fn test_view_auction() {
        let env = env_with_auction();

        let bytes = to_bytes(&0u64);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        let result = contract_view_auction(&ctx, &env.host);
        claim_eq!(result, Ok(stored_auction(&env.host)));

        let bytes = to_bytes(&5u64);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        let result = contract_view_auction(&ctx, &env.host);
        claim_eq!(result, Err(CustomContractError::AuctionNotFound.into()));

        let ctx = TestReceiveContext::empty();
        claim_eq!(contract_auction_count(&ctx, &env.host), Ok(1));
    }

    fn set_price_feed(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        currency: Currency,
        oracle: ContractAddress,
    ) -> (ReceiveResult<()>, TestLogger) {
        let bytes = to_bytes(&SetPriceFeedParams { currency, oracle });
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = contract_set_price_feed(&ctx, host, &mut logger);
        (result, logger)
    }

    fn view_price_feed(
        host: &TestHost<State<TestStateApi>>,
        currency: &Currency,
    ) -> ReceiveResult<ContractAddress> {
        let bytes = to_bytes(currency);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        contract_view_price_feed(&ctx, host)
    }

    #[concordium_test]
    fn test_price_feed_management() {
        let mut env = new_env();
        let other_oracle = ContractAddress {
            index: 30,
            subindex: 0,
        };

        let (result, _) = set_price_feed(&mut env.host, USER, usdc(), other_oracle);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim_eq!(view_price_feed(&env.host, &usdc()), Ok(ORACLE));

        // Grant the feed manager role
        let update = RoleUpdateParams {
            role: Role::FeedManager,
            kind: RoleUpdateKind::Grant,
            address: Address::Account(USER),
        };
        let bytes = to_bytes(&update);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ADMIN))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            contract_update_roles(&ctx, &mut env.host, &mut logger),
            Ok(())
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvents::RoleUpdated(&update))]
        );

        let (result, logger) = set_price_feed(&mut env.host, USER, usdc(), other_oracle);
        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvents::feed_set(&usdc(), &other_oracle))]
        );
        claim_eq!(view_price_feed(&env.host, &usdc()), Ok(other_oracle));

        // Remove it again
        let bytes = to_bytes(&usdc());
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ADMIN))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            contract_remove_price_feed(&ctx, &mut env.host, &mut logger),
            Ok(())
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvents::feed_removed(&usdc(), &other_oracle))]
        );
        claim_eq!(
            view_price_feed(&env.host, &usdc()),
            Err(CustomContractError::UnregisteredCurrency.into())
        );

        let mut logger = TestLogger::init();
        claim_eq!(
            contract_remove_price_feed(&ctx, &mut env.host, &mut logger),
            Err(CustomContractError::UnregisteredCurrency.into())
        );
    }

    #[concordium_test]
    fn test_view_roles() {
        let env = new_env();
        let bytes = to_bytes(&RoleViewParams {
            role: Role::Admin,
            skip: 0,
            show: 10,
        });
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        claim_eq!(
            contract_view_roles(&ctx, &env.host),
            Ok(vec![Address::Account(ADMIN)])
        );
    }

    #[concordium_test]
    fn test_get_usd_value() {
        let env = new_env();

        let get = |currency: Currency, amount: u64| {
            let bytes = to_bytes(&UsdValueParams { currency, amount });
            let mut ctx = TestReceiveContext::empty();
            ctx.set_parameter(&bytes);
            contract_get_usd_value(&ctx, &env.host)
        };

        claim_eq!(get(Currency::Native, 10_000), Ok(100));
        claim_eq!(get(usdc(), 101_000_000), Ok(101));
        claim_eq!(
            get(
                Currency::Cis2(Token {
                    contract: NFT_CONTRACT,
                    id: TokenIdVec(vec![]),
                }),
                1
            ),
            Err(CustomContractError::UnregisteredCurrency.into())
        );
    }

    #[concordium_test]
    fn test_on_receiving_cis2() {
        let env = new_env();
        let params = OnReceivingCis2Params {
            token_id: TokenIdVec(vec![7]),
            amount: TokenAmountU64(1),
            from: Address::Account(SELLER),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&params);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(NFT_CONTRACT))
            .set_parameter(&bytes);
        claim_eq!(contract_on_receiving_cis2(&ctx, &env.host), Ok(()));

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_parameter(&bytes);
        claim_eq!(
            contract_on_receiving_cis2(&ctx, &env.host),
            Err(CustomContractError::ContractOnly.into())
        );
    }

    #[concordium_test]
    fn test_on_receiving_cis2_from_contract_rejected() {
        let env = new_env();
        let params = OnReceivingCis2Params {
            token_id: TokenIdVec(vec![]),
            amount: TokenAmountU64(5),
            from: Address::Contract(ORACLE),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&params);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(USDC_CONTRACT))
            .set_parameter(&bytes);
        claim_eq!(
            contract_on_receiving_cis2(&ctx, &env.host),
            Err(CustomContractError::UnexpectedTransfer.into())
        );
    }

    /// Oracle mock answering with `ccd_price` for CCD and recording every
    /// requested currency.
    fn set_oracle(
        host: &mut TestHost<State<TestStateApi>>,
        ccd_price: u64,
        reads: Rc<RefCell<Vec<Currency>>>,
    ) {
        host.setup_mock_entrypoint(
            ORACLE,
            entrypoint("latestPrice"),
            parse_and_map_mock(move |currency: &Currency| {
                reads.borrow_mut().push(currency.clone());
                match currency {
                    Currency::Native => Some(PriceData {
                        value: ccd_price,
                        decimals: 6,
                    }),
                    currency => test_oracle(currency),
                }
            }),
        );
    }

    #[concordium_test]
    fn test_prices_read_once_per_currency() {
        let mut env = env_with_auction();
        let reads = Rc::new(RefCell::new(Vec::new()));
        set_oracle(&mut env.host, 10_000, reads.clone());

        // CCD bid against the CCD start price
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );
        claim_eq!(*reads.borrow(), vec![Currency::Native]);

        // USDC bid against the CCD leader
        reads.borrow_mut().clear();
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER_2,
                usdc_funds(101_000_000),
                Amount::zero(),
                2_000
            ),
            Ok(())
        );
        claim_eq!(*reads.borrow(), vec![usdc(), Currency::Native]);
    }

    #[concordium_test]
    fn test_leader_valued_at_current_price() {
        let mut env = env_with_auction();
        let reads = Rc::new(RefCell::new(Vec::new()));
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, START_PRICE, 1_000),
            Ok(())
        );

        // CCD doubles, the leading 0.01 CCD is now worth 200
        set_oracle(&mut env.host, 20_000, reads.clone());
        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER_2,
                usdc_funds(150_000_000),
                Amount::zero(),
                2_000
            ),
            Err(CustomContractError::BidTooLow.into())
        );
        claim!(env.usdc_transfers.borrow().is_empty());
        claim_eq!(stored_auction(&env.host).highest_bidder(), Some(BUYER));

        claim_eq!(
            place_bid(
                &mut env.host,
                BUYER_2,
                usdc_funds(201_000_000),
                Amount::zero(),
                3_000
            ),
            Ok(())
        );
        let auction = stored_auction(&env.host);
        claim_eq!(auction.highest_bidder(), Some(BUYER_2));
        claim_eq!(auction.highest_bid_currency(), Some(&usdc()));
        claim!(env
            .host
            .transfer_occurred(&BUYER, Amount::from_micro_ccd(START_PRICE)));

        // CCD halves, the USDC leader at 201 now beats a 0.015 CCD bid worth 75
        set_oracle(&mut env.host, 5_000, reads);
        claim_eq!(
            place_native_bid(&mut env.host, BUYER, 15_000, 4_000),
            Err(CustomContractError::BidTooLow.into())
        );
    }
}
