use commons::{Currency, PriceData, Role, RoleUpdateParams, RoleViewParams};
use concordium_std::*;

use crate::events::PriceFeedEvent;
use crate::external::*;
use crate::state::State;

/// Initialize the oracle without prices. The init origin becomes the first admin.
#[init(contract = "PriceFeed")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::new(state_builder, ctx.init_origin()))
}

/// Function to set the latest price of a currency.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have the price feed manager role;
/// - Fails to log `PriceUpdated` event.
#[receive(
    mutable,
    contract = "PriceFeed",
    name = "setPrice",
    parameter = "SetPriceParams",
    enable_logger
)]
fn set_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = SetPriceParams::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();

    state.access.ensure_role(&ctx.sender(), Role::FeedManager)?;

    logger.log(&PriceFeedEvent::PriceUpdated(&params))?;

    state.set_price(params.currency, params.price);

    Ok(())
}

/// Function to get the latest price of a currency.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No price was ever set for the currency.
#[receive(
    contract = "PriceFeed",
    name = "latestPrice",
    parameter = "Currency",
    return_value = "PriceData"
)]
fn latest_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<PriceData> {
    let currency = Currency::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().price(&currency)?)
}

#[receive(
    mutable,
    contract = "PriceFeed",
    name = "updateRoles",
    parameter = "RoleUpdateParams",
    enable_logger
)]
fn update_roles<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = RoleUpdateParams::deserial(&mut ctx.parameter_cursor())?;
    host.state_mut()
        .access
        .handle_update(ctx.sender(), &params)?;
    logger.log(&PriceFeedEvent::RoleUpdated(&params))?;
    Ok(())
}

#[receive(
    contract = "PriceFeed",
    name = "viewRoles",
    parameter = "RoleViewParams",
    return_value = "Vec<Address>"
)]
fn view_roles<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<Address>> {
    let params = RoleViewParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().access.handle_view(params))
}

#[concordium_cfg_test]
mod tests {
    use commons::{CustomContractError, RoleUpdateKind, Token};
    use concordium_cis2::TokenIdVec;
    use concordium_std::*;
    use test_infrastructure::*;

    use super::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const FEEDER: AccountAddress = AccountAddress([2; 32]);
    const USER: AccountAddress = AccountAddress([3; 32]);

    fn usdc() -> Currency {
        Currency::Cis2(Token {
            contract: ContractAddress {
                index: 2,
                subindex: 0,
            },
            id: TokenIdVec(vec![]),
        })
    }

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_PriceFeed");

        let mut host = TestHost::new(state, state_builder);

        let mut ctx = TestReceiveContext::empty();
        let params = RoleUpdateParams {
            role: Role::FeedManager,
            kind: RoleUpdateKind::Grant,
            address: Address::Account(FEEDER),
        };
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(ADMIN))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();
        let result = update_roles(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&PriceFeedEvent::RoleUpdated(&params))]
        );

        host
    }

    fn set(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        params: &SetPriceParams,
    ) -> (ReceiveResult<()>, TestLogger) {
        let bytes = to_bytes(params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();
        let result = set_price(&ctx, host, &mut logger);
        (result, logger)
    }

    fn get(host: &TestHost<State<TestStateApi>>, currency: &Currency) -> ReceiveResult<PriceData> {
        let bytes = to_bytes(currency);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        latest_price(&ctx, host)
    }

    #[concordium_test]
    fn test_set_and_read_price() {
        let mut host = new_host();
        let params = SetPriceParams {
            currency: Currency::Native,
            price: PriceData {
                value: 10_000,
                decimals: 6,
            },
        };

        let (result, logger) = set(&mut host, FEEDER, &params);
        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&PriceFeedEvent::PriceUpdated(&params))]
        );
        claim_eq!(get(&host, &Currency::Native), Ok(params.price));

        // Admins hold the manager role too
        let params = SetPriceParams {
            currency: Currency::Native,
            price: PriceData {
                value: 12_000,
                decimals: 6,
            },
        };
        let (result, _) = set(&mut host, ADMIN, &params);
        claim_eq!(result, Ok(()));
        claim_eq!(get(&host, &Currency::Native), Ok(params.price));
    }

    #[concordium_test]
    fn test_price_not_found() {
        let host = new_host();
        claim_eq!(
            get(&host, &usdc()),
            Err(CustomContractError::PriceNotFound.into())
        );
    }

    #[concordium_test]
    fn test_set_price_unauthorized() {
        let mut host = new_host();
        let params = SetPriceParams {
            currency: usdc(),
            price: PriceData {
                value: 1,
                decimals: 6,
            },
        };

        let (result, logger) = set(&mut host, USER, &params);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(logger.logs.is_empty());
        claim_eq!(
            get(&host, &usdc()),
            Err(CustomContractError::PriceNotFound.into())
        );
    }

    #[concordium_test]
    fn test_view_roles() {
        let host = new_host();
        let bytes = to_bytes(&RoleViewParams {
            role: Role::FeedManager,
            skip: 0,
            show: 10,
        });
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        claim_eq!(
            view_roles(&ctx, &host),
            Ok(vec![Address::Account(FEEDER)])
        );
    }
}
