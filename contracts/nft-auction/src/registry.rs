use commons::{usd_value, Currency, CustomContractError, Funds, HostPriceFeedExt, PriceData};
use concordium_std::*;

use crate::state::State;

/// Oracle contract responsible for the USD price of each accepted currency.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct PriceFeedRegistry<S: HasStateApi> {
    feeds: StateMap<Currency, ContractAddress, S>,
}

impl<S: HasStateApi> PriceFeedRegistry<S> {
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            feeds: state_builder.new_map(),
        }
    }

    /// Map `currency` to `oracle`, replacing any previous mapping.
    pub fn set_feed(&mut self, currency: Currency, oracle: ContractAddress) {
        self.feeds.insert(currency, oracle);
    }

    /// Unmap `currency`, returning the oracle it was mapped to.
    pub fn remove_feed(
        &mut self,
        currency: &Currency,
    ) -> Result<ContractAddress, CustomContractError> {
        self.feeds
            .remove_and_get(currency)
            .ok_or(CustomContractError::UnregisteredCurrency)
    }

    pub fn oracle(&self, currency: &Currency) -> Result<ContractAddress, CustomContractError> {
        self.feeds
            .get(currency)
            .map(|oracle| *oracle)
            .ok_or(CustomContractError::UnregisteredCurrency)
    }
}

/// Latest price of `currency` from its registered oracle.
pub fn current_price<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    currency: &Currency,
) -> Result<PriceData, CustomContractError> {
    let oracle = host.state().registry.oracle(currency)?;
    let price = host.latest_price(&oracle, currency)?;
    Ok(price)
}

/// USD value of `funds` at the latest oracle price.
pub fn current_usd_value<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    funds: &Funds,
) -> Result<u128, CustomContractError> {
    let price = current_price(host, &funds.currency)?;
    usd_value(funds.amount, &price)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::Token;
    use concordium_cis2::TokenIdVec;
    use concordium_std::test_infrastructure::*;

    const ORACLE_1: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };
    const ORACLE_2: ContractAddress = ContractAddress {
        index: 11,
        subindex: 0,
    };

    fn usdc() -> Currency {
        Currency::Cis2(Token {
            contract: ContractAddress {
                index: 3,
                subindex: 0,
            },
            id: TokenIdVec(vec![]),
        })
    }

    #[concordium_test]
    fn test_feed_mapping() {
        let mut state_builder = TestStateBuilder::new();
        let mut registry = PriceFeedRegistry::new(&mut state_builder);

        claim_eq!(
            registry.oracle(&Currency::Native),
            Err(CustomContractError::UnregisteredCurrency)
        );

        registry.set_feed(Currency::Native, ORACLE_1);
        registry.set_feed(usdc(), ORACLE_1);
        claim_eq!(registry.oracle(&Currency::Native), Ok(ORACLE_1));
        claim_eq!(registry.oracle(&usdc()), Ok(ORACLE_1));

        // Overwrites without complaint
        registry.set_feed(usdc(), ORACLE_2);
        claim_eq!(registry.oracle(&usdc()), Ok(ORACLE_2));

        claim_eq!(registry.remove_feed(&usdc()), Ok(ORACLE_2));
        claim_eq!(
            registry.oracle(&usdc()),
            Err(CustomContractError::UnregisteredCurrency)
        );
        claim_eq!(
            registry.remove_feed(&usdc()),
            Err(CustomContractError::UnregisteredCurrency)
        );
        claim_eq!(registry.oracle(&Currency::Native), Ok(ORACLE_1));
    }
}
