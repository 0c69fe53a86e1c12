use commons::{AccessControl, Currency, CustomContractError, PriceData};
use concordium_std::*;

#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Admin and price feed manager roles.
    pub access: AccessControl<S>,
    prices: StateMap<Currency, PriceData, S>,
}

impl<S: HasStateApi> State<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, origin: AccountAddress) -> Self {
        Self {
            access: AccessControl::new(state_builder, Address::Account(origin)),
            prices: state_builder.new_map(),
        }
    }

    pub fn set_price(&mut self, currency: Currency, price: PriceData) {
        self.prices.insert(currency, price);
    }

    pub fn price(&self, currency: &Currency) -> Result<PriceData, CustomContractError> {
        self.prices
            .get(currency)
            .map(|price| *price)
            .ok_or(CustomContractError::PriceNotFound)
    }
}
