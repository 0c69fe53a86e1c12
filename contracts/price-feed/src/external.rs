use commons::{Currency, PriceData};
use concordium_std::*;

#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct SetPriceParams {
    pub currency: Currency,
    pub price: PriceData,
}
