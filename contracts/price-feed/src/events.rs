use commons::{RoleUpdateParams, PRICE_UPDATED_TAG, ROLE_UPDATED_TAG};
use concordium_std::*;

use crate::external::SetPriceParams;

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum PriceFeedEvent<'e> {
    /// New latest price of a currency
    PriceUpdated(&'e SetPriceParams),
    RoleUpdated(&'e RoleUpdateParams),
}

impl<'e> Serial for PriceFeedEvent<'e> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            PriceFeedEvent::PriceUpdated(params) => {
                out.write_u8(PRICE_UPDATED_TAG)?;
                params.serial(out)
            }
            PriceFeedEvent::RoleUpdated(params) => {
                out.write_u8(ROLE_UPDATED_TAG)?;
                params.serial(out)
            }
        }
    }
}
