use super::*;

pub trait HostPriceFeedExt<S>: HasHost<S> {
    /// Query the latest price of `currency` from the oracle contract.
    fn latest_price(
        &self,
        oracle: &ContractAddress,
        currency: &Currency,
    ) -> Result<PriceData, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                oracle,
                currency,
                EntrypointName::new_unchecked(LATEST_PRICE_ENTRYPOINT),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        PriceData::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }
}

impl<S, H: HasHost<S>> HostPriceFeedExt<S> for H {}
