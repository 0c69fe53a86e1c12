use super::*;

/// Moves bid funds in and out of the custody of a contract, whatever the
/// currency.
pub trait HostCurrencyExt<S>: HostCis2Ext<S> {
    /// Takes `funds` from `owner` into custody of `custodian`.
    ///
    /// CCD must already be attached to the call and match the amount exactly.
    /// CIS-2 tokens are pulled from the owner, which requires `custodian` to be
    /// an operator of the owner on the token contract.
    fn collect_funds(
        &mut self,
        funds: &Funds,
        owner: &AccountAddress,
        attached: Amount,
        custodian: &ContractAddress,
    ) -> Result<(), CustomContractError> {
        match &funds.currency {
            Currency::Native => {
                ensure_eq!(
                    attached,
                    Amount::from_micro_ccd(funds.amount),
                    CustomContractError::AmountMismatch
                );
                Ok(())
            }
            Currency::Cis2(token) => {
                ensure_eq!(
                    attached,
                    Amount::zero(),
                    CustomContractError::AmountMismatch
                );
                self.cis2_transfer(
                    token,
                    TokenAmountU64(funds.amount),
                    Address::Account(*owner),
                    Receiver::Contract(
                        *custodian,
                        OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2_ENTRYPOINT.into()),
                    ),
                )
                .map_err(|_| CustomContractError::TransferFailed)
            }
        }
    }

    /// Sends `funds` held by `custodian` to `to`.
    fn pay_out(
        &mut self,
        funds: &Funds,
        to: &AccountAddress,
        custodian: &ContractAddress,
    ) -> Result<(), CustomContractError> {
        match &funds.currency {
            Currency::Native => self
                .invoke_transfer(to, Amount::from_micro_ccd(funds.amount))
                .map_err(|_| CustomContractError::TransferFailed),
            Currency::Cis2(token) => self
                .cis2_transfer(
                    token,
                    TokenAmountU64(funds.amount),
                    Address::Contract(*custodian),
                    Receiver::Account(*to),
                )
                .map_err(|_| CustomContractError::TransferFailed),
        }
    }
}

impl<S, H: HasHost<S>> HostCurrencyExt<S> for H {}
