use super::*;

const TRANSFER_ENTRYPOINT: &str = "transfer";
const BALANCE_OF_ENTRYPOINT: &str = "balanceOf";
const OPERATOR_OF_ENTRYPOINT: &str = "operatorOf";

pub trait HostCis2Ext<S>: HasHost<S> {
    /// Transfer `amount` of `token` from `from` to `to` on the token contract.
    fn cis2_transfer(
        &mut self,
        token: &Token,
        amount: ContractTokenAmount,
        from: Address,
        to: Receiver,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let params = TransferParams(vec![Transfer {
            token_id: token.id.clone(),
            amount,
            from,
            to,
            data: AdditionalData::empty(),
        }]);

        self.invoke_contract(
            &token.contract,
            &params,
            EntrypointName::new_unchecked(TRANSFER_ENTRYPOINT),
            Amount::zero(),
        )?;

        Ok(())
    }

    fn cis2_balance_of(
        &self,
        token: &Token,
        address: Address,
    ) -> Result<ContractTokenAmount, ContractReadError<Self::ReturnValueType>> {
        let params = BalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: token.id.clone(),
                address,
            }],
        };

        let mut result = self
            .invoke_contract_read_only(
                &token.contract,
                &params,
                EntrypointName::new_unchecked(BALANCE_OF_ENTRYPOINT),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let response = BalanceOfQueryResponse::<ContractTokenAmount>::deserial(&mut result)
            .map_err(|_| ContractReadError::Parse)?;

        response
            .0
            .first()
            .copied()
            .ok_or(ContractReadError::Compatibility)
    }

    fn cis2_operator_of(
        &self,
        contract: &ContractAddress,
        owner: Address,
        operator: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let params = OperatorOfQueryParams {
            queries: vec![OperatorOfQuery {
                owner,
                address: operator,
            }],
        };

        let mut result = self
            .invoke_contract_read_only(
                contract,
                &params,
                EntrypointName::new_unchecked(OPERATOR_OF_ENTRYPOINT),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let response =
            OperatorOfQueryResponse::deserial(&mut result).map_err(|_| ContractReadError::Parse)?;

        response
            .0
            .first()
            .copied()
            .ok_or(ContractReadError::Compatibility)
    }
}

impl<S, H: HasHost<S>> HostCis2Ext<S> for H {}
