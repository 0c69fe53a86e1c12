use super::*;

/// USD value of `amount` smallest units priced at `price`.
///
/// `amount * value` always fits into u128, only the decimal scale can overflow.
/// The result is truncated to whole quote units, so values closer than one
/// unit compare equal. Feeds should quote a unit fine enough for the bid
/// increments they price.
pub fn usd_value(amount: u64, price: &PriceData) -> Result<u128, CustomContractError> {
    let scale = 10u128
        .checked_pow(u32::from(price.decimals))
        .ok_or(CustomContractError::PriceOverflow)?;
    Ok(u128::from(amount) * u128::from(price.value) / scale)
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_usd_value() {
        let ccd = PriceData {
            value: 10_000,
            decimals: 6,
        };
        claim_eq!(usd_value(10_000, &ccd), Ok(100));
        claim_eq!(usd_value(0, &ccd), Ok(0));
        // 100.5 truncates to the value of 10_000
        claim_eq!(usd_value(10_050, &ccd), Ok(100));

        let usdc = PriceData {
            value: 1,
            decimals: 6,
        };
        claim_eq!(usd_value(101_000_000, &usdc), Ok(101));
        // Rounds down
        claim_eq!(usd_value(999_999, &usdc), Ok(0));
    }

    #[concordium_test]
    fn test_usd_value_no_overflow() {
        let price = PriceData {
            value: u64::MAX,
            decimals: 0,
        };
        claim_eq!(
            usd_value(u64::MAX, &price),
            Ok(u128::from(u64::MAX) * u128::from(u64::MAX))
        );

        let price = PriceData {
            value: 1,
            decimals: 38,
        };
        claim_eq!(usd_value(u64::MAX, &price), Ok(0));

        let price = PriceData {
            value: 1,
            decimals: 39,
        };
        claim_eq!(
            usd_value(1, &price),
            Err(CustomContractError::PriceOverflow)
        );
    }
}
