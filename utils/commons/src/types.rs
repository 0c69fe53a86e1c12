use super::*;

/// Token identifier used by the CIS-2 contracts the auction talks to.
pub type ContractTokenId = TokenIdVec;

/// Token amount type used by the CIS-2 contracts the auction talks to.
pub type ContractTokenAmount = TokenAmountU64;

/// Sequential auction identifier.
pub type AuctionId = u64;

/// A token on a specific CIS-2 contract.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Token {
    pub contract: ContractAddress,
    pub id: ContractTokenId,
}

/// A currency a bid can be placed in.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub enum Currency {
    /// CCD, counted in micro CCD.
    Native,
    /// Fungible CIS-2 token, counted in raw token units.
    Cis2(Token),
}

/// Fixed point price as reported by an oracle: `value / 10^decimals` USD per
/// smallest unit of the currency.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct PriceData {
    pub value: u64,
    pub decimals: u8,
}

/// Amount held in a given currency.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Funds {
    pub currency: Currency,
    pub amount: u64,
}

impl Funds {
    pub fn native(amount: Amount) -> Self {
        Self {
            currency: Currency::Native,
            amount: amount.micro_ccd,
        }
    }
}
