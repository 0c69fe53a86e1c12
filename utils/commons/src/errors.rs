use super::*;

/// The custom errors the contracts can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Sender does not hold the required role (Error code: -4).
    Unauthorized,
    /// Only account addresses can call this function (Error code: -5).
    OnlyAccountAddress,
    /// This function must only be called by a contract (Error code: -6).
    ContractOnly,
    /// No auction with the given identifier (Error code: -7).
    AuctionNotFound,
    /// No price feed is registered for the currency (Error code: -8).
    UnregisteredCurrency,
    /// The oracle has no price for the currency (Error code: -9).
    PriceNotFound,
    /// Auction duration must be positive (Error code: -10).
    InvalidDuration,
    /// Auction start price must be positive (Error code: -11).
    InvalidStartPrice,
    /// Bid amount must be positive (Error code: -12).
    InvalidAmount,
    /// Attached CCD does not match the bid (Error code: -13).
    AmountMismatch,
    /// Seller is not allowed to bid on own auction (Error code: -14).
    SelfBidForbidden,
    /// Sender does not own the listed token (Error code: -15).
    NotAssetOwner,
    /// Contract is not an operator of the token owner (Error code: -16).
    NotApproved,
    /// Bid is not higher than the current highest bid (Error code: -17).
    BidTooLow,
    /// Bidding window is over (Error code: -18).
    AuctionEnded,
    /// Attempt to settle the auction before its end time (Error code: -19).
    AuctionNotYetEnded,
    /// Auction was already settled (Error code: -20).
    AuctionAlreadyEnded,
    /// Auction was cancelled by the seller (Error code: -21).
    AuctionCancelled,
    /// Auctions with bids can not be cancelled (Error code: -22).
    AuctionHasBids,
    /// Moving CCD or tokens failed (Error code: -23).
    TransferFailed,
    /// Failed to invoke a contract (Error code: -24).
    InvokeContractError,
    /// Invoked contract does not behave as expected (Error code: -25).
    Incompatible,
    /// Price precision does not fit into the value range (Error code: -26).
    PriceOverflow,
    /// Tokens arrived from a contract instead of an account (Error code: -27).
    UnexpectedTransfer,
}

/// Coarse classification of [`CustomContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    InvalidState,
    InvalidInput,
    InsufficientBid,
    TransferFailure,
    Internal,
}

impl CustomContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuctionNotFound | Self::UnregisteredCurrency | Self::PriceNotFound => {
                ErrorKind::NotFound
            }
            Self::Unauthorized
            | Self::OnlyAccountAddress
            | Self::ContractOnly
            | Self::NotAssetOwner
            | Self::NotApproved => ErrorKind::Unauthorized,
            Self::AuctionEnded
            | Self::AuctionNotYetEnded
            | Self::AuctionAlreadyEnded
            | Self::AuctionCancelled
            | Self::AuctionHasBids => ErrorKind::InvalidState,
            Self::ParseParams
            | Self::InvalidDuration
            | Self::InvalidStartPrice
            | Self::InvalidAmount
            | Self::AmountMismatch
            | Self::SelfBidForbidden
            | Self::UnexpectedTransfer => ErrorKind::InvalidInput,
            Self::BidTooLow => ErrorKind::InsufficientBid,
            Self::TransferFailed => ErrorKind::TransferFailure,
            Self::LogFull
            | Self::LogMalformed
            | Self::InvokeContractError
            | Self::Incompatible
            | Self::PriceOverflow => ErrorKind::Internal,
        }
    }
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(cce: CallContractError<T>) -> Self {
        handle_call_error(cce)
    }
}

/// Any failed CCD transfer is a failed custody movement.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::TransferFailed
    }
}

/// Failure of a read-only contract query.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(error: ContractReadError<R>) -> Self {
        match error {
            ContractReadError::Call(e) => handle_call_error(e),
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}

pub fn handle_call_error<R>(error: CallContractError<R>) -> CustomContractError {
    match error {
        CallContractError::MissingContract
        | CallContractError::MissingEntrypoint
        | CallContractError::MessageFailed => CustomContractError::Incompatible,
        _ => CustomContractError::InvokeContractError,
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_error_kinds() {
        claim_eq!(
            CustomContractError::AuctionNotFound.kind(),
            ErrorKind::NotFound
        );
        claim_eq!(
            CustomContractError::UnregisteredCurrency.kind(),
            ErrorKind::NotFound
        );
        claim_eq!(
            CustomContractError::AuctionAlreadyEnded.kind(),
            ErrorKind::InvalidState
        );
        claim_eq!(
            CustomContractError::AuctionNotYetEnded.kind(),
            ErrorKind::InvalidState
        );
        claim_eq!(
            CustomContractError::SelfBidForbidden.kind(),
            ErrorKind::InvalidInput
        );
        claim_eq!(
            CustomContractError::UnexpectedTransfer.kind(),
            ErrorKind::InvalidInput
        );
        claim_eq!(
            CustomContractError::BidTooLow.kind(),
            ErrorKind::InsufficientBid
        );
        claim_eq!(
            CustomContractError::TransferFailed.kind(),
            ErrorKind::TransferFailure
        );
    }

    #[concordium_test]
    fn test_call_error_mapping() {
        claim_eq!(
            handle_call_error::<()>(CallContractError::MissingEntrypoint),
            CustomContractError::Incompatible
        );
        claim_eq!(
            handle_call_error::<()>(CallContractError::Trap),
            CustomContractError::InvokeContractError
        );
        claim_eq!(
            CustomContractError::from(TransferError::AmountTooLarge),
            CustomContractError::TransferFailed
        );
    }
}
