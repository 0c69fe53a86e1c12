//! Timed NFT auctions accepting bids in CCD and CIS-2 tokens.
//!
//! Bids in different currencies are compared by their USD value, read from
//! the price oracle registered for each currency. The listed token is held by
//! the contract from creation until the auction is ended or cancelled, and so
//! is the leading bid until it is outbid or paid out to the seller.
#![cfg_attr(not(feature = "std"), no_std)]

mod bid;
mod contract;
mod events;
mod external;
mod registry;
mod state;
