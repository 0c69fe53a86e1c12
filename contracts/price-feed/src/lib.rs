//! Administrator fed USD price oracle.
//!
//! Keeps the latest price of each currency, set by price feed managers, and
//! serves it through `latestPrice` to the auction contract.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
