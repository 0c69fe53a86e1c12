//! Types, errors and host extensions shared by the auction and price feed
//! contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{
    access::*, calculations::*, cis2::*, constants::*, currency::*, errors::*, price_feed::*,
    types::*,
};
use concordium_cis2::*;
use concordium_std::*;

#[cfg(feature = "test-utils")]
pub mod test;

mod access;
mod calculations;
mod cis2;
mod constants;
mod currency;
mod errors;
mod price_feed;
mod types;
