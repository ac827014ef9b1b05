//! Domain core for the land-registry dashboard.
//!
//! - [`geo`] -- parcel footprint estimation for map previews.
//! - [`session`] -- token structure, claims decoding, access decision.
//! - [`store`] -- single-slot session token storage.
//! - [`guard`] -- route guard and sign-in/sign-out navigation.

pub mod error;
pub mod geo;
pub mod guard;
pub mod roles;
pub mod session;
pub mod store;
pub mod types;
