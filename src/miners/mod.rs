//! Seams to the miner communication library.
//!
//! Backends implement [`backends::traits::MinerHandle`] for one firmware
//! family and are found through a [`backends::traits::MinerResolver`].

pub mod api;
pub mod backends;
pub mod data;
