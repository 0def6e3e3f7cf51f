//! Domain implementations for the search core.

pub mod n_puzzle;
