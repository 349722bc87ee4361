//! Application layer orchestrating the domain: the wallet, screen
//! navigation, transaction recording, and the asynchronous top-up and
//! payment flows.

pub mod flow;
pub mod navigator;
pub mod recorder;
pub mod wallet;
