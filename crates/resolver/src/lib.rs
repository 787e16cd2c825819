//! Contract resolution engine — turns an address + chain into a verified
//! ABI and a structured set of callable functions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────────────┐    ┌────────────────┐
//! │  Caller   │───▶│ ContractResolver  │───▶│  AbiSource     │
//! │ (address, │    │  validate         │    │ (explorer API) │
//! │  chain)   │    │  fetch            │    └────────────────┘
//! └──────────┘    │  extract          │
//!                 └───────────────────┘
//!                         │
//!                 ┌───────┴────────┐
//!                 │ ResolvedContract│
//!                 │  abi (verbatim) │
//!                 │  functions      │
//!                 │  metadata       │
//!                 └────────────────┘
//! ```
//!
//! Validation happens before any network call; metadata is best-effort
//! enrichment; failures pass through with their kind unchanged so callers
//! can distinguish a network fault from an unverified contract.

mod address;
mod explorer;
mod extract;
mod resolve;

pub use address::{is_valid_address, normalize_address};
pub use explorer::ExplorerClient;
pub use extract::extract_functions;
pub use resolve::{ContractResolver, ResolveOptions};
