//! # Proofgate Core
//!
//! Domain types, traits, and error definitions for the Proofgate authorization
//! engine. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here. Implementations
//! live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod abi;
pub mod chain;
pub mod contract;
pub mod error;
pub mod event;
pub mod policy;
pub mod proof;
pub mod transaction;

// Re-export key types at crate root for ergonomics
pub use abi::{AbiParam, AbiSource, FunctionDescriptor, RawAbi, StateMutability};
pub use chain::ChainId;
pub use contract::{ContractMetadata, ResolvedContract};
pub use error::{AuthError, Error, ProofError, ResolveError, Result};
pub use event::{PolicyEvent, PolicyEventSink, TracingEventSink};
pub use policy::{Decision, PolicyBackend, PolicyConfig, PolicyEvaluator, StoredPolicy};
pub use proof::{ProofBackend, ProofResult};
pub use transaction::TransactionData;
