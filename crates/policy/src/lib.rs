//! Policy storage and evaluation for Proofgate.
//!
//! The [`PolicyStore`] is the process-wide registry mapping a
//! `(user_address, agent_id)` pair to its [`PolicyConfig`]. It is in-memory
//! only: lifecycle equals process lifetime, no eviction, no TTL. Durable
//! backends implement the same `PolicyBackend` trait externally.
//!
//! The [`CapabilityEvaluator`] is the default evaluation strategy — a
//! deny-by-default capability set over contracts, functions, and value.

mod evaluator;
mod store;

pub use evaluator::CapabilityEvaluator;
pub use store::PolicyStore;
