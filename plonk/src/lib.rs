//! PLONK arithmetization for blueprint components.
//!
//! A circuit is assembled from components placed on consecutive rows of an
//! [`AssignmentTable`](plonk::constraint_system::AssignmentTable). Each
//! component fills its witness cells, registers its gates (shared between all
//! instances of the same shape through selector deduplication) and wires its
//! cells to its inputs with copy constraints. The
//! [`checker`](plonk::checker) re-evaluates everything against the table.
#![deny(warnings)]
#![warn(missing_docs)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
extern crate serde_derive;

/// Module for error handling.
pub mod errors;
/// Module for the arithmetization: constraint system, components, checker.
pub mod plonk;
