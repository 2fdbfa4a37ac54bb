//! Blueprint arithmetization: the constraint system, the component contract,
//! the components, the satisfiability checker and the circuit builder.

/// Module for the circuit builder.
pub mod builder;

/// Module for the satisfiability checker.
pub mod checker;

/// Module for components.
pub mod component;

/// Module for the constraint system.
pub mod constraint_system;
