//! Boolean constraint engine boundary.
//!
//! Provides a domain-agnostic model of boolean variables and linear
//! constraints over literals, the [`SolverAdapter`] trait that any engine
//! (SAT, ILP, CP) can implement, and a default adapter over BatSat.
//!
//! # Key Components
//!
//! - **Variables**: [`BoolVar`], [`Literal`]: handles into a model
//! - **Model**: [`ConstraintModel`]: linear, conditional, and implication constraints
//! - **Solver**: [`SolverAdapter`] trait, [`SolverConfig`], [`Solution`]
//! - **Engine**: [`BatsatSolver`]: pseudo-boolean encoding handed to the BatSat SAT solver
//!
//! # Design
//!
//! The model layer knows nothing about timetables; the `cp` module is the
//! only place where scheduling concepts meet boolean variables.

mod literal;
mod model;
mod sat;
mod solver;

pub use literal::{BoolVar, Literal};
pub use model::{unit_terms, Comparison, ConstraintModel, LinearConstraint};
pub use sat::BatsatSolver;
pub use solver::{Solution, SolverAdapter, SolverConfig, SolverStats, SolverStatus};
