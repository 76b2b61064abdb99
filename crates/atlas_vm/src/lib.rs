//! # atlas_vm
//!
//! The bytecode value types ([`Bytecode`], [`Instruction`], [`OpCode`],
//! [`VmContext`]), the [`GraphCompiler`] that lowers an [`atlas_graph::Graph`]
//! into bytecode, and the [`GraphVm`] stack-machine interpreter that runs it.

pub mod bytecode;
pub mod compiler;
pub mod vm;

pub use bytecode::{Bytecode, Instruction, OpCode, VmContext};
pub use compiler::GraphCompiler;
pub use vm::{validate_jumps, GraphVm, VmError};
