//! Minimal LLL-style IR compiler for EVM validation code.
//!
//! Compilation runs optimize → assemble → link:
//! - [`optimize`] reduces an [`IrNode`] tree while preserving semantics;
//! - [`compile_to_assembly`] lowers the tree to flat [`AsmInst`] assembly;
//! - [`assembly_to_evm`] links assembly into concrete bytecode.
//!
//! [`compile_deployable`] composes the three stages and wraps the result in
//! a constructor envelope that returns the runtime section, mimicking how a
//! deployed contract's initcode returns its body.

#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod node;
pub use node::{IrError, IrNode, IrOp};

pub mod asm;
pub use asm::{AsmInst, compile_to_assembly, opcodes};

pub mod link;
pub use link::{assembly_to_evm, deploy_envelope};

pub mod optimize;
pub use optimize::{OptLevel, optimize};

pub mod disasm;
pub use disasm::{Instruction, disassemble};

use tracing::trace;

/// Compiles an IR tree into runtime bytecode.
pub fn compile_runtime(node: &IrNode, opt: OptLevel) -> Vec<u8> {
    let node = match opt {
        OptLevel::None => node.clone(),
        OptLevel::Default => optimize(node),
    };
    let asm = compile_to_assembly(&node);
    let runtime = assembly_to_evm(&asm);
    trace!(instructions = asm.len(), bytes = runtime.len(), "compiled IR to runtime code");
    runtime
}

/// Compiles an IR tree into deployable bytecode: runtime code prefixed with
/// the constructor envelope that returns it.
pub fn compile_deployable(node: &IrNode, opt: OptLevel) -> Vec<u8> {
    deploy_envelope(&compile_runtime(node, opt))
}
