//! IR to assembly compilation.
//!
//! Walks an IR tree post-order and produces a flat instruction list. The
//! operands of an operation are emitted last-argument-first so that the
//! first operand ends up on top of the stack, matching EVM operand order.
//! Intermediate results inside a sequence are popped, per LLL `seq`
//! semantics.

use crate::{IrNode, IrOp};
use alloy_primitives::{Address, U256};

/// An instruction in the assembler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsmInst {
    /// A raw opcode with no operands.
    Op(u8),
    /// Push an immediate value (will be sized minimally by the linker).
    Push(U256),
    /// Push a 20-byte address (always linked as `PUSH20`).
    PushAddress(Address),
}

/// Compiles an IR tree into assembly.
pub fn compile_to_assembly(node: &IrNode) -> Vec<AsmInst> {
    let mut out = Vec::new();
    emit(node, &mut out);
    out
}

fn emit(node: &IrNode, out: &mut Vec<AsmInst>) {
    match node {
        IrNode::Num(value) => out.push(AsmInst::Push(*value)),
        IrNode::Addr(address) => out.push(AsmInst::PushAddress(*address)),
        IrNode::Op(op, args) => {
            for arg in args.iter().rev() {
                emit(arg, out);
            }
            out.push(AsmInst::Op(op.opcode()));
        }
        IrNode::Seq(children) => {
            for (i, child) in children.iter().enumerate() {
                emit(child, out);
                // Discard intermediate results; the last child's value is
                // the value of the sequence.
                if i + 1 != children.len() && child.pushes_result() {
                    out.push(AsmInst::Op(opcodes::POP));
                }
            }
        }
    }
}

/// EVM opcodes of the target fork.
pub mod opcodes {
    pub const STOP: u8 = 0x00;

    pub const EQ: u8 = 0x14;
    pub const ISZERO: u8 = 0x15;

    pub const BALANCE: u8 = 0x31;
    pub const ORIGIN: u8 = 0x32;
    pub const CALLER: u8 = 0x33;
    pub const CALLDATALOAD: u8 = 0x35;
    pub const CALLDATASIZE: u8 = 0x36;
    pub const CALLDATACOPY: u8 = 0x37;
    pub const CODESIZE: u8 = 0x38;
    pub const CODECOPY: u8 = 0x39;
    pub const GASPRICE: u8 = 0x3a;
    pub const EXTCODESIZE: u8 = 0x3b;
    pub const EXTCODECOPY: u8 = 0x3c;

    pub const BLOCKHASH: u8 = 0x40;
    pub const COINBASE: u8 = 0x41;
    pub const TIMESTAMP: u8 = 0x42;
    pub const NUMBER: u8 = 0x43;
    pub const DIFFICULTY: u8 = 0x44;
    pub const GASLIMIT: u8 = 0x45;

    pub const POP: u8 = 0x50;
    pub const MLOAD: u8 = 0x51;
    pub const MSTORE: u8 = 0x52;
    pub const SLOAD: u8 = 0x54;
    pub const SSTORE: u8 = 0x55;
    pub const JUMP: u8 = 0x56;
    pub const JUMPI: u8 = 0x57;
    pub const JUMPDEST: u8 = 0x5b;

    pub const PUSH1: u8 = 0x60;
    pub const PUSH20: u8 = 0x73;
    pub const PUSH32: u8 = 0x7f;

    pub const DUP1: u8 = 0x80;
    pub const SWAP1: u8 = 0x90;

    pub const CREATE: u8 = 0xf0;
    pub const CALL: u8 = 0xf1;
    pub const RETURN: u8 = 0xf3;
    pub const REVERT: u8 = 0xfd;
    pub const INVALID: u8 = 0xfe;
    pub const SELFDESTRUCT: u8 = 0xff;

    /// Whether the byte is a `PUSH1..=PUSH32` opcode.
    #[must_use]
    pub const fn is_push(op: u8) -> bool {
        op >= PUSH1 && op <= PUSH32
    }

    /// The number of immediate bytes following a `PUSH` opcode.
    #[must_use]
    pub const fn push_bytes(op: u8) -> usize {
        debug_assert!(is_push(op));
        (op - PUSH1 + 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IrError;

    fn sload0() -> Result<IrNode, IrError> {
        IrNode::op(IrOp::SLoad, vec![IrNode::num(0)])
    }

    #[test]
    fn operands_are_emitted_in_reverse() {
        // sstore(1, 2) must push the value first, then the slot.
        let node = IrNode::op(IrOp::SStore, vec![IrNode::num(1), IrNode::num(2)]).unwrap();
        let asm = compile_to_assembly(&node);
        assert_eq!(
            asm,
            vec![
                AsmInst::Push(U256::from(2)),
                AsmInst::Push(U256::from(1)),
                AsmInst::Op(opcodes::SSTORE),
            ]
        );
    }

    #[test]
    fn seq_pops_intermediate_results() {
        let node = IrNode::seq(vec![
            sload0().unwrap(),
            IrNode::op(IrOp::Return, vec![IrNode::num(0), IrNode::num(32)]).unwrap(),
        ]);
        let asm = compile_to_assembly(&node);
        assert_eq!(
            asm,
            vec![
                AsmInst::Push(U256::ZERO),
                AsmInst::Op(opcodes::SLOAD),
                AsmInst::Op(opcodes::POP),
                AsmInst::Push(U256::from(32)),
                AsmInst::Push(U256::ZERO),
                AsmInst::Op(opcodes::RETURN),
            ]
        );
    }

    #[test]
    fn seq_keeps_final_result() {
        let node = IrNode::seq(vec![IrNode::num(1), sload0().unwrap()]);
        let asm = compile_to_assembly(&node);
        // The leading literal is popped, the trailing SLOAD result is not.
        assert_eq!(asm.iter().filter(|i| **i == AsmInst::Op(opcodes::POP)).count(), 1);
        assert_eq!(*asm.last().unwrap(), AsmInst::Op(opcodes::SLOAD));
    }
}
