//! Bytecode disassembly.
//!
//! Decodes a byte sequence into instructions, attaching `PUSH` immediates
//! to their opcode. Used to inspect compiled validation code and to check
//! structural properties in tests.

use crate::asm::opcodes;

/// A decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Program counter of the opcode byte.
    pub pc: usize,
    /// The opcode byte.
    pub opcode: u8,
    /// Immediate bytes of a `PUSH`, empty otherwise. Truncated if the code
    /// ends inside the immediate.
    pub immediate: Vec<u8>,
}

/// Disassembles bytecode into a flat instruction list.
pub fn disassemble(code: &[u8]) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    while pc < code.len() {
        let opcode = code[pc];
        let mut immediate = Vec::new();
        let mut next = pc + 1;
        if opcodes::is_push(opcode) {
            let end = usize::min(next + opcodes::push_bytes(opcode), code.len());
            immediate.extend_from_slice(&code[next..end]);
            next = end;
        }
        instructions.push(Instruction { pc, opcode, immediate });
        pc = next;
    }
    instructions
}
