//! Assembly to EVM bytecode linking.
//!
//! Resolves `PUSH` widths and produces the final byte sequence. The target
//! fork predates `PUSH0`, so zero links to `PUSH1 0x00`.

use crate::asm::{AsmInst, opcodes};
use alloy_primitives::U256;

/// Links assembly into concrete EVM bytecode.
pub fn assembly_to_evm(asm: &[AsmInst]) -> Vec<u8> {
    let mut bytecode = Vec::new();
    for inst in asm {
        match inst {
            AsmInst::Op(opcode) => bytecode.push(*opcode),
            AsmInst::Push(value) => emit_push_value(&mut bytecode, *value),
            AsmInst::PushAddress(address) => {
                bytecode.push(opcodes::PUSH20);
                bytecode.extend_from_slice(address.as_slice());
            }
        }
    }
    bytecode
}

/// Wraps runtime code in a deployable envelope.
///
/// The envelope is the constructor stub of a deployed contract: it copies
/// the runtime section to memory and returns it. Offsets are derived from
/// the actual runtime length, recomputing the `PUSH` width for the runtime
/// offset until it stabilizes, since the offset depends on the envelope's
/// own size.
pub fn deploy_envelope(runtime: &[u8]) -> Vec<u8> {
    let len_width = push_width(U256::from(runtime.len())) as usize;

    // PUSH len, DUP1, PUSH offset, PUSH1 0, CODECOPY, PUSH1 0, RETURN
    let mut offset_width = 1usize;
    let mut envelope_len = (1 + len_width) + 1 + (1 + offset_width) + 2 + 1 + 2 + 1;
    while push_width(U256::from(envelope_len)) as usize > offset_width {
        offset_width = push_width(U256::from(envelope_len)) as usize;
        envelope_len = (1 + len_width) + 1 + (1 + offset_width) + 2 + 1 + 2 + 1;
    }

    let mut bytecode = Vec::with_capacity(envelope_len + runtime.len());
    emit_push_value(&mut bytecode, U256::from(runtime.len()));
    bytecode.push(opcodes::DUP1);
    emit_push_fixed_width(&mut bytecode, U256::from(envelope_len), offset_width as u8);
    emit_push_value(&mut bytecode, U256::ZERO);
    bytecode.push(opcodes::CODECOPY);
    emit_push_value(&mut bytecode, U256::ZERO);
    bytecode.push(opcodes::RETURN);
    debug_assert_eq!(bytecode.len(), envelope_len);
    bytecode.extend_from_slice(runtime);
    bytecode
}

/// Returns the number of bytes needed to push a value. At least one, since
/// `PUSH0` is not available on the target fork.
fn push_width(value: U256) -> u8 {
    let bytes = value.to_be_bytes::<32>();
    let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(31);
    (32 - first_nonzero) as u8
}

/// Emits a PUSH instruction with automatically sized width.
fn emit_push_value(bytecode: &mut Vec<u8>, value: U256) {
    emit_push_fixed_width(bytecode, value, push_width(value));
}

/// Emits a PUSH instruction with a specific width.
fn emit_push_fixed_width(bytecode: &mut Vec<u8>, value: U256, width: u8) {
    debug_assert!((1..=32).contains(&width));
    // PUSH1 = 0x60, PUSH2 = 0x61, ..., PUSH32 = 0x7f
    bytecode.push(opcodes::PUSH1 + width - 1);
    let bytes = value.to_be_bytes::<32>();
    bytecode.extend_from_slice(&bytes[32 - width as usize..]);
}
