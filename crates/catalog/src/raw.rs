//! Raw bytecode variants for unused opcodes.
//!
//! Unassigned opcode bytes have no IR primitive, so their variants are
//! produced by byte-level substitution into a fixed, hand-derived runtime
//! template of the pure baseline. The injected byte lands at program
//! counter 0 of the runtime section, executing unconditionally before the
//! baseline logic; only opcodes that need zero stack arguments may take
//! this path. The deploy envelope is recomputed from the actual runtime
//! length instead of carrying hardcoded jump offsets, so the one-byte
//! insertion cannot skew any embedded offset.

use alloy_primitives::Address;
use alloy_primitives::hex;
use valcode_ir::deploy_envelope;

/// Pure-baseline runtime up to and including the `PUSH20` opcode that
/// precedes the expected address:
/// `calldatacopy(0, 0, 128); call(3000, 1, 0, 0, 128, 0, 32); pop; push20`.
const RUNTIME_PREFIX: [u8; 25] = hex!("60806000600037602060006080600060006001610bb8f15073");

/// Pure-baseline runtime after the address:
/// `mstore(0, eq(mload(0), <address>)); return(0, 32)`.
const RUNTIME_SUFFIX: [u8; 12] = hex!("6000511460005260206000f3");

/// The pure-baseline runtime template with `address` substituted at the
/// comparison constant.
pub(crate) fn pure_runtime(address: Address) -> Vec<u8> {
    let mut runtime = Vec::with_capacity(RUNTIME_PREFIX.len() + 20 + RUNTIME_SUFFIX.len());
    runtime.extend_from_slice(&RUNTIME_PREFIX);
    runtime.extend_from_slice(address.as_slice());
    runtime.extend_from_slice(&RUNTIME_SUFFIX);
    runtime
}

/// Builds the deployable variant that executes `raw_opcode` first and then
/// runs the pure baseline for `address`.
pub fn unused_opcode_variant(address: Address, raw_opcode: u8) -> Vec<u8> {
    let baseline = pure_runtime(address);
    let mut runtime = Vec::with_capacity(1 + baseline.len());
    runtime.push(raw_opcode);
    runtime.extend_from_slice(&baseline);
    deploy_envelope(&runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valcode_ir::{disassemble, opcodes};

    fn addr(last: u8) -> Address {
        Address::with_last_byte(last)
    }

    #[test]
    fn template_length_is_stable() {
        assert_eq!(pure_runtime(addr(1)).len(), 57);
    }

    #[test]
    fn template_contains_no_jumps() {
        // The runtime body is straight-line code; only the recomputed deploy
        // envelope may reference offsets.
        let runtime = pure_runtime(addr(1));
        for inst in disassemble(&runtime) {
            assert_ne!(inst.opcode, opcodes::JUMP);
            assert_ne!(inst.opcode, opcodes::JUMPI);
        }
    }

    #[test]
    fn raw_opcode_executes_first() {
        let code = unused_opcode_variant(addr(1), 0x46);
        // Runtime section starts right after the 11-byte envelope.
        let runtime = &code[11..];
        let instructions = disassemble(runtime);
        assert_eq!(instructions[0].pc, 0);
        assert_eq!(instructions[0].opcode, 0x46);
        // The rest is the unmodified baseline, shifted by exactly one byte.
        assert_eq!(&runtime[1..], &pure_runtime(addr(1))[..]);
    }

    #[test]
    fn address_sits_at_the_comparison_constant() {
        let address = addr(0x99);
        let runtime = pure_runtime(address);
        assert_eq!(runtime[RUNTIME_PREFIX.len() - 1], opcodes::PUSH20);
        assert_eq!(&runtime[RUNTIME_PREFIX.len()..RUNTIME_PREFIX.len() + 20], address.as_slice());
    }
}
