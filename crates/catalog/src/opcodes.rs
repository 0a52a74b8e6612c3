//! The impure opcode catalog.
//!
//! A static, hand-curated table of every state-touching operation the
//! purity checker must reject. Two kinds of entries: operations with a
//! direct IR primitive, listed with the literal operand constants used to
//! invoke them validly, and raw opcode bytes from the reserved range that
//! have no IR form and are injected into a bytecode template instead.

use valcode_ir::IrOp;

/// One IR-representable impure operation and the constant operands used to
/// synthesize a syntactically valid invocation of it.
#[derive(Clone, Copy, Debug)]
pub struct ImpureSpec {
    /// The impure IR primitive.
    pub op: IrOp,
    /// Literal operand values, in source order.
    pub args: &'static [u64],
}

/// Opcode bytes undefined at the target EVM version. Injected as raw bytes;
/// all of them take zero stack arguments by virtue of being unassigned,
/// which is what makes the raw-template path valid for them.
pub const UNUSED_OPCODES: [u8; 10] =
    [0x46, 0x47, 0x48, 0x49, 0x4a, 0x4b, 0x4c, 0x4d, 0x4e, 0x4f];

/// The IR-representable impure operations to exercise.
pub fn impure_ops() -> &'static [ImpureSpec] {
    const OPS: &[ImpureSpec] = &[
        ImpureSpec { op: IrOp::Balance, args: &[1337] },
        ImpureSpec { op: IrOp::Origin, args: &[] },
        ImpureSpec { op: IrOp::Caller, args: &[] },
        ImpureSpec { op: IrOp::GasPrice, args: &[] },
        ImpureSpec { op: IrOp::ExtCodeSize, args: &[1337] },
        ImpureSpec { op: IrOp::ExtCodeCopy, args: &[1337, 0, 0, 1] },
        ImpureSpec { op: IrOp::BlockHash, args: &[1337] },
        ImpureSpec { op: IrOp::Coinbase, args: &[] },
        ImpureSpec { op: IrOp::Timestamp, args: &[] },
        ImpureSpec { op: IrOp::Number, args: &[] },
        ImpureSpec { op: IrOp::Difficulty, args: &[] },
        ImpureSpec { op: IrOp::GasLimit, args: &[] },
        ImpureSpec { op: IrOp::SLoad, args: &[0] },
        ImpureSpec { op: IrOp::SStore, args: &[1, 1] },
        ImpureSpec { op: IrOp::Create, args: &[0, 0, 1] },
        ImpureSpec { op: IrOp::SelfDestruct, args: &[1337] },
    ];
    OPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn table_arities_match_ops() {
        for spec in impure_ops() {
            assert_eq!(spec.args.len(), spec.op.arity(), "bad operand count for {}", spec.op);
        }
    }

    #[test]
    fn table_has_no_duplicates() {
        let names: FxHashSet<&str> = impure_ops().iter().map(|s| s.op.name()).collect();
        assert_eq!(names.len(), impure_ops().len());
    }

    #[test]
    fn unused_range_is_contiguous() {
        assert_eq!(UNUSED_OPCODES.len(), 10);
        for (i, op) in UNUSED_OPCODES.iter().enumerate() {
            assert_eq!(*op, 0x46 + i as u8);
        }
    }
}
