//! LLL-style IR trees.
//!
//! An [`IrNode`] is either a sequence of child expressions, a primitive
//! operation with a fixed number of operands, or a literal leaf. Operand
//! arity is checked when a node is built, not when it is compiled, so a
//! malformed tree can never reach the assembler.

use alloy_primitives::{Address, U256};
use std::fmt;

/// A primitive IR operation with fixed arity.
///
/// Opcode byte values target the EVM version the validation-code fixtures
/// are written for, where `0x46..=0x4f` are still unassigned and `DIFFICULTY`
/// is `0x44`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IrOp {
    CalldataCopy,
    Call,
    MLoad,
    MStore,
    Eq,
    Return,
    Balance,
    Origin,
    Caller,
    GasPrice,
    ExtCodeSize,
    ExtCodeCopy,
    BlockHash,
    Coinbase,
    Timestamp,
    Number,
    Difficulty,
    GasLimit,
    SLoad,
    SStore,
    Create,
    SelfDestruct,
}

impl IrOp {
    /// The number of operand expressions the operation requires.
    pub const fn arity(self) -> usize {
        match self {
            Self::Origin
            | Self::Caller
            | Self::GasPrice
            | Self::Coinbase
            | Self::Timestamp
            | Self::Number
            | Self::Difficulty
            | Self::GasLimit => 0,
            Self::MLoad
            | Self::Balance
            | Self::ExtCodeSize
            | Self::BlockHash
            | Self::SLoad
            | Self::SelfDestruct => 1,
            Self::MStore | Self::Eq | Self::Return | Self::SStore => 2,
            Self::CalldataCopy | Self::Create => 3,
            Self::ExtCodeCopy => 4,
            Self::Call => 7,
        }
    }

    /// Whether executing the operation leaves a value on the stack.
    pub const fn pushes_result(self) -> bool {
        !matches!(
            self,
            Self::CalldataCopy
                | Self::MStore
                | Self::Return
                | Self::SStore
                | Self::SelfDestruct
                | Self::ExtCodeCopy
        )
    }

    /// The EVM opcode byte the operation links to.
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Eq => 0x14,
            Self::Balance => 0x31,
            Self::Origin => 0x32,
            Self::Caller => 0x33,
            Self::CalldataCopy => 0x37,
            Self::GasPrice => 0x3a,
            Self::ExtCodeSize => 0x3b,
            Self::ExtCodeCopy => 0x3c,
            Self::BlockHash => 0x40,
            Self::Coinbase => 0x41,
            Self::Timestamp => 0x42,
            Self::Number => 0x43,
            Self::Difficulty => 0x44,
            Self::GasLimit => 0x45,
            Self::MLoad => 0x51,
            Self::MStore => 0x52,
            Self::SLoad => 0x54,
            Self::SStore => 0x55,
            Self::Create => 0xf0,
            Self::Call => 0xf1,
            Self::Return => 0xf3,
            Self::SelfDestruct => 0xff,
        }
    }

    /// The lowercase LLL-style name of the operation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CalldataCopy => "calldatacopy",
            Self::Call => "call",
            Self::MLoad => "mload",
            Self::MStore => "mstore",
            Self::Eq => "eq",
            Self::Return => "return",
            Self::Balance => "balance",
            Self::Origin => "origin",
            Self::Caller => "caller",
            Self::GasPrice => "gasprice",
            Self::ExtCodeSize => "extcodesize",
            Self::ExtCodeCopy => "extcodecopy",
            Self::BlockHash => "blockhash",
            Self::Coinbase => "coinbase",
            Self::Timestamp => "timestamp",
            Self::Number => "number",
            Self::Difficulty => "difficulty",
            Self::GasLimit => "gaslimit",
            Self::SLoad => "sload",
            Self::SStore => "sstore",
            Self::Create => "create",
            Self::SelfDestruct => "selfdestruct",
        }
    }
}

impl fmt::Display for IrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error raised while constructing an IR tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    #[error("wrong operand count for `{op}`: expected {expected}, got {got}")]
    ArityMismatch { op: IrOp, expected: usize, got: usize },
}

/// A tree-structured IR expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrNode {
    /// A sequence of expressions. Evaluates each child in order, discarding
    /// every intermediate result; the value of the last child is the value
    /// of the sequence.
    Seq(Vec<IrNode>),
    /// A primitive operation applied to operand expressions.
    Op(IrOp, Vec<IrNode>),
    /// A numeric literal, linked as a minimal-width `PUSH`.
    Num(U256),
    /// A 20-byte account address, always linked as a full-width `PUSH20` so
    /// the address bytes appear verbatim in the output.
    Addr(Address),
}

impl IrNode {
    /// Builds an operation node, checking operand arity.
    pub fn op(op: IrOp, args: Vec<IrNode>) -> Result<Self, IrError> {
        if args.len() != op.arity() {
            return Err(IrError::ArityMismatch { op, expected: op.arity(), got: args.len() });
        }
        Ok(Self::Op(op, args))
    }

    /// Builds a sequence node.
    pub fn seq(children: Vec<IrNode>) -> Self {
        Self::Seq(children)
    }

    /// Builds a numeric literal node.
    pub fn num(value: u64) -> Self {
        Self::Num(U256::from(value))
    }

    /// Whether evaluating the node leaves a value on the stack.
    pub fn pushes_result(&self) -> bool {
        match self {
            Self::Seq(children) => children.last().is_some_and(Self::pushes_result),
            Self::Op(op, _) => op.pushes_result(),
            Self::Num(_) | Self::Addr(_) => true,
        }
    }
}
