//! IR variant builders.
//!
//! The pure baseline copies 128 bytes of calldata, calls the ecrecover
//! precompile with a 3000 gas stipend, compares the recovered word against
//! the expected address, and returns the comparison result as a 32-byte
//! word. Impure variants prefix one side-effecting operation so that it
//! executes before the check: a correct purity checker must flag the code
//! for containing the operation at all, not for changing the return value.

use crate::opcodes::ImpureSpec;
use alloy_primitives::Address;
use valcode_ir::{IrError, IrNode, IrOp};

/// Gas stipend forwarded to the recovery precompile.
const ECRECOVER_GAS: u64 = 3000;
/// Precompile contract id of signature recovery.
const ECRECOVER_ID: u64 = 1;

/// Builds the pure reference-check routine for `address`.
pub fn pure_baseline(address: Address) -> Result<IrNode, IrError> {
    Ok(IrNode::seq(pure_children(address)?))
}

/// Builds an impure variant: one side-effecting operation followed by the
/// unchanged pure baseline.
pub fn impure_variant(address: Address, spec: &ImpureSpec) -> Result<IrNode, IrError> {
    let mut children = vec![impure_node(spec)?];
    children.extend(pure_children(address)?);
    Ok(IrNode::seq(children))
}

/// Synthesizes the impure primitive with its constant operands.
pub(crate) fn impure_node(spec: &ImpureSpec) -> Result<IrNode, IrError> {
    IrNode::op(spec.op, spec.args.iter().map(|&v| IrNode::num(v)).collect())
}

/// The children of the pure baseline sequence, in execution order.
pub(crate) fn pure_children(address: Address) -> Result<Vec<IrNode>, IrError> {
    Ok(vec![
        // calldatacopy(0, 0, 128): signature proof into working memory.
        IrNode::op(IrOp::CalldataCopy, vec![IrNode::num(0), IrNode::num(0), IrNode::num(128)])?,
        // call(3000, 1, 0, 0, 128, 0, 32): recover into memory word 0.
        IrNode::op(
            IrOp::Call,
            vec![
                IrNode::num(ECRECOVER_GAS),
                IrNode::num(ECRECOVER_ID),
                IrNode::num(0),
                IrNode::num(0),
                IrNode::num(128),
                IrNode::num(0),
                IrNode::num(32),
            ],
        )?,
        // mstore(0, eq(mload(0), address))
        IrNode::op(
            IrOp::MStore,
            vec![
                IrNode::num(0),
                IrNode::op(
                    IrOp::Eq,
                    vec![
                        IrNode::op(IrOp::MLoad, vec![IrNode::num(0)])?,
                        IrNode::Addr(address),
                    ],
                )?,
            ],
        )?,
        // return(0, 32)
        IrNode::op(IrOp::Return, vec![IrNode::num(0), IrNode::num(32)])?,
    ])
}
