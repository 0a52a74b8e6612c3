//! IR optimization.
//!
//! A small semantics-preserving tree reduction: nested sequences are
//! flattened and comparisons over two literals are folded. Side-effecting
//! operations and address leaves are never touched, so the return-value
//! contract of the compiled code is preserved bit-for-bit.

use crate::{IrNode, IrOp};
use alloy_primitives::U256;

/// Optimization level for the compilation pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OptLevel {
    /// Skip the optimizer entirely.
    None,
    /// Run the tree reductions.
    #[default]
    Default,
}

/// Optimizes an IR tree, returning a new semantically equivalent tree.
pub fn optimize(node: &IrNode) -> IrNode {
    match node {
        IrNode::Seq(children) => {
            let mut flat = Vec::with_capacity(children.len());
            for child in children {
                match optimize(child) {
                    // Splice nested sequences into the parent.
                    IrNode::Seq(inner) => flat.extend(inner),
                    other => flat.push(other),
                }
            }
            IrNode::Seq(flat)
        }
        IrNode::Op(op, args) => {
            let args: Vec<IrNode> = args.iter().map(optimize).collect();
            fold_op(*op, args)
        }
        IrNode::Num(_) | IrNode::Addr(_) => node.clone(),
    }
}

fn fold_op(op: IrOp, args: Vec<IrNode>) -> IrNode {
    if op == IrOp::Eq
        && let [IrNode::Num(a), IrNode::Num(b)] = args.as_slice()
    {
        return IrNode::Num(U256::from(u8::from(a == b)));
    }
    IrNode::Op(op, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    #[test]
    fn flattens_nested_seqs() {
        let inner = IrNode::seq(vec![IrNode::num(1), IrNode::num(2)]);
        let node = IrNode::seq(vec![inner, IrNode::num(3)]);
        let optimized = optimize(&node);
        assert_eq!(optimized, IrNode::seq(vec![IrNode::num(1), IrNode::num(2), IrNode::num(3)]));
    }

    #[test]
    fn folds_literal_eq() {
        let node = IrNode::op(IrOp::Eq, vec![IrNode::num(7), IrNode::num(7)]).unwrap();
        assert_eq!(optimize(&node), IrNode::num(1));

        let node = IrNode::op(IrOp::Eq, vec![IrNode::num(7), IrNode::num(8)]).unwrap();
        assert_eq!(optimize(&node), IrNode::num(0));
    }

    #[test]
    fn never_folds_address_comparisons() {
        let address = Address::with_last_byte(0x07);
        let node = IrNode::op(
            IrOp::Eq,
            vec![
                IrNode::op(IrOp::MLoad, vec![IrNode::num(0)]).unwrap(),
                IrNode::Addr(address),
            ],
        )
        .unwrap();
        assert_eq!(optimize(&node), node);
    }

    #[test]
    fn preserves_side_effecting_ops() {
        let node = IrNode::op(IrOp::SStore, vec![IrNode::num(1), IrNode::num(1)]).unwrap();
        assert_eq!(optimize(&node), node);
    }
}
