//! Address-agnostic fixture templates.
//!
//! Compiles a fixed variant against a deterministic seed address, then
//! rewrites the output to replace every occurrence of the seed address
//! bytes with an equal-length placeholder token. Downstream test code
//! re-instantiates the template for arbitrary target addresses by the
//! inverse substitution.
//!
//! Substitution is exact-match scanning over the byte stream, never text
//! formatting: the 20-byte pattern is located as a subsequence, and a scan
//! that finds no occurrence fails loudly instead of producing a template
//! with no injection point.

use crate::{
    catalog::CatalogError,
    opcodes::impure_ops,
    variants::{impure_node, pure_baseline, pure_children},
};
use alloy_primitives::{Address, B256, U256, keccak256};
use memchr::memmem;
use tracing::trace;
use valcode_ir::{IrNode, IrOp, OptLevel, compile_deployable};

/// The fixed validation-code shapes a template can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    /// The pure baseline.
    Pure,
    /// Baseline with `sstore(1, 1)` between the precompile call and the
    /// comparison.
    ImpureSstore,
    /// Baseline with `sload(0)` ahead of the calldata copy.
    ImpureSload,
}

/// The 20-byte token standing in for the address in a template. Same length
/// as the address it replaces, so offsets are unaffected.
pub const ADDRESS_PLACEHOLDER: [u8; 20] = *b"<<address-template>>";

/// Seed value the template address is derived from.
const TEMPLATE_SEED: u64 = 1337;

/// The deterministic, non-zero address templates are compiled against:
/// the low 20 bytes of the keccak-256 hash of the seed word.
pub fn seed_address() -> Address {
    Address::from_word(keccak256(B256::from(U256::from(TEMPLATE_SEED))))
}

/// Builds the address-agnostic template for `kind`.
pub fn build_template(kind: TemplateKind) -> Result<Vec<u8>, CatalogError> {
    let seed = seed_address();
    let node = template_ir(kind, seed)?;
    let bytecode = compile_deployable(&node, OptLevel::Default);
    substitute(&bytecode, seed.as_slice(), &ADDRESS_PLACEHOLDER, CatalogError::MissingAddress)
}

/// Instantiates a template for a concrete target address.
pub fn instantiate(template: &[u8], address: Address) -> Result<Vec<u8>, CatalogError> {
    substitute(template, &ADDRESS_PLACEHOLDER, address.as_slice(), CatalogError::MissingPlaceholder)
}

fn template_ir(kind: TemplateKind, address: Address) -> Result<IrNode, CatalogError> {
    let node = match kind {
        TemplateKind::Pure => pure_baseline(address)?,
        TemplateKind::ImpureSstore => {
            let sstore = table_node(IrOp::SStore)?;
            let mut children = pure_children(address)?;
            children.insert(2, sstore);
            IrNode::seq(children)
        }
        TemplateKind::ImpureSload => {
            let sload = table_node(IrOp::SLoad)?;
            let mut children = vec![sload];
            children.extend(pure_children(address)?);
            IrNode::seq(children)
        }
    };
    Ok(node)
}

/// The opcode-catalog entry for `op`, as an IR node.
fn table_node(op: IrOp) -> Result<IrNode, CatalogError> {
    let spec = impure_ops()
        .iter()
        .find(|s| s.op == op)
        .ok_or_else(|| CatalogError::UnknownVariant(op.name().to_string()))?;
    Ok(impure_node(spec)?)
}

/// Replaces every exact occurrence of `pattern` with `replacement`, which
/// must be the same length. Errors with `missing` when no occurrence is
/// found.
fn substitute(
    code: &[u8],
    pattern: &[u8],
    replacement: &[u8],
    missing: CatalogError,
) -> Result<Vec<u8>, CatalogError> {
    debug_assert_eq!(pattern.len(), replacement.len());
    let offsets: Vec<usize> = memmem::find_iter(code, pattern).collect();
    if offsets.is_empty() {
        return Err(missing);
    }
    let mut out = code.to_vec();
    for offset in &offsets {
        out[*offset..*offset + replacement.len()].copy_from_slice(replacement);
    }
    trace!(occurrences = offsets.len(), "substituted address pattern");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_address_is_fixed_and_nonzero() {
        assert_eq!(seed_address(), seed_address());
        assert_ne!(seed_address(), Address::ZERO);
    }

    #[test]
    fn template_carries_the_placeholder_not_the_seed() {
        for kind in [TemplateKind::Pure, TemplateKind::ImpureSstore, TemplateKind::ImpureSload] {
            let template = build_template(kind).unwrap();
            assert!(memmem::find(&template, &ADDRESS_PLACEHOLDER).is_some());
            assert!(memmem::find(&template, seed_address().as_slice()).is_none());
        }
    }

    #[test]
    fn instantiation_inverts_the_substitution() {
        let template = build_template(TemplateKind::Pure).unwrap();
        let target = Address::repeat_byte(0x5a);
        let instantiated = instantiate(&template, target).unwrap();
        let direct = compile_deployable(&pure_baseline(target).unwrap(), OptLevel::Default);
        assert_eq!(instantiated, direct);
    }

    #[test]
    fn missing_pattern_fails_loudly() {
        let err = instantiate(&[0x60, 0x00], Address::ZERO).unwrap_err();
        assert_eq!(err, CatalogError::MissingPlaceholder);
    }

    #[test]
    fn sstore_template_keeps_the_store_after_the_call() {
        let node = template_ir(TemplateKind::ImpureSstore, seed_address()).unwrap();
        let IrNode::Seq(children) = node else { panic!("expected sequence") };
        assert!(matches!(&children[1], IrNode::Op(IrOp::Call, _)));
        assert!(matches!(&children[2], IrNode::Op(IrOp::SStore, _)));
        assert!(matches!(&children[3], IrNode::Op(IrOp::MStore, _)));
    }
}
