//! Catalog assembly.
//!
//! Merges the IR variant builders and the raw bytecode builder into one
//! mapping of variant name to validation code. The naming scheme is a pure
//! function of the purity class and opcode identity, so the name set is
//! stable across invocations and across addresses.

use crate::{
    opcodes::{UNUSED_OPCODES, impure_ops},
    raw::unused_opcode_variant,
    variants::{impure_variant, pure_baseline},
};
use alloy_primitives::Address;
use rustc_hash::FxHashMap;
use tracing::debug;
use valcode_ir::{IrError, IrNode};

/// Name of the single pure catalog entry.
pub const PURE_VARIANT: &str = "pure_ecrecover";

/// An error raised while building or compiling the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown variant name `{0}`")]
    UnknownVariant(String),
    #[error("seed address does not occur in the compiled bytecode")]
    MissingAddress,
    #[error("placeholder does not occur in the template")]
    MissingPlaceholder,
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// One catalog entry: either IR still to be compiled, or already concrete
/// bytecode. The tag is fixed at catalog construction, so nothing of a
/// third shape can ever reach the compiler bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Valcode {
    /// An uncompiled IR tree.
    Ir(IrNode),
    /// Pre-assembled deployable bytecode.
    Bytecode(Vec<u8>),
}

/// The full mapping of variant name to validation code for one address.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: FxHashMap<String, Valcode>,
}

impl Catalog {
    /// Looks up a variant by name.
    pub fn get(&self, name: &str) -> Option<&Valcode> {
        self.entries.get(name)
    }

    /// The variant names, sorted for stable enumeration.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The number of variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The catalog key of an IR-representable impure operation.
fn impure_name(op_name: &str) -> String {
    format!("impure_{op_name}_ecrecover")
}

/// The catalog key of a raw unused-opcode variant, keyed by the byte's
/// printable character representation.
fn unused_name(raw_opcode: u8) -> String {
    format!("impure_unused_bytecode_{}_ecrecover", raw_opcode as char)
}

/// Builds the full catalog for `address`.
///
/// The catalog holds exactly one pure entry plus one impure entry per
/// opcode-catalog row; every impure entry differs from the baseline by a
/// single injected operation. Any construction error aborts the build, so
/// a partially valid catalog is never observable.
pub fn build_catalog(address: Address) -> Result<Catalog, CatalogError> {
    let mut entries = FxHashMap::default();
    entries.insert(PURE_VARIANT.to_string(), Valcode::Ir(pure_baseline(address)?));
    for spec in impure_ops() {
        entries.insert(impure_name(spec.op.name()), Valcode::Ir(impure_variant(address, spec)?));
    }
    for &raw_opcode in &UNUSED_OPCODES {
        entries
            .insert(unused_name(raw_opcode), Valcode::Bytecode(unused_opcode_variant(address, raw_opcode)));
    }
    debug!(variants = entries.len(), %address, "built validation code catalog");
    Ok(Catalog { entries })
}

/// The variant names of the fixed opcode catalog, evaluated against a
/// canonical placeholder address and sorted.
pub fn variant_names() -> Result<Vec<String>, CatalogError> {
    let catalog = build_catalog(Address::ZERO)?;
    Ok(catalog.names().iter().map(|s| s.to_string()).collect())
}
