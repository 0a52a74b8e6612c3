//! The compiler bridge.
//!
//! Normalizes one catalog entry to final deployable bytecode: raw entries
//! pass through unchanged, IR entries run through the optimize → assemble →
//! link pipeline wrapped in the deploy envelope.

use crate::catalog::{Catalog, CatalogError, Valcode};
use tracing::trace;
use valcode_ir::{OptLevel, compile_deployable};

/// Compiles the named catalog entry to deployable bytecode.
///
/// Catalog entries are never mutated; every call produces a fresh byte
/// vector.
pub fn compile(catalog: &Catalog, name: &str) -> Result<Vec<u8>, CatalogError> {
    let valcode =
        catalog.get(name).ok_or_else(|| CatalogError::UnknownVariant(name.to_string()))?;
    let bytecode = match valcode {
        Valcode::Bytecode(code) => code.clone(),
        Valcode::Ir(node) => compile_deployable(node, OptLevel::Default),
    };
    trace!(name, bytes = bytecode.len(), "compiled validation code");
    Ok(bytecode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PURE_VARIANT, build_catalog};
    use alloy_primitives::Address;

    #[test]
    fn unknown_name_is_an_error() {
        let catalog = build_catalog(Address::with_last_byte(1)).unwrap();
        let err = compile(&catalog, "impure_dream_ecrecover").unwrap_err();
        assert_eq!(err, CatalogError::UnknownVariant("impure_dream_ecrecover".to_string()));
    }

    #[test]
    fn bytecode_entries_pass_through() {
        let catalog = build_catalog(Address::with_last_byte(1)).unwrap();
        let name = "impure_unused_bytecode_F_ecrecover";
        let Some(Valcode::Bytecode(raw)) = catalog.get(name) else { panic!("missing raw entry") };
        assert_eq!(&compile(&catalog, name).unwrap(), raw);
    }

    #[test]
    fn compilation_is_idempotent() {
        let catalog = build_catalog(Address::with_last_byte(1)).unwrap();
        let first = compile(&catalog, PURE_VARIANT).unwrap();
        let second = compile(&catalog, PURE_VARIANT).unwrap();
        assert_eq!(first, second);
    }
}
