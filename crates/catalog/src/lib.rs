//! Validation-code catalog generator.
//!
//! Generates the catalog of small EVM programs used to test a purity
//! checker for account-validation logic: one pure reference-check routine
//! per address, plus one deliberately impure variant per state-touching
//! opcode the checker must reject.
//!
//! Consumers enumerate fixtures with [`variant_names`], build a catalog
//! for a concrete address with [`build_catalog`], and obtain runnable
//! bytecode per fixture with [`compile`].

#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod opcodes;
pub use opcodes::{ImpureSpec, UNUSED_OPCODES, impure_ops};

pub mod variants;
pub use variants::{impure_variant, pure_baseline};

pub mod raw;
pub use raw::unused_opcode_variant;

mod catalog;
pub use catalog::{Catalog, CatalogError, PURE_VARIANT, Valcode, build_catalog, variant_names};

pub mod bridge;
pub use bridge::compile;

pub mod template;
pub use template::{ADDRESS_PLACEHOLDER, TemplateKind, build_template, instantiate, seed_address};
