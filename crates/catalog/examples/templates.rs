//! Prints the three address-agnostic validation-code templates as hex.
#![allow(unused_crate_dependencies)]

use valcode_catalog::{TemplateKind, build_template};

fn main() {
    tracing_subscriber::fmt::init();

    for (label, kind) in [
        ("Pure", TemplateKind::Pure),
        ("Impure (sstore)", TemplateKind::ImpureSstore),
        ("Impure (sload)", TemplateKind::ImpureSload),
    ] {
        let template = match build_template(kind) {
            Ok(template) => template,
            Err(e) => {
                eprintln!("failed to build {label} template: {e}");
                std::process::exit(1);
            }
        };
        println!("{}", "-".repeat(10));
        println!("{label}:");
        println!("{}", "-".repeat(10));
        println!("0x{}", hex::encode(&template));
    }
    println!("{}", "-".repeat(10));
}
