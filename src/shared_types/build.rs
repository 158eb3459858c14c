use anyhow::Result;
use crux_core::typegen::TypeGen;
use std::path::PathBuf;
use watering_config_core::{
    events::{FormEvent, ScanEvent, SocketEvent, UiEvent},
    types::{ConfigField, ConnectionState, FeatureToggle, PageState, ScanState},
    App,
};

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<SocketEvent>()?;
    gen.register_type::<ScanEvent>()?;
    gen.register_type::<FormEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<ConfigField>()?;
    gen.register_type::<FeatureToggle>()?;
    gen.register_type::<ConnectionState>()?;
    gen.register_type::<PageState>()?;
    gen.register_type::<ScanState>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
