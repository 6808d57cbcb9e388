// editor/src/main.rs
use crate::console_layout::{ConsoleLayout, ConsoleSink};
use crate::sample::{PointLight, SpotLight};
use inspector_core::error::InspectorError;
use inspector_core::inspector::{EditorRegistry, Inspector};
use inspector_core::logging::{init_file_logger, last_log};
use inspector_core::onscreen_info;
use inspector_core::reflect::{ObjectRef, Value};
use inspector_core::storage::{InspectorConfig, config_path};
use std::cell::RefCell;
use std::rc::Rc;

mod console_layout;
mod custom_editors;
mod sample;

fn main() -> Result<(), InspectorError> {
    let config = load_config();
    let _logger = match init_file_logger(&config.logging) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Unable to init logger: {e}.");
            None
        }
    };

    let registry = EditorRegistry::from_inventory();
    onscreen_info!("{} custom editors registered.", registry.len());
    let mut inspector = Inspector::new(registry, config.clone());
    let mut sink = ConsoleSink::default();

    let key = Rc::new(RefCell::new(PointLight::new("Key Light", 1)));
    let fill = Rc::new(RefCell::new(PointLight::new("Fill Light", 2)));
    let spot = Rc::new(RefCell::new(SpotLight::new("Spot", 3)));

    // Two lights of one type
    let mut layout = ConsoleLayout::default();
    inspector.select(
        vec![Some(key.clone() as ObjectRef), Some(fill.clone() as ObjectRef)],
        &mut layout,
        &mut sink,
    )?;
    print_section("Two point lights", &layout, &config);

    // External edit, then refresh
    fill.borrow_mut().radius = 4.0;
    fill.borrow_mut().shadows.bias = 0.01;
    inspector.refresh(&mut sink)?;
    print_section("After editing the fill light", &layout, &config);

    // Edit through the inspector
    if let Some(radius) = inspector
        .root()
        .and_then(|root| root.children().iter().find(|c| c.member().name() == "radius"))
    {
        radius.values().set_all(Value::Float(6.5))?;
    }
    inspector.refresh(&mut sink)?;
    print_section("After setting the radius of both", &layout, &config);

    // Different types share only the actor members
    let mut layout = ConsoleLayout::default();
    inspector.select(
        vec![Some(key.clone() as ObjectRef), Some(spot.clone() as ObjectRef)],
        &mut layout,
        &mut sink,
    )?;
    print_section("Point light and spot light", &layout, &config);

    let mut layout = ConsoleLayout::default();
    inspector.select(vec![None], &mut layout, &mut sink)?;
    print_section("Nothing selected", &layout, &config);

    inspector.dispose()?;
    println!(
        "generation {}, {} warnings, last message: {}",
        inspector.generation(),
        sink.count(),
        last_log()
    );
    Ok(())
}

fn load_config() -> InspectorConfig {
    let Some(path) = config_path() else {
        return InspectorConfig::default();
    };
    match InspectorConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config {}: {e}.", path.display());
            InspectorConfig::default()
        }
    }
}

fn print_section(title: &str, layout: &ConsoleLayout, config: &InspectorConfig) {
    println!("=== {title} ===");
    print!("{}", layout.render(&config.mixed_label));
    println!();
}
