//! Simple simulation example: pick three presets and print the outcome.

use chargesim::prelude::*;

fn selector(arg: Option<String>, default: &str) -> PresetSelector {
    match arg.as_deref().unwrap_or(default).parse::<PresetSelector>() {
        Ok(selector) => selector,
        Err(never) => match never {},
    }
}

fn main() -> Result<(), ChargeSimError> {
    let mut args = std::env::args().skip(1);
    let adapter = selector(args.next(), "Apple 20W USB-C");
    let cable = selector(args.next(), "USB-C to Lightning");
    let device = selector(args.next(), "iPhone 8");

    let catalog = Catalog::builtin();
    let adapter = catalog.adapter(&adapter)?;
    let cable = catalog.cable(&cable)?;
    let device = catalog.device(&device)?;

    let result = ChargeSimCore::simulate(adapter, cable, device, &SimulationOptions::default());

    println!("{} + {} + {}", adapter.name, cable.name, device.name);
    match result.standard {
        Some(standard) => println!(
            "{}: {}V x {}A = {}W",
            standard, result.voltage, result.current, result.power
        ),
        None => println!("No usable charging standard"),
    }
    if let Some(minutes) = result.charge_minutes {
        println!("20% -> 80% in about {} min", minutes);
    }

    for message in &result.bottlenecks {
        println!("  - {}", render(message, Locale::En));
    }
    for message in &result.suggestions {
        println!("  * {}", render(message, Locale::En));
    }

    if !result.has_standard() {
        std::process::exit(1);
    }
    Ok(())
}
