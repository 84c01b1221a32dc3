//! ChargeSim CLI - estimate USB charging power from the command line.

use anyhow::{Context, Result};
use chargesim::catalog::builtin::load_catalog;
use chargesim::{
    render, AdapterOverrides, AdapterSpec, CableOverrides, CableSpec, Catalog, ChargeSimCore,
    DeviceOverrides, DeviceSpec, Locale, Message, PresetSelector, Scenario, SimulationOptions,
    SimulationResult, Standard, StandardSelection,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "chargesim")]
#[command(about = "USB charging negotiation and power estimation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Print debug logs to stderr (and details for `standards`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate an adapter + cable + device combination
    Simulate(SimulateArgs),

    /// List preset adapters, cables and devices
    Presets {
        /// Which presets to list
        #[arg(value_enum, default_value = "all")]
        kind: PresetKind,

        /// Extra catalog file or directory layered over the built-in presets
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List charging standards in priority order
    Standards,
}

#[derive(Args)]
struct SimulateArgs {
    /// Adapter preset (index or name)
    #[arg(long, value_name = "PRESET", required_unless_present = "scenario")]
    adapter: Option<PresetSelector>,

    /// Cable preset (index or name)
    #[arg(long, value_name = "PRESET", required_unless_present = "scenario")]
    cable: Option<PresetSelector>,

    /// Device preset (index or name)
    #[arg(long, value_name = "PRESET", required_unless_present = "scenario")]
    device: Option<PresetSelector>,

    /// `auto` or a standard to force (pd_epr, pd_pps, pd, qc3, apple_2_4a, bc12)
    #[arg(short, long, value_name = "STANDARD")]
    standard: Option<StandardSelection>,

    /// Scenario JSON with fully specified components
    #[arg(long, value_name = "FILE", conflicts_with_all = ["adapter", "cable", "device"])]
    scenario: Option<PathBuf>,

    /// Extra catalog file or directory layered over the built-in presets
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Language for bottlenecks and suggestions
    #[arg(long, default_value = "en")]
    locale: Locale,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Exit with error code when this condition holds
    #[arg(long, value_enum)]
    fail_on: Option<FailOn>,

    #[arg(long, value_name = "W")]
    adapter_watts: Option<f64>,
    #[arg(long, value_name = "V")]
    adapter_volts: Option<f64>,
    #[arg(long, value_name = "A")]
    adapter_amps: Option<f64>,
    #[arg(long, value_name = "A")]
    cable_amps: Option<f64>,
    #[arg(long, value_name = "V")]
    cable_volts: Option<f64>,
    #[arg(long, value_name = "BOOL")]
    cable_e_marked: Option<bool>,
    #[arg(long, value_name = "W")]
    device_watts: Option<f64>,
    #[arg(long, value_name = "V")]
    device_volts: Option<f64>,
    #[arg(long, value_name = "A")]
    device_amps: Option<f64>,

    /// Flip support for a standard on the adapter (repeatable)
    #[arg(long, value_name = "STANDARD")]
    toggle_adapter_standard: Vec<Standard>,

    /// Flip support for a standard on the device (repeatable)
    #[arg(long, value_name = "STANDARD")]
    toggle_device_standard: Vec<Standard>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum FailOn {
    /// No standard, or the forced standard breaks a rule
    Incompatible,
    /// Negotiated power is below the device's recommendation
    BelowRecommended,
    /// No standard could be used at all
    NoStandard,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetKind {
    Adapters,
    Cables,
    Devices,
    All,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let outcome = match cli.command {
        Commands::Simulate(args) => handle_simulate(&args),
        Commands::Presets {
            kind,
            catalog,
            format,
        } => handle_presets(kind, catalog.as_deref(), format),
        Commands::Standards => {
            handle_standards(cli.verbose);
            Ok(0)
        }
    };

    let exit_code = match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn open_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => load_catalog(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

/// Components and selection before overrides are layered on.
fn base_scenario(args: &SimulateArgs) -> Result<Scenario> {
    if let Some(path) = &args.scenario {
        return Scenario::from_file(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()));
    }

    let catalog = open_catalog(args.catalog.as_deref())?;
    let (Some(adapter), Some(cable), Some(device)) = (&args.adapter, &args.cable, &args.device)
    else {
        anyhow::bail!("--adapter, --cable and --device are required without --scenario");
    };

    Ok(Scenario {
        adapter: catalog.adapter(adapter)?.clone(),
        cable: catalog.cable(cable)?.clone(),
        device: catalog.device(device)?.clone(),
        standard: StandardSelection::Auto,
    })
}

fn apply_overrides(args: &SimulateArgs, base: Scenario) -> Scenario {
    let adapter_overrides = args.toggle_adapter_standard.iter().fold(
        AdapterOverrides {
            max_w: args.adapter_watts,
            max_v: args.adapter_volts,
            max_a: args.adapter_amps,
            ..Default::default()
        },
        |overrides, standard| overrides.toggle_standard(&base.adapter, *standard),
    );
    let cable_overrides = CableOverrides {
        max_a: args.cable_amps,
        max_v: args.cable_volts,
        e_marked: args.cable_e_marked,
        ..Default::default()
    };
    let device_overrides = args.toggle_device_standard.iter().fold(
        DeviceOverrides {
            max_w: args.device_watts,
            max_v: args.device_volts,
            max_a: args.device_amps,
            ..Default::default()
        },
        |overrides, standard| overrides.toggle_standard(&base.device, *standard),
    );

    if !adapter_overrides.is_empty() || !cable_overrides.is_empty() || !device_overrides.is_empty()
    {
        tracing::info!(
            ?adapter_overrides,
            ?cable_overrides,
            ?device_overrides,
            "applying overrides"
        );
    }

    Scenario {
        adapter: adapter_overrides.apply(&base.adapter),
        cable: cable_overrides.apply(&base.cable),
        device: device_overrides.apply(&base.device),
        standard: args.standard.unwrap_or(base.standard),
    }
}

fn handle_simulate(args: &SimulateArgs) -> Result<i32> {
    let scenario = apply_overrides(args, base_scenario(args)?);
    let result = ChargeSimCore::simulate(
        &scenario.adapter,
        &scenario.cable,
        &scenario.device,
        &SimulationOptions {
            selection: scenario.standard,
        },
    );

    match args.format {
        OutputFormat::Human => output_human(&scenario, &result, args.locale),
        OutputFormat::Json => output_json(&scenario, &result, args.locale)?,
    }

    if let Some(condition) = args.fail_on {
        if should_fail(&result, condition) {
            return Ok(1);
        }
    }
    Ok(0)
}

fn should_fail(result: &SimulationResult, condition: FailOn) -> bool {
    match condition {
        FailOn::Incompatible => !result.is_compatible(),
        FailOn::BelowRecommended => !result.meets_recommended,
        FailOn::NoStandard => !result.has_standard(),
    }
}

fn print_messages(title: &str, messages: &[Message], locale: Locale) {
    if messages.is_empty() {
        return;
    }
    println!("\n  {}:", title);
    for message in messages {
        println!("    - {}", render(message, locale));
    }
}

fn output_human(scenario: &Scenario, result: &SimulationResult, locale: Locale) {
    println!("\nAdapter: {}", scenario.adapter.name);
    println!("Cable:   {}", scenario.cable.name);
    println!("Device:  {}", scenario.device.name);
    println!("{}", "─".repeat(60));

    match result.standard {
        Some(standard) => {
            println!("  Standard: {} ({})", standard, result.selection);
            println!("  Voltage:  {}V", result.voltage);
            println!("  Current:  {}A", result.current);
            println!(
                "  Power:    {}W (recommended {}W)",
                result.power, scenario.device.recommended_w
            );
        }
        None => println!("  No usable charging standard"),
    }
    match result.charge_minutes {
        Some(minutes) => println!("  Charge 20% -> 80%: ~{} min", minutes),
        None => println!("  Charge 20% -> 80%: unknown"),
    }
    if !result.limiting_parts.is_empty() {
        let parts: Vec<_> = result.limiting_parts.iter().map(|p| p.id()).collect();
        println!("  Limited by: {}", parts.join(", "));
    }

    print_messages("INCOMPATIBLE", &result.incompatibilities, locale);
    print_messages("BOTTLENECKS", &result.bottlenecks, locale);
    print_messages("SUGGESTIONS", &result.suggestions, locale);
}

fn rendered(messages: &[Message], locale: Locale) -> Vec<String> {
    messages.iter().map(|m| render(m, locale)).collect()
}

fn output_json(scenario: &Scenario, result: &SimulationResult, locale: Locale) -> Result<()> {
    let output = serde_json::json!({
        "adapter": scenario.adapter.name,
        "cable": scenario.cable.name,
        "device": scenario.device.name,
        "result": result,
        "locale": locale,
        "rendered": {
            "bottlenecks": rendered(&result.bottlenecks, locale),
            "suggestions": rendered(&result.suggestions, locale),
            "incompatibilities": rendered(&result.incompatibilities, locale),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn standards_label(standards: &std::collections::BTreeSet<Standard>) -> String {
    standards
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_adapters(adapters: &[AdapterSpec]) {
    println!("\nAdapters:");
    for (i, a) in adapters.iter().enumerate() {
        let ports: Vec<_> = a.ports.iter().map(|p| p.label()).collect();
        println!(
            "  [{}] {} - {}W, {}V, ports: {}, standards: {}",
            i,
            a.name,
            a.max_w,
            a.max_v,
            ports.join("/"),
            standards_label(&a.standards)
        );
    }
}

fn print_cables(cables: &[CableSpec]) {
    println!("\nCables:");
    for (i, c) in cables.iter().enumerate() {
        println!(
            "  [{}] {} - {}A, {}V{}",
            i,
            c.name,
            c.max_a,
            c.max_v,
            if c.e_marked { ", e-marked" } else { "" }
        );
    }
}

fn print_devices(devices: &[DeviceSpec]) {
    println!("\nDevices:");
    for (i, d) in devices.iter().enumerate() {
        println!(
            "  [{}] {} - {}W (recommended {}W), {}, standards: {}",
            i,
            d.name,
            d.max_w,
            d.recommended_w,
            d.connector,
            standards_label(&d.standards)
        );
    }
}

fn handle_presets(kind: PresetKind, catalog: Option<&Path>, format: OutputFormat) -> Result<i32> {
    let catalog = open_catalog(catalog)?;
    let all = kind == PresetKind::All;

    match format {
        OutputFormat::Human => {
            if all || kind == PresetKind::Adapters {
                print_adapters(&catalog.adapters);
            }
            if all || kind == PresetKind::Cables {
                print_cables(&catalog.cables);
            }
            if all || kind == PresetKind::Devices {
                print_devices(&catalog.devices);
            }
        }
        OutputFormat::Json => {
            let output = match kind {
                PresetKind::Adapters => serde_json::json!({ "adapters": catalog.adapters }),
                PresetKind::Cables => serde_json::json!({ "cables": catalog.cables }),
                PresetKind::Devices => serde_json::json!({ "devices": catalog.devices }),
                PresetKind::All => serde_json::to_value(&catalog)?,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(0)
}

fn handle_standards(verbose: bool) {
    println!("Charging standards (highest priority first):\n");

    for (i, standard) in Standard::PRIORITY.iter().enumerate() {
        let voltage = if standard.min_voltage() == standard.max_voltage() {
            format!("{}V", standard.max_voltage())
        } else {
            format!("{}-{}V", standard.min_voltage(), standard.max_voltage())
        };
        println!(
            "  {}. {} ({}) - {}, up to {}A{}",
            i + 1,
            standard.label(),
            standard.id(),
            voltage,
            standard.max_current(),
            if standard.is_legacy() { ", USB-A ok" } else { "" }
        );
        if verbose {
            println!("     {}", standard.description());
        }
    }

    println!("\nUse --standard <id> with `simulate` to force one.");
}
