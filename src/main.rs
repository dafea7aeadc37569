use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use carval::pricing::ValuationResult;
use carval::vehicle::{catalog, Brand, VehicleForm, VehicleInput};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CardFormat {
    Card,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ListFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate the value of one vehicle
    Estimate {
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i64>,
        /// Body type (sedan, hatchback, suv, ...)
        #[arg(long = "type")]
        body_type: Option<String>,
        #[arg(long)]
        transmission: Option<String>,
        #[arg(long = "fuel")]
        fuel_type: Option<String>,
        /// Odometer reading in km
        #[arg(long)]
        odometer: Option<i64>,
        #[arg(long)]
        condition: Option<String>,
        /// Feature present on the car (repeatable)
        #[arg(long = "feature")]
        features: Vec<String>,
        /// Ask for every field on the terminal
        #[arg(short, long)]
        interactive: bool,
        #[arg(long, value_enum, default_value = "card")]
        format: CardFormat,
    },
    /// Value every vehicle listed in a YAML file
    Batch {
        /// YAML file with a `vehicles:` list
        file: PathBuf,
        #[arg(long, value_enum, default_value = "table")]
        format: ListFormat,
    },
    /// List brands, or the models of one brand with their base prices
    Brands {
        brand: Option<String>,
    },
    /// List the features that add value
    Features,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "carval")]
#[command(about = "Used car valuation CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/carval/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Calendar year ages are measured from (defaults to this year)
    #[arg(long, global = true, value_parser = clap::value_parser!(i32).range(1900..=9999))]
    as_of: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // Init writes the config, so it must not require a valid one
    if let Commands::Init = cli.command {
        if let Err(e) = carval::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match carval::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate pricing config at startup
    let effective_pricing = config.pricing.clone().unwrap_or_default();
    if let Err(errors) = carval::pricing::validate_pricing(&effective_pricing) {
        eprintln!("Pricing config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let tables = match effective_pricing.build_tables() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let current_year = cli.as_of.unwrap_or_else(|| chrono::Local::now().year());
    let currency = config.currency();
    let use_colors = carval::output::should_use_colors();

    if cli.verbose {
        eprintln!("Valuing as of {}", current_year);
        if config.pricing.is_some() {
            eprintln!("Using pricing overrides from config");
        }
    }

    match cli.command {
        Commands::Estimate {
            brand,
            model,
            year,
            body_type,
            transmission,
            fuel_type,
            odometer,
            condition,
            features,
            interactive,
            format,
        } => {
            let defaults = VehicleForm::prefilled();
            let mut form = VehicleForm {
                brand: brand.or(defaults.brand),
                model: model.or(defaults.model),
                year: year.or(defaults.year),
                body_type: body_type.or(defaults.body_type),
                transmission: transmission.or(defaults.transmission),
                fuel_type: fuel_type.or(defaults.fuel_type),
                odometer: odometer.or(defaults.odometer),
                condition: condition.or(defaults.condition),
                features,
            };

            if interactive {
                form = match carval::prompt::fill_vehicle_form(form, current_year) {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("Input error: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                };
            }

            let vehicle = match form.validate(current_year) {
                Ok(v) => v,
                Err(errors) => {
                    eprintln!("Invalid vehicle:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_INPUT);
                }
            };

            if !catalog::is_listed_model(vehicle.brand, &vehicle.model) {
                eprintln!(
                    "Note: '{}' is not a listed {} model, using the brand default price",
                    vehicle.model,
                    catalog::brand_label(vehicle.brand)
                );
            }

            let result = carval::pricing::estimate_with(&vehicle, &tables, current_year);

            match format {
                CardFormat::Card => {
                    println!(
                        "{}",
                        carval::output::format_result_card(&vehicle, &result, currency, use_colors)
                    );
                }
                CardFormat::Json => print_json(&vehicle, &result),
            }

            if cli.verbose {
                eprintln!();
                eprintln!("{}", carval::output::format_breakdown(&result, currency));
            }
        }
        Commands::Batch { file, format } => {
            let batch = match carval::batch::load_batch(&file) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if cli.verbose {
                eprintln!("Loaded {} vehicles from {}", batch.vehicles.len(), file.display());
            }

            // Hold warnings back until the table is printed
            carval::stderr_buffer::activate();
            let outcome = carval::batch::value_batch(
                &batch.vehicles,
                &tables,
                current_year,
                cli.verbose,
            );
            let outcome = match outcome {
                Ok(o) => o,
                Err(e) => {
                    flush_warnings();
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            match format {
                ListFormat::Table => println!(
                    "{}",
                    carval::output::format_valuation_table(&outcome.valued, currency, use_colors)
                ),
                ListFormat::Tsv => {
                    let tsv = carval::output::format_tsv(&outcome.valued);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                ListFormat::Json => match serde_json::to_string_pretty(&outcome.valued) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Failed to serialize results: {}", e),
                },
            }
            flush_warnings();

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} valued, {} skipped in {:?}",
                    outcome.valued.len(),
                    outcome.rejected.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Brands { brand } => match brand {
            None => println!("{}", carval::output::format_brand_list()),
            Some(name) => {
                let brand: Brand = match name.parse() {
                    Ok(b) => b,
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                };
                println!("{}", catalog::brand_label(brand));
                println!(
                    "{}",
                    carval::output::format_model_list(brand, &tables, currency)
                );
            }
        },
        Commands::Features => println!("{}", carval::output::format_feature_list()),
        // Handled before config is loaded
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

fn flush_warnings() {
    for msg in carval::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }
}

fn print_json(vehicle: &VehicleInput, result: &ValuationResult) {
    let doc = serde_json::json!({
        "vehicle": vehicle,
        "valuation": result,
    });
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
}
