use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config, DEFAULT_CURRENCY};
use crate::pricing::tables::{DEFAULT_DEPRECIATION_RATE, FALLBACK_BASE_PRICE};
use crate::pricing::validation::MAX_BASE_PRICE;
use crate::pricing::{validate_pricing, PricingConfig, PricingTables};
use crate::prompt::{prompt, prompt_parsed, prompt_with_default, prompt_yes_no, typewriter};
use crate::vehicle::Brand;

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Car Valuation Configuration Wizard");
    println!("==================================");
    println!();

    // 1. Display
    typewriter("Prices are shown with a currency symbol in front, e.g. $32,100.");
    let currency = prompt_with_default("Currency symbol", DEFAULT_CURRENCY)?;

    // 2. Pricing overrides
    println!();
    let tune_pricing = prompt_yes_no("Adjust pricing tables? (n keeps the built-in tables)", false)?;

    let pricing = if tune_pricing {
        println!();
        typewriter("The fallback base price is used for any brand without a price list of its own.");
        let fallback_base_price: f64 = loop {
            let price: f64 =
                prompt_parsed("Fallback base price", &FALLBACK_BASE_PRICE.to_string())?;
            if price > 0.0 && price <= MAX_BASE_PRICE {
                break price;
            }
            println!("  Invalid: must be positive and at most {}. Try again.", MAX_BASE_PRICE);
        };

        println!();
        typewriter("Depreciation rates are the share of value a car loses each year (0.05 = 5%).");
        typewriter("The first year always counts double. Body type scales the rate further.");
        let default_depreciation_rate: f64 = loop {
            let rate: f64 = prompt_parsed(
                "Default depreciation rate",
                &DEFAULT_DEPRECIATION_RATE.to_string(),
            )?;
            if (0.0..1.0).contains(&rate) {
                break rate;
            }
            println!("  Invalid: must be at least 0 and below 1. Try again.");
        };

        println!();
        typewriter("You can override the rate for individual brands, e.g. 'holden' -> 0.09.");
        let builtin = PricingTables::builtin();
        let mut rates: BTreeMap<String, f64> = BTreeMap::new();
        let mut add_rate = prompt_yes_no("Add a brand rate?", false)?;
        while add_rate {
            let brand: Brand = loop {
                let b = prompt("  Brand: ")?;
                match b.parse::<Brand>() {
                    Ok(brand) => break brand,
                    Err(e) => println!("  Invalid: {}. Try again.", e),
                }
            };
            let current = builtin.brand_rate(brand).to_string();
            let rate: f64 = loop {
                let r: f64 = prompt_parsed(&format!("  Rate for {}", brand), &current)?;
                if (0.0..1.0).contains(&r) {
                    break r;
                }
                println!("  Invalid: must be at least 0 and below 1. Try again.");
            };
            rates.insert(brand.key().to_string(), rate);
            add_rate = prompt_yes_no("  Add another brand rate?", false)?;
        }

        Some(PricingConfig {
            fallback_base_price: Some(fallback_base_price),
            default_depreciation_rate: Some(default_depreciation_rate),
            depreciation_rates: if rates.is_empty() { None } else { Some(rates) },
            ..Default::default()
        })
    } else {
        None
    };

    if let Some(ref p) = pricing {
        if let Err(errors) = validate_pricing(p) {
            anyhow::bail!("Pricing config errors: {}", errors.join("; "));
        }
    }

    // 3. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Write config
    let config = Config {
        currency: if currency == DEFAULT_CURRENCY {
            None
        } else {
            Some(currency)
        },
        pricing,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("Base prices, body-type modifiers and condition multipliers can also be overridden in the file. See the docs for the full format.");
    println!("Run `carval estimate` to value a car.");

    Ok(())
}
