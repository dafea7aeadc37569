//! Line-based terminal prompts for the config wizard and the interactive
//! valuation form.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::vehicle::catalog;
use crate::vehicle::{BodyType, Brand, Condition, FuelType, Transmission, VehicleForm, MAX_ODOMETER};

/// Prompt user with a message and return their trimmed input.
pub fn prompt(message: &str) -> Result<String> {
    prompt_from(&mut std::io::stdin().lock(), message)
}

/// Prompt, reading the answer from `reader`.
/// Fails at end of input so retry loops cannot spin on a closed stdin.
pub fn prompt_from<R: BufRead>(reader: &mut R, message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Unexpected end of input");
    }
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
pub fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
pub fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Keep asking until the answer parses as `T`.
pub fn prompt_parsed<T>(message: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    loop {
        let input = prompt_with_default(message, default)?;
        match input.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

/// Print text with a typewriter effect, one character at a time.
pub fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Walk through every form field, offering `start`'s values as defaults.
/// Each answer is checked against its vocabulary before moving on.
pub fn fill_vehicle_form(start: VehicleForm, current_year: i32) -> Result<VehicleForm> {
    println!();
    println!("Vehicle details (press Enter to keep the value in brackets)");
    println!();

    let brand: Brand = prompt_parsed("Brand", start.brand.as_deref().unwrap_or("toyota"))?;

    println!("  Models: {}", catalog::models(brand).join(", "));
    let model = loop {
        let m = match start.model.as_deref() {
            Some(default) if !default.is_empty() => prompt_with_default("Model", default)?,
            _ => prompt("Model: ")?,
        };
        if !m.is_empty() {
            break m;
        }
        println!("  Model is required.");
    };
    if !catalog::is_listed_model(brand, &model) {
        println!(
            "  '{}' is not a listed {} model; the brand's default price will be used.",
            model,
            catalog::brand_label(brand)
        );
    }

    let years = catalog::model_years(current_year, catalog::DEFAULT_YEARS_BACK);
    let newest = years.first().copied().unwrap_or(current_year);
    let oldest = years.last().copied().unwrap_or(current_year);
    let default_year = start.year.unwrap_or(2018).to_string();
    let year = loop {
        let y: i64 = prompt_parsed(&format!("Year ({}-{})", oldest, newest), &default_year)?;
        if y >= i64::from(oldest) && y <= i64::from(newest) {
            break y;
        }
        println!("  Year must be between {} and {}.", oldest, newest);
    };

    let body_type: BodyType =
        prompt_parsed("Car type", start.body_type.as_deref().unwrap_or("sedan"))?;
    let transmission: Transmission = prompt_parsed(
        "Transmission",
        start.transmission.as_deref().unwrap_or("automatic"),
    )?;
    let fuel_type: FuelType =
        prompt_parsed("Fuel type", start.fuel_type.as_deref().unwrap_or("petrol"))?;

    let default_odometer = start.odometer.unwrap_or(50_000).to_string();
    let odometer = loop {
        let km: i64 = prompt_parsed("Odometer (km)", &default_odometer)?;
        if (0..=MAX_ODOMETER).contains(&km) {
            break km;
        }
        println!("  Please enter a valid odometer reading (0-500,000 km).");
    };

    let condition: Condition =
        prompt_parsed("Condition", start.condition.as_deref().unwrap_or("good"))?;

    println!();
    println!("Features (select all that apply):");
    let mut features = start.features.clone();
    for feature in catalog::FEATURES {
        let already = features.iter().any(|f| f == feature);
        if prompt_yes_no(&format!("  {}?", feature), already)? {
            if !already {
                features.push(feature.to_string());
            }
        } else {
            features.retain(|f| f != feature);
        }
    }

    Ok(VehicleForm {
        brand: Some(brand.key().to_string()),
        model: Some(model),
        year: Some(year),
        body_type: Some(body_type.key().to_string()),
        transmission: Some(transmission.key().to_string()),
        fuel_type: Some(fuel_type.key().to_string()),
        odometer: Some(odometer),
        condition: Some(condition.key().to_string()),
        features,
    })
}
