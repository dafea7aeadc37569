use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::batch::ValuedVehicle;
use crate::pricing::factors::group_thousands;
use crate::pricing::{Confidence, Impact, PriceSource, PricingTables, ValuationResult};
use crate::vehicle::{catalog, Brand, VehicleInput};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a whole-currency amount with thousands separators: "$32,100"
pub fn format_price(amount: i64, currency: &str) -> String {
    let digits = group_thousands(amount);
    match digits.strip_prefix('-') {
        Some(magnitude) => format!("-{}{}", currency, magnitude),
        None => format!("{}{}", currency, digits),
    }
}

pub fn format_confidence(confidence: Confidence, use_colors: bool) -> String {
    let text = match confidence {
        Confidence::High => "High confidence",
        Confidence::Medium => "Medium confidence",
        Confidence::Low => "Low confidence",
    };
    if !use_colors {
        return text.to_string();
    }
    match confidence {
        Confidence::High => text.green().to_string(),
        Confidence::Medium => text.blue().to_string(),
        Confidence::Low => text.yellow().to_string(),
    }
}

pub fn format_impact(impact: Impact, use_colors: bool) -> String {
    let text = match impact {
        Impact::Positive => "↑ Positive",
        Impact::Negative => "↓ Negative",
        Impact::Neutral => "→ Neutral",
    };
    if !use_colors {
        return text.to_string();
    }
    match impact {
        Impact::Positive => text.green().to_string(),
        Impact::Negative => text.red().to_string(),
        Impact::Neutral => text.dimmed().to_string(),
    }
}

/// Format a single valuation as a multi-line card
pub fn format_result_card(
    vehicle: &VehicleInput,
    result: &ValuationResult,
    currency: &str,
    use_colors: bool,
) -> String {
    let price = format_price(result.estimated_price, currency);
    let range = format!(
        "{} - {}",
        format_price(result.price_range.min, currency),
        format_price(result.price_range.max, currency)
    );

    let mut lines = Vec::new();
    if use_colors {
        lines.push(vehicle.label().bold().to_string());
        lines.push(format!("  Estimated Value: {}", price.bold().cyan()));
    } else {
        lines.push(vehicle.label());
        lines.push(format!("  Estimated Value: {}", price));
    }
    lines.push(format!("  Price Range: {}", range));
    lines.push(format!(
        "  {}",
        format_confidence(result.confidence, use_colors)
    ));
    lines.push(String::new());
    lines.push("  Valuation Factors".to_string());

    let name_width = result
        .factors
        .iter()
        .map(|f| f.factor.chars().count())
        .max()
        .unwrap_or(0);
    for factor in &result.factors {
        lines.push(format!(
            "    {:<width$}  {}  {}",
            factor.factor,
            format_impact(factor.impact, use_colors),
            factor.description,
            width = name_width
        ));
    }

    lines.join("\n")
}

/// Format the intermediate figures behind an estimate (for verbose mode)
pub fn format_breakdown(result: &ValuationResult, currency: &str) -> String {
    let b = &result.breakdown;
    let source = match b.base_price_source {
        PriceSource::Model => "model price",
        PriceSource::BrandDefault => "brand default",
        PriceSource::Fallback => "global fallback",
    };
    [
        format!(
            "  Base price:      {} ({})",
            format_price(b.base_price.round() as i64, currency),
            source
        ),
        format!("  Depreciation:    {:.4} per year", b.depreciation_rate),
        format!("  Age:             {} years -> x{:.4}", b.age, b.year_factor),
        format!(
            "  Mileage:         ratio {:.2} -> x{:.4}",
            b.mileage_ratio, b.mileage_factor
        ),
        format!("  Condition:       x{}", b.condition_multiplier),
        format!("  Features:        x{:.2}", b.feature_multiplier),
        format!("  Unrounded:       {:.2}", b.unrounded),
    ]
    .join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format valued vehicles as a table with columns: Index, Price, Range,
/// Confidence, Vehicle. No headers.
/// Index column is the vehicle's position in the input file, right-aligned.
pub fn format_valuation_table(entries: &[ValuedVehicle], currency: &str, use_colors: bool) -> String {
    if entries.is_empty() {
        return "No vehicles valued.".to_string();
    }

    let term_width = get_terminal_width();

    let prices: Vec<String> = entries
        .iter()
        .map(|e| format_price(e.valuation.estimated_price, currency))
        .collect();
    let ranges: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "{} - {}",
                format_price(e.valuation.price_range.min, currency),
                format_price(e.valuation.price_range.max, currency)
            )
        })
        .collect();

    let price_width = prices.iter().map(|p| p.chars().count()).max().unwrap_or(0);
    let range_width = ranges.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let confidence_width = 6; // "medium"
    let separator = "  ";

    entries
        .iter()
        .zip(prices.iter().zip(ranges.iter()))
        .map(|(entry, (price, range))| {
            let index_str = format!("{:>2}.", entry.index);
            let price_padded = format!("{:>width$}", price, width = price_width);
            let range_padded = format!("{:<width$}", range, width = range_width);
            let confidence = format!(
                "{:<width$}",
                entry.valuation.confidence.to_string(),
                width = confidence_width
            );

            let fixed_width = index_str.len()
                + 1
                + price_width
                + range_width
                + confidence_width
                + separator.len() * 3;
            let label = entry.vehicle.label();
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_label(&label, width - fixed_width),
                // Very narrow terminal, show truncated
                Some(_) => truncate_label(&label, 20),
                // No terminal (pipe), don't truncate
                None => label,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    price_padded.bold(),
                    separator,
                    range_padded.dimmed(),
                    separator,
                    confidence,
                    separator,
                    label
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    price_padded,
                    separator,
                    range_padded,
                    separator,
                    confidence,
                    separator,
                    label
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format valued vehicles as tab-separated values for scripting
/// Columns: price, min, max, confidence, vehicle (no headers, no colors)
pub fn format_tsv(entries: &[ValuedVehicle]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                entry.valuation.estimated_price,
                entry.valuation.price_range.min,
                entry.valuation.price_range.max,
                entry.valuation.confidence,
                entry.vehicle.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per brand: key, display name, number of listed models
pub fn format_brand_list() -> String {
    Brand::ALL
        .iter()
        .map(|brand| {
            format!(
                "{:<12}{:<16}{} models",
                brand.key(),
                catalog::brand_label(*brand),
                catalog::models(*brand).len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A brand's listed models with the base price each one starts from
pub fn format_model_list(brand: Brand, tables: &PricingTables, currency: &str) -> String {
    let models = catalog::models(brand);
    let width = models.iter().map(|m| m.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<String> = models
        .iter()
        .map(|model| {
            let (price, source) = tables.resolve_base_price(brand, model);
            let note = match source {
                PriceSource::Model => "",
                PriceSource::BrandDefault => "  (brand default)",
                PriceSource::Fallback => "  (fallback)",
            };
            format!(
                "{:<width$}  {}{}",
                model,
                format_price(price.round() as i64, currency),
                note,
                width = width
            )
        })
        .collect();

    lines.push(format!(
        "Depreciation: {:.1}% per year",
        tables.brand_rate(brand) * 100.0
    ));
    lines.join("\n")
}

pub fn format_feature_list() -> String {
    catalog::FEATURES.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::estimate;
    use crate::vehicle::{BodyType, Condition, FuelType, Transmission};

    fn sample_vehicle() -> VehicleInput {
        VehicleInput {
            brand: Brand::Toyota,
            model: "Corolla".to_string(),
            year: 2025,
            body_type: BodyType::Sedan,
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Petrol,
            odometer: 0,
            condition: Condition::Excellent,
            features: Default::default(),
        }
    }

    fn valued(index: usize, vehicle: VehicleInput) -> ValuedVehicle {
        let valuation = estimate(&vehicle, 2025);
        ValuedVehicle {
            index,
            vehicle,
            valuation,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(32_100, "$"), "$32,100");
        assert_eq!(format_price(950, "$"), "$950");
        assert_eq!(format_price(1_250_000, "A$"), "A$1,250,000");
        assert_eq!(format_price(-500, "$"), "-$500");
    }

    #[test]
    fn test_format_price_extremes() {
        assert_eq!(format_price(i64::MIN, "$"), "-$9,223,372,036,854,775,808");
        assert_eq!(format_price(i64::MAX, "$"), "$9,223,372,036,854,775,807");
    }

    #[test]
    fn test_format_impact_plain() {
        assert_eq!(format_impact(Impact::Positive, false), "↑ Positive");
        assert_eq!(format_impact(Impact::Negative, false), "↓ Negative");
        assert_eq!(format_impact(Impact::Neutral, false), "→ Neutral");
    }

    #[test]
    fn test_format_confidence_plain() {
        assert_eq!(format_confidence(Confidence::High, false), "High confidence");
        assert_eq!(format_confidence(Confidence::Low, false), "Low confidence");
    }

    #[test]
    fn test_format_result_card() {
        let vehicle = sample_vehicle();
        let result = estimate(&vehicle, 2025);
        let card = format_result_card(&vehicle, &result, "$", false);
        assert!(card.starts_with("2025 Toyota Corolla"));
        assert!(card.contains("Estimated Value: $32,100"));
        assert!(card.contains("Price Range: $28,890 - $35,310"));
        assert!(card.contains("Medium confidence"));
        assert!(card.contains("Vehicle Age"));
        assert!(card.contains("No premium features selected."));
        assert_eq!(card.lines().count(), 10);
    }

    #[test]
    fn test_format_breakdown() {
        let result = estimate(&sample_vehicle(), 2025);
        let text = format_breakdown(&result, "$");
        assert!(text.contains("Base price:      $25,000 (model price)"));
        assert!(text.contains("Age:             0 years -> x1.0000"));
        assert!(text.contains("Condition:       x1.2"));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 20), "Short");
        assert_eq!(truncate_label("2019 Mitsubishi Eclipse Cross", 15), "2019 Mitsub...");
        assert_eq!(truncate_label("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_valuation_table_empty() {
        assert_eq!(format_valuation_table(&[], "$", false), "No vehicles valued.");
    }

    #[test]
    fn test_format_valuation_table_rows() {
        let mut x5 = sample_vehicle();
        x5.brand = Brand::Bmw;
        x5.model = "X5".to_string();
        let entries = vec![valued(1, sample_vehicle()), valued(3, x5)];

        let result = format_valuation_table(&entries, "$", false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[1].starts_with(" 3."));
        assert!(lines[0].contains("$32,100"));
        assert!(lines[0].contains("$28,890 - $35,310"));
        assert!(lines[0].contains("medium"));
        assert!(lines[1].contains("BMW X5"));
    }

    #[test]
    fn test_format_tsv() {
        let entries = vec![valued(1, sample_vehicle())];
        assert_eq!(
            format_tsv(&entries),
            "32100\t28890\t35310\tmedium\t2025 Toyota Corolla"
        );
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_brand_list() {
        let list = format_brand_list();
        assert_eq!(list.lines().count(), Brand::ALL.len());
        assert!(list.contains("Mercedes-Benz"));
    }

    #[test]
    fn test_format_model_list_marks_defaults() {
        let list = format_model_list(Brand::Other, PricingTables::builtin(), "$");
        assert!(list.contains("Model S"));
        assert!(list.contains("$120,000"));
        assert!(list.contains("Prius"));
        assert!(list.contains("$20,000  (brand default)"));
        assert!(list.ends_with("Depreciation: 6.0% per year"));
    }

    #[test]
    fn test_format_feature_list() {
        assert_eq!(format_feature_list().lines().count(), catalog::FEATURES.len());
    }
}
