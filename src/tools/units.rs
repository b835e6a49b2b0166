//! Unit conversion backed by a local factor table.
//!
//! Linear units convert through a per-dimension base unit; temperatures are
//! affine and handled separately. Unknown units and cross-dimension requests
//! produce descriptive errors.

use anyhow::bail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Length,
    Mass,
    Volume,
    Speed,
    Data,
    Time,
    Temperature,
}

/// Aliases, dimension, factor to the dimension's base unit
/// (meter, kilogram, liter, m/s, byte, second).
const UNITS: &[(&[&str], Dimension, f64)] = &[
    (&["m", "meter", "meters", "metre", "metres"], Dimension::Length, 1.0),
    (&["km", "kilometer", "kilometers"], Dimension::Length, 1000.0),
    (&["cm", "centimeter", "centimeters"], Dimension::Length, 0.01),
    (&["mm", "millimeter", "millimeters"], Dimension::Length, 0.001),
    (&["mi", "mile", "miles"], Dimension::Length, 1609.344),
    (&["yd", "yard", "yards"], Dimension::Length, 0.9144),
    (&["ft", "foot", "feet"], Dimension::Length, 0.3048),
    (&["in", "inch", "inches"], Dimension::Length, 0.0254),
    (&["kg", "kilogram", "kilograms"], Dimension::Mass, 1.0),
    (&["g", "gram", "grams"], Dimension::Mass, 0.001),
    (&["mg", "milligram", "milligrams"], Dimension::Mass, 1e-6),
    (&["lb", "lbs", "pound", "pounds"], Dimension::Mass, 0.453_592_37),
    (&["oz", "ounce", "ounces"], Dimension::Mass, 0.028_349_523_125),
    (&["st", "stone", "stones"], Dimension::Mass, 6.350_293_18),
    (&["l", "liter", "liters", "litre", "litres"], Dimension::Volume, 1.0),
    (&["ml", "milliliter", "milliliters"], Dimension::Volume, 0.001),
    (&["gal", "gallon", "gallons"], Dimension::Volume, 3.785_411_784),
    (&["pt", "pint", "pints"], Dimension::Volume, 0.473_176_473),
    (&["m/s", "mps"], Dimension::Speed, 1.0),
    (&["km/h", "kmh", "kph"], Dimension::Speed, 1.0 / 3.6),
    (&["mph"], Dimension::Speed, 0.447_04),
    (&["knot", "knots", "kn"], Dimension::Speed, 0.514_444),
    (&["b", "byte", "bytes"], Dimension::Data, 1.0),
    (&["kb", "kilobyte", "kilobytes"], Dimension::Data, 1024.0),
    (&["mb", "megabyte", "megabytes"], Dimension::Data, 1024.0 * 1024.0),
    (&["gb", "gigabyte", "gigabytes"], Dimension::Data, 1024.0 * 1024.0 * 1024.0),
    (&["s", "sec", "second", "seconds"], Dimension::Time, 1.0),
    (&["min", "minute", "minutes"], Dimension::Time, 60.0),
    (&["h", "hr", "hour", "hours"], Dimension::Time, 3600.0),
    (&["day", "days"], Dimension::Time, 86_400.0),
    (&["c", "celsius", "°c"], Dimension::Temperature, 0.0),
    (&["f", "fahrenheit", "°f"], Dimension::Temperature, 0.0),
    (&["k", "kelvin"], Dimension::Temperature, 0.0),
];

fn lookup(unit: &str) -> Option<(&'static str, Dimension, f64)> {
    let needle = unit.trim().to_lowercase();
    UNITS.iter().find_map(|(aliases, dim, factor)| {
        aliases
            .contains(&needle.as_str())
            .then_some((aliases[0], *dim, *factor))
    })
}

fn to_kelvin(value: f64, unit: &str) -> f64 {
    match unit {
        "c" => value + 273.15,
        "f" => (value - 32.0) * 5.0 / 9.0 + 273.15,
        _ => value,
    }
}

fn from_kelvin(value: f64, unit: &str) -> f64 {
    match unit {
        "c" => value - 273.15,
        "f" => (value - 273.15) * 9.0 / 5.0 + 32.0,
        _ => value,
    }
}

/// Round to `digits` significant digits for display.
fn format_sig(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(digits - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    format!("{rounded}")
}

pub fn convert_units(value: f64, from: &str, to: &str) -> anyhow::Result<String> {
    let Some((from_canon, from_dim, from_factor)) = lookup(from) else {
        bail!("unknown unit '{from}'");
    };
    let Some((to_canon, to_dim, to_factor)) = lookup(to) else {
        bail!("unknown unit '{to}'");
    };
    if from_dim != to_dim {
        bail!("can't convert {from} to {to}: different dimensions");
    }

    let result = if from_dim == Dimension::Temperature {
        from_kelvin(to_kelvin(value, from_canon), to_canon)
    } else {
        value * from_factor / to_factor
    };

    Ok(format!("{value} {from} = {} {to}", format_sig(result, 4)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meters_to_feet() {
        assert_eq!(
            convert_units(10.0, "m", "ft").expect("should convert"),
            "10 m = 32.81 ft"
        );
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(
            convert_units(1.0, "miles", "km").expect("should convert"),
            "1 miles = 1.609 km"
        );
    }

    #[test]
    fn celsius_to_fahrenheit_is_affine() {
        assert_eq!(
            convert_units(100.0, "c", "f").expect("should convert"),
            "100 c = 212 f"
        );
        assert_eq!(
            convert_units(0.0, "celsius", "kelvin").expect("should convert"),
            "0 celsius = 273.2 kelvin"
        );
    }

    #[test]
    fn pounds_to_kilograms() {
        assert_eq!(
            convert_units(150.0, "lb", "kg").expect("should convert"),
            "150 lb = 68.04 kg"
        );
    }

    #[test]
    fn cross_dimension_rejected() {
        let err = convert_units(1.0, "kg", "m").expect_err("should fail");
        assert!(err.to_string().contains("different dimensions"));
    }

    #[test]
    fn unknown_unit_rejected() {
        let err = convert_units(1.0, "blorp", "m").expect_err("should fail");
        assert!(err.to_string().contains("unknown unit 'blorp'"));
    }
}
