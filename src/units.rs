//! Unit conversion within a category: length, weight, temperature...
//!
//! Every linear unit is defined by its size in the base unit of its
//! category (meter, gram, joule...), so a conversion is a multiplication by
//! the source factor and a division by the target one. Temperature scales
//! have an offset and are converted through degrees Celsius.

use lazy_static::lazy_static;

use crate::errors::*;
use crate::math;
use crate::value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scale {
    /// size of the unit in base units
    Linear(&'static str),
    /// `unit = base * numerator / denominator + offset`
    Affine {
        numerator: &'static str,
        denominator: &'static str,
        offset: &'static str,
    },
}

#[derive(Clone, Debug)]
struct Unit {
    name: &'static str,
    description: &'static str,
    scale: Scale,
}

#[derive(Clone, Debug)]
struct Category {
    name: &'static str,
    units: Vec<Unit>,
}

macro_rules! linear_units {
    ($(($name:expr, $factor:expr, $desc:expr)),* $(,)?) => {
        vec![$(Unit { name: $name, description: $desc, scale: Scale::Linear($factor) }),*]
    };
}

macro_rules! category {
    ($name:expr, $units:expr) => {
        Category {
            name: $name,
            units: $units,
        }
    };
}

lazy_static! {
    static ref CATEGORIES: Vec<Category> = vec![
        category!("length", linear_units![
            ("pm", "0.000000000001", "Picometer"),
            ("nm", "0.000000001", "Nanometer"),
            ("μm", "0.000001", "Micrometer"),
            ("mm", "0.001", "Millimeter"),
            ("cm", "0.01", "Centimeter"),
            ("m", "1", "Meter"),
            ("km", "1000", "Kilometer"),
            ("in", "0.0254", "Inch"),
            ("ft", "0.3048", "Foot"),
            ("yd", "0.9144", "Yard"),
            ("mi", "1609.344", "Mile"),
            ("chi", "0.0303", "Ch'i (Inch)"),
            ("chok", "0.303", "Ch'ŏk (Foot)"),
            ("chg", "3.03", "Chang (Fathom)"),
            ("ri", "393", "Ri (Village Distance)"),
            ("au", "149597870700", "Astronomical Unit"),
            ("ly", "9460730472580800", "Light Year"),
            ("pc", "30856775814913672", "Parsec"),
        ]),
        category!("area", linear_units![
            ("mm²", "0.000001", "Square Millimeter"),
            ("cm²", "0.0001", "Square Centimeter"),
            ("m²", "1", "Square Meter"),
            ("km²", "1000000", "Square Kilometer"),
            ("in²", "0.00064516", "Square Inch"),
            ("ft²", "0.09290304", "Square Foot"),
            ("yd²", "0.83612736", "Square Yard"),
            ("mi²", "2589988.110336", "Square Mile"),
            ("ha", "10000", "Hectare"),
            ("a", "100", "Are"),
            ("ac", "4046.8564224", "Acre"),
            ("py", "3.3025", "Pyeong"),
            ("tb", "330.58", "Tanbo (Are)"),
            ("k", "3305.8", "Kyŏl (Hectare)"),
        ]),
        category!("volume", linear_units![
            ("mm³", "0.000000001", "Cubic Millimeter"),
            ("cm³", "0.000001", "Cubic Centimeter"),
            ("m³", "1", "Cubic Meter"),
            ("km³", "1000000000", "Cubic Kilometer"),
            ("in³", "0.000016387064", "Cubic Inch"),
            ("ft³", "0.028316846592", "Cubic Foot"),
            ("yd³", "0.764554857984", "Cubic Yard"),
            ("mi³", "4168181825.440579584", "Cubic Mile"),
            ("ml", "0.000001", "Milliliter"),
            ("l", "0.001", "Liter"),
            ("kl", "1", "Kiloliter"),
            ("gal", "0.003785411784", "Gallon"),
            ("to", "0.0018", "Toe (Liter)"),
            ("mal", "0.018", "Mal (Decaliter)"),
            ("seom", "0.18", "Sŏm (Hectoliter)"),
        ]),
        category!("weight", linear_units![
            ("g", "1", "Gram"),
            ("kg", "1000", "Kilogram"),
            ("mg", "0.001", "Milligram"),
            ("oz", "28.349523125", "Ounce"),
            ("lb", "453.59237", "Pound"),
            ("ton", "1000000", "Ton"),
            ("geun", "600", "Geun (Catty)"),
            ("nyang", "37.5", "Nyang (Tael)"),
            ("don", "3.75", "Don (Mace)"),
            ("jeon", "0.375", "Jeon (Candareen)"),
            ("gwan", "3750", "Gwan (Kwan)"),
        ]),
        category!("angle", linear_units![
            ("deg", "0.0174532925199432957692369077", "Degree"),
            ("urad", "0.000001", "Microradian"),
            ("grad", "0.0157079632679489661923132169", "Gradian"),
            ("rad", "1", "Radian"),
            ("arcm", "0.0002908882086657215961539485", "Minute of arc"),
            ("arcs", "0.0000048481368110953599358991", "Second of arc"),
        ]),
        category!("temp", vec![
            Unit {
                name: "°C",
                description: "Celsius",
                scale: Scale::Linear("1"),
            },
            Unit {
                name: "°F",
                description: "Fahrenheit",
                scale: Scale::Affine { numerator: "9", denominator: "5", offset: "32" },
            },
            Unit {
                name: "K",
                description: "Kelvin",
                scale: Scale::Affine { numerator: "1", denominator: "1", offset: "273.15" },
            },
            Unit {
                name: "°R",
                description: "Rankine",
                scale: Scale::Affine { numerator: "9", denominator: "5", offset: "491.67" },
            },
        ]),
        category!("energy", linear_units![
            ("J", "1", "Joule"),
            ("kJ", "1000", "Kilojoule"),
            ("MJ", "1000000", "Megajoule"),
            ("GJ", "1000000000", "Gigajoule"),
            ("cal", "4.184", "Calorie"),
            ("kcal", "4184", "Kilocalorie"),
            ("Wh", "3600", "Watt-hour"),
            ("kWh", "3600000", "Kilowatt-hour"),
            ("MWh", "3600000000", "Megawatt-hour"),
            ("GWh", "3600000000000", "Gigawatt-hour"),
            ("eV", "0.0000000000000000001602176634", "Electronvolt"),
            ("keV", "0.0000000000000001602176634", "Kiloelectronvolt"),
            ("MeV", "0.0000000000001602176634", "Megaelectronvolt"),
            ("GeV", "0.0000000001602176634", "Gigaelectronvolt"),
            ("BTU", "1055.06", "British Thermal Unit"),
            ("erg", "0.0000001", "Erg"),
        ]),
        category!("force", linear_units![
            ("N", "1", "Newton"),
            ("kN", "1000", "Kilonewton"),
            ("dyn", "0.00001", "Dyne"),
            ("lbf", "4.44822", "Pound-force"),
            ("kgf", "9.80665", "Kilogram-force"),
        ]),
        category!("time", linear_units![
            ("ps", "0.000000000001", "Picosecond"),
            ("ns", "0.000000001", "Nanosecond"),
            ("μs", "0.000001", "Microsecond"),
            ("ms", "0.001", "Millisecond"),
            ("s", "1", "Second"),
            ("m", "60", "Minute"),
            ("h", "3600", "Hour"),
            ("d", "86400", "Day"),
            ("w", "604800", "Week"),
            ("mon", "2628000", "Month"),
            ("year", "31536000", "Year"),
            ("decade", "315360000", "Decade"),
            ("century", "3153600000", "Century"),
        ]),
        category!("speed", linear_units![
            ("km/h", "1", "Kilometer per Hour"),
            ("m/s", "3.6", "Meter per Second"),
            ("ft/s", "1.09728", "Foot per Second"),
            ("mi/h", "1.609344", "Mile per Hour"),
            ("knot", "1.852", "Knot"),
        ]),
        category!("pressure", linear_units![
            ("Pa", "1", "Pascal"),
            ("hPa", "100", "Hectopascal"),
            ("kPa", "1000", "Kilopascal"),
            ("MPa", "1000000", "Megapascal"),
            ("bar", "100000", "Bar"),
            ("psi", "6894.75729316836", "Pound per Square Inch"),
            ("ksi", "6894757.29316836", "Kilopound per Square Inch"),
        ]),
        category!("data", linear_units![
            ("B", "1", "Byte"),
            ("kiB", "1024", "Kibibyte (1024 Bytes)"),
            ("kB", "1000", "Kilobyte (1000 Bytes)"),
            ("MiB", "1048576", "Mebibyte (1024 Kibibytes)"),
            ("MB", "1000000", "Megabyte (1000 Kilobytes)"),
            ("GiB", "1073741824", "Gibibyte (1024 Mebibytes)"),
            ("GB", "1000000000", "Gigabyte (1000 Megabytes)"),
            ("TiB", "1099511627776", "Tebibyte (1024 Gibibytes)"),
            ("TB", "1000000000000", "Terabyte (1000 Gigabytes)"),
            ("PiB", "1125899906842624", "Pebibyte (1024 Tebibytes)"),
            ("PB", "1000000000000000", "Petabyte (1000 Terabytes)"),
            ("EiB", "1152921504606846976", "Exbibyte (1024 Pebibytes)"),
            ("EB", "1000000000000000000", "Exabyte (1000 Petabytes)"),
            ("ZiB", "1180591620717411303424", "Zebibyte (1024 Exbibytes)"),
            ("ZB", "1000000000000000000000", "Zettabyte (1000 Exabytes)"),
            ("YiB", "1208925819614629174706176", "Yobibyte (1024 Zebibytes)"),
            ("YB", "1000000000000000000000000", "Yottabyte (1000 Zettabytes)"),
            ("n", "0.5", "Nibble"),
            ("b", "0.125", "Bit"),
            ("kib", "128", "Kibibit (1024 Bits)"),
            ("kb", "125", "Kilobit (1000 Bits)"),
            ("Mib", "131072", "Mebibit (1024 Kibibits)"),
            ("Mb", "125000", "Megabit (1000 Kilobits)"),
            ("Gib", "134217728", "Gibibit (1024 Mebibits)"),
            ("Gb", "125000000", "Gigabit (1000 Megabits)"),
            ("Tib", "137438953472", "Tebibit (1024 Gibibits)"),
            ("Tb", "125000000000", "Terabit (1000 Gigabits)"),
            ("Pib", "140737488355328", "Pebibit (1024 Tebibits)"),
            ("Pb", "125000000000000", "Petabit (1000 Terabits)"),
            ("Eib", "144115188075855872", "Exbibit (1024 Pebibits)"),
            ("Eb", "125000000000000000", "Exabit (1000 Petabits)"),
            ("Zib", "147573952589676412928", "Zebibit (1024 Exbibits)"),
            ("Zb", "125000000000000000000", "Zettabit (1000 Exabits)"),
            ("Yib", "151115727451828646838272", "Yobibit (1024 Zebibits)"),
            ("Yb", "125000000000000000000000", "Yottabit (1000 Zettabits)"),
        ]),
        category!("frequency", linear_units![
            ("Hz", "1", "Hertz"),
            ("kHz", "1000", "Kilohertz"),
            ("MHz", "1000000", "Megahertz"),
            ("GHz", "1000000000", "Gigahertz"),
            ("THz", "1000000000000", "Terahertz"),
            ("rpm", "0.0166666666666666666666666667", "Revolutions per minute"),
        ]),
        category!("luminance", linear_units![
            ("cd/m²", "1", "Candela per square meter"),
            ("nit", "1", "Nit"),
            ("stb", "10000", "Stilb"),
            ("asb", "0.31831", "Apostilb"),
            ("lmb", "3183.1", "Lambert"),
            ("ftl", "3.4262591", "Foot-lambert"),
        ]),
        category!("illuminance", linear_units![
            ("lx", "1", "Lux"),
            ("ph", "10000", "Phot"),
            ("fc", "10.76391", "Foot-candle"),
        ]),
        category!("electric_charge", linear_units![
            ("pC", "0.000000000001", "Picocoulomb"),
            ("nC", "0.000000001", "Nanocoulomb"),
            ("μC", "0.000001", "Microcoulomb"),
            ("mC", "0.001", "Millicoulomb"),
            ("C", "1", "Coulomb"),
            ("mAh", "3.6", "Milliampere-hour"),
            ("Ah", "3600", "Ampere-hour"),
            ("e", "0.0000000000000000001602176634", "Elementary Charge"),
        ]),
    ];
}

fn find_category(name: &str) -> CalcResult<&'static Category> {
    CATEGORIES
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CalcError::UnknownCategory(name.to_owned()))
}

fn find_unit(category: &str, unit: &str) -> CalcResult<&'static Unit> {
    find_category(category)?
        .units
        .iter()
        .find(|u| u.name == unit)
        .ok_or_else(|| CalcError::UnknownUnit(format!("{}.{}", category, unit)))
}

fn to_base(value: &str, scale: Scale) -> CalcResult {
    match scale {
        Scale::Linear(factor) => math::mul(value, factor),
        Scale::Affine {
            numerator,
            denominator,
            offset,
        } => {
            let shifted = math::sub(value, offset)?;
            math::div(&math::mul(&shifted, denominator)?, numerator)
        }
    }
}

fn from_base(base: &str, scale: Scale) -> CalcResult {
    match scale {
        Scale::Linear(factor) => math::div(base, factor),
        Scale::Affine {
            numerator,
            denominator,
            offset,
        } => {
            let scaled = math::div(&math::mul(base, numerator)?, denominator)?;
            math::add(&scaled, offset)
        }
    }
}

/// Lookup and conversion over the built-in unit tables
pub struct UnitConverter;

impl UnitConverter {
    pub fn categories() -> Vec<&'static str> {
        CATEGORIES.iter().map(|c| c.name).collect()
    }

    pub fn units(category: &str) -> CalcResult<Vec<&'static str>> {
        Ok(find_category(category)?.units.iter().map(|u| u.name).collect())
    }

    pub fn description(category: &str, unit: &str) -> CalcResult<&'static str> {
        Ok(find_unit(category, unit)?.description)
    }

    pub fn is_valid(category: &str, unit: &str) -> bool {
        find_unit(category, unit).is_ok()
    }

    /// Converts an exact decimal `value` from one unit of the category to
    /// another one
    pub fn convert(category: &str, value: &str, from: &str, to: &str) -> CalcResult {
        let from = find_unit(category, from)?;
        let to = find_unit(category, to)?;
        let value = value::normalize(value)?;
        if from.name == to.name {
            return Ok(value);
        }
        let base = to_base(&value, from.scale)?;
        from_base(&base, to.scale)
    }
}
