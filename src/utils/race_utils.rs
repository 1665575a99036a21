use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub const UNKNOWN_COMPOUND: &str = "UNKNOWN";

pub const COMPOUND_LEGEND: [(&str, &str); 6] = [
    ("SOFT", "#FF3333"),
    ("MEDIUM", "#FFD700"),
    ("HARD", "#F0F0F0"),
    ("INTERMEDIATE", "#39B54A"),
    ("WET", "#00AEEF"),
    (UNKNOWN_COMPOUND, "#808080"),
];

pub fn map_compound(external: &str) -> &'static str {
    match external.trim().to_uppercase().as_str() {
        "SOFT" => "SOFT",
        "MEDIUM" => "MEDIUM",
        "HARD" => "HARD",
        "INTERMEDIATE" => "INTERMEDIATE",
        "WET" => "WET",
        _ => UNKNOWN_COMPOUND,
    }
}

pub fn compound_color(compound: &str) -> &'static str {
    let compound = map_compound(compound);
    COMPOUND_LEGEND
        .iter()
        .find(|(name, _)| *name == compound)
        .map(|(_, color)| *color)
        .unwrap_or("#808080")
}

/// Parses lap times written as `m:ss.sss`, `h:mm:ss.sss` or plain seconds.
pub fn parse_lap_time(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut seconds = 0.0;
    for part in raw.split(':') {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        seconds = seconds * 60.0 + value;
    }
    Some(seconds)
}

/// Historical API numbers arrive as strings.
pub fn parse_int(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}

pub fn parse_float(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `12`, `"12"` or `null` for an optional string field.
pub fn de_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Reads an explicit `null` the same as a missing key.
pub fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a duration given as seconds or as a lap-time string.
pub fn de_opt_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => parse_lap_time(&s),
        _ => None,
    })
}

/// Serializes a missing best finish as `"N/A"`.
pub mod not_available {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(position) => serializer.serialize_u32(*position),
            None => serializer.serialize_str("N/A"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_u64().and_then(|v| u32::try_from(v).ok()))
    }
}
