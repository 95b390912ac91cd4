//! Metadata flag parsing and merging
//!
//! Two sources feed one map: repeatable `--metadata KEY=VALUE` flags (values
//! are always strings) and a `--metadata-json` object blob (values keep
//! their JSON types). On key collision the JSON blob wins - it is specified
//! last on the surface, so last specified wins.

use eyre::{Result, bail, eyre};
use serde_json::{Map, Value};

/// Parse one `KEY=VALUE` pair; the value is a JSON string
pub fn parse_pair(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| eyre!("Invalid --metadata '{}': expected KEY=VALUE", raw))?;
    if key.is_empty() {
        bail!("Invalid --metadata '{}': empty key", raw);
    }
    Ok((key.to_string(), Value::from(value)))
}

/// Parse a JSON blob that must be an object
pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).map_err(|e| eyre!("Invalid metadata JSON: {}", e))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Metadata JSON must be an object (key-value pairs)"),
    }
}

/// Merge `KEY=VALUE` pairs with an optional JSON object blob.
///
/// Pairs are inserted first, then the blob, so blob values override pair
/// values on collision.
pub fn merge(pairs: &[String], json: Option<&str>) -> Result<Map<String, Value>> {
    let mut merged = Map::new();
    for raw in pairs {
        let (key, value) = parse_pair(raw)?;
        merged.insert(key, value);
    }
    if let Some(raw) = json {
        for (key, value) in parse_json_object(raw)? {
            merged.insert(key, value);
        }
    }
    Ok(merged)
}

/// Validate a metadata filter and re-encode it canonically (compact
/// separators) for the query string
pub fn canonical_filter(raw: &str) -> Result<String> {
    let map = parse_json_object(raw).map_err(|e| eyre!("Invalid --metadata-filter: {}", e))?;
    Ok(serde_json::to_string(&Value::Object(map))?)
}
