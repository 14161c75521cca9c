use serde::de::DeserializeOwned;
use sst_core::risk::Nr17Ratings;

/// Parse an enum value using its serde names and aliases.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse six comma-separated 1-5 ratings.
pub fn parse_ratings(raw: &str) -> anyhow::Result<Nr17Ratings> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| anyhow::anyhow!("invalid rating '{}' in '{raw}'", part.trim()))
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;
    Ok(Nr17Ratings::from_slice(&values)?)
}
