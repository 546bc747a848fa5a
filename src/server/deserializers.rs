use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

// page comes from the query string; anything that isn't an integer falls back
// to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or_else(first_page))
}
