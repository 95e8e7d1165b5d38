use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};

use crate::error::AgriError;
use crate::views::Notice;

/// Form fields left blank arrive as `""`; read them as `None` instead of failing to parse.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Error notice shown when a write fails and the form is rendered again.
pub fn failure_notice(action: &str, entity: &str, err: &AgriError) -> Notice {
    tracing::warn!("Failed to {} {}: {}", action, entity, err);
    Notice::error(format!("Failed to {} {}. Error: {}", action, entity, err))
}
