//! PropertyMap — the key-value store on nodes and relationships.

use hashbrown::HashMap;

use super::Value;
use crate::temporal::Time;
use crate::{Error, Result};

/// A map of property names to values.
pub type PropertyMap = HashMap<String, Value>;

/// Build a PropertyMap from `(key, value)` pairs.
pub fn props<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Read `key` from `properties` as a time value.
///
/// `entity` names the owner in the error message (e.g. `"relationship 4"`).
pub(crate) fn read_time(properties: &PropertyMap, entity: impl FnOnce() -> String, key: &str) -> Result<Time> {
    let value = properties.get(key).ok_or_else(|| Error::PropertyMissing {
        entity: entity(),
        key: key.to_string(),
    })?;
    value.as_time().ok_or_else(|| Error::TypeError {
        expected: format!("numeric '{key}'"),
        got: value.type_name().into(),
    })
}
