//! Typed writes of raw JSON values into struct fields.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use super::PatternStruct;

/// Writable view of one field, as returned by [`PatternStruct::slot`].
pub enum Slot<'a> {
    Value(&'a mut dyn ValueSlot),
    Map(&'a mut dyn MapSlot),
    Embedded(&'a mut dyn PatternStruct),
}

impl Slot<'_> {
    /// Short label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Value(_) => "value",
            Slot::Map(_) => "map",
            Slot::Embedded(_) => "embedded struct",
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.label()).finish()
    }
}

/// A destination decoded wholesale from one raw value.
pub trait ValueSlot {
    fn decode_raw(&mut self, raw: &RawValue) -> serde_json::Result<()>;
}

impl<T: DeserializeOwned> ValueSlot for T {
    fn decode_raw(&mut self, raw: &RawValue) -> serde_json::Result<()> {
        *self = serde_json::from_str(raw.get())?;
        Ok(())
    }
}

/// A string-keyed map destination.
pub trait MapSlot {
    /// Replace the whole map with a decoded JSON object (exact-name binding).
    fn replace_raw(&mut self, raw: &RawValue) -> serde_json::Result<()>;

    /// Decode `raw` into the value type and insert it under `key`.
    ///
    /// The map is left untouched when the value fails to decode.
    fn insert_raw(&mut self, key: &str, raw: &RawValue) -> serde_json::Result<()>;
}

impl<V, S> MapSlot for HashMap<String, V, S>
where
    V: DeserializeOwned,
    S: BuildHasher + Default,
{
    fn replace_raw(&mut self, raw: &RawValue) -> serde_json::Result<()> {
        *self = serde_json::from_str(raw.get())?;
        Ok(())
    }

    fn insert_raw(&mut self, key: &str, raw: &RawValue) -> serde_json::Result<()> {
        let value: V = serde_json::from_str(raw.get())?;
        self.insert(key.to_owned(), value);
        Ok(())
    }
}

impl<V> MapSlot for BTreeMap<String, V>
where
    V: DeserializeOwned,
{
    fn replace_raw(&mut self, raw: &RawValue) -> serde_json::Result<()> {
        *self = serde_json::from_str(raw.get())?;
        Ok(())
    }

    fn insert_raw(&mut self, key: &str, raw: &RawValue) -> serde_json::Result<()> {
        let value: V = serde_json::from_str(raw.get())?;
        self.insert(key.to_owned(), value);
        Ok(())
    }
}

impl MapSlot for serde_json::Map<String, serde_json::Value> {
    fn replace_raw(&mut self, raw: &RawValue) -> serde_json::Result<()> {
        *self = serde_json::from_str(raw.get())?;
        Ok(())
    }

    fn insert_raw(&mut self, key: &str, raw: &RawValue) -> serde_json::Result<()> {
        let value: serde_json::Value = serde_json::from_str(raw.get())?;
        self.insert(key.to_owned(), value);
        Ok(())
    }
}

// `None` is materialized only once a value has decoded successfully.
impl<M> MapSlot for Option<M>
where
    M: MapSlot + Default + DeserializeOwned,
{
    fn replace_raw(&mut self, raw: &RawValue) -> serde_json::Result<()> {
        *self = serde_json::from_str(raw.get())?;
        Ok(())
    }

    fn insert_raw(&mut self, key: &str, raw: &RawValue) -> serde_json::Result<()> {
        match self {
            Some(map) => map.insert_raw(key, raw),
            None => {
                let mut map = M::default();
                map.insert_raw(key, raw)?;
                *self = Some(map);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    #[test]
    fn test_value_slot_overwrites() {
        let mut value = 1u32;
        value.decode_raw(&raw("42")).unwrap();
        assert_eq!(value, 42);

        assert!(value.decode_raw(&raw("\"nope\"")).is_err());
        assert_eq!(value, 42);
    }

    #[test]
    fn test_map_slot_insert() {
        let mut map: HashMap<String, i64> = HashMap::new();
        map.insert_raw("dyn_a", &raw("1")).unwrap();
        map.insert_raw("dyn_b", &raw("2")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["dyn_b"], 2);

        assert!(map.insert_raw("dyn_c", &raw("\"x\"")).is_err());
        assert!(!map.contains_key("dyn_c"));
    }

    #[test]
    fn test_optional_map_materialized_lazily() {
        let mut map: Option<BTreeMap<String, bool>> = None;

        assert!(map.insert_raw("flag", &raw("3")).is_err());
        assert!(map.is_none());

        map.insert_raw("flag", &raw("true")).unwrap();
        assert_eq!(map.as_ref().map(|m| m["flag"]), Some(true));
    }

    #[test]
    fn test_json_object_map_slot() {
        let mut map = serde_json::Map::new();
        map.insert_raw("x_a", &raw("1")).unwrap();
        map.insert_raw("x_b", &raw(r#"{"nested":true}"#)).unwrap();
        assert_eq!(map["x_a"], serde_json::json!(1));
        assert_eq!(map["x_b"]["nested"], serde_json::json!(true));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_map_replace() {
        let mut map: BTreeMap<String, u8> = BTreeMap::new();
        map.insert("stale".into(), 9);
        map.replace_raw(&raw(r#"{"a":1}"#)).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], 1);
    }
}
