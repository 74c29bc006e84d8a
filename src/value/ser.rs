//! Serde integration for the plain data model.
//!
//! The import/export pipelines never touch serde themselves; only the
//! rendered [`PlainValue`] tree is driven through a `Serializer` here, which
//! is what keeps the JSON facade key-structure-agnostic.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{MapKey, PlainMap, PlainValue};

impl Serialize for PlainValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for PlainMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

impl Serialize for MapKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // JSON object keys are strings; serde_json quotes integer keys.
            Self::Int(key) => serializer.serialize_i64(*key),
            Self::Str(key) => serializer.serialize_str(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::{PlainMap, PlainValue};

    #[test]
    fn scalars_keep_their_tags() {
        let items = PlainValue::Array(vec![
            PlainValue::Int(i64::MAX),
            PlainValue::from("red"),
            PlainValue::Float(100.0),
            PlainValue::Bool(true),
            PlainValue::Null,
        ]);

        let rendered = serde_json::to_string(&items).unwrap();
        assert_eq!(rendered, r#"[9223372036854775807,"red",100.0,true,null]"#);
    }

    #[test]
    fn integer_keys_render_as_object_keys() {
        let map: PlainMap = [(10_i64, "a")].into_iter().collect();

        let rendered = serde_json::to_string(&PlainValue::Map(map)).unwrap();
        assert_eq!(rendered, r#"{"10":"a"}"#);
    }
}
