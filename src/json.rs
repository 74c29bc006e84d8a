use crate::error::MapError;
use crate::value::PlainValue;

/// Renders resolved plain data as JSON.
///
/// One rule sits above standard JSON rendering: a top-level collection whose
/// every element is empty in the falsy sense (null, `false`, `0`, `0.0`,
/// `""`, empty collection) renders as exactly `[]`, regardless of element
/// count. The rule applies only at the top level; nested emptiness renders
/// normally, so `{"value":[]}` stays nested. Unicode is emitted literally
/// and floats keep their fractional form.
#[derive(Debug, Default)]
pub struct JsonMapper;

impl JsonMapper {
    /// Renders a plain value as a JSON string.
    pub fn render(value: &PlainValue) -> Result<String, MapError> {
        if Self::is_all_empty(value) {
            return Ok("[]".to_owned());
        }
        Ok(serde_json::to_string(value)?)
    }

    fn is_all_empty(value: &PlainValue) -> bool {
        match value {
            PlainValue::Array(items) => items.iter().all(PlainValue::is_empty),
            PlainValue::Map(map) => map.values().all(PlainValue::is_empty),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PlainMap;

    #[test]
    fn all_empty_top_level_collapses() {
        let input = PlainValue::Array(vec![
            PlainValue::Array(Vec::new()),
            PlainValue::Str(String::new()),
            PlainValue::Null,
            PlainValue::Int(0),
            PlainValue::Bool(false),
        ]);
        assert_eq!(JsonMapper::render(&input).unwrap(), "[]");
    }

    #[test]
    fn nested_emptiness_renders_normally() {
        let map: PlainMap = [("value", PlainValue::Array(Vec::new()))]
            .into_iter()
            .collect();
        // The map's single value is empty, so the top-level rule collapses
        // it; wrap it once to see the nested rendering.
        let wrapped = PlainValue::Array(vec![PlainValue::Int(1), PlainValue::Map(map)]);
        assert_eq!(
            JsonMapper::render(&wrapped).unwrap(),
            r#"[1,{"value":[]}]"#
        );
    }

    #[test]
    fn floats_keep_their_fraction() {
        let input = PlainValue::Array(vec![PlainValue::Float(100.0), PlainValue::Int(100)]);
        assert_eq!(JsonMapper::render(&input).unwrap(), "[100.0,100]");
    }

    #[test]
    fn unicode_is_emitted_literally() {
        let input = PlainValue::from("maçã");
        assert_eq!(JsonMapper::render(&input).unwrap(), r#""maçã""#);
    }
}
