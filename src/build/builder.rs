use crate::error::MapError;
use crate::info::{Arguments, ConstructorSpec, ParamSpec};
use crate::reflection::Constructible;
use crate::value::{MapKey, PlainMap, PlainValue};

// -----------------------------------------------------------------------------
// ArgumentPolicy

/// What happens when input omits a constructor parameter that declares no
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentPolicy {
    /// Fall back to the parameter type's vacant value where one exists
    /// (`None` for `Option`); error otherwise.
    #[default]
    Lenient,
    /// Error immediately, even for vacant-capable types.
    Strict,
}

// -----------------------------------------------------------------------------
// ObjectBuilder

/// Builds typed values from plain input fields.
///
/// Input maps match constructor parameters by name; sequences match by
/// position. Null input counts as absent, so a present-but-null field takes
/// the same default/vacant path as an omitted one. Any cast failure aborts
/// the whole construction.
///
/// # Examples
///
/// ```
/// use plainmap::derive::Mapped;
/// use plainmap::{ArgumentPolicy, ObjectBuilder, PlainMap, PlainValue};
///
/// #[derive(Mapped)]
/// struct Employee {
///     name: String,
///     #[mapped(default = String::from("general"))]
///     department: String,
/// }
///
/// let input: PlainMap = [("name", "Ana")].into_iter().collect();
/// let employee: Employee = ObjectBuilder::new().build(PlainValue::Map(input))?;
/// assert_eq!(employee.department, "general");
///
/// let strict = ObjectBuilder::with_policy(ArgumentPolicy::Strict);
/// assert!(strict.build::<Employee>(PlainValue::Map(PlainMap::new())).is_err());
/// # Ok::<(), plainmap::MapError>(())
/// ```
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    policy: ArgumentPolicy,
}

impl ObjectBuilder {
    /// Creates a builder with the [`Lenient`](ArgumentPolicy::Lenient)
    /// policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given missing-argument policy.
    pub fn with_policy(policy: ArgumentPolicy) -> Self {
        Self { policy }
    }

    /// Builds a `T` from plain input fields.
    pub fn build<T: Constructible>(&self, input: PlainValue) -> Result<T, MapError> {
        let spec = T::constructor_spec();
        let mut fields = coerce_fields(input);

        let mut args = Arguments::with_capacity(spec.param_len());
        for (position, param) in spec.params().iter().enumerate() {
            args.push(self.build_argument(&mut fields, param, position, spec)?);
        }

        T::construct(args)
    }

    fn build_argument(
        &self,
        fields: &mut PlainMap,
        param: &ParamSpec,
        position: usize,
        spec: &ConstructorSpec,
    ) -> Result<Box<dyn std::any::Any>, MapError> {
        let value = fields
            .take(param.name())
            .or_else(|| take_positional(fields, position));

        match value {
            Some(value) if !value.is_null() => param.cast(value),
            _ => {
                if let Some(default) = param.default_value() {
                    return Ok(default);
                }
                if self.policy == ArgumentPolicy::Lenient {
                    if let Some(vacant) = param.vacant_value() {
                        return Ok(vacant);
                    }
                }
                Err(MapError::missing_argument(param.name(), spec.target()))
            }
        }
    }
}

/// Coerces build input to a field map. Sequences become positionally keyed
/// maps, and a lone scalar becomes position 0, which is how an unwrapped
/// single-field wrapper finds its way back into a one-parameter constructor.
fn coerce_fields(input: PlainValue) -> PlainMap {
    match input {
        PlainValue::Map(map) => map,
        PlainValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (MapKey::Int(index as i64), item))
            .collect(),
        PlainValue::Null => PlainMap::new(),
        other => [(MapKey::Int(0), other)].into_iter().collect(),
    }
}

fn take_positional(fields: &mut PlainMap, position: usize) -> Option<PlainValue> {
    let wanted = MapKey::Int(position as i64);
    let mut found = None;
    *fields = std::mem::take(fields)
        .into_iter()
        .filter_map(|(key, value)| {
            if found.is_none() && key == wanted {
                found = Some(value);
                None
            } else {
                Some((key, value))
            }
        })
        .collect();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_input_fills_parameters_in_order() {
        let mut fields: PlainMap = [(MapKey::Int(0), PlainValue::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(take_positional(&mut fields, 0), Some(PlainValue::from("x")));
        assert_eq!(take_positional(&mut fields, 0), None);
    }
}
