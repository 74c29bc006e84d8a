use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

use crate::error::MapError;
use crate::value::PlainValue;

// -----------------------------------------------------------------------------
// Function pointer aliases

type CastFn = fn(PlainValue) -> Result<Box<dyn Any>, MapError>;
type DefaultFn = fn() -> Box<dyn Any>;
type VacantFn = fn() -> Option<Box<dyn Any>>;

/// Instantiates a type from a fully-cast [`Arguments`] list.
pub type InvokeFn = fn(Arguments) -> Result<Box<dyn Any>, MapError>;

// -----------------------------------------------------------------------------
// ParamSpec

/// Information for a single constructor parameter.
///
/// Carries the casting, default and vacant behavior as function pointers so
/// the [`ObjectBuilder`](crate::build::ObjectBuilder) can drive construction
/// without knowing the parameter's concrete type.
pub struct ParamSpec {
    name: &'static str,
    type_path: &'static str,
    cast: CastFn,
    default: Option<DefaultFn>,
    vacant: VacantFn,
}

impl ParamSpec {
    /// Creates a new [`ParamSpec`] for the parameter `name` of type `T`.
    ///
    /// The cast funnels through [`FromPlain`](crate::FromPlain); the vacant
    /// value is the type's own ([`None`] for `Option<T>`, nothing for most
    /// other types).
    pub fn new<T: crate::FromPlain + 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_path: core::any::type_name::<T>(),
            cast: |value| Ok(Box::new(T::from_plain(value)?) as Box<dyn Any>),
            default: None,
            vacant: || T::vacant().map(|value| Box::new(value) as Box<dyn Any>),
        }
    }

    /// Attaches a declared default, used when the input omits the parameter.
    pub fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns the parameter name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared type path of the parameter.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns `true` if the parameter declares a default value.
    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Casts a present, non-null input value to the parameter's type.
    #[inline]
    pub fn cast(&self, value: PlainValue) -> Result<Box<dyn Any>, MapError> {
        (self.cast)(value)
    }

    /// Produces the declared default value, if any.
    pub fn default_value(&self) -> Option<Box<dyn Any>> {
        self.default.map(|default| default())
    }

    /// Produces the type-appropriate vacant value, if the type has one.
    pub fn vacant_value(&self) -> Option<Box<dyn Any>> {
        (self.vacant)()
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("type_path", &self.type_path)
            .field("has_default", &self.has_default())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConstructorSpec

/// The ordered constructor parameter list of a constructible type, plus the
/// type-erased instantiation entry used by the registry.
pub struct ConstructorSpec {
    target: &'static str,
    params: Box<[ParamSpec]>,
    invoke: InvokeFn,
}

impl ConstructorSpec {
    /// Creates a new [`ConstructorSpec`] for `T` from its parameters, in
    /// declaration order.
    pub fn new<T: 'static>(params: Vec<ParamSpec>, invoke: InvokeFn) -> Self {
        Self {
            target: core::any::type_name::<T>(),
            params: params.into_boxed_slice(),
            invoke,
        }
    }

    /// Returns the constructed type's path.
    #[inline]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// Returns the parameters in declaration order.
    #[inline]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn param_len(&self) -> usize {
        self.params.len()
    }

    /// Instantiates the target from a fully-cast argument list.
    #[inline]
    pub fn invoke(&self, args: Arguments) -> Result<Box<dyn Any>, MapError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for ConstructorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSpec")
            .field("target", &self.target)
            .field("params", &self.params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Arguments

/// Cast constructor arguments, in declared parameter order.
///
/// The builder pushes exactly one argument per [`ParamSpec`];
/// [`Constructible::construct`](crate::Constructible::construct) takes them
/// back out in the same order.
#[derive(Default)]
pub struct Arguments {
    items: VecDeque<Box<dyn Any>>,
}

impl Arguments {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty argument list with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an argument.
    pub fn push(&mut self, arg: Box<dyn Any>) {
        self.items.push_back(arg);
    }

    /// Removes and returns the next argument as a `T`.
    ///
    /// Fails when the list is exhausted or the argument is not a `T`, which
    /// only happens when a hand-written [`ConstructorSpec`] disagrees with
    /// its `construct` implementation.
    pub fn take<T: Any>(&mut self, name: &'static str) -> Result<T, MapError> {
        let arg = self
            .items
            .pop_front()
            .ok_or_else(|| MapError::missing_argument(name, core::any::type_name::<T>()))?;

        match arg.downcast::<T>() {
            Ok(arg) => Ok(*arg),
            Err(_) => Err(MapError::mismatched_argument(
                name,
                core::any::type_name::<T>(),
            )),
        }
    }

    /// Returns the number of remaining arguments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no arguments remain.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Arguments;
    use crate::error::MapError;

    #[test]
    fn take_reports_an_exhausted_list_as_missing() {
        let mut args = Arguments::new();

        let error = args.take::<i64>("value").unwrap_err();
        assert!(matches!(error, MapError::MissingArgument { name, .. } if name == "value"));
    }

    #[test]
    fn take_reports_a_wrongly_typed_argument_as_mismatched() {
        let mut args = Arguments::new();
        args.push(Box::new(1i64));

        let error = args.take::<String>("label").unwrap_err();
        match error {
            MapError::MismatchedArgument { name, expected } => {
                assert_eq!(name, "label");
                assert!(expected.contains("String"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
