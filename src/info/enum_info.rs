use crate::info::Type;
use crate::value::PlainValue;

// -----------------------------------------------------------------------------
// Backing

/// The primitive value backing an enum case.
///
/// Cases of a "backed" enum each carry one of these; cases of a pure (unit)
/// enum carry none and are represented by their symbolic name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Int(i64),
    Str(&'static str),
}

// -----------------------------------------------------------------------------
// CaseInfo

/// Information for a single enum case.
#[derive(Debug, Clone, Copy)]
pub struct CaseInfo {
    name: &'static str,
    backing: Option<Backing>,
}

impl CaseInfo {
    /// Creates a new [`CaseInfo`].
    #[inline]
    pub const fn new(name: &'static str, backing: Option<Backing>) -> Self {
        Self { name, backing }
    }

    /// Returns the symbolic case name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the backing value, if the case is backed.
    #[inline]
    pub const fn backing(&self) -> Option<Backing> {
        self.backing
    }

    /// Returns `true` if the given raw input selects this case.
    ///
    /// A backed case matches its backing value; every case also matches its
    /// symbolic name, backed or not.
    pub fn matches(&self, value: &PlainValue) -> bool {
        match self.backing {
            Some(Backing::Str(backing)) if value.as_str() == Some(backing) => return true,
            Some(Backing::Int(backing)) => match value {
                PlainValue::Int(raw) if *raw == backing => return true,
                PlainValue::UInt(raw) if i64::try_from(*raw) == Ok(backing) => return true,
                _ => {}
            },
            _ => {}
        }

        value.as_str() == Some(self.name)
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// A container for compile-time enum info.
///
/// Cases are kept in **declaration order**; import resolution scans them in
/// that order and the first match wins.
#[derive(Debug)]
pub struct EnumInfo {
    ty: Type,
    cases: Box<[CaseInfo]>,
}

impl EnumInfo {
    /// Creates a new [`EnumInfo`] for `T` from its cases, in declaration
    /// order.
    pub fn new<T: 'static>(cases: Vec<CaseInfo>) -> Self {
        Self {
            ty: Type::of::<T>(),
            cases: cases.into_boxed_slice(),
        }
    }

    /// Returns the [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the [`CaseInfo`] for the given case name, if present.
    pub fn case(&self, name: &str) -> Option<&CaseInfo> {
        self.cases.iter().find(|case| case.name() == name)
    }

    /// Returns the [`CaseInfo`] at the given index, if present.
    #[inline]
    pub fn case_at(&self, index: usize) -> Option<&CaseInfo> {
        self.cases.get(index)
    }

    /// Returns an iterator over the cases in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &CaseInfo> {
        self.cases.iter()
    }

    /// Returns the number of cases.
    #[inline]
    pub fn case_len(&self) -> usize {
        self.cases.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Backing, CaseInfo};
    use crate::value::PlainValue;

    #[test]
    fn backed_case_matches_backing_value_and_name() {
        let case = CaseInfo::new("Usd", Some(Backing::Str("USD")));

        assert!(case.matches(&PlainValue::from("USD")));
        assert!(case.matches(&PlainValue::from("Usd")));
        assert!(!case.matches(&PlainValue::from("BRL")));
    }

    #[test]
    fn int_backed_case_matches_uint_input() {
        let case = CaseInfo::new("High", Some(Backing::Int(3)));

        assert!(case.matches(&PlainValue::Int(3)));
        assert!(case.matches(&PlainValue::UInt(3)));
        assert!(!case.matches(&PlainValue::Int(2)));
    }

    #[test]
    fn pure_case_matches_name_only() {
        let case = CaseInfo::new("FIRE", None);

        assert!(case.matches(&PlainValue::from("FIRE")));
        assert!(!case.matches(&PlainValue::Int(0)));
    }
}
