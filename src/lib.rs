#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// `crate` inside the crate itself, `plainmap` in derive expansions and doc
// tests; the extern self makes both spellings resolve here.
extern crate self as plainmap;

// -----------------------------------------------------------------------------
// Modules

mod build;
mod error;
mod impls;
mod json;
mod reflection;
mod value;

pub mod info;
pub mod registry;
pub mod resolve;

// -----------------------------------------------------------------------------
// Top-level exports

pub use build::{ArgumentPolicy, ObjectBuilder};
pub use error::MapError;
pub use impls::{ArrayCursor, LazySeq, Thunk};
pub use json::JsonMapper;
pub use plainmap_derive as derive;
pub use reflection::{
    Collectible, CollectionMapped, Constructible, EnumMapped, FromPlain, Mapped, MappedKind,
    MappedRef, Mapper, Scalar, StructMapped,
};
pub use resolve::{StrategyResolver, ValueResolver};
pub use value::{KeyPreservation, MapKey, PlainMap, PlainValue};

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    use crate::derive::Mapped;
    use crate::{
        ArgumentPolicy, Collectible, FromPlain, KeyPreservation, MapError, Mapper, ObjectBuilder,
        PlainMap, PlainValue, Thunk,
    };

    // ------------------------------------------------------------------------
    // Fixtures

    #[derive(Mapped)]
    struct Amount {
        value: f64,
    }

    #[derive(Mapped)]
    struct Product {
        name: String,
        amount: Amount,
    }

    #[derive(Mapped, Debug, PartialEq)]
    enum Currency {
        #[mapped(value = "BRL")]
        Brl,
        #[mapped(value = "USD")]
        Usd,
    }

    #[derive(Mapped, Debug, PartialEq)]
    enum Element {
        Fire,
        Water,
    }

    #[derive(Mapped, Debug, PartialEq)]
    enum Severity {
        #[mapped(value = 1)]
        Low,
        #[mapped(value = 3)]
        High,
    }

    #[derive(Mapped)]
    struct Order {
        id: i64,
        currency: Currency,
        products: Vec<Product>,
        created_at: DateTime<Utc>,
    }

    #[derive(Mapped, Debug)]
    struct Employee {
        name: String,
        #[mapped(default = String::from("general"))]
        department: String,
        #[mapped(default)]
        tags: Vec<String>,
    }

    // Wrapper chain: Deep -> Mid -> Leaf -> i64.
    #[derive(Mapped)]
    struct Leaf {
        value: i64,
    }

    #[derive(Mapped)]
    struct Mid {
        value: Leaf,
    }

    #[derive(Mapped)]
    struct Deep {
        value: Mid,
    }

    struct Basket(Vec<Product>);

    impl Collectible for Basket {
        type Element = Product;

        fn create_from(elements: Vec<Product>) -> Self {
            Self(elements)
        }

        fn elements(&self) -> &[Product] {
            &self.0
        }
    }

    crate::impl_collectible!(Basket);

    fn sample_order() -> Order {
        Order {
            id: 42,
            currency: Currency::Usd,
            products: vec![
                Product {
                    name: "book".to_owned(),
                    amount: Amount { value: 9.99 },
                },
                Product {
                    name: "pen".to_owned(),
                    amount: Amount { value: 1.5 },
                },
            ],
            created_at: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    // ------------------------------------------------------------------------
    // Export

    #[test]
    fn struct_exports_fields_in_declaration_order() {
        assert_eq!(
            sample_order().to_json().unwrap(),
            r#"{"id":42,"currency":"USD","products":[{"name":"book","amount":9.99},{"name":"pen","amount":1.5}],"created_at":"2000-01-01 00:00:00"}"#
        );
    }

    #[test]
    fn wrapper_chain_unwraps_to_the_bottom() {
        let deep = Deep {
            value: Mid {
                value: Leaf { value: 7 },
            },
        };

        // The receiver keeps its own field name; the chain below collapses.
        assert_eq!(deep.to_json().unwrap(), r#"{"value":7}"#);
    }

    #[test]
    fn backed_enum_exports_backing_value() {
        let plain = sample_order().to_plain();
        let PlainValue::Map(map) = plain else {
            panic!("expected a map");
        };
        assert_eq!(map.get("currency"), Some(&PlainValue::from("USD")));
    }

    #[test]
    fn pure_enum_exports_symbolic_name() {
        assert_eq!(
            vec![Element::Fire, Element::Water].to_json().unwrap(),
            r#"["Fire","Water"]"#
        );
    }

    #[test]
    fn int_backed_enum_exports_backing_value() {
        assert_eq!(vec![Severity::High].to_json().unwrap(), "[3]");
    }

    #[test]
    fn discard_reindexes_every_nesting_level() {
        assert_eq!(
            sample_order()
                .to_json_with(KeyPreservation::Discard)
                .unwrap(),
            r#"[42,"USD",[["book",9.99],["pen",1.5]],"2000-01-01 00:00:00"]"#
        );
    }

    #[test]
    fn date_at_non_zero_offset_exports_iso8601() {
        #[derive(Mapped)]
        struct Stamp {
            at: DateTime<FixedOffset>,
        }

        let stamp = Stamp {
            at: FixedOffset::west_opt(2 * 3600)
                .unwrap()
                .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
                .unwrap(),
        };
        assert_eq!(
            stamp.to_json().unwrap(),
            r#"{"at":"2000-01-01T00:00:00-02:00"}"#
        );
    }

    #[test]
    fn thunk_exports_as_empty_sequence() {
        #[derive(Mapped)]
        struct Callback {
            name: String,
            action: Thunk<i64>,
        }

        let callback = Callback {
            name: "later".to_owned(),
            action: Thunk::new(5),
        };
        assert_eq!(
            callback.to_json().unwrap(),
            r#"{"name":"later","action":[]}"#
        );
    }

    #[test]
    fn scalar_collection_preserves_exact_types() {
        let mixed = vec![
            PlainValue::Int(i64::MAX),
            PlainValue::from("red"),
            PlainValue::Float(3.14),
            PlainValue::Bool(true),
            PlainValue::Bool(false),
            PlainValue::Null,
            PlainValue::Map([("id", 1)].into_iter().collect()),
        ];
        assert_eq!(
            mixed.to_json().unwrap(),
            r#"[9223372036854775807,"red",3.14,true,false,null,{"id":1}]"#
        );
    }

    #[test]
    fn all_empty_top_level_sequence_renders_empty_array() {
        let hollow = vec![
            PlainValue::Array(Vec::new()),
            PlainValue::Str(String::new()),
            PlainValue::Null,
            PlainValue::Int(0),
            PlainValue::Bool(false),
        ];
        assert_eq!(hollow.to_json().unwrap(), "[]");
    }

    #[test]
    fn collectible_exports_like_a_sequence() {
        let basket = Basket::create_from(vec![Product {
            name: "book".to_owned(),
            amount: Amount { value: 9.99 },
        }]);
        assert_eq!(
            basket.to_json().unwrap(),
            r#"[{"name":"book","amount":9.99}]"#
        );
    }

    // ------------------------------------------------------------------------
    // Import

    #[test]
    fn from_iterable_round_trips_default_mappings() {
        let order = sample_order();
        let again = Order::from_iterable(order.to_plain()).unwrap();
        assert_eq!(again.to_plain(), order.to_plain());
    }

    #[test]
    fn backed_enum_imports_by_backing_value_or_name() {
        assert_eq!(
            Currency::from_plain(PlainValue::from("BRL")).unwrap(),
            Currency::Brl
        );
        assert_eq!(
            Currency::from_plain(PlainValue::from("Usd")).unwrap(),
            Currency::Usd
        );
    }

    #[test]
    fn invalid_enum_input_fails_with_value_and_target() {
        let error = Currency::from_plain(PlainValue::from("INVALID")).unwrap_err();
        let MapError::InvalidCast { value, target } = &error else {
            panic!("expected an invalid cast, got {error}");
        };
        assert_eq!(value.as_str(), Some("INVALID"));
        assert!(target.contains("Currency"));
    }

    #[test]
    fn int_backed_enum_imports_by_backing_value() {
        assert_eq!(
            Severity::from_plain(PlainValue::Int(3)).unwrap(),
            Severity::High
        );
        assert!(Severity::from_plain(PlainValue::Int(2)).is_err());
    }

    #[test]
    fn omitted_defaulted_argument_surfaces_the_default() {
        let input: PlainMap = [("name", "Ana")].into_iter().collect();
        let employee = Employee::from_iterable(input).unwrap();

        assert_eq!(employee.department, "general");
        assert!(employee.tags.is_empty());
        assert_eq!(
            employee.to_json().unwrap(),
            r#"{"name":"Ana","department":"general","tags":[]}"#
        );
    }

    #[test]
    fn null_input_counts_as_absent() {
        let mut input = PlainMap::new();
        input.insert("name", "Ana");
        input.insert("department", PlainValue::Null);
        input.insert("tags", PlainValue::Null);

        let employee = Employee::from_iterable(input).unwrap();
        assert_eq!(employee.department, "general");
    }

    #[test]
    fn missing_required_argument_fails() {
        let error = Employee::from_iterable(PlainMap::new()).unwrap_err();
        assert!(matches!(error, MapError::MissingArgument { .. }));
    }

    #[test]
    fn strict_policy_rejects_vacant_fallback() {
        #[derive(Mapped)]
        struct Note {
            text: Option<String>,
        }

        let lenient: Note = ObjectBuilder::new()
            .build(PlainValue::Map(PlainMap::new()))
            .unwrap();
        assert_eq!(lenient.text, None);

        let strict = ObjectBuilder::with_policy(ArgumentPolicy::Strict);
        assert!(
            strict
                .build::<Note>(PlainValue::Map(PlainMap::new()))
                .is_err()
        );
    }

    #[test]
    fn wrapper_round_trips_through_its_scalar_form() {
        let deep = Deep {
            value: Mid {
                value: Leaf { value: 7 },
            },
        };

        let again = Deep::from_iterable(deep.to_plain()).unwrap();
        assert_eq!(again.to_plain(), deep.to_plain());
    }

    #[test]
    fn collectible_imports_element_wise() {
        let input = PlainValue::Array(vec![PlainValue::Map(
            [
                ("name", PlainValue::from("book")),
                ("amount", PlainValue::Float(9.99)),
            ]
            .into_iter()
            .collect(),
        )]);

        let basket = Basket::from_plain(input).unwrap();
        assert_eq!(basket.elements().len(), 1);
        assert_eq!(basket.elements()[0].name, "book");
        assert_eq!(basket.elements()[0].amount.value, 9.99);
    }

    // ------------------------------------------------------------------------
    // Registry

    #[test]
    fn registry_builds_by_path_and_name() {
        let mut registry = crate::registry::TypeRegistry::new();
        registry.register_constructible::<Employee>();

        let meta = registry.get_by_name("Employee").unwrap();
        let path = meta.ty().path();

        let input: PlainMap = [("name", "Ana")].into_iter().collect();
        let built = registry
            .build_by_path(path, PlainValue::Map(input))
            .unwrap();
        let employee = built.downcast::<Employee>().unwrap();
        assert_eq!(employee.department, "general");

        assert!(matches!(
            registry.get_by_path("nowhere::Missing"),
            Err(MapError::UnknownType { .. })
        ));
    }

    #[test]
    fn registry_resolves_a_collectible_by_path() {
        let mut registry = crate::registry::TypeRegistry::new();
        registry.register::<Basket>();

        let path = <Basket as crate::info::Typed>::type_info().type_path();
        let meta = registry.get_by_path(path).unwrap();
        let collection = meta.info().as_collection().unwrap();
        assert_eq!(collection.element().name(), "Product");

        let by_name = registry.get_by_name("Basket").unwrap();
        assert_eq!(by_name.ty().path(), path);
    }

    #[test]
    fn registry_rejects_building_a_described_only_type() {
        let mut registry = crate::registry::TypeRegistry::new();
        registry.register::<Product>();

        let path = <Product as crate::info::Typed>::type_info().type_path();
        assert!(matches!(
            registry.build_by_path(path, PlainValue::Null),
            Err(MapError::NotConstructible { .. })
        ));
    }
}
