//! Unit tests for TypedVector.
//!
//! Every value crossing the boundary of a typed vector is checked; a
//! rejected value leaves the receiver untouched.

use assoc_vector::element::{ClassRegistry, ElementType, Object, ResourceHandle, Value};
use assoc_vector::error::VectorError;
use assoc_vector::vector::{Collection, Key, TypedVector, Vector};
use rstest::{fixture, rstest};

fn integers(pairs: &[(Key, i64)]) -> TypedVector {
    TypedVector::new(
        ElementType::Integer,
        pairs.iter().map(|(key, value)| (*key, Value::Integer(*value))),
    )
    .unwrap()
}

fn texts(values: &[&str]) -> TypedVector {
    TypedVector::from_values(ElementType::Text, values.iter().map(|value| Value::from(*value))).unwrap()
}

fn mismatch(expected: &str, found: &str) -> VectorError {
    VectorError::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

fn vector_mismatch(expected: &str, found: &str) -> VectorError {
    mismatch(&format!("vector of {expected}"), &format!("vector of {found}"))
}

#[fixture]
fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.register("Shape", None).unwrap();
    registry.register("Circle", Some("Shape")).unwrap();
    registry.register("Invoice", None).unwrap();
    registry
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
#[case("integer", vec![Value::Integer(1), Value::Integer(2)])]
#[case("string", vec![Value::from("Foo"), Value::from("Baz")])]
#[case("double", vec![Value::Float(1.5)])]
#[case("boolean", vec![Value::Boolean(true), Value::Boolean(false)])]
#[case("array", vec![Value::Sequence(vec![Value::Integer(1)]), Value::Sequence(vec![])])]
#[case("resource", vec![Value::Handle(ResourceHandle::new("stream"))])]
#[case("integer", vec![])]
fn test_with_tag_accepts_matching_values(
    registry: ClassRegistry,
    #[case] tag: &str,
    #[case] values: Vec<Value>,
) {
    let pairs: Vec<(Key, Value)> = (0..).zip(values.clone()).collect();
    let vector = TypedVector::with_tag(tag, &registry, pairs).unwrap();

    assert_eq!(vector.element_type().name(), tag);
    assert_eq!(vector.values(), values);
}

#[rstest]
#[case("strin")]
#[case("Integer")]
#[case("")]
#[case("DateTime")]
fn test_with_tag_unknown_tag_fails(registry: ClassRegistry, #[case] tag: &str) {
    assert_eq!(
        TypedVector::with_tag(tag, &registry, []).err(),
        Some(VectorError::InvalidType { tag: tag.to_string() })
    );
}

#[rstest]
#[case(ElementType::Integer, Value::Float(1.0), "integer", "double")]
#[case(ElementType::Integer, Value::from("1"), "integer", "string")]
#[case(ElementType::Text, Value::Integer(1), "string", "integer")]
#[case(ElementType::Float, Value::Integer(1), "double", "integer")]
#[case(ElementType::Boolean, Value::Integer(0), "boolean", "integer")]
#[case(ElementType::Sequence, Value::from("[]"), "array", "string")]
#[case(ElementType::Handle, Value::from("stream"), "resource", "string")]
fn test_construction_rejects_mismatched_values(
    #[case] element_type: ElementType,
    #[case] value: Value,
    #[case] expected: &str,
    #[case] found: &str,
) {
    assert_eq!(
        TypedVector::from_values(element_type, [value]).err(),
        Some(mismatch(expected, found))
    );
}

#[rstest]
fn test_null_is_accepted_by_every_type(registry: ClassRegistry) {
    for tag in ["integer", "string", "double", "boolean", "array", "resource", "Shape"] {
        let vector = TypedVector::with_tag(tag, &registry, [(0, Value::Null)]).unwrap();
        assert_eq!(vector.get(0), Some(&Value::Null), "{tag}");
        assert!(vector.set(1, Value::Null).is_ok(), "{tag}");
    }
}

// =============================================================================
// Named classes
// =============================================================================

#[rstest]
fn test_named_type_accepts_subclass_instances(registry: ClassRegistry) {
    let shape = registry.lookup("Shape").unwrap();
    let circle = registry.lookup("Circle").unwrap();
    let invoice = registry.lookup("Invoice").unwrap();

    let shapes = TypedVector::with_tag(
        "Shape",
        &registry,
        [(0, Value::Object(Object::new(shape)))],
    )
    .unwrap();

    let with_circle = shapes
        .push([Value::Object(Object::new(circle).with_property("radius", 2.0))])
        .unwrap();
    assert_eq!(with_circle.len(), 2);
    assert_eq!(
        with_circle
            .last_value()
            .and_then(Value::as_object)
            .and_then(|object| object.property("radius")),
        Some(&Value::Float(2.0))
    );

    assert_eq!(
        shapes.push([Value::Object(Object::new(invoice))]).err(),
        Some(mismatch("Shape", "Invoice"))
    );
}

#[rstest]
fn test_named_type_rejects_primitives(registry: ClassRegistry) {
    let circles = TypedVector::with_tag("Circle", &registry, []).unwrap();
    assert_eq!(
        circles.set(0, Value::Integer(1)).err(),
        Some(mismatch("Circle", "integer"))
    );
}

#[rstest]
fn test_parent_instances_are_not_subclass_instances(registry: ClassRegistry) {
    let shape = registry.lookup("Shape").unwrap();
    let circles = TypedVector::with_tag("Circle", &registry, []).unwrap();
    assert_eq!(
        circles.push([Value::Object(Object::new(shape))]).err(),
        Some(mismatch("Circle", "Shape"))
    );
}

#[rstest]
fn test_equally_named_class_from_another_registry_is_another_type(registry: ClassRegistry) {
    let mut unrelated = ClassRegistry::new();
    let foreign_shape = unrelated.register("Shape", None).unwrap();

    let shapes = TypedVector::with_tag("Shape", &registry, []).unwrap();
    let foreign_shapes = TypedVector::with_tag(
        "Shape",
        &unrelated,
        [(0, Value::Object(Object::new(foreign_shape.clone())))],
    )
    .unwrap();

    assert_ne!(shapes.element_type(), foreign_shapes.element_type());
    assert_eq!(
        shapes.merge(&foreign_shapes).err(),
        Some(vector_mismatch("Shape", "Shape"))
    );
    assert_eq!(
        shapes.push([Value::Object(Object::new(foreign_shape))]).err(),
        Some(mismatch("Shape", "Shape"))
    );
}

// =============================================================================
// Value boundaries
// =============================================================================

#[rstest]
fn test_set_checks_value() {
    let vector = integers(&[(0, 1)]);

    assert_eq!(
        vector.set(1, Value::Float(12.12)).err(),
        Some(mismatch("integer", "double"))
    );
    assert_eq!(
        vector.set(0, Value::Integer(5)).unwrap().pairs(),
        vec![(0, Value::Integer(5))]
    );
    assert_eq!(vector.pairs(), vec![(0, Value::Integer(1))]);
}

#[rstest]
fn test_defaults_are_checked_even_when_unused() {
    let vector = integers(&[(3, 7)]);

    assert_eq!(
        vector.get_or(3, Value::from("default")).err(),
        Some(mismatch("integer", "string"))
    );
    assert_eq!(vector.get_or(3, Value::Integer(0)), Ok(Value::Integer(7)));
    assert_eq!(vector.get_or(4, Value::Integer(0)), Ok(Value::Integer(0)));
    assert_eq!(
        vector.first_value_or(Value::Boolean(true)).err(),
        Some(mismatch("integer", "boolean"))
    );
    assert_eq!(vector.first_value_or(Value::Null), Ok(Value::Integer(7)));
    assert_eq!(
        vector.last_value_or(Value::Float(0.0)).err(),
        Some(mismatch("integer", "double"))
    );

    let empty = TypedVector::empty(ElementType::Integer);
    assert_eq!(empty.last_value_or(Value::Integer(42)), Ok(Value::Integer(42)));
}

#[rstest]
fn test_contains_checks_needle() {
    let vector = integers(&[(0, 1), (1, 2)]);

    assert_eq!(vector.contains(&Value::Integer(2)), Ok(true));
    assert_eq!(vector.contains(&Value::Integer(3)), Ok(false));
    assert_eq!(
        vector.contains(&Value::from("2")).err(),
        Some(mismatch("integer", "string"))
    );
    assert_eq!(
        vector.contains_loose(&Value::Float(2.0)).err(),
        Some(mismatch("integer", "double"))
    );
    assert_eq!(vector.contains_loose(&Value::Null), Ok(false));
}

#[rstest]
fn test_contains_loose_on_texts() {
    let vector = texts(&["10", "Foo"]);
    assert_eq!(vector.contains_loose(&Value::from("1e1")), Ok(true));
    assert_eq!(vector.contains(&Value::from("1e1")), Ok(false));
}

#[rstest]
fn test_map_checks_results() {
    let vector = integers(&[(0, 1), (4, 2)]);

    let doubled = vector
        .map(|value, _| Value::Integer(value.as_integer().unwrap_or(0) * 2))
        .unwrap();
    assert_eq!(
        doubled.pairs(),
        vec![(0, Value::Integer(2)), (4, Value::Integer(4))]
    );
    assert_eq!(doubled.element_type(), &ElementType::Integer);

    assert_eq!(
        vector.map(|value, _| Value::from(value.to_string())).err(),
        Some(mismatch("integer", "string"))
    );
}

#[rstest]
fn test_push_and_unshift_check_every_value() {
    let vector = integers(&[(0, 1)]);

    assert_eq!(
        vector.push([Value::Integer(2), Value::from("3")]).err(),
        Some(mismatch("integer", "string"))
    );
    assert_eq!(
        vector.unshift([Value::Boolean(true)]).err(),
        Some(mismatch("integer", "boolean"))
    );
    assert_eq!(
        vector.push([Value::Integer(2)]).unwrap().pairs(),
        vec![(0, Value::Integer(1)), (1, Value::Integer(2))]
    );
    assert_eq!(
        vector.unshift([Value::Integer(0)]).unwrap().pairs(),
        vec![(-1, Value::Integer(0)), (0, Value::Integer(1))]
    );
    assert_eq!(vector.len(), 1);
}

#[rstest]
fn test_push_overflow_fails() {
    let vector = integers(&[(Key::MAX, 1)]);
    assert!(matches!(
        vector.push([Value::Integer(2)]),
        Err(VectorError::InvalidArgument { .. })
    ));
}

#[rstest]
fn test_diff_and_intersect_check_comparands() {
    let vector = integers(&[(0, 1), (1, 3), (2, 5)]);

    assert_eq!(
        vector.diff(&[Value::Integer(1), Value::Integer(2)]).unwrap().pairs(),
        vec![(1, Value::Integer(3)), (2, Value::Integer(5))]
    );
    assert_eq!(
        vector.intersect(&[Value::Integer(5)]).unwrap().pairs(),
        vec![(2, Value::Integer(5))]
    );
    assert_eq!(
        vector.diff(&[Value::from("1")]).err(),
        Some(mismatch("integer", "string"))
    );
    assert_eq!(
        vector.intersect(&[Value::Integer(1), Value::Float(3.0)]).err(),
        Some(mismatch("integer", "double"))
    );
}

#[rstest]
fn test_replace_checks_values() {
    let vector = integers(&[(1, 1)]);

    assert_eq!(
        vector.replace([(1, Value::Integer(9)), (2, Value::Integer(8))]).unwrap().pairs(),
        vec![(1, Value::Integer(9)), (2, Value::Integer(8))]
    );
    assert_eq!(
        vector.replace([(1, Value::Float(12.12))]).err(),
        Some(mismatch("integer", "double"))
    );
}

// =============================================================================
// Vector boundaries
// =============================================================================

#[rstest]
fn test_merge_requires_same_element_type() {
    let numbers = integers(&[(5, 1)]);
    let words = texts(&["Foo"]);

    assert_eq!(
        numbers.merge(&integers(&[(9, 2)])).unwrap().pairs(),
        vec![(0, Value::Integer(1)), (1, Value::Integer(2))]
    );
    assert_eq!(
        numbers.merge(&words).err(),
        Some(vector_mismatch("integer", "string"))
    );
}

#[rstest]
fn test_vector_comparands_require_same_element_type() {
    let numbers = integers(&[(0, 1), (1, 2)]);
    let floats = TypedVector::from_values(ElementType::Float, [Value::Float(1.0)]).unwrap();
    let expected = Some(vector_mismatch("integer", "double"));

    assert_eq!(numbers.diff_vector(&floats).err(), expected);
    assert_eq!(numbers.intersect_vector(&floats).err(), expected);
    assert_eq!(numbers.replace_vector(&floats).err(), expected);

    let others = integers(&[(7, 2)]);
    assert_eq!(
        numbers.diff_vector(&others).unwrap().pairs(),
        vec![(0, Value::Integer(1))]
    );
    assert_eq!(
        numbers.intersect_vector(&others).unwrap().pairs(),
        vec![(1, Value::Integer(2))]
    );
    assert_eq!(
        numbers.replace_vector(&others).unwrap().pairs(),
        vec![(0, Value::Integer(1)), (1, Value::Integer(2)), (7, Value::Integer(2))]
    );
}

#[rstest]
fn test_key_operations_accept_any_collection() {
    let numbers = integers(&[(0, 1), (1, 2), (2, 3)]);
    let words = texts(&["Foo"]);
    let untyped = Vector::from_pairs([(2, "Baz")]);

    assert_eq!(numbers.diff_vector_keys(&words).keys(), vec![1, 2]);
    assert_eq!(numbers.intersect_vector_keys(&untyped).keys(), vec![2]);
    assert_eq!(numbers.diff_keys(&[0, 1]).keys(), vec![2]);
    assert_eq!(numbers.intersect_keys(&[1]).keys(), vec![1]);
}

// =============================================================================
// Derived vectors keep their element type
// =============================================================================

#[rstest]
fn test_derived_vectors_keep_element_type() {
    let words = texts(&["Foo", "", "Baz"]);
    let string = ElementType::Text;

    assert_eq!(words.filter_truthy().element_type(), &string);
    assert_eq!(words.except(&[0]).element_type(), &string);
    assert_eq!(words.only(&[0, 9]).element_type(), &string);
    assert_eq!(words.duplicate().element_type(), &string);
    assert_eq!(
        words.only(&[0, 9]).pairs(),
        vec![(0, Value::from("Foo")), (9, Value::Null)]
    );

    let pushed = words.push([Value::from("Bar")]).unwrap();
    assert_eq!(
        pushed.set(0, Value::Integer(1)).err(),
        Some(mismatch("string", "integer"))
    );
}

#[rstest]
fn test_shift_pop_and_clear_keep_element_type() {
    let mut vector = integers(&[(3, 1), (1, 2), (2, 3)]);

    assert_eq!(vector.shift(), Some(Value::Integer(1)));
    assert_eq!(vector.pop(), Some(Value::Integer(3)));
    assert_eq!(vector.keys(), vec![1]);

    vector.clear();
    assert!(vector.is_empty());
    assert_eq!(vector.element_type(), &ElementType::Integer);
    assert!(vector.set(0, Value::from("x")).is_err());
}

#[rstest]
fn test_at_on_typed_vector() {
    let vector = integers(&[(1, 10)]);
    assert_eq!(vector.at(1), Ok(&Value::Integer(10)));
    assert_eq!(vector.at(2), Err(VectorError::OffsetNotFound { key: 2 }));
}

#[rstest]
fn test_untyped_views() {
    let vector = integers(&[(2, 4)]);
    let untyped = vector.to_untyped();

    assert_eq!(untyped.pairs(), vector.pairs());
    assert_eq!(
        untyped.set(0, Value::from("free")).len(),
        2
    );
    assert_eq!(vector.clone().into_untyped(), untyped);
}

#[rstest]
fn test_iteration() {
    let vector = integers(&[(2, 4), (-1, 8)]);

    let borrowed: Vec<(Key, &Value)> = (&vector).into_iter().collect();
    assert_eq!(borrowed, vec![(2, &Value::Integer(4)), (-1, &Value::Integer(8))]);

    let owned: Vec<(Key, Value)> = vector.into_iter().collect();
    assert_eq!(owned, vec![(2, Value::Integer(4)), (-1, Value::Integer(8))]);
}

#[rstest]
fn test_error_messages() {
    assert_eq!(
        mismatch("integer", "string").to_string(),
        "Type mismatch: expected integer, string received"
    );
    assert_eq!(
        VectorError::OffsetNotFound { key: 2 }.to_string(),
        "Offset \"2\" does not exist!"
    );
}
