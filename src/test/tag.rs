use crate::error::{ErrorKind, Result};
use crate::{ByteArray, Compound, IntArray, IntWidth, List, LongArray, Tag, TagId, TagValue};

#[test]
fn integer_constructors_wrap() {
    assert_eq!(Tag::short(40000).value(), &TagValue::Short(-25536));
    assert_eq!(Tag::byte(200).value(), &TagValue::Byte(-56));
    assert_eq!(Tag::byte(-129).value(), &TagValue::Byte(127));
    assert_eq!(Tag::int(1u64 << 32).value(), &TagValue::Int(0));
    assert_eq!(Tag::long(u64::MAX).value(), &TagValue::Long(-1));
    assert_eq!(Tag::int(-5).value(), &TagValue::Int(-5));
}

#[test]
fn normalize_is_twos_complement() {
    assert_eq!(IntWidth::Byte.normalize(128), -128);
    assert_eq!(IntWidth::Byte.normalize(255), -1);
    assert_eq!(IntWidth::Byte.normalize(256), 0);
    assert_eq!(IntWidth::Short.normalize(-32769), 32767);
    assert_eq!(IntWidth::Long.normalize(i64::MAX as i128 + 1), i64::MIN);

    for w in [IntWidth::Byte, IntWidth::Short, IntWidth::Int, IntWidth::Long] {
        for v in [-1000i128, -1, 0, 1, 1000, 1 << 40] {
            assert!(w.contains(w.normalize(v) as i128));
        }
    }
}

#[test]
fn narrowest_width() {
    assert_eq!(IntWidth::narrowest(-128), Some(IntWidth::Byte));
    assert_eq!(IntWidth::narrowest(-129), Some(IntWidth::Short));
    assert_eq!(IntWidth::narrowest(32768), Some(IntWidth::Int));
    assert_eq!(IntWidth::narrowest(1 << 31), Some(IntWidth::Long));
    assert_eq!(IntWidth::narrowest(1 << 63), None);
}

#[test]
fn set_value_same_type() -> Result<()> {
    let mut t = Tag::named("hp", TagValue::Short(20));
    t.set_value(TagValue::short(40000))?;
    assert_eq!(t.value(), &TagValue::Short(-25536));
    assert_eq!(t.name(), Some("hp"));
    Ok(())
}

#[test]
fn set_value_other_type() {
    let mut t = Tag::short(20);
    let err = t.set_value(5i32).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
    assert_eq!(t.value(), &TagValue::Short(20));
}

#[test]
fn strings_are_immutable() {
    let mut t = Tag::string("abc");
    let err = t.set_value("def").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
    assert_eq!(t.value().as_str(), Some("abc"));
}

#[test]
fn containers_replaced_through_their_methods() {
    let mut t = Tag::new(List::of(TagId::Int));
    assert!(t.set_value(List::of(TagId::Int)).is_err());

    t.as_list_mut().unwrap().push(1).unwrap();
    assert_eq!(t.value().as_list().unwrap().len(), 1);
}

#[test]
fn compound_insert_names_child() {
    let mut c = Compound::new();
    c.insert("a", Tag::named("something else", TagValue::Int(1)));
    assert_eq!(c.get("a").unwrap().name(), Some("a"));
}

#[test]
fn compound_replace_keeps_position() {
    let mut c = Compound::new();
    c.insert("a", 1);
    c.insert("b", 2);
    c.insert("c", 3);

    let old = c.insert("b", "two");
    assert_eq!(old.map(Tag::into_value), Some(TagValue::Int(2)));
    assert_eq!(c.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(c.get("b").unwrap().value().as_str(), Some("two"));
}

#[test]
fn compound_remove_keeps_order() {
    let mut c: Compound = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    assert!(c.remove("b").is_some());
    assert!(c.remove("b").is_none());
    assert_eq!(c.keys().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(c.len(), 2);
    assert!(!c.contains_key("b"));
}

#[test]
fn compound_get_mut() {
    let mut c = Compound::new();
    c.insert("list", List::new());
    c.get_mut("list")
        .and_then(TagValue::as_list_mut)
        .unwrap()
        .push("x")
        .unwrap();
    assert_eq!(
        c.get("list").unwrap().value().as_list().unwrap().element_type(),
        TagId::String
    );
}

#[test]
fn list_rejects_other_types() {
    let mut l = List::of(TagId::Short);
    l.push(TagValue::short(1)).unwrap();

    let err = l.push(1i32).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
    assert_eq!(l.len(), 1);
    assert_eq!(l.element_type(), TagId::Short);
}

#[test]
fn untyped_list_takes_first_type() {
    let mut l = List::new();
    assert_eq!(l.element_type(), TagId::End);

    l.push(1.5f32).unwrap();
    assert_eq!(l.element_type(), TagId::Float);
    assert!(l.push(1.5f64).is_err());
}

#[test]
fn list_rejects_end() {
    let mut l = List::new();
    assert!(l.push(TagValue::End).is_err());
    assert!(l.is_empty());
}

#[test]
fn list_from_values() {
    let l = List::from_values(TagId::Long, [1i64, 2, 3]).unwrap();
    assert_eq!(l.len(), 3);
    assert_eq!(l.get(2), Some(&TagValue::Long(3)));

    let err = List::from_values(TagId::Long, [1i32]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
}

#[test]
fn list_elements_lose_names() {
    let mut l = List::new();
    l.push(Tag::named("x", TagValue::Int(1))).unwrap();
    assert_eq!(l.pop(), Some(TagValue::Int(1)));
}

#[test]
fn arrays_wrap() {
    let b = ByteArray::from_wrapping([255, 128, -1]);
    assert_eq!(*b, vec![-1, -128, -1]);
    assert_eq!(b.to_bytes(), vec![255, 128, 255]);

    let mut i = IntArray::default();
    i.push_wrapping(u32::MAX);
    i.push(7);
    assert_eq!(i.into_inner(), vec![-1, 7]);

    let l: LongArray = vec![1, 2].into_iter().collect();
    assert_eq!(l.len(), 2);
}

#[test]
fn ids() {
    assert_eq!(Tag::new(ByteArray::default()).id(), TagId::ByteArray);
    assert_eq!(Tag::new(IntArray::default()).id(), TagId::IntArray);
    assert_eq!(Tag::new(LongArray::default()).id(), TagId::LongArray);
    assert_eq!(Tag::new(Compound::new()).id(), TagId::Compound);
    assert_eq!(Tag::new(true).id(), TagId::Byte);
    assert_eq!(Tag::new(TagValue::End).id(), TagId::End);
}

#[test]
fn name_accessors() {
    let mut t = Tag::int(1).with_name("a");
    assert_eq!(t.name(), Some("a"));
    t.set_name(None);
    assert_eq!(t.name(), None);

    let (name, value) = Tag::named("n", 1i8).into_parts();
    assert_eq!(name.as_deref(), Some("n"));
    assert_eq!(value, TagValue::Byte(1));
}
