//! Behavior tests for shared sequences.

use satchel_core::{List, Satchel, SatchelError, Value};

#[test]
fn push_get_and_len() {
    let list = List::new();
    assert!(list.is_empty());
    list.push(1);
    list.push("two");
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(0).unwrap().as_int(), Some(1));
    assert_eq!(list.get(1).unwrap().as_str(), Some("two"));
    assert!(list.get(2).is_none());
}

#[test]
fn set_overwrites_in_place() {
    let list: List = [1, 2, 3].into_iter().collect();
    list.set(1, "middle").unwrap();
    assert_eq!(list.get(1).unwrap().as_str(), Some("middle"));
    assert_eq!(list.len(), 3);
}

#[test]
fn set_out_of_bounds_fails() {
    let list: List = [1, 2].into_iter().collect();
    let err = list.set(5, 0).unwrap_err();
    assert!(matches!(
        err,
        SatchelError::IndexOutOfBounds { index: 5, len: 2 }
    ));
}

#[test]
fn insert_shifts_tail() {
    let list: List = [1, 3].into_iter().collect();
    list.insert(1, 2).unwrap();
    let items: Vec<i64> = list.to_vec().iter().map(|v| v.as_int().unwrap()).collect();
    assert_eq!(items, vec![1, 2, 3]);

    // Insertion at the end is allowed, past it is not.
    list.insert(3, 4).unwrap();
    let err = list.insert(9, 0).unwrap_err();
    assert!(matches!(err, SatchelError::IndexOutOfBounds { .. }));
}

#[test]
fn pop_removes_last() {
    let list: List = [1, 2].into_iter().collect();
    assert_eq!(list.pop().unwrap().as_int(), Some(2));
    assert_eq!(list.len(), 1);
    list.pop();
    assert!(list.pop().is_none());
}

#[test]
fn clones_share_the_same_sequence() {
    let list = List::new();
    let alias = list.clone();
    alias.push(1);
    assert_eq!(list.len(), 1);
    assert!(list.same_list(&alias));
    assert_eq!(Value::from(list), Value::from(alias));
}

#[test]
fn to_vec_spine_is_detached() {
    let list: List = [1, 2].into_iter().collect();
    let spine = list.to_vec();
    list.push(3);
    assert_eq!(spine.len(), 2);
}

#[test]
fn nested_list_mutation_is_visible_through_document() {
    let doc = Satchel::new();
    doc.set("rows", vec![vec![1, 2], vec![3]]).unwrap();

    let rows_value = doc.get("rows").unwrap();
    let rows = rows_value.as_list().unwrap();
    let first_value = rows.get(0).unwrap();
    first_value.as_list().unwrap().push(99);

    let plain = doc.to_plain().unwrap();
    let first = plain["rows"].as_list().unwrap()[0].as_list().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first[2].as_int(), Some(99));
}
