/*
 * list_properties.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Structural properties of record lists built through the public API.
 */

use rdm_records::{ByteString, List, RecordArena, RecordId, RecordKind, Value};

fn leaf(arena: &mut RecordArena, key: Option<&str>, text: &str) -> RecordId {
    let id = arena.new_record().unwrap();
    arena.set_key(id, key.map(ByteString::from)).unwrap();
    arena
        .set_value(id, Value::SingleLineText(ByteString::from(text)))
        .unwrap();
    id
}

/// Build a tree `depth` levels deep with `width` leaves per level.
fn nested(arena: &mut RecordArena, depth: usize, width: usize) -> List {
    let mut list = List::new();
    for i in 0..width {
        let key = format!("key{}", i);
        let id = leaf(arena, Some(key.as_str()), "text");
        arena.push(&mut list, id).unwrap();
    }
    if depth > 0 {
        let child = nested(arena, depth - 1, width);
        let parent = arena.new_record().unwrap();
        arena
            .set_key(parent, Some(ByteString::from("child")))
            .unwrap();
        arena.set_value(parent, Value::ChildList(child)).unwrap();
        arena.push(&mut list, parent).unwrap();
    }
    list
}

#[test]
fn test_sequential_appends_have_open_ends() {
    for n in [1usize, 2, 3, 10, 100] {
        let mut arena = RecordArena::new();
        let mut list = List::new();
        for i in 0..n {
            let id = leaf(&mut arena, None, &i.to_string());
            arena.push(&mut list, id).unwrap();
        }

        assert_eq!(arena.len(list.handle()), n);
        let first = arena.first(list.handle()).unwrap();
        let last = arena.last(list.handle()).unwrap();
        assert!(arena.get(first).unwrap().prev().is_none());
        assert!(arena.get(last).unwrap().next().is_none());
        assert_eq!(arena.position(last), Some(n - 1));

        // Every member is a handle to the whole list.
        for id in arena.to_vec(list.handle()) {
            assert_eq!(arena.len(Some(id)), n);
        }

        arena.destroy_list(list);
        assert_eq!(arena.live_count(), 0);
    }
}

#[test]
fn test_find_unique_key() {
    let mut arena = RecordArena::new();
    let mut list = List::new();
    for key in ["title", "author", "date"] {
        let id = leaf(&mut arena, Some(key), key);
        arena.push(&mut list, id).unwrap();
    }
    let head = arena.first(list.handle());

    let hit = arena.find_str(head, "author").unwrap();
    assert_eq!(arena.get(hit).unwrap().value().as_text().unwrap(), "author");
    assert!(arena.find_str(head, "missing").is_none());

    arena.destroy_list(list);
}

#[test]
fn test_destroy_list_releases_nested_lists() {
    let mut arena = RecordArena::new();
    let list = nested(&mut arena, 5, 3);
    // 3 leaves per level over 6 levels, plus 5 parent records.
    assert_eq!(arena.live_count(), 6 * 3 + 5);

    let head = arena.first(list.handle());
    let child = arena.find_str(head, "child").unwrap();
    assert_eq!(arena.get(child).unwrap().kind(), RecordKind::ChildList);
    let inner = arena.child_list(child).unwrap();
    assert_eq!(arena.len(inner.handle()), 4);

    arena.destroy_list(list);
    assert_eq!(arena.live_count(), 0);
}

#[test]
fn test_destroying_one_subtree_leaves_siblings() {
    let mut arena = RecordArena::new();
    let mut list = List::new();
    let keep = leaf(&mut arena, Some("keep"), "yes");
    arena.push(&mut list, keep).unwrap();

    let child = nested(&mut arena, 2, 2);
    let parent = arena.new_record().unwrap();
    arena.set_value(parent, Value::ChildList(child)).unwrap();
    arena.push(&mut list, parent).unwrap();

    arena.remove(&mut list, parent).unwrap();
    assert_eq!(arena.live_count(), 1);
    assert_eq!(arena.to_vec(list.handle()), vec![keep]);

    arena.destroy_list(list);
    assert_eq!(arena.live_count(), 0);
}

#[test]
fn test_slots_are_reused_after_release() {
    let mut arena = RecordArena::new();
    let first = nested(&mut arena, 1, 4);
    let live = arena.live_count();
    arena.destroy_list(first);

    let second = nested(&mut arena, 1, 4);
    assert_eq!(arena.live_count(), live);
    arena.destroy_list(second);
    assert_eq!(arena.live_count(), 0);
}
