use super::{MergeError, ShapeKind, ShapeTree};

fn array(direct_access: bool) -> ShapeKind {
    ShapeKind::Array { direct_access }
}

/// Module with `foo: Record { <attr>: Array(direct) }`.
fn foo_with_list(attr: &str, direct_access: bool) -> ShapeTree {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    let foo = tree.alloc(ShapeKind::Record);
    tree.set_field(root, "foo", Some(foo));
    let list = tree.alloc(array(direct_access));
    tree.set_field(foo, attr, Some(list));
    tree
}

#[test]
fn disjoint_attributes_union() {
    let mut tree = foo_with_list("my2list", true);
    let mut other = foo_with_list("my3list", false);
    let other_root = other.root();
    let foo = other.field(other_root, "foo").flatten().unwrap();
    let list = other.field(foo, "my3list").flatten().unwrap();
    let val = other.alloc(ShapeKind::Record);
    other.set_field(list, "val", Some(val));

    tree.merge_tree(&other).unwrap();

    insta::assert_snapshot!(tree.dump(), @r"
    Module
      foo: Record
        my2list: Array (direct)
        my3list: Array
          val: Record
    ");
}

#[test]
fn merging_with_itself_is_idempotent() {
    let mut tree = foo_with_list("items", false);
    let snapshot = tree.clone();

    let root = tree.root();
    tree.update(root, root).unwrap();
    assert!(tree.same_shape(&snapshot));

    tree.merge_tree(&snapshot).unwrap();
    assert!(tree.same_shape(&snapshot));
}

#[test]
fn direct_access_is_ored() {
    let mut tree = foo_with_list("items", false);
    tree.merge_tree(&foo_with_list("items", true)).unwrap();
    tree.merge_tree(&foo_with_list("items", false)).unwrap();

    let root = tree.root();
    let foo = tree.field(root, "foo").flatten().unwrap();
    let items = tree.field(foo, "items").flatten().unwrap();
    assert_eq!(tree.kind(items), array(true));
}

#[test]
fn bare_value_yields_to_a_shape() {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    tree.set_field(root, "foo", None);

    tree.merge_tree(&foo_with_list("items", false)).unwrap();
    assert_eq!(tree.kind(tree.field(root, "foo").flatten().unwrap()), ShapeKind::Record);

    // and the other way around: an incoming bare value keeps the shape
    let mut bare = ShapeTree::new();
    let bare_root = bare.root();
    bare.set_field(bare_root, "foo", None);
    tree.merge_tree(&bare).unwrap();
    assert!(tree.field(root, "foo").flatten().is_some());
}

#[test]
fn conflicting_kinds_name_the_path() {
    let mut tree = foo_with_list("items", false);

    let mut other = ShapeTree::new();
    let other_root = other.root();
    let foo = other.alloc(ShapeKind::Record);
    other.set_field(other_root, "foo", Some(foo));
    let items = other.alloc(ShapeKind::Record);
    other.set_field(foo, "items", Some(items));
    let count = other.alloc(ShapeKind::Record);
    other.set_field(items, "count", Some(count));

    let err = tree.merge_tree(&other).unwrap_err();
    assert_eq!(
        err,
        MergeError::ShapeConflict {
            path: "foo.items".to_string(),
            existing: "a list",
            incoming: "an object",
        }
    );
    insta::assert_snapshot!(err.to_string(), @"`foo.items` is used both as a list and as an object");
}

/// Module with `foo: Record { lines: Record }`, `lines` read whole.
fn foo_with_leaf() -> ShapeTree {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    let foo = tree.alloc(ShapeKind::Record);
    tree.set_field(root, "foo", Some(foo));
    let lines = tree.alloc(ShapeKind::Record);
    tree.set_field(foo, "lines", Some(lines));
    tree
}

fn foo_with_iterated_lines() -> ShapeTree {
    let mut tree = foo_with_list("lines", false);
    let root = tree.root();
    let foo = tree.field(root, "foo").flatten().unwrap();
    let list = tree.field(foo, "lines").flatten().unwrap();
    let a = tree.alloc(ShapeKind::Record);
    tree.set_field(list, "a", Some(a));
    tree
}

#[test]
fn leaf_record_meets_array_in_either_order() {
    let mut leaf_first = foo_with_leaf();
    leaf_first.merge_tree(&foo_with_iterated_lines()).unwrap();

    let mut array_first = foo_with_iterated_lines();
    array_first.merge_tree(&foo_with_leaf()).unwrap();

    insta::assert_snapshot!(leaf_first.dump(), @r"
    Module
      foo: Record
        lines: Array (direct)
          a: Record
    ");
    assert!(leaf_first.same_shape(&array_first));
}

#[test]
fn keys_keep_first_seen_order() {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    tree.set_field(root, "b", None);

    let mut other = ShapeTree::new();
    let other_root = other.root();
    other.set_field(other_root, "a", None);
    other.set_field(other_root, "b", None);

    tree.merge_tree(&other).unwrap();
    let keys: Vec<_> = tree.fields(root).keys().cloned().collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn merging_into_a_descendant_is_rejected() {
    let mut tree = foo_with_list("items", false);
    let root = tree.root();
    let foo = tree.field(root, "foo").flatten().unwrap();
    assert_eq!(tree.update(foo, root), Err(MergeError::SelfNesting));
}

#[test]
fn bare_read_of_a_list_makes_it_direct() {
    let mut tree = foo_with_list("items", false);
    let foo = tree.field(tree.root(), "foo").flatten().unwrap();

    let mut bare = ShapeTree::new();
    let bare_root = bare.root();
    let bare_foo = bare.alloc(ShapeKind::Record);
    bare.set_field(bare_root, "foo", Some(bare_foo));
    bare.set_field(bare_foo, "items", None);

    tree.merge_tree(&bare).unwrap();
    let items = tree.field(foo, "items").flatten().unwrap();
    assert_eq!(tree.kind(items), array(true));
}
