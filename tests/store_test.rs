//! Query behavior of TreeStore over the sample record collection

use rstest::{fixture, rstest};
use serde_json::json;
use treestore::{Record, RecordId, TreeStore};

#[ctor::ctor]
fn init() {
    treestore::util::testing::init_test_setup();
}

// 1
// ├── 2
// │   ├── 4
// │   │   ├── 7
// │   │   └── 8
// │   ├── 5
// │   └── 6
// └── 3
fn sample_records() -> Vec<Record> {
    vec![
        Record::new(1, "root"),
        Record::new(2, 1).with_field("type", json!("test")),
        Record::new(3, 1).with_field("type", json!("test")),
        Record::new(4, 2).with_field("type", json!("test")),
        Record::new(5, 2).with_field("type", json!("test")),
        Record::new(6, 2).with_field("type", json!("test")),
        Record::new(7, 4).with_field("type", json!(null)),
        Record::new(8, 4).with_field("type", json!(null)),
    ]
}

#[fixture]
fn store() -> TreeStore {
    TreeStore::new(sample_records())
}

fn ids(records: &[&Record]) -> Vec<RecordId> {
    records.iter().map(|r| r.id.clone()).collect()
}

fn id_list(values: &[i64]) -> Vec<RecordId> {
    values.iter().map(|&n| RecordId::Int(n)).collect()
}

// ============================================================
// get_all
// ============================================================

#[rstest]
fn given_store_when_get_all_then_returns_input_verbatim(store: TreeStore) {
    let all = store.get_all();
    assert_eq!(all.len(), 8);
    assert_eq!(all.to_vec(), sample_records());
}

#[rstest]
fn given_store_when_input_mutated_after_build_then_snapshot_unaffected() {
    let mut records = sample_records();
    let store = TreeStore::new(records.clone());

    // Caller keeps mutating its own copy; the store owns an independent snapshot
    records.push(Record::new(99, 1));
    records[0] = Record::new(42, "root");

    assert_eq!(store.get_all().len(), 8);
    assert_eq!(store.get_all()[0].id, RecordId::Int(1));
    assert!(store.get_item(&RecordId::Int(99)).is_none());
}

#[rstest]
fn given_returned_records_when_clones_mutated_then_store_unaffected(store: TreeStore) {
    let mut clone = store.get_item(&RecordId::Int(7)).unwrap().clone();
    clone.payload.insert("type".to_string(), json!("mutated"));

    let fresh = store.get_item(&RecordId::Int(7)).unwrap();
    assert_eq!(fresh.payload.get("type"), Some(&serde_json::Value::Null));
}

// ============================================================
// get_item
// ============================================================

#[rstest]
fn given_indexed_id_when_get_item_then_returns_full_record(store: TreeStore) {
    let expected = Record::new(7, 4).with_field("type", json!(null));
    assert_eq!(store.get_item(&RecordId::Int(7)), Some(&expected));
}

#[rstest]
fn given_unknown_id_when_get_item_then_returns_none(store: TreeStore) {
    assert!(store.get_item(&RecordId::Int(999)).is_none());
    assert!(store.get_item(&RecordId::from("nope")).is_none());
}

#[rstest]
fn given_every_input_record_when_get_item_then_deeply_equal(store: TreeStore) {
    for record in sample_records() {
        assert_eq!(store.get_item(&record.id), Some(&record));
    }
}

// ============================================================
// get_children
// ============================================================

#[rstest]
#[case(1, vec![2, 3])]
#[case(2, vec![4, 5, 6])]
#[case(4, vec![7, 8])]
fn given_parent_when_get_children_then_returns_direct_children_in_input_order(
    store: TreeStore,
    #[case] id: i64,
    #[case] expected: Vec<i64>,
) {
    let children = store.get_children(&RecordId::Int(id)).unwrap();
    assert_eq!(ids(&children), id_list(&expected));
}

#[rstest]
fn given_leaf_when_get_children_then_returns_empty(store: TreeStore) {
    let children = store.get_children(&RecordId::Int(8)).unwrap();
    assert!(children.is_empty());
}

#[rstest]
fn given_unknown_id_when_get_children_then_returns_none(store: TreeStore) {
    // Unknown id is an absence indicator, distinct from "known id, no children"
    assert!(store.get_children(&RecordId::Int(999)).is_none());
}

#[rstest]
fn given_children_when_resolved_then_carry_original_payload(store: TreeStore) {
    let children = store.get_children(&RecordId::Int(4)).unwrap();
    for child in children {
        assert_eq!(child.payload.get("type"), Some(&serde_json::Value::Null));
    }
}

// ============================================================
// get_all_children
// ============================================================

#[rstest]
fn given_mid_node_when_get_all_children_then_returns_descendants_level_by_level(
    store: TreeStore,
) {
    let descendants = store.get_all_children(&RecordId::Int(2));
    assert_eq!(ids(&descendants), id_list(&[4, 5, 6, 7, 8]));
}

#[rstest]
fn given_root_when_get_all_children_then_returns_every_other_record(store: TreeStore) {
    let descendants = store.get_all_children(&RecordId::Int(1));
    assert_eq!(ids(&descendants), id_list(&[2, 3, 4, 5, 6, 7, 8]));
}

#[rstest]
fn given_leaf_when_get_all_children_then_returns_empty(store: TreeStore) {
    assert!(store.get_all_children(&RecordId::Int(8)).is_empty());
}

#[rstest]
fn given_unknown_id_when_get_all_children_then_returns_empty(store: TreeStore) {
    assert!(store.get_all_children(&RecordId::Int(999)).is_empty());
}

#[rstest]
fn given_any_id_when_get_all_children_then_consistent_with_recursive_get_children(
    store: TreeStore,
) {
    // get_all_children must equal get_children expanded level by level
    for record in store.get_all() {
        let mut expected: Vec<RecordId> = Vec::new();
        let mut frontier: Vec<RecordId> = vec![record.id.clone()];
        while let Some(current) = frontier.first().cloned() {
            frontier.remove(0);
            if let Some(children) = store.get_children(&current) {
                for child in children {
                    expected.push(child.id.clone());
                    frontier.push(child.id.clone());
                }
            }
        }
        let actual = ids(&store.get_all_children(&record.id));
        assert_eq!(actual, expected, "mismatch for id {}", record.id);
    }
}

// ============================================================
// get_all_parents
// ============================================================

#[rstest]
fn given_deep_leaf_when_get_all_parents_then_returns_chain_to_root(store: TreeStore) {
    let chain = store.get_all_parents(&RecordId::Int(7));
    assert_eq!(ids(&chain), id_list(&[7, 4, 2, 1]));
}

#[rstest]
fn given_root_when_get_all_parents_then_returns_self_only(store: TreeStore) {
    let chain = store.get_all_parents(&RecordId::Int(1));
    assert_eq!(ids(&chain), id_list(&[1]));
}

#[rstest]
fn given_unknown_id_when_get_all_parents_then_returns_empty(store: TreeStore) {
    assert!(store.get_all_parents(&RecordId::Int(999)).is_empty());
}

#[rstest]
fn given_any_id_when_get_all_parents_then_chain_links_hold(store: TreeStore) {
    use treestore::ParentRef;

    for record in store.get_all() {
        let chain = store.get_all_parents(&record.id);
        assert_eq!(chain[0], store.get_item(&record.id).unwrap());
        assert!(chain.last().unwrap().parent.is_root());

        for pair in chain.windows(2) {
            assert_eq!(pair[0].parent, ParentRef::Id(pair[1].id.clone()));
        }
    }
}

// ============================================================
// roots / size
// ============================================================

#[rstest]
fn given_store_when_roots_then_returns_sentinel_parented_records(store: TreeStore) {
    assert_eq!(ids(&store.roots()), id_list(&[1]));
    assert_eq!(store.len(), 8);
    assert!(!store.is_empty());
}
