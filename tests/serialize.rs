use tiletree::{Axis, Tree};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct Pane {
    nr: usize,
}

fn create_tree() -> Tree<Pane> {
    let mut next_nr = 0;
    let mut gen_pane = || {
        let pane = Pane { nr: next_nr };
        next_nr += 1;
        pane
    };

    let mut tree = Tree::new(800, 600, None).unwrap();
    let p1 = tree.tab(gen_pane(), None, false, None).unwrap();
    let p2 = tree.split(p1, Axis::X, Some(0.4), false, gen_pane()).unwrap();
    let p3 = tree.split(p2, Axis::Y, Some(0.5), true, gen_pane()).unwrap();
    tree.tab(gen_pane(), Some(p3), true, None).unwrap();
    tree.focus(p1);
    tree
}

#[test]
fn test_serialize_json() {
    let original = create_tree();
    let json = serde_json::to_string(&original).expect("json serialize");
    let restored: Tree<Pane> = serde_json::from_str(&json).expect("json deserialize");
    assert_eq!(original, restored, "JSON did not round-trip");
}

#[test]
fn test_serialize_ron() {
    let original = create_tree();
    let ron = ron::to_string(&original).expect("ron serialize");
    let restored: Tree<Pane> = ron::from_str(&ron).expect("ron deserialize");
    assert_eq!(original, restored, "RON did not round-trip");
}
