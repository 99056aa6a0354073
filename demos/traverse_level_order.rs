use balanced_set::AvlTree;

fn main() {
    let tree: AvlTree<i32> = (1..=6).collect();

    println!("Level-order traversal:");
    tree.traverse_level_order(|key| {
        println!("Key: {}", key);
    });
}
