use balanced_set::collections::{ChainedHashMap, FixedArray, LevelOrderTree, MinHeap};
use balanced_set::{AvlTree, OrderedSet, RbTree};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn fill<S: OrderedSet<i32>>(set: &mut S) {
    for key in [50, 30, 70, 20, 40, 60, 80, 30] {
        set.insert(key);
    }
    assert!(set.search(&40));
    set.delete(&40);
    assert!(!set.search(&40));
}

fn main() -> balanced_set::Result<()> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let mut avl = AvlTree::new();
    fill(&mut avl);
    println!("avl: {avl:?} (height {})", avl.tree_height());

    let mut rb = RbTree::new();
    fill(&mut rb);
    println!(
        "rb: {:?} (height {}, black height {})",
        rb.inorder_traversal(),
        rb.height(),
        rb.black_height()
    );

    let mut array = FixedArray::<i32>::new(4);
    array.set(2, 7)?;
    println!("array[2] = {}", array.get(2)?);
    if let Err(err) = array.get(9) {
        println!("array[9]: {err}");
    }

    let mut map = ChainedHashMap::new();
    for (i, word) in ["zero", "one", "two", "three", "four", "five", "six", "seven"]
        .into_iter()
        .enumerate()
    {
        map.insert_or_update(word, i);
    }
    println!(
        "map: {} entries in {} buckets, three => {:?}",
        map.len(),
        map.capacity(),
        map.try_get(&"three")
    );

    let tree: LevelOrderTree<i32> = (1..=6).collect();
    println!("binary tree levels: {:?}", tree.levels());

    let mut heap: MinHeap<i32> = [9, 4, 7, 1].into_iter().collect();
    print!("heap: ");
    while let Ok(min) = heap.extract_min() {
        print!("{min} ");
    }
    println!();

    Ok(())
}
