use avl_autocomplete::WordIndex;

fn main() {
    let mut index = WordIndex::new();

    for word in ["apple", "app", "apt", "banana", "band", "bandana", "can"] {
        index.insert(word);
    }

    println!("{:?}", index.words().collect::<Vec<_>>());
    println!("depth: {}", index.depth());

    for prefix in ["ap", "ban", "z"] {
        println!("{prefix:?} -> {:?}", index.complete(prefix));
    }

    let removed = index.remove("app");
    assert_eq!(removed.as_deref(), Some("app"));
    println!("\"ap\" -> {:?}", index.complete("ap"));

    let rebuilt = WordIndex::from_words(index.words().map(String::from).collect::<Vec<_>>());
    assert_eq!(rebuilt.len(), index.len());
    println!("rebuilt depth: {}", rebuilt.depth());
}
