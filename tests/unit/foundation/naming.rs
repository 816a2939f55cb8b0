use super::*;

#[test]
fn names_increase_monotonically() {
    let c = NameCounter::new();
    assert_eq!(c.next_name("param"), "param_1");
    assert_eq!(c.next_name("param"), "param_2");
    assert_eq!(c.next_name("view"), "view_3");
    assert_eq!(c.issued(), 3);
}

#[test]
fn reset_restarts_numbering() {
    let c = NameCounter::new();
    c.next_name("param");
    c.reset();
    assert_eq!(c.next_name("param"), "param_1");
}

#[test]
fn concurrent_callers_get_unique_names() {
    let c = std::sync::Arc::new(NameCounter::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = c.clone();
            std::thread::spawn(move || (0..50).map(|_| c.next_name("p")).collect::<Vec<_>>())
        })
        .collect();
    let mut all: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 200);
}
