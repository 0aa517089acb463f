use super::*;

#[test]
fn can_collect_in_source_order() {
    let source = (0..100).collect::<Vec<usize>>();

    let result = parallel_collect(source.as_slice(), |item| item * 2);

    assert_eq!(result, (0..100).map(|item| item * 2).collect::<Vec<_>>());
}

#[test]
fn can_mutate_each_item() {
    let mut source = vec![1, 2, 3];

    parallel_foreach_mut(source.as_mut_slice(), |item| *item += 10);

    assert_eq!(source, vec![11, 12, 13]);
}
