use circarray::{ca, CircularBuffer};

#[test]
fn test_pop_front_n_removal_order() {
    let mut buffer = ca![1, 2, 3, 4, 5];
    assert_eq!(buffer.pop_front_n(2), vec![1, 2]);
    assert_eq!(buffer.to_vec(), vec![3, 4, 5]);
}

#[test]
fn test_pop_rear_n_removal_order() {
    let mut buffer = ca![1, 2, 3, 4, 5];
    assert_eq!(buffer.pop_rear_n(2), vec![5, 4]);
    assert_eq!(buffer.to_vec(), vec![1, 2, 3]);
}

#[test]
fn test_pop_n_more_than_available() {
    let mut buffer = ca![1, 2, 3];
    assert_eq!(buffer.pop_front_n(10), vec![1, 2, 3]);
    assert!(buffer.is_empty());
    assert_eq!(buffer.pop_front_n(10), Vec::<i32>::new());

    let mut buffer = ca![1, 2, 3];
    assert_eq!(buffer.pop_rear_n(4), vec![3, 2, 1]);
    assert!(buffer.is_empty());
}

#[test]
fn test_pop_n_non_positive_count_is_noop() {
    let mut buffer = ca![1, 2, 3];
    assert!(buffer.pop_front_n(0).is_empty());
    assert!(buffer.pop_front_n(-3).is_empty());
    assert!(buffer.pop_rear_n(0).is_empty());
    assert!(buffer.pop_rear_n(isize::MIN).is_empty());
    assert_eq!(buffer, ca![1, 2, 3]);
}

#[test]
fn test_default_fill_boundaries() {
    let mut buffer: CircularBuffer<i32> = CircularBuffer::new();
    assert_eq!(buffer.pop_front_n_or(1, 42), vec![42]);
    assert_eq!(buffer.pop_front_n_or(0, 42), Vec::<i32>::new());
    assert_eq!(buffer.pop_front_n_or(2, 42), vec![42, 42]);
    assert_eq!(buffer.pop_front_n_or(-1, 42), Vec::<i32>::new());
    assert_eq!(buffer.pop_rear_n_or(3, 42), vec![42, 42, 42]);
    assert!(buffer.is_empty());
}

#[test]
fn test_default_fill_exhaustion_is_not_an_error() {
    let mut buffer = ca![1, 2];
    assert_eq!(buffer.pop_front_n_or(1, 42), vec![1]);
    assert_eq!(buffer.pop_front_n_or(1, 42), vec![2]);
    assert_eq!(buffer.pop_front_n_or(1, 42), vec![42]);
    assert_eq!(buffer.pop_front_n_or(1, 42), vec![42]);
    assert!(buffer.is_empty());
}

#[test]
fn test_default_fill_partial() {
    let mut buffer = ca![1, 2, 3];
    assert_eq!(buffer.pop_rear_n_or(5, 0), vec![3, 2, 1, 0, 0]);

    let mut buffer = ca![1, 2, 3];
    assert_eq!(buffer.pop_front_n_or(2, 0), vec![1, 2]);
    assert_eq!(buffer.to_vec(), vec![3]);
}

#[test]
fn test_count_only_and_default_agree_when_supply_suffices() {
    let mut left: CircularBuffer<u32> = (0..50).collect();
    let mut right = left.clone();
    for count in [0, 1, 3, 7, 11] {
        assert_eq!(left.pop_front_n(count), right.pop_front_n_or(count, 999));
        assert_eq!(left.pop_rear_n(count), right.pop_rear_n_or(count, 999));
    }
    assert_eq!(left, right);
    assert_eq!(left.capacity(), right.capacity());
}

#[test]
fn test_batch_pop_then_repush_restores_sequence() {
    let original: Vec<i32> = (0..20).collect();
    for count in 0..25 {
        let mut buffer = CircularBuffer::from(original.clone());
        let popped = buffer.pop_front_n(count);
        for value in popped.into_iter().rev() {
            buffer.push_front(value);
        }
        assert_eq!(buffer.to_vec(), original);

        let popped = buffer.pop_rear_n(count);
        for value in popped.into_iter().rev() {
            buffer.push_rear(value);
        }
        assert_eq!(buffer.to_vec(), original);
    }
}

#[test]
fn test_batch_pop_shrinks_like_single_pops() {
    let mut batched: CircularBuffer<i32> = (0..100).collect();
    let mut single = batched.clone();

    batched.pop_front_n(90);
    for _ in 0..90 {
        single.pop_front().unwrap();
    }
    assert_eq!(batched.capacity(), single.capacity());
    assert_eq!(batched, single);
    assert_eq!(batched.to_vec(), (90..100).collect::<Vec<_>>());
}
