use super::*;

#[test]
fn three_assets_ten_frames() {
    assert_eq!(allocate(3, 10).unwrap(), vec![4, 3, 3]);
}

#[test]
fn sum_is_exact_for_all_small_inputs() {
    for n in 1..=17usize {
        for total in 0..=200u64 {
            let counts = allocate(n, total).unwrap();
            assert_eq!(counts.len(), n);
            assert_eq!(counts.iter().sum::<u64>(), total, "n={n} total={total}");
        }
    }
}

#[test]
fn extra_frames_go_to_the_earliest_assets() {
    for n in 1..=12usize {
        for total in (n as u64)..=120 {
            let counts = allocate(n, total).unwrap();
            let base = total / n as u64;
            let remainder = (total % n as u64) as usize;
            for (i, c) in counts.iter().enumerate() {
                let expected = if i < remainder { base + 1 } else { base };
                assert_eq!(*c, expected, "n={n} total={total} i={i}");
            }
        }
    }
}

#[test]
fn fewer_frames_than_assets_leaves_trailing_zeros() {
    assert_eq!(allocate(5, 3).unwrap(), vec![1, 1, 1, 0, 0]);
    assert_eq!(allocate(2, 0).unwrap(), vec![0, 0]);
}

#[test]
fn zero_assets_is_invalid_input() {
    let err = allocate(0, 10).unwrap_err();
    assert!(matches!(err, ReelError::InvalidInput(_)));
}
