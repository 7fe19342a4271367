//! Sliding-window extrema via monotonic deques.
//!
//! Pivot classification asks, for every bar, whether its price is the
//! extreme of a fixed-length window. Recomputing each window is O(n*w);
//! the deque keeps candidate indices in monotonic price order so the whole
//! column is processed in O(n).

use std::collections::VecDeque;

/// Rolling maximum over windows of `window_len` consecutive values.
///
/// `out[j]` is the maximum of `values[j..j + window_len]`; the result has
/// `values.len() - window_len + 1` entries, or is empty when the input is
/// shorter than the window. Equal values are kept as candidates so that
/// ties survive into the window they belong to.
pub fn rolling_max(values: &[f64], window_len: usize) -> Vec<f64> {
    rolling_extreme(values, window_len, |a, b| a < b)
}

/// Rolling minimum over windows of `window_len` consecutive values.
pub fn rolling_min(values: &[f64], window_len: usize) -> Vec<f64> {
    rolling_extreme(values, window_len, |a, b| a > b)
}

/// `evict(candidate, incoming)` is true when the candidate at the back of
/// the deque can never be the window extreme once `incoming` arrives.
fn rolling_extreme(values: &[f64], window_len: usize, evict: fn(f64, f64) -> bool) -> Vec<f64> {
    assert!(window_len > 0, "window length must be greater than 0");
    if values.len() < window_len {
        return vec![];
    }

    let mut out = Vec::with_capacity(values.len() - window_len + 1);
    let mut deque: VecDeque<usize> = VecDeque::with_capacity(window_len);

    for (i, &value) in values.iter().enumerate() {
        // Strictly worse candidates leave from the back; equal ones stay.
        while let Some(&back) = deque.back() {
            if evict(values[back], value) {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(i);

        // The front falls out of the window.
        if let Some(&front) = deque.front() {
            if front + window_len <= i {
                deque.pop_front();
            }
        }

        if i + 1 >= window_len {
            out.push(values[deque[0]]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_max_basic() {
        let values = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        assert_eq!(rolling_max(&values, 3), vec![3.0, 5.0, 5.0]);
    }

    #[test]
    fn test_rolling_min_basic() {
        let values = vec![4.0, 2.0, 3.0, 1.0, 5.0];
        assert_eq!(rolling_min(&values, 3), vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = vec![2.0, 1.0, 3.0];
        assert_eq!(rolling_max(&values, 1), values);
        assert_eq!(rolling_min(&values, 1), values);
    }

    #[test]
    fn test_short_input_is_empty() {
        assert!(rolling_max(&[1.0, 2.0], 3).is_empty());
        assert!(rolling_min(&[], 1).is_empty());
    }

    #[test]
    fn test_ties_survive_window_passage() {
        // Two equal maxima; the second must still be known after the first
        // slides out of the window.
        let values = vec![5.0, 1.0, 5.0, 1.0, 1.0];
        assert_eq!(rolling_max(&values, 3), vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_matches_naive_scan() {
        let values: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0 + (i % 7) as f64)
            .collect();
        let window = 9;

        let fast = rolling_max(&values, window);
        for (j, &max) in fast.iter().enumerate() {
            let naive = values[j..j + window]
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(max, naive, "window starting at {}", j);
        }

        let fast = rolling_min(&values, window);
        for (j, &min) in fast.iter().enumerate() {
            let naive = values[j..j + window]
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);
            assert_eq!(min, naive, "window starting at {}", j);
        }
    }
}
