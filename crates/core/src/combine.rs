//! Combination engine
//!
//! Cartesian products over per-dimension value sequences.
//!
//! # Ordering
//!
//! Products are enumerated in row-major order: the first axis varies
//! slowest and the last axis varies fastest. Run ids are assigned in this
//! order, so it must not change.
//!
//! ```
//! use hypersweep_core::combine::cartesian_product;
//!
//! let tuples = cartesian_product(&[vec![0, 1], vec![10, 20]]);
//! assert_eq!(tuples, vec![vec![0, 10], vec![0, 20], vec![1, 10], vec![1, 20]]);
//! ```

/// Number of tuples in the product of axes with the given lengths, or
/// `None` if it overflows `usize`.
///
/// Zero axes produce zero tuples.
pub fn product_len(lens: &[usize]) -> Option<usize> {
    if lens.is_empty() {
        return Some(0);
    }
    lens.iter().try_fold(1usize, |acc, &len| acc.checked_mul(len))
}

/// Compute the Cartesian product of `axes` in row-major order.
///
/// Zero axes yield no tuples; a single axis yields one 1-tuple per value;
/// any empty axis empties the product.
pub fn cartesian_product<T: Clone>(axes: &[Vec<T>]) -> Vec<Vec<T>> {
    if axes.is_empty() {
        return Vec::new();
    }

    let lens: Vec<usize> = axes.iter().map(Vec::len).collect();
    let mut tuples = Vec::with_capacity(product_len(&lens).unwrap_or_default());
    let mut tuple: Vec<T> = Vec::with_capacity(axes.len());
    extend_product(axes, &mut tuple, &mut tuples);
    tuples
}

fn extend_product<T: Clone>(axes: &[Vec<T>], prefix: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
    let Some((axis, rest)) = axes.split_first() else {
        out.push(prefix.clone());
        return;
    };
    for value in axis {
        prefix.push(value.clone());
        extend_product(rest, prefix, out);
        prefix.pop();
    }
}

/// Decode a flat enumeration index into per-axis indices.
///
/// Uses the same row-major order as [`cartesian_product`], so
/// `cartesian_product(axes)[i]` selects `axes[d][unrank(lens, i)[d]]` on
/// every axis `d`. Returns `None` when `index` is past the end.
pub fn unrank(lens: &[usize], index: usize) -> Option<Vec<usize>> {
    if index >= product_len(lens)? {
        return None;
    }

    let mut indices = vec![0; lens.len()];
    let mut remainder = index;
    for (slot, &len) in indices.iter_mut().zip(lens).rev() {
        *slot = remainder % len;
        remainder /= len;
    }
    Some(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_axes() {
        let axes: Vec<Vec<f64>> = Vec::new();
        assert!(cartesian_product(&axes).is_empty());
        assert_eq!(product_len(&[]), Some(0));
        assert_eq!(unrank(&[], 0), None);
    }

    #[test]
    fn test_single_axis_is_identity() {
        let tuples = cartesian_product(&[vec![1.0, 2.0, 3.0]]);
        assert_eq!(tuples, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_row_major_order() {
        let tuples = cartesian_product(&[vec!['a', 'b'], vec!['x'], vec!['1', '2', '3']]);
        let rendered: Vec<String> = tuples.iter().map(|t| t.iter().collect()).collect();
        assert_eq!(
            rendered,
            vec!["ax1", "ax2", "ax3", "bx1", "bx2", "bx3"]
        );
    }

    #[test]
    fn test_single_value_axis_keeps_points() {
        let tuples = cartesian_product(&[vec![0, 1], vec![7], vec![2, 3]]);
        assert_eq!(tuples.len(), 4);
        assert!(tuples.iter().all(|t| t[1] == 7));
    }

    #[test]
    fn test_empty_axis_empties_product() {
        let tuples = cartesian_product(&[vec![0, 1], vec![]]);
        assert!(tuples.is_empty());
        assert_eq!(product_len(&[2, 0]), Some(0));
    }

    #[test]
    fn test_unrank_matches_product() {
        let axes = vec![vec![0, 1, 2], vec![10, 20], vec![100, 200, 300, 400]];
        let lens: Vec<usize> = axes.iter().map(Vec::len).collect();
        let tuples = cartesian_product(&axes);

        assert_eq!(Some(tuples.len()), product_len(&lens));
        for (i, tuple) in tuples.iter().enumerate() {
            let indices = unrank(&lens, i).unwrap();
            let decoded: Vec<i32> = indices
                .iter()
                .zip(&axes)
                .map(|(&j, axis)| axis[j])
                .collect();
            assert_eq!(&decoded, tuple);
        }
        assert_eq!(unrank(&lens, tuples.len()), None);
    }

    #[test]
    fn test_product_len_overflow() {
        assert_eq!(product_len(&[100_000; 3]), Some(1_000_000_000_000_000));
        assert_eq!(product_len(&[100_000; 5]), None);
        assert_eq!(product_len(&[usize::MAX, 0]), Some(0));
        assert_eq!(unrank(&[100_000; 5], 0), None);
    }
}
