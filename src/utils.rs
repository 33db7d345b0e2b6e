//! Convenience methods for constructing grids and searching sampled
//! coordinates, echoing helpers common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// Zero points gives an empty vec, and a single point is just `start`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let dx: T = (stop - start) / T::from(n - 1).unwrap();
            (0..n).map(|i| start + T::from(i).unwrap() * dx).collect()
        }
    }
}

/// Generates a meshgrid in C ordering (r0, c0), (r0, c1), ..., (r0, cn), (r1, c0), ...
/// which matches the value layout expected by [`crate::bilinear::Bilinear`].
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

/// Index of the entry closest to `target`, skipping NaN entries.
///
/// Ties resolve to the first such entry. Returns `None` if there are no
/// comparable entries.
pub fn nearest_index<T>(xs: &[T], target: T) -> Option<usize>
where
    T: Float,
{
    xs.iter()
        .enumerate()
        .filter(|(_, x)| !x.is_nan())
        .map(|(i, &x)| (i, (x - target).abs()))
        .fold(None, |best: Option<(usize, T)>, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace_meshgrid() {
        let r = linspace(0.0, 2.0, 3);
        let c = linspace(-1.0, 1.0, 2);
        assert_eq!(r, vec![0.0, 1.0, 2.0]);

        let grid = meshgrid(Vec::from([&r, &c]));
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], vec![0.0, -1.0]);
        assert_eq!(grid[1], vec![0.0, 1.0]);
        assert_eq!(grid[2], vec![1.0, -1.0]);
    }

    #[test]
    fn test_linspace_short() {
        assert!(linspace(0.0_f64, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0_f64, 1.0, 1), vec![3.0]);
        assert_eq!(linspace(3.0_f64, 1.0, 2), vec![3.0, 1.0]);
    }

    #[test]
    fn test_nearest_index() {
        let xs = [0.0, 10.0, 20.0, f64::NAN, 30.0];
        assert_eq!(nearest_index(&xs, -5.0), Some(0));
        assert_eq!(nearest_index(&xs, 12.0), Some(1));
        assert_eq!(nearest_index(&xs, 15.0), Some(1)); // tie goes to the first
        assert_eq!(nearest_index(&xs, 29.0), Some(4));
        assert_eq!(nearest_index(&xs, 1e9), Some(4));
        assert_eq!(nearest_index::<f64>(&[], 1.0), None);
        assert_eq!(nearest_index(&[f64::NAN], 1.0), None);
    }
}
