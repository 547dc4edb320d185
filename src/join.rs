//! Inner join of a left-ordered sequence against a keyed lookup.
//!
//! Every loader synchronizes two series the same way: walk the left side in its
//! original order, resolve a key for each element, and keep the element only if
//! the key resolves in the right-hand lookup. Unresolved elements are dropped
//! without error.

use std::collections::HashMap;
use std::hash::Hash;

/// Joins `left` against `right`, preserving the order of `left`.
///
/// Yields `(left item, resolved key, right value)` for every element that
/// resolves.
///
/// `key_of` returns `None` when the left element has no key at all (for example
/// an estimate stamp absent from the match table); such elements are dropped
/// just like elements whose key is missing from `right`.
pub fn inner_join_by_key<'r, L, K, R, F>(
    left: impl IntoIterator<Item = L>,
    right: &'r HashMap<K, R>,
    mut key_of: F,
) -> Vec<(L, K, &'r R)>
where
    K: Eq + Hash,
    F: FnMut(&L) -> Option<K>,
{
    left.into_iter()
        .filter_map(|item| {
            let key = key_of(&item)?;
            let matched = right.get(&key)?;
            Some((item, key, matched))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_left_order() {
        let right: HashMap<i64, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
        let left = vec![3_i64, 1, 2];

        let joined = inner_join_by_key(left.iter(), &right, |k| Some(**k));
        let keys: Vec<i64> = joined.iter().map(|(_, k, _)| *k).collect();
        let values: Vec<&str> = joined.iter().map(|(_, _, v)| **v).collect();

        assert_eq!(keys, vec![3, 1, 2]);
        assert_eq!(values, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_drops_unmatched_keys() {
        let right: HashMap<i64, f64> = [(10, 1.0), (30, 3.0)].into_iter().collect();
        let left = vec![10_i64, 20, 30, 40];

        let joined = inner_join_by_key(left.iter(), &right, |k| Some(**k));
        assert_eq!(joined.len(), 2);
        assert_eq!(*joined[0].0, 10);
        assert_eq!(joined[1].1, 30);
        assert_eq!(*joined[1].2, 3.0);
    }

    #[test]
    fn test_drops_elements_without_key() {
        let right: HashMap<i64, ()> = [(1, ())].into_iter().collect();
        let left = vec![Some(1_i64), None, Some(1)];

        let joined = inner_join_by_key(left.iter(), &right, |k| **k);
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_empty_right_side_yields_empty() {
        let right: HashMap<i64, ()> = HashMap::new();
        let joined = inner_join_by_key(0..5_i64, &right, |k| Some(*k));
        assert!(joined.is_empty());
    }
}
