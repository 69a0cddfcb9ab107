//! Longest increasing subsequence over old positions.
//!
//! Items whose old positions form the longest increasing run in new order
//! keep their relative order and need no move; every other common item moves.

/// Returns indices into `sequence` that form one longest strictly
/// increasing subsequence, in ascending index order.
///
/// Runs in `O(n log n)`. Among equal-length candidates the one ending on the
/// smallest value is kept, which favours items that appear later in new order.
pub(crate) fn longest_increasing_subsequence(sequence: &[usize]) -> Vec<usize> {
    // tails[k] = index of the smallest tail value of an increasing run of length k + 1.
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; sequence.len()];

    for (index, &value) in sequence.iter().enumerate() {
        let slot = tails.partition_point(|&tail| sequence[tail] < value);
        if slot > 0 {
            predecessors[index] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(index);
        } else {
            tails[slot] = index;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        result.push(index);
        cursor = predecessors[index];
    }
    result.reverse();
    result
}
