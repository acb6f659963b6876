//! Subset Enumerator
//!
//! "Replace all possibilities" produces one candidate per non-empty subset of
//! the matching occurrences. Subsets are generated by a binary counter over the
//! k candidate positions, so every subset appears exactly once and the empty
//! subset never does. Bit 0 of the counter is the first occurrence.

/// Iterator over every non-empty subset of `0..k`
///
/// Each item lists the selected indices in ascending order. Subsets come in
/// counter order: `{0}`, `{1}`, `{0, 1}`, `{2}`, ...
#[derive(Debug, Clone)]
pub struct Subsets {
    selected: Vec<bool>,
    exhausted: bool,
}

impl Subsets {
    pub fn new(k: usize) -> Self {
        Self {
            selected: vec![false; k],
            exhausted: k == 0,
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        // Increment: clear the trailing run of set bits, set the first clear one
        let Some(first_clear) = self.selected.iter().position(|bit| !bit) else {
            self.exhausted = true;
            return None;
        };
        for bit in &mut self.selected[..first_clear] {
            *bit = false;
        }
        self.selected[first_clear] = true;

        Some(
            self.selected
                .iter()
                .enumerate()
                .filter_map(|(idx, bit)| bit.then_some(idx))
                .collect(),
        )
    }
}

/// Positions of the items accepted by `is_candidate`
pub fn matching_positions<T>(items: &[T], mut is_candidate: impl FnMut(&T) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| is_candidate(item).then_some(idx))
        .collect()
}

/// Apply `mutate` to the items at the selected positions
///
/// `mutate` returns the replacement item, or `None` to drop the item. Items
/// outside `selected` are kept as they are.
pub fn mutate_selected<T: Clone>(
    items: &[T],
    selected: &[usize],
    mutate: impl Fn(&T) -> Option<T>,
) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    let mut selected = selected.iter().peekable();

    for (idx, item) in items.iter().enumerate() {
        if selected.next_if(|&&pos| pos == idx).is_some() {
            if let Some(replacement) = mutate(item) {
                out.push(replacement);
            }
        } else {
            out.push(item.clone());
        }
    }
    out
}

/// One mutated sequence per non-empty subset of `positions`
///
/// `positions` must be ascending. Yields `2^k - 1` sequences for
/// `k = positions.len()` and nothing for `k = 0`.
pub fn apply_subsets<T: Clone>(
    items: &[T],
    positions: &[usize],
    mutate: impl Fn(&T) -> Option<T>,
) -> Vec<Vec<T>> {
    Subsets::new(positions.len())
        .map(|subset| {
            let selected: Vec<usize> = subset.into_iter().map(|i| positions[i]).collect();
            mutate_selected(items, &selected, &mutate)
        })
        .collect()
}
