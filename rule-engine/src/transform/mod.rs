//! Transform families behind the Replacement Transformation Engine
//!
//! Every family enumerates occurrences (header lines, parameters, regex
//! matches), selects the ones to mutate according to the cardinality mode, and
//! rebuilds one raw request per selection. An empty candidate list means no
//! occurrence matched; the engine then returns the input unchanged.

mod body;
mod header;
mod param;
mod raw;

pub use body::BodyTransform;
pub use header::{add_header, HeaderOp, HeaderTransform};
pub use param::{ParamFamily, ParamOp, ParamTransform};
pub use raw::{FirstLineTransform, RequestStringTransform};

use crate::replacement::ReplacementCount;
use crate::subset::{apply_subsets, mutate_selected};

/// Mutated sequences for one cardinality mode
///
/// `positions` are the ascending indices of the matching occurrences. Returns
/// no sequence when nothing matched, one for `First` and `All`, and
/// `2^k - 1` for `AllPossibilities`.
pub(crate) fn select<T: Clone>(
    items: &[T],
    positions: &[usize],
    which: ReplacementCount,
    mutate: impl Fn(&T) -> Option<T>,
) -> Vec<Vec<T>> {
    if positions.is_empty() {
        return Vec::new();
    }

    match which {
        ReplacementCount::First => vec![mutate_selected(items, &positions[..1], &mutate)],
        ReplacementCount::All => vec![mutate_selected(items, positions, &mutate)],
        ReplacementCount::AllPossibilities => apply_subsets(items, positions, mutate),
    }
}
