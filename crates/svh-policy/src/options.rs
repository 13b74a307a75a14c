//! Legal action candidates for a decision point.

use super::heuristic::Heuristic;
use svh_core::DISCARD_TEMPLATE_MAX;
use svh_core::PLAY_SIZE;
use svh_gameplay::Action;
use svh_gameplay::Projection;

/// The C(7,5) = 21 play subsets of a full hand.
pub fn plays(projection: &Projection) -> Vec<Action> {
    subsets(projection.hand.len(), PLAY_SIZE)
        .into_iter()
        .map(Action::Play)
        .collect()
}

/// Discard templates: "discard the k worst cards" for k up to
/// [`DISCARD_TEMPLATE_MAX`], capped by the budget and hand size. The k = 0
/// template is representable only as the absence of a discard — it is not
/// itself a legal action.
pub fn discards(projection: &Projection) -> Vec<Action> {
    let cap = DISCARD_TEMPLATE_MAX
        .min(projection.discards as usize)
        .min(projection.hand.len());
    let worst = Heuristic::retention(projection);
    (1..=cap)
        .map(|k| {
            let mut picks = worst[..k].to_vec();
            picks.sort_unstable();
            Action::Discard(picks)
        })
        .collect()
}

/// The default candidate set: every play plus the discard templates.
pub fn options(projection: &Projection) -> Vec<Action> {
    if projection.over() {
        return Vec::new();
    }
    let mut candidates = plays(projection);
    candidates.extend(discards(projection));
    candidates
}

/// Full discard enumeration for exhaustive search. Not the default: the
/// template set keeps the branching factor flat.
pub fn exhaustive(projection: &Projection) -> Vec<Action> {
    if projection.over() {
        return Vec::new();
    }
    let mut candidates = plays(projection);
    let cap = projection.hand.len().min(projection.discards as usize);
    for k in 1..=cap {
        candidates.extend(subsets(projection.hand.len(), k).into_iter().map(Action::Discard));
    }
    candidates
}

/// All k-subsets of `0..n` as sorted index vectors, stepping the selection
/// mask with Gosper's hack (see [`svh_cards::HandIterator`]).
fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut bits: u32 = (1 << k) - 1;
    while bits < 1 << n {
        out.push((0..n).filter(|i| bits & (1 << i) != 0).collect());
        let lowest = bits & bits.wrapping_neg();
        let carried = bits + lowest;
        bits = carried | ((bits ^ carried) >> (2 + bits.trailing_zeros()));
    }
    out
}
