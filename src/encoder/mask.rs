/// Mask application, penalty scoring and mask selection
use log::{debug, trace};
use rayon::prelude::*;

use super::config;
use super::format::{draw_format_bits, format_bits};
use super::function_mask::FunctionPatterns;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];
const FINDER_LIKE_REVERSED: [bool; 11] = [
    false, false, false, false, true, false, true, true, true, false, true,
];

/// Penalty breakdown for one masked matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PenaltyScore {
    /// Rule 1: runs of five or more same-colored modules
    pub run: u32,
    /// Rule 2: uniform 2x2 blocks
    pub block: u32,
    /// Rule 3: finder-like 1:1:3:1:1 sequences with a light run of four
    pub finder: u32,
    /// Rule 4: deviation of the dark proportion from 50%
    pub balance: u32,
}

impl PenaltyScore {
    pub fn evaluate(modules: &BitMatrix) -> Self {
        Self {
            run: penalty_runs(modules),
            block: penalty_blocks(modules),
            finder: penalty_finder_like(modules),
            balance: penalty_balance(modules),
        }
    }

    pub fn total(&self) -> u32 {
        self.run + self.block + self.finder + self.balance
    }
}

/// Outcome of the mask trial
#[derive(Debug, Clone)]
pub struct MaskSelection {
    pub modules: BitMatrix,
    pub mask: MaskPattern,
    pub format_bits: u16,
    pub score: PenaltyScore,
}

/// XOR every data module where the mask function is true
pub fn apply_mask(modules: &mut BitMatrix, mask: MaskPattern, func: &FunctionPatterns) {
    let size = modules.width();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(y, x) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Mask the matrix and write its format bits, as committed for `mask`
pub fn masked_candidate(
    modules: &BitMatrix,
    func: &FunctionPatterns,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> (BitMatrix, u16) {
    let mut candidate = modules.clone();
    apply_mask(&mut candidate, mask, func);
    let bits = format_bits(ec_level, mask);
    draw_format_bits(&mut candidate, bits);
    (candidate, bits)
}

/// Try all eight masks and keep the lowest total penalty.
///
/// Candidates are compared in mask order 0..=7 and only a strictly smaller
/// penalty replaces the current best, so ties go to the lower index.
pub fn select_best_mask(
    modules: &BitMatrix,
    func: &FunctionPatterns,
    ec_level: ECLevel,
) -> MaskSelection {
    let trial = |mask: MaskPattern| {
        let (candidate, bits) = masked_candidate(modules, func, ec_level, mask);
        let score = PenaltyScore::evaluate(&candidate);
        MaskSelection {
            modules: candidate,
            mask,
            format_bits: bits,
            score,
        }
    };

    let candidates: Vec<MaskSelection> = if config::parallel_mask_trials() {
        MaskPattern::ALL.par_iter().map(|&m| trial(m)).collect()
    } else {
        MaskPattern::ALL.iter().map(|&m| trial(m)).collect()
    };

    let mut best: Option<MaskSelection> = None;
    for candidate in candidates {
        trace!(
            "mask {}: penalty {} ({:?})",
            candidate.mask.index(),
            candidate.score.total(),
            candidate.score
        );
        let better = best
            .as_ref()
            .is_none_or(|b| candidate.score.total() < b.score.total());
        if better {
            best = Some(candidate);
        }
    }

    // MaskPattern::ALL is non-empty, so a candidate always exists
    let best = best.unwrap_or_else(|| trial(MaskPattern::Pattern0));
    debug!(
        "selected mask {} with penalty {}",
        best.mask.index(),
        best.score.total()
    );
    best
}

fn lines(modules: &BitMatrix) -> impl Iterator<Item = Vec<bool>> + '_ {
    let (width, height) = (modules.width(), modules.height());
    let rows = (0..height).map(move |y| (0..width).map(|x| modules.get(x, y)).collect::<Vec<_>>());
    let cols = (0..width).map(move |x| (0..height).map(|y| modules.get(x, y)).collect::<Vec<_>>());
    rows.chain(cols)
}

/// Rule 1: each run of length n >= 5 in a row or column scores n - 2
pub fn penalty_runs(modules: &BitMatrix) -> u32 {
    let mut penalty = 0;
    for line in lines(modules) {
        let mut run = 0u32;
        let mut prev = None;
        for &module in &line {
            if Some(module) == prev {
                run += 1;
            } else {
                if run >= 5 {
                    penalty += PENALTY_N1 + run - 5;
                }
                run = 1;
                prev = Some(module);
            }
        }
        if run >= 5 {
            penalty += PENALTY_N1 + run - 5;
        }
    }
    penalty
}

/// Rule 2: every 2x2 window of one color scores 3
pub fn penalty_blocks(modules: &BitMatrix) -> u32 {
    let mut penalty = 0;
    for y in 0..modules.height().saturating_sub(1) {
        for x in 0..modules.width().saturating_sub(1) {
            let color = modules.get(x, y);
            if modules.get(x + 1, y) == color
                && modules.get(x, y + 1) == color
                && modules.get(x + 1, y + 1) == color
            {
                penalty += PENALTY_N2;
            }
        }
    }
    penalty
}

/// Rule 3: every `10111010000` or `00001011101` window in a row or column scores 40
pub fn penalty_finder_like(modules: &BitMatrix) -> u32 {
    let mut penalty = 0;
    for line in lines(modules) {
        for window in line.windows(11) {
            if window == FINDER_LIKE || window == FINDER_LIKE_REVERSED {
                penalty += PENALTY_N3;
            }
        }
    }
    penalty
}

/// Rule 4: 10 points per 5% step the dark proportion sits away from 50%
pub fn penalty_balance(modules: &BitMatrix) -> u32 {
    let total = modules.width() * modules.height();
    if total == 0 {
        return 0;
    }
    let percent = (modules.count_ones() * 100 / total) as i64;
    let prev = percent - percent % 5;
    let next = prev + 5;
    let steps = (prev - 50).abs().min((next - 50).abs()) / 5;
    steps as u32 * PENALTY_N4
}
