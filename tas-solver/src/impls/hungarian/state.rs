/// Per-cell marker used while searching for a complete zero-cost matching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Mask {
    #[default]
    Empty,
    /// The cell is part of the current (partial) matching
    Star,
    /// The cell is a candidate for the next augmenting path
    Prime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Location {
    pub row: usize,
    pub col: usize,
}

/// The phases of the main cycle. `BuildPath` carries the prime that starts the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    MarkStars,
    PrimeAndCover,
    BuildPath(Location),
    AdjustCosts,
    Done,
}

/// Counters reported once the main cycle halts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Stats {
    pub augmentations: usize,
    pub adjustments: usize,
}

/// The mutable working set of one solve on an `n × n` matrix.
///
/// Everything here is owned by a single call; nothing survives it.
#[derive(Debug)]
pub(crate) struct State {
    n: usize,
    costs: Vec<f64>,
    masks: Vec<Mask>,
    rows_covered: Vec<bool>,
    cols_covered: Vec<bool>,
    path: Vec<Location>,
    tolerance: f64,
}

impl State {
    pub fn new(costs: Vec<f64>, n: usize, tolerance: f64) -> Self {
        debug_assert_eq!(costs.len(), n * n);
        Self {
            n,
            costs,
            masks: vec![Mask::Empty; n * n],
            rows_covered: vec![false; n],
            cols_covered: vec![false; n],
            path: Vec::with_capacity(2 * n),
            tolerance,
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.n + col
    }

    fn is_zero(&self, row: usize, col: usize) -> bool {
        self.costs[self.idx(row, col)].abs() < self.tolerance
    }

    #[cfg(test)]
    pub fn cost(&self, row: usize, col: usize) -> f64 {
        self.costs[self.idx(row, col)]
    }

    #[cfg(test)]
    pub fn mask(&self, row: usize, col: usize) -> Mask {
        self.masks[self.idx(row, col)]
    }

    /// Turn a maximization into a minimization: each value `v` becomes `rowMax - v`.
    ///
    /// For any complete matching the transformed total differs from the original
    /// one only by the sum of the row maxima, so the optimal matchings coincide.
    pub fn invert_rows(&mut self) {
        for row in self.costs.chunks_exact_mut(self.n) {
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            row.iter_mut().for_each(|v| *v = max - *v);
        }
    }

    /// Subtract each row's minimum from that row
    pub fn reduce_rows(&mut self) {
        for row in self.costs.chunks_exact_mut(self.n) {
            let min = row.iter().copied().fold(f64::INFINITY, f64::min);
            row.iter_mut().for_each(|v| *v -= min);
        }
    }

    /// Subtract each column's minimum from that column
    pub fn reduce_columns(&mut self) {
        for col in 0..self.n {
            let min = (0..self.n)
                .map(|row| self.costs[self.idx(row, col)])
                .fold(f64::INFINITY, f64::min);
            for row in 0..self.n {
                let idx = self.idx(row, col);
                self.costs[idx] -= min;
            }
        }
    }

    /// Greedily star zeros in scan order, at most one per row and column
    pub fn star_initial_zeros(&mut self) {
        for row in 0..self.n {
            for col in 0..self.n {
                if self.is_zero(row, col) && !self.rows_covered[row] && !self.cols_covered[col] {
                    let idx = self.idx(row, col);
                    self.masks[idx] = Mask::Star;
                    self.rows_covered[row] = true;
                    self.cols_covered[col] = true;
                }
            }
        }
        self.clear_covers();
    }

    /// Drive the phases until every column holds a star
    pub fn run(&mut self) -> Stats {
        let mut stats = Stats::default();
        let mut phase = Phase::MarkStars;

        loop {
            phase = match phase {
                Phase::MarkStars => self.mark_stars(),
                Phase::PrimeAndCover => self.prime_and_cover(),
                Phase::BuildPath(start) => {
                    stats.augmentations += 1;
                    self.build_path(start)
                }
                Phase::AdjustCosts => {
                    stats.adjustments += 1;
                    self.adjust_costs()
                }
                Phase::Done => break,
            };
        }

        stats
    }

    /// Cover every column containing a star; halt once all of them are covered
    pub fn mark_stars(&mut self) -> Phase {
        for row in 0..self.n {
            for col in 0..self.n {
                if self.masks[self.idx(row, col)] == Mask::Star {
                    self.cols_covered[col] = true;
                }
            }
        }

        if self.cols_covered.iter().all(|&covered| covered) {
            Phase::Done
        } else {
            Phase::PrimeAndCover
        }
    }

    /// Prime uncovered zeros until one is found in a row without a star
    pub fn prime_and_cover(&mut self) -> Phase {
        loop {
            let Some(location) = self.find_uncovered_zero() else {
                return Phase::AdjustCosts;
            };

            let idx = self.idx(location.row, location.col);
            self.masks[idx] = Mask::Prime;

            match self.find_in_row(location.row, Mask::Star) {
                Some(star_col) => {
                    self.rows_covered[location.row] = true;
                    self.cols_covered[star_col] = false;
                }
                None => return Phase::BuildPath(location),
            }
        }
    }

    /// Follow the alternating prime/star path from `start` and flip it, growing the matching by one
    pub fn build_path(&mut self, start: Location) -> Phase {
        self.path.clear();
        self.path.push(start);

        let mut col = start.col;
        while let Some(row) = self.find_in_col(col, Mask::Star) {
            self.path.push(Location { row, col });
            let Some(prime_col) = self.find_in_row(row, Mask::Prime) else {
                break;
            };
            col = prime_col;
            self.path.push(Location { row, col });
        }

        for i in 0..self.path.len() {
            let Location { row, col } = self.path[i];
            let idx = self.idx(row, col);
            self.masks[idx] = match self.masks[idx] {
                Mask::Star => Mask::Empty,
                Mask::Prime => Mask::Star,
                Mask::Empty => Mask::Empty,
            };
        }

        self.clear_covers();
        self.clear_primes();
        Phase::MarkStars
    }

    /// Shift the smallest uncovered value from uncovered columns onto covered rows,
    /// creating at least one new uncovered zero
    pub fn adjust_costs(&mut self) -> Phase {
        let mut min = f64::INFINITY;
        for row in (0..self.n).filter(|&row| !self.rows_covered[row]) {
            for col in (0..self.n).filter(|&col| !self.cols_covered[col]) {
                min = min.min(self.costs[self.idx(row, col)]);
            }
        }

        for row in 0..self.n {
            for col in 0..self.n {
                let idx = self.idx(row, col);
                if self.rows_covered[row] {
                    self.costs[idx] += min;
                }
                if !self.cols_covered[col] {
                    self.costs[idx] -= min;
                }
            }
        }

        Phase::PrimeAndCover
    }

    /// The starred column of every row, in row order
    pub fn into_assignment(self) -> Vec<usize> {
        (0..self.n)
            .map(|row| {
                self.find_in_row(row, Mask::Star)
                    .expect("every row holds a star once all columns are covered")
            })
            .collect()
    }

    fn find_uncovered_zero(&self) -> Option<Location> {
        (0..self.n)
            .filter(|&row| !self.rows_covered[row])
            .flat_map(|row| (0..self.n).map(move |col| Location { row, col }))
            .find(|&Location { row, col }| !self.cols_covered[col] && self.is_zero(row, col))
    }

    fn find_in_row(&self, row: usize, mask: Mask) -> Option<usize> {
        (0..self.n).find(|&col| self.masks[self.idx(row, col)] == mask)
    }

    fn find_in_col(&self, col: usize, mask: Mask) -> Option<usize> {
        (0..self.n).find(|&row| self.masks[self.idx(row, col)] == mask)
    }

    fn clear_covers(&mut self) {
        self.rows_covered.fill(false);
        self.cols_covered.fill(false);
    }

    fn clear_primes(&mut self) {
        for mask in self.masks.iter_mut().filter(|mask| **mask == Mask::Prime) {
            *mask = Mask::Empty;
        }
    }
}
