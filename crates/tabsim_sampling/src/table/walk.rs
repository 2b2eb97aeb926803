//! Conditional draw of a single cell (Patefield, AS 159).
//!
//! Given what is still unassigned, the value of cell `(l, m)` follows a
//! hypergeometric law. Its probability at `k` is
//!
//! ```text
//! row! rest! after! col! / (mass! k! (col-k)! (row-k)! (outside+k)!)
//! ```
//!
//! where `row` is the row remainder, `col` the column remainder over rows
//! `l..`, `mass` the unassigned mass over rows `l..` and columns `m..`,
//! `after = mass - col` the mass right of column `m`, `rest = mass - row`
//! the mass below row `l`, and `outside = rest - col`.
//!
//! The walk starts at the rounded mean and steps outward, alternating up
//! and down, using the ratio of neighbouring probabilities. The variate
//! order and step order below are fixed: changing either changes every
//! table a seed produces.

use tabsim_core::math::LogFactorials;
use tabsim_core::rng::MinStdRng;
use tracing::trace;

/// Unassigned mass around the cell being drawn.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CellMass {
    /// Remainder of the current row.
    pub row: i64,
    /// Remainder of the current column over the remaining rows.
    pub col: i64,
    /// Unassigned mass in the remaining rows, from this column rightwards.
    pub mass: i64,
    /// `mass - col`.
    pub after: i64,
    /// `mass - row`.
    pub rest: i64,
}

impl CellMass {
    #[inline]
    fn outside(&self) -> i64 {
        self.rest - self.col
    }

    /// `ln P(cell = k)`.
    #[inline]
    fn ln_probability(&self, fact: &LogFactorials, k: i64) -> f64 {
        fact.ln_factorial(self.row)
            + fact.ln_factorial(self.rest)
            + fact.ln_factorial(self.after)
            + fact.ln_factorial(self.col)
            - fact.ln_factorial(self.mass)
            - fact.ln_factorial(k)
            - fact.ln_factorial(self.col - k)
            - fact.ln_factorial(self.row - k)
            - fact.ln_factorial(self.outside() + k)
    }

    /// Rounded conditional mean `row * col / mass`.
    #[inline]
    fn mode(&self) -> i64 {
        ((self.row * self.col) as f64 / self.mass as f64 + 0.5) as i64
    }
}

/// Draws the value of one cell. `cell.mass` must be positive.
pub(crate) fn draw_cell(cell: CellMass, fact: &LogFactorials, rng: &mut MinStdRng) -> i64 {
    let outside = cell.outside();
    let mut r = rng.next_uniform();

    loop {
        let mut up = cell.mode();
        let mut x = cell.ln_probability(fact, up).exp();
        if r <= x {
            return up;
        }

        let mut down = up;
        let mut y = x;
        let mut cumulative = x;
        let mut up_done = false;
        let mut down_done = false;

        while !up_done {
            let j = (cell.col - up) * (cell.row - up);
            if j == 0 {
                up_done = true;
            } else {
                up += 1;
                x = x * j as f64 / (up * (outside + up)) as f64;
                cumulative += x;
                if r <= cumulative {
                    return up;
                }
            }

            while !down_done {
                let j = down * (outside + down);
                if j == 0 {
                    down_done = true;
                    break;
                }
                down -= 1;
                y = y * j as f64 / ((cell.col - down) * (cell.row - down)) as f64;
                cumulative += y;
                if r <= cumulative {
                    return down;
                }
                // Alternate with the upward side until it is exhausted.
                if !up_done {
                    break;
                }
            }
        }

        // Both tails exhausted without covering r: rounding lost mass.
        trace!(cumulative, r, "redrawing cell variate");
        r = cumulative * rng.next_uniform();
    }
}
