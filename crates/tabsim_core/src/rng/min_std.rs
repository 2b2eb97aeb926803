//! Park–Miller minimal standard generator.

/// Modulus 2^31 - 1.
const MODULUS: i64 = 2_147_483_647;
/// Multiplier 7^5.
const MULTIPLIER: i64 = 16_807;
/// Schrage decomposition: `MODULUS = MULTIPLIER * Q + R`.
const Q: i64 = 127_773;
const R: i64 = 2_836;
/// Truncated reciprocal of the modulus, as in `r8_uniform_01`.
const SCALE: f64 = 4.656_612_875e-10;

/// Linear congruential generator `seed = 16807 * seed mod (2^31 - 1)`.
///
/// Uses Schrage's method so intermediate products stay within 32 bits,
/// matching the classic `r8_uniform_01` routine step for step. Variates
/// lie strictly between 0 and 1.
///
/// # Seeding
///
/// Seeds are reduced modulo 2^31 - 1 and a residue of zero becomes 1 (zero
/// is a fixed point of the recursion). Seeds in `1..2^31 - 1` are used
/// verbatim.
///
/// # Examples
///
/// ```rust
/// use tabsim_core::rng::MinStdRng;
///
/// let mut rng = MinStdRng::new(1);
/// let u = rng.next_uniform();
/// assert_eq!(rng.state(), 16807);
/// assert!((u - 16807.0 * 4.656612875e-10).abs() < 1e-18);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinStdRng {
    state: i64,
    seed: i64,
}

impl MinStdRng {
    /// Creates a generator from any integer seed.
    pub fn new(seed: i64) -> Self {
        let state = match seed.rem_euclid(MODULUS) {
            0 => 1,
            s => s,
        };
        Self { state, seed }
    }

    /// Seed passed at construction (before normalisation).
    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Current internal state, always in `1..2^31 - 1`.
    #[inline]
    pub fn state(&self) -> i64 {
        self.state
    }

    /// Advances the state and returns a uniform variate in (0, 1).
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        let k = self.state / Q;
        self.state = MULTIPLIER * (self.state - k * Q) - k * R;
        if self.state < 0 {
            self.state += MODULUS;
        }
        self.state as f64 * SCALE
    }
}
