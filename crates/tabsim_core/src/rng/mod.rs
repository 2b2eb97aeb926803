//! # Random Number Generation
//!
//! Seeded, reproducible generators for the two samplers.
//!
//! - [`MinStdRng`]: the Park–Miller "minimal standard" linear congruential
//!   generator (multiplier 16807, modulus 2^31 - 1). The table sampler draws
//!   from it so that a given seed reproduces the published AS 159 stream
//!   exactly.
//! - [`SimRng`]: wrapper around `rand::rngs::StdRng` with the uniform,
//!   index and Poisson draws the histogram resampler needs.
//!
//! Both types own their state; identical seeds give identical sequences
//! and nothing is shared between instances.
//!
//! ## Usage Example
//!
//! ```rust
//! use tabsim_core::rng::{MinStdRng, SimRng};
//!
//! let mut lcg = MinStdRng::new(12345);
//! let u = lcg.next_uniform();
//! assert!(u > 0.0 && u < 1.0);
//!
//! let mut rng = SimRng::from_seed(7);
//! let k = rng.gen_poisson(4.5);
//! assert!(k >= 0);
//! ```

mod min_std;
mod sim;

pub use min_std::MinStdRng;
pub use sim::SimRng;
