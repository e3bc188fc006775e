//! Single-qubit states and their Bloch-sphere projection.
//!
//! A pure state |ψ⟩ = α|0⟩ + β|1⟩ maps to the point
//!
//!   x = 2 Re(α* β),  y = 2 Im(α* β),  z = |α|² − |β|²
//!
//! which lies on the unit sphere. Averages of sampled outcomes are mixed states
//! and land strictly inside it.
use nalgebra::Vector3;
use num_complex::Complex64 as C64;
use serde::Serialize;

use super::error::{BlochError, Result};

pub const EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantumState {
    pub alpha: C64,
    pub beta: C64,
}

impl QuantumState {
    /// Normalizes the pair; rejects a zero or non-finite norm.
    pub fn try_new(alpha: C64, beta: C64) -> Result<Self> {
        // hypot of the moduli: no overflow or underflow from squaring
        let norm = alpha.norm().hypot(beta.norm());
        if norm == 0.0 || !norm.is_finite() {
            return Err(BlochError::DegenerateState);
        }
        Ok(Self { alpha: alpha / norm, beta: beta / norm })
    }

    /// |0⟩
    pub fn zero() -> Self {
        Self { alpha: C64::new(1.0, 0.0), beta: C64::new(0.0, 0.0) }
    }

    /// Probability of reading `1` in the computational basis.
    pub fn prob_one(&self) -> f64 {
        self.beta.norm_sqr()
    }

    pub fn bloch(&self) -> BlochVector {
        let cross = self.alpha.conj() * self.beta;
        BlochVector {
            x: 2.0 * cross.re,
            y: 2.0 * cross.im,
            z: self.alpha.norm_sqr() - self.beta.norm_sqr(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    pub const NORTH: BlochVector = BlochVector { x: 0.0, y: 0.0, z: 1.0 };
    pub const SOUTH: BlochVector = BlochVector { x: 0.0, y: 0.0, z: -1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        self.as_vector().norm()
    }

    /// Polar angle θ ∈ [0, π] measured from +z.
    pub fn polar_angle(&self) -> f64 {
        let r = self.length();
        if r < EPS {
            return 0.0;
        }
        (self.z / r).clamp(-1.0, 1.0).acos()
    }

    /// Azimuth φ ∈ [0, 2π) in the x–y plane.
    pub fn azimuth(&self) -> f64 {
        let phi = self.y.atan2(self.x);
        if phi < 0.0 { phi + std::f64::consts::TAU } else { phi }
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Projects an amplitude pair onto the Bloch sphere, normalizing first.
pub fn project(alpha: C64, beta: C64) -> Result<BlochVector> {
    Ok(QuantumState::try_new(alpha, beta)?.bloch())
}

/// R_y(θ)|0⟩ = cos(θ/2)|0⟩ + sin(θ/2)|1⟩, projected.
pub fn from_rotation_angle(theta: f64) -> BlochVector {
    let half = theta / 2.0;
    // cos² + sin² = 1, so the pair is never degenerate
    QuantumState {
        alpha: C64::new(half.cos(), 0.0),
        beta: C64::new(half.sin(), 0.0),
    }
    .bloch()
}
