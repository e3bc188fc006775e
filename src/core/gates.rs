//! Standard single-qubit gates and |0⟩ state preparation.
use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix2, Vector2};
use num_complex::Complex64 as C64;

use super::error::{BlochError, Result};
use super::state::QuantumState;

const UNITARY_TOL: f64 = 1e-8;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    H,
    X,
    Y,
    Z,
    S,
    T,
    Rx(f64),
    Ry(f64),
    Rz(f64),
}

impl Gate {
    pub fn matrix(&self) -> Matrix2<C64> {
        match *self {
            Gate::H => {
                let s = 1.0_f64 / 2.0_f64.sqrt();
                Matrix2::new(c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0))
            }
            Gate::X => Matrix2::new(c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)),
            Gate::Y => Matrix2::new(c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)),
            Gate::Z => Matrix2::new(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)),
            Gate::S => Matrix2::new(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)),
            Gate::T => Matrix2::new(
                c(1.0, 0.0),
                c(0.0, 0.0),
                c(0.0, 0.0),
                C64::from_polar(1.0, FRAC_PI_4),
            ),
            Gate::Rx(theta) => {
                let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
                Matrix2::new(c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0))
            }
            Gate::Ry(theta) => {
                let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
                Matrix2::new(c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0))
            }
            Gate::Rz(theta) => {
                let e_m = C64::from_polar(1.0, -theta / 2.0);
                let e_p = C64::from_polar(1.0, theta / 2.0);
                Matrix2::new(e_m, c(0.0, 0.0), c(0.0, 0.0), e_p)
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H => write!(f, "H"),
            Gate::X => write!(f, "X"),
            Gate::Y => write!(f, "Y"),
            Gate::Z => write!(f, "Z"),
            Gate::S => write!(f, "S"),
            Gate::T => write!(f, "T"),
            Gate::Rx(t) => write!(f, "Rx({t:.3})"),
            Gate::Ry(t) => write!(f, "Ry({t:.3})"),
            Gate::Rz(t) => write!(f, "Rz({t:.3})"),
        }
    }
}

/// Accepts `h`, `x`, `y`, `z`, `s`, `t`, and `rx:θ` / `ry:θ` / `rz:θ` where θ is a
/// number or a multiple/fraction of `pi` (`pi`, `pi/2`, `2pi`, `-pi/4`).
impl FromStr for Gate {
    type Err = BlochError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((n, a)) => (n.trim(), Some(a.trim())),
            None => (lower.as_str(), None),
        };
        let angle = || -> Result<f64> {
            let a = arg.ok_or_else(|| BlochError::InvalidGate(format!("{name} needs an angle, e.g. {name}:pi/2")))?;
            parse_angle(a).ok_or_else(|| BlochError::InvalidGate(format!("bad angle '{a}'")))
        };
        match (name, arg) {
            ("h", None) => Ok(Gate::H),
            ("x", None) => Ok(Gate::X),
            ("y", None) => Ok(Gate::Y),
            ("z", None) => Ok(Gate::Z),
            ("s", None) => Ok(Gate::S),
            ("t", None) => Ok(Gate::T),
            ("rx", _) => Ok(Gate::Rx(angle()?)),
            ("ry", _) => Ok(Gate::Ry(angle()?)),
            ("rz", _) => Ok(Gate::Rz(angle()?)),
            _ => Err(BlochError::InvalidGate(s.trim().to_string())),
        }
    }
}

fn parse_angle(text: &str) -> Option<f64> {
    let (neg, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = if let Some(idx) = body.find("pi") {
        let coeff = &body[..idx];
        let rest = &body[idx + 2..];
        let k = if coeff.is_empty() { 1.0 } else { coeff.parse::<f64>().ok()? };
        let d = match rest.strip_prefix('/') {
            Some(den) => den.parse::<f64>().ok()?,
            None if rest.is_empty() => 1.0,
            None => return None,
        };
        if d == 0.0 {
            return None;
        }
        k * PI / d
    } else {
        body.parse::<f64>().ok()?
    };
    value.is_finite().then_some(if neg { -value } else { value })
}

/// Parses a comma-separated gate list such as `h,s,ry:pi/4`.
pub fn parse_sequence(text: &str) -> Result<Vec<Gate>> {
    text.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Gate::from_str)
        .collect()
}

/// Rejects matrices with ‖U†U − I‖∞ above tolerance.
pub fn check_unitary(m: &Matrix2<C64>) -> Result<()> {
    let u_dag_u = m.adjoint() * m;
    let max_diff = (u_dag_u - Matrix2::<C64>::identity())
        .iter()
        .map(|z| z.norm())
        .fold(0.0_f64, f64::max);
    if max_diff > UNITARY_TOL {
        return Err(BlochError::NonUnitary(max_diff));
    }
    Ok(())
}

/// Applies `gates` to |0⟩ in order.
pub fn prepare(gates: &[Gate]) -> Result<QuantumState> {
    let zero = QuantumState::zero();
    let mut psi = Vector2::new(zero.alpha, zero.beta);
    for gate in gates {
        let m = gate.matrix();
        check_unitary(&m)?;
        psi = m * psi;
    }
    QuantumState::try_new(psi[0], psi[1])
}
