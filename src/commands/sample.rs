//! `sample`: prepare one state, show where it sits on the sphere and how it measures.
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use num_complex::Complex64 as C64;
use serde_json::json;

use crate::config::Settings;
use crate::core::gates::{parse_sequence, prepare, Gate};
use crate::core::{MeasurementSampler, MeasurementStats, QuantumState};

const BAR_WIDTH: f64 = 40.0;

pub struct SampleArgs {
    pub gates: Option<String>,
    pub alpha: Option<String>,
    pub beta: Option<String>,
    pub shots: u64,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn parse_amplitude(text: &str) -> Result<C64> {
    let trimmed = text.trim();
    trimmed
        .parse::<C64>()
        .map_err(|e| anyhow!("bad amplitude '{trimmed}': {e}"))
}

/// Gate list wins when present; otherwise explicit amplitudes; otherwise H|0⟩.
pub fn resolve_state(args: &SampleArgs) -> Result<(QuantumState, Vec<Gate>)> {
    if let (Some(a), Some(b)) = (&args.alpha, &args.beta) {
        let state = QuantumState::try_new(parse_amplitude(a)?, parse_amplitude(b)?)
            .context("cannot build state from amplitudes")?;
        return Ok((state, Vec::new()));
    }
    let gates = parse_sequence(args.gates.as_deref().unwrap_or("h"))?;
    Ok((prepare(&gates)?, gates))
}

pub fn main(args: SampleArgs, settings: &Settings) -> Result<()> {
    let (state, gates) = resolve_state(&args)?;
    let bloch = state.bloch();
    let mut sampler = match args.seed.or(settings.sampler.seed) {
        Some(s) => MeasurementSampler::seeded(s),
        None => MeasurementSampler::from_entropy(),
    };
    let stats = sampler.sample_counts(&state, args.shots)?;
    tracing::debug!(?stats, "sampled");

    if args.json {
        let report = json!({
            "gates": gates.iter().map(|g| g.to_string()).collect::<Vec<_>>(),
            "alpha": [state.alpha.re, state.alpha.im],
            "beta": [state.beta.re, state.beta.im],
            "bloch": bloch,
            "theta": bloch.polar_angle(),
            "phi": bloch.azimuth(),
            "stats": stats,
            "p_exact": { "0": 1.0 - state.prob_one(), "1": state.prob_one() },
            "p_est": { "0": stats.p_zero(), "1": stats.p_one() },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !gates.is_empty() {
        let names: Vec<String> = gates.iter().map(|g| g.to_string()).collect();
        println!("{} {}|0⟩", "circuit".bold(), names.join(" · "));
    }
    println!(
        "{}   α = {:.4}{:+.4}i, β = {:.4}{:+.4}i",
        "state".bold(),
        state.alpha.re,
        state.alpha.im,
        state.beta.re,
        state.beta.im
    );
    println!(
        "{}   x = {:+.3}, y = {:+.3}, z = {:+.3}  (θ = {:.3}, φ = {:.3})",
        "bloch".bold(),
        bloch.x,
        bloch.y,
        bloch.z,
        bloch.polar_angle(),
        bloch.azimuth()
    );
    println!("{}   {}", "shots".bold(), stats.total);
    print!("{}", histogram(&stats, state.prob_one()));
    Ok(())
}

pub fn histogram(stats: &MeasurementStats, prob_one: f64) -> String {
    let rows = [
        ("0", stats.count0, stats.p_zero(), 1.0 - prob_one),
        ("1", stats.count1, stats.p_one(), prob_one),
    ];
    let mut out = String::new();
    for (label, count, est, exact) in rows {
        let filled = ((est * BAR_WIDTH).round() as usize).min(BAR_WIDTH as usize);
        // pad outside the color codes so both rows line up
        let pad = " ".repeat(BAR_WIDTH as usize - filled);
        out.push_str(&format!(
            " {label} │{}{pad} {count} ({est:.3}, exact {exact:.3})\n",
            "█".repeat(filled).blue()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SampleArgs {
        SampleArgs { gates: None, alpha: None, beta: None, shots: 10, seed: Some(1), json: false }
    }

    #[test]
    fn default_state_is_plus() {
        let (state, gates) = resolve_state(&args()).unwrap();
        assert_eq!(gates, vec![Gate::H]);
        assert!((state.prob_one() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn amplitudes_are_parsed_and_normalized() {
        let a = SampleArgs { alpha: Some("3".into()), beta: Some("4i".into()), ..args() };
        let (state, gates) = resolve_state(&a).unwrap();
        assert!(gates.is_empty());
        assert!((state.prob_one() - 0.64).abs() < 1e-12);
    }

    #[test]
    fn zero_amplitudes_fail() {
        let a = SampleArgs { alpha: Some("0".into()), beta: Some("0".into()), ..args() };
        let err = resolve_state(&a).unwrap_err();
        assert!(format!("{err:#}").contains("Degenerate state"));
    }

    #[test]
    fn histogram_lists_both_outcomes() {
        let stats = MeasurementStats { count0: 3, count1: 1, total: 4 };
        let text = histogram(&stats, 0.25);
        assert!(text.contains(" 3 (0.750, exact 0.750)"));
        assert!(text.contains(" 1 (0.250, exact 0.250)"));
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn histogram_columns_align_with_colors_on() {
        colored::control::set_override(true);
        let stats = MeasurementStats { count0: 1, count1: 3, total: 4 };
        let text = histogram(&stats, 0.75);
        colored::control::unset_override();

        assert!(text.contains('\x1b'), "expected color codes in {text:?}");
        for line in strip_ansi(&text).lines() {
            let after: Vec<char> = line.split('│').nth(1).unwrap().chars().collect();
            assert!(after[..BAR_WIDTH as usize].iter().all(|&c| c == '█' || c == ' '), "{line}");
            assert_eq!(after[BAR_WIDTH as usize], ' ', "{line}");
            assert!(after[BAR_WIDTH as usize + 1].is_ascii_digit(), "{line}");
        }
    }
}
