use super::sampler::{MeasurementStats, Outcome};
use super::state::BlochVector;

/// What produced a frame; drives captions and legends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameDetail {
    Rotation { theta: f64 },
    Measurement { last_outcome: Outcome, shots_this_frame: u32 },
}

/// One immutable animation step, consumed once by a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub total: usize,
    pub current: BlochVector,
    pub average: BlochVector,
    pub stats: MeasurementStats,
    pub detail: FrameDetail,
}

impl Frame {
    /// Single-line summary used as the window caption.
    pub fn caption(&self) -> String {
        match self.detail {
            FrameDetail::Rotation { theta } => format!("R_y(θ)|0⟩,  θ = {theta:.2} rad"),
            FrameDetail::Measurement { .. } => format!(
                "shots = {}, P_est(0) = {:.2}, P_est(1) = {:.2}",
                self.stats.total,
                self.stats.p_zero(),
                self.stats.p_one()
            ),
        }
    }

    pub fn is_measurement(&self) -> bool {
        matches!(self.detail, FrameDetail::Measurement { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(detail: FrameDetail, stats: MeasurementStats) -> Frame {
        Frame {
            index: 0,
            total: 1,
            current: BlochVector::NORTH,
            average: BlochVector::NORTH,
            stats,
            detail,
        }
    }

    #[test]
    fn rotation_caption_shows_theta() {
        let f = frame(FrameDetail::Rotation { theta: 0.786 }, MeasurementStats::default());
        assert_eq!(f.caption(), "R_y(θ)|0⟩,  θ = 0.79 rad");
        assert!(!f.is_measurement());
    }

    #[test]
    fn measurement_caption_shows_estimates() {
        let stats = MeasurementStats { count0: 3, count1: 1, total: 4 };
        let f = frame(FrameDetail::Measurement { last_outcome: Outcome::One, shots_this_frame: 1 }, stats);
        assert_eq!(f.caption(), "shots = 4, P_est(0) = 0.75, P_est(1) = 0.25");
    }
}
