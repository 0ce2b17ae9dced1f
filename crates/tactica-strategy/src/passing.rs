use tactica_core::{AgentState, PlayerId, Settings, Vector2};

use crate::obstruction::{is_segment_blocked, nearest_distance};

/// How one teammate rates as a pass receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassCandidate {
    pub id: PlayerId,
    pub position: Vector2,
    pub distance: f64,
    /// No opponent within the lane clearance of the passing line
    pub lane_clear: bool,
    /// No opponent within the safety radius of the receiver
    pub receiver_safe: bool,
}

impl PassCandidate {
    /// Lower is better: clear and safe first, then clear, then safe, then nearest.
    fn rank(&self) -> (bool, bool, bool, f64) {
        (
            !(self.lane_clear && self.receiver_safe),
            !self.lane_clear,
            !self.receiver_safe,
            self.distance,
        )
    }
}

/// Rates every teammate as a pass receiver, best first.
///
/// `teammates` must not contain the passer. Candidates that rank equally keep their
/// input order.
pub fn rank_pass_targets<'a>(
    passer: Vector2,
    teammates: impl IntoIterator<Item = &'a AgentState>,
    opponents: &[Vector2],
    settings: &Settings,
) -> Vec<PassCandidate> {
    let clearance = settings.lane_clearance();
    let mut candidates: Vec<_> = teammates
        .into_iter()
        .map(|mate| PassCandidate {
            id: mate.id,
            position: mate.position,
            distance: (mate.position - passer).norm(),
            lane_clear: !is_segment_blocked(passer, mate.position, opponents, clearance),
            receiver_safe: nearest_distance(mate.position, opponents)
                > settings.tactics.receiver_safety_radius,
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.rank()
            .partial_cmp(&b.rank())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Picks the teammate to pass to. With no teammates at all this is the configured
/// fallback id, which may not match any agent.
pub fn select_pass_target<'a>(
    passer: Vector2,
    teammates: impl IntoIterator<Item = &'a AgentState>,
    opponents: &[Vector2],
    settings: &Settings,
) -> PlayerId {
    match rank_pass_targets(passer, teammates, opponents, settings).first() {
        Some(best) => best.id,
        None => {
            log::debug!("nobody to pass to, using fallback target");
            PlayerId::new(settings.tactics.fallback_pass_target)
        }
    }
}
