//! Scoring of a detected arrangement against a target layout

use crate::shapes::TargetPiece;
use crate::vision::{DetectedPieces, PieceColor, half_turn_distance};
use std::collections::BTreeSet;

/// Thresholds and weights for the continuous score and the matched set
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Center distance at which the position score reaches zero
    pub position_falloff: f64,
    pub position_weight: f64,
    pub angle_weight: f64,
    /// Strict limits for counting a piece as placed
    pub matched_max_distance: f64,
    pub matched_max_angle: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            position_falloff: 100.0,
            position_weight: 0.6,
            angle_weight: 0.4,
            matched_max_distance: 50.0,
            matched_max_angle: 30.0,
        }
    }
}

/// How one target piece compares to its detected counterpart
#[derive(Debug, Clone, PartialEq)]
pub struct PieceScore {
    pub color: PieceColor,
    pub detected: bool,
    pub position_distance: f64,
    /// Orientation gap up to a half turn, 0..=90
    pub angle_distance: f64,
    /// 0..=100
    pub score: f64,
    pub matched: bool,
    /// Whether the classifier agreed with the target's piece type
    pub type_agrees: bool,
}

impl PieceScore {
    fn missing(color: PieceColor) -> Self {
        Self {
            color,
            detected: false,
            position_distance: f64::INFINITY,
            angle_distance: 90.0,
            score: 0.0,
            matched: false,
            type_agrees: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchOutcome {
    /// Mean piece score over all target pieces, 0..=100
    pub score: f64,
    /// Colors placed within the strict distance and angle limits
    pub matched: BTreeSet<PieceColor>,
    pub pieces: Vec<PieceScore>,
}

impl MatchOutcome {
    pub fn is_matched(&self, color: PieceColor) -> bool {
        self.matched.contains(&color)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: ScoringConfig,
}

impl Matcher {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score the detected set against a target layout.
    ///
    /// Every target piece counts toward the mean, so a missing color pulls the
    /// score down by its share. An empty target scores 0. Orientations are
    /// compared up to a half turn, since a detection cannot tell 45 from 225.
    pub fn score(&self, detected: &DetectedPieces, target: &[TargetPiece]) -> MatchOutcome {
        if target.is_empty() {
            return MatchOutcome::default();
        }

        let pieces: Vec<PieceScore> = target
            .iter()
            .map(|target_piece| self.score_piece(detected, target_piece))
            .collect();

        let total: f64 = pieces.iter().map(|p| p.score).sum();
        let score = (total / pieces.len() as f64).clamp(0.0, 100.0);
        let matched = pieces
            .iter()
            .filter(|p| p.matched)
            .map(|p| p.color)
            .collect();

        MatchOutcome {
            score,
            matched,
            pieces,
        }
    }

    fn score_piece(&self, detected: &DetectedPieces, target: &TargetPiece) -> PieceScore {
        let Some(piece) = detected.get(target.color) else {
            return PieceScore::missing(target.color);
        };

        let dx = piece.center.0 - target.center.0;
        let dy = piece.center.1 - target.center.1;
        let position_distance = (dx * dx + dy * dy).sqrt();
        let angle_distance = half_turn_distance(piece.orientation(), target.angle());

        let falloff = self.config.position_falloff;
        let position_score = if position_distance.is_finite() {
            (falloff - position_distance).clamp(0.0, falloff) / falloff
        } else {
            0.0
        };
        let angle_score = (1.0 - angle_distance / 180.0).clamp(0.0, 1.0);
        let score = (self.config.position_weight * position_score
            + self.config.angle_weight * angle_score)
            * 100.0;

        PieceScore {
            color: target.color,
            detected: true,
            position_distance,
            angle_distance,
            score,
            matched: position_distance <= self.config.matched_max_distance
                && angle_distance <= self.config.matched_max_angle,
            type_agrees: piece.piece_type == target.piece_type,
        }
    }
}
