//! Built-in layouts used when no shape source or file is available

use super::types::{Difficulty, ShapeDefinition, TargetPiece};
use crate::vision::{PieceColor, PieceType};
use std::collections::BTreeMap;

use PieceColor::*;
use PieceType::*;

type PieceSpec = (PieceColor, (f64, f64), f64, PieceType);

fn shape(name: &str, difficulty: Difficulty, pieces: &[PieceSpec]) -> ShapeDefinition {
    ShapeDefinition::new(
        name,
        difficulty,
        pieces
            .iter()
            .map(|&(color, center, angle, piece_type)| {
                TargetPiece::new(color, center, angle, piece_type)
            })
            .collect(),
    )
}

pub fn builtin_shapes() -> BTreeMap<String, ShapeDefinition> {
    let mut shapes = BTreeMap::new();

    shapes.insert(
        "swan".to_string(),
        shape(
            "Swan",
            Difficulty::Medium,
            &[
                (Red, (200.0, 300.0), 0.0, LargeTriangle),
                (Blue, (300.0, 250.0), 45.0, LargeTriangle),
                (Green, (400.0, 300.0), 90.0, LargeTriangle),
                (Orange, (280.0, 150.0), 45.0, MediumTriangle),
                (Yellow, (310.0, 180.0), 0.0, Square),
                (Teal, (330.0, 220.0), 45.0, SmallTriangle),
                (Purple, (350.0, 120.0), 90.0, SmallTriangle),
            ],
        ),
    );

    shapes.insert(
        "cat".to_string(),
        shape(
            "Cat",
            Difficulty::Easy,
            &[
                (Red, (250.0, 300.0), 0.0, LargeTriangle),
                (Blue, (350.0, 300.0), 0.0, LargeTriangle),
                (Green, (300.0, 200.0), 45.0, MediumTriangle),
                (Yellow, (300.0, 250.0), 0.0, Square),
                (Orange, (220.0, 180.0), 45.0, SmallTriangle),
                (Purple, (380.0, 180.0), 135.0, SmallTriangle),
                (Teal, (300.0, 150.0), 0.0, Parallelogram),
            ],
        ),
    );

    shapes.insert(
        "rocket".to_string(),
        shape(
            "Rocket",
            Difficulty::Hard,
            &[
                (Red, (300.0, 350.0), 0.0, LargeTriangle),
                (Blue, (300.0, 250.0), 0.0, LargeTriangle),
                (Green, (300.0, 150.0), 0.0, MediumTriangle),
                (Yellow, (300.0, 200.0), 0.0, Square),
                (Orange, (250.0, 380.0), 45.0, SmallTriangle),
                (Purple, (350.0, 380.0), 135.0, SmallTriangle),
                (Teal, (300.0, 100.0), 0.0, SmallTriangle),
            ],
        ),
    );

    shapes
}
