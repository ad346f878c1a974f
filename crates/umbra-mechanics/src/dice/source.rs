//! Where rolled faces come from.

use rand::Rng;
use rand::rngs::StdRng;

use super::POOL_DIE_SIDES;

/// A source of die faces.
///
/// Resolution code never touches a global generator; callers hand in a
/// source so rolls can be seeded or scripted.
pub trait FaceSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    ///
    /// A `sides` of 0 is treated as 1.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Roll one pool d10.
    fn roll_face(&mut self) -> u32 {
        self.roll_die(POOL_DIE_SIDES)
    }
}

impl FaceSource for StdRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

impl<F: FaceSource + ?Sized> FaceSource for &mut F {
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// A deterministic source that replays a fixed sequence of faces.
///
/// Faces are handed out in call order and clamped to the die being rolled.
/// When the script runs out it starts over from the beginning; an empty
/// script always yields 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFaces {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedFaces {
    /// Create a source that replays `faces` in order.
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        Self {
            faces: faces.into(),
            cursor: 0,
        }
    }

    /// How many faces have been handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// How many scripted faces are left before the script wraps.
    pub fn remaining(&self) -> usize {
        self.faces.len().saturating_sub(self.cursor)
    }
}

impl FaceSource for ScriptedFaces {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let value = if self.faces.is_empty() {
            1
        } else {
            self.faces[self.cursor % self.faces.len()]
        };
        self.cursor += 1;
        value.clamp(1, sides.max(1))
    }
}
