//! Level occupancy model and the collision queries the motion core consumes.
//!
//! The level stores barrier blocks as per-column stacks so the "highest
//! block below" probe is a single column scan, and mirrors them into a flat
//! cell set for forward-barrier classification. The motion core only ever
//! sees the [`BarrierOracle`] trait, keeping it testable against mocks.

use bevy::math::Vec3;
use bevy::prelude::{Component, Resource};
use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use thiserror::Error;

use crate::constants::BLOCK_TOP_OFFSET;

/// A unit barrier cube occupying one grid cell.
///
/// `y` is the base height; the top face sits at `y + 1`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Block {
    /// Grid column, X axis.
    pub x: i32,
    /// Base height of the cube.
    pub y: i32,
    /// Grid column, Z axis.
    pub z: i32,
}

/// Read-only collision queries the motion core depends on.
pub trait BarrierOracle {
    /// Topmost barrier block in column `(x, z)` whose base is at or below
    /// `y_hint`, if any.
    fn highest_barrier_below(&self, x: i32, z: i32, y_hint: f32) -> Option<Block>;

    /// Full set of occupied cells, for forward-barrier classification.
    fn barrier_cells(&self) -> &HashSet<(i32, i32, i32)>;
}

/// Errors produced while parsing a plain-text level layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The layout contained no rows.
    #[error("layout is empty")]
    EmptyLayout,
    /// A character outside the tile alphabet was found.
    #[error("unknown tile {tile:?} at row {row}, column {column}")]
    UnknownTile {
        /// The offending character.
        tile: char,
        /// Zero-based layout row.
        row: usize,
        /// Zero-based layout column.
        column: usize,
    },
    /// No `S` start tile was present.
    #[error("layout has no start tile")]
    MissingStart,
}

/// In-memory level: block occupancy, start position, and the finished flag.
#[derive(Resource, Clone, Debug, Default)]
pub struct Level {
    columns: HashMap<(i32, i32), Vec<i32>>,
    cells: HashSet<(i32, i32, i32)>,
    start_position: Vec3,
    finished: bool,
}

impl Level {
    /// Creates an empty level whose player spawns at `start_position`.
    #[must_use]
    pub fn new(start_position: Vec3) -> Self {
        Self {
            start_position,
            ..Self::default()
        }
    }

    /// Parses a plain-text layout.
    ///
    /// One line per grid row (advancing along Z), one character per column
    /// (advancing along X): `.` empty, `1..=9` a stack of that many blocks
    /// from height zero, `S` the start cell on a single block.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] when the layout is empty, contains a character
    /// outside the tile alphabet, or has no start tile.
    pub fn from_layout(layout: &str) -> Result<Self, LevelError> {
        let mut level = Self::default();
        let mut start = None;

        let rows: Vec<&str> = layout.lines().filter(|line| !line.is_empty()).collect();
        if rows.is_empty() {
            return Err(LevelError::EmptyLayout);
        }

        for (row, line) in rows.iter().enumerate() {
            for (column, tile) in line.chars().enumerate() {
                #[expect(
                    clippy::cast_possible_truncation,
                    clippy::cast_possible_wrap,
                    reason = "Layout rows are far smaller than the i32 grid domain."
                )]
                let (x, z) = (column as i32, row as i32);
                match tile {
                    '.' => {}
                    'S' => {
                        level.add_block(Block { x, y: 0, z });
                        #[expect(
                            clippy::cast_precision_loss,
                            reason = "Layout coordinates are far below the f32 integer limit."
                        )]
                        let cell = Vec3::new(x as f32, BLOCK_TOP_OFFSET, z as f32);
                        start = Some(cell);
                    }
                    '1'..='9' => {
                        let height = i32::from(tile as u8 - b'0');
                        for y in 0..height {
                            level.add_block(Block { x, y, z });
                        }
                    }
                    _ => return Err(LevelError::UnknownTile { tile, row, column }),
                }
            }
        }

        level.start_position = start.ok_or(LevelError::MissingStart)?;
        Ok(level)
    }

    /// Adds one barrier block to the occupancy.
    pub fn add_block(&mut self, block: Block) {
        if self.cells.insert((block.x, block.y, block.z)) {
            self.columns.entry((block.x, block.z)).or_default().push(block.y);
        }
    }

    /// Removes all blocks, keeping the start position and finished flag.
    pub fn clear_blocks(&mut self) {
        self.columns.clear();
        self.cells.clear();
    }

    /// Iterates over every block in the level.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.cells.iter().map(|&(x, y, z)| Block { x, y, z })
    }

    /// Number of barrier blocks in the level.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.cells.len()
    }

    /// Where the player spawns and respawns after a fatal fall.
    #[must_use]
    pub const fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// Whether the level has been completed. Rendering is suppressed once
    /// finished; physics is unaffected.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Marks the level finished or in progress.
    pub const fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }
}

impl BarrierOracle for Level {
    fn highest_barrier_below(&self, x: i32, z: i32, y_hint: f32) -> Option<Block> {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Grid heights are far below the f32 integer limit."
        )]
        let y = self
            .columns
            .get(&(x, z))?
            .iter()
            .copied()
            .filter(|&y| (y as f32) <= y_hint)
            .max()?;
        Some(Block { x, y, z })
    }

    fn barrier_cells(&self) -> &HashSet<(i32, i32, i32)> {
        &self.cells
    }
}
