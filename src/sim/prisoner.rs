//! Prisoners caged above the protective pillars

use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::pillar::Side;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prisoner {
    pub aabb: Aabb,
    pub side: Side,
    /// Horizontal confinement
    pub min_x: f32,
    pub max_x: f32,
    /// Pacing direction, -1 or 1
    pub dir: f32,
    /// Free once the top edge passes this line
    pub release_y: f32,
    pub released: bool,
}

impl Prisoner {
    /// Confine to a cell of `cell_width` against the prisoner's side of the window
    pub fn new(aabb: Aabb, side: Side, window_width: f32, cell_width: f32, release_y: f32) -> Self {
        let (min_x, max_x) = match side {
            Side::Left => (0.0, cell_width),
            Side::Right => (window_width - cell_width, window_width),
        };
        Self {
            aabb,
            side,
            min_x,
            max_x,
            dir: match side {
                Side::Left => 1.0,
                Side::Right => -1.0,
            },
            release_y,
            released: false,
        }
    }

    /// Walk back and forth inside the cell
    pub fn pace(&mut self, speed: f32) {
        if self.released {
            return;
        }
        self.aabb.center.x += self.dir * speed;
        if self.aabb.left() <= self.min_x {
            self.aabb.center.x = self.min_x + self.aabb.half.x;
            self.dir = 1.0;
        } else if self.aabb.right() >= self.max_x {
            self.aabb.center.x = self.max_x - self.aabb.half.x;
            self.dir = -1.0;
        }
    }

    /// Drop toward freedom. Returns true on the frame the prisoner is released.
    pub fn migrate(&mut self, speed: f32) -> bool {
        if self.released {
            return false;
        }
        self.aabb.center.y += speed;
        if self.aabb.top() >= self.release_y {
            self.released = true;
            return true;
        }
        false
    }
}
