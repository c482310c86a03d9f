use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction (the same cell for `Direction::None`)
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Pixel coordinates of the cell centre for a given cell size
    pub fn pixel_center(&self, cell_pixel_size: u32) -> (f32, f32) {
        let size = cell_pixel_size as f32;
        (
            self.x as f32 * size + size / 2.0,
            self.y as f32 * size + size / 2.0,
        )
    }
}

/// Square N x N coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// True iff `0 <= x < N` and `0 <= y < N`
    pub fn contains(&self, cell: Cell) -> bool {
        let n = self.size as i32;
        cell.x >= 0 && cell.x < n && cell.y >= 0 && cell.y < n
    }

    pub fn center(&self) -> Cell {
        let c = (self.size / 2) as i32;
        Cell::new(c, c)
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Cell::new(x, y)))
    }
}
