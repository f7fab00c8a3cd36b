use crate::core::GridConfig;
use crate::math::Vector2;

/// Derived dimensions of the uniform grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub cell_size: f32,

    /// `ceil(width / cell_size)`
    pub num_cells_x: usize,

    /// `ceil(height / cell_size)`
    pub num_cells_y: usize,
}

impl GridInfo {
    /// Derives the cell counts for a (validated) grid configuration
    pub fn new(config: &GridConfig) -> Self {
        let (num_cells_x, num_cells_y) = config.cell_counts();
        Self {
            min_x: config.min_x,
            max_x: config.max_x,
            min_y: config.min_y,
            max_y: config.max_y,
            cell_size: config.cell_size,
            num_cells_x,
            num_cells_y,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.num_cells_x * self.num_cells_y
    }

    /// Integer cell coordinates of a position, unbounded
    #[inline]
    fn cell_coords(&self, position: Vector2) -> (i64, i64) {
        (
            ((position.x - self.min_x) / self.cell_size).floor() as i64,
            ((position.y - self.min_y) / self.cell_size).floor() as i64,
        )
    }

    /// Flat cell index of a position, or `None` if it lies outside the grid
    #[inline]
    pub fn cell_of(&self, position: Vector2) -> Option<usize> {
        // `NaN as i64` is 0, which would land in a real cell
        if position.x.is_nan() || position.y.is_nan() {
            return None;
        }
        let (cx, cy) = self.cell_coords(position);
        if cx < 0 || cy < 0 || cx >= self.num_cells_x as i64 || cy >= self.num_cells_y as i64 {
            return None;
        }
        Some(cy as usize * self.num_cells_x + cx as usize)
    }

    /// Flat cell index of a position, clamped into the nearest edge cell.
    /// NaN coordinates map to no cell.
    #[inline]
    pub fn clamped_cell_of(&self, position: Vector2) -> Option<usize> {
        if position.x.is_nan() || position.y.is_nan() || self.total_cells() == 0 {
            return None;
        }
        let (cx, cy) = self.cell_coords(position);
        let cx = cx.clamp(0, self.num_cells_x as i64 - 1) as usize;
        let cy = cy.clamp(0, self.num_cells_y as i64 - 1) as usize;
        Some(cy * self.num_cells_x + cx)
    }

    /// `(cell_x, cell_y)` of a flat index
    #[inline]
    pub fn coords_of(&self, cell: usize) -> (usize, usize) {
        (cell % self.num_cells_x, cell / self.num_cells_x)
    }

    /// Flat index of the cell at `(cell_x + dx, cell_y + dy)`, or `None` past any edge
    #[inline]
    pub fn offset_cell(&self, cell: usize, dx: i32, dy: i32) -> Option<usize> {
        let (cx, cy) = self.coords_of(cell);
        let nx = cx as i64 + dx as i64;
        let ny = cy as i64 + dy as i64;
        if nx < 0 || ny < 0 || nx >= self.num_cells_x as i64 || ny >= self.num_cells_y as i64 {
            return None;
        }
        Some(ny as usize * self.num_cells_x + nx as usize)
    }
}

/// Uniform grid of per-cell particle index lists.
///
/// Transient: the collision system clears and refills it every tick, and
/// nothing else reads it. Cell lists keep their allocations across ticks.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    info: GridInfo,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(config: &GridConfig) -> Self {
        let info = GridInfo::new(config);
        Self {
            info,
            cells: vec![Vec::new(); info.total_cells()],
        }
    }

    pub fn info(&self) -> &GridInfo {
        &self.info
    }

    /// Flat cell index of a position, or `None` if it lies outside the grid
    #[inline]
    pub fn cell_of(&self, position: Vector2) -> Option<usize> {
        self.info.cell_of(position)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Particle indices in one cell (empty for an invalid index)
    pub fn cell(&self, cell: usize) -> &[usize] {
        self.cells.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Empties every cell list
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Appends a particle index to a cell; ignored for an invalid cell
    #[inline]
    pub fn insert(&mut self, cell: usize, particle: usize) {
        if let Some(list) = self.cells.get_mut(cell) {
            list.push(particle);
        }
    }

    /// Number of indexed particles
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Replaces the bounds and cell size, dropping all cell contents
    pub fn rebuild(&mut self, config: &GridConfig) {
        *self = Self::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_dimensions() {
        let info = GridInfo::new(&GridConfig::default());
        assert_eq!(info.num_cells_x, 40);
        assert_eq!(info.num_cells_y, 40);
        assert_eq!(info.total_cells(), 1600);
    }

    #[test]
    fn partial_cells_round_up() {
        let config = GridConfig::new(Vector2::zero(), Vector2::new(11.0, 4.0), 5.0);
        let info = GridInfo::new(&config);
        assert_eq!(info.num_cells_x, 3);
        assert_eq!(info.num_cells_y, 1);
    }

    #[test]
    fn cell_of_maps_row_major() {
        let info = GridInfo::new(&GridConfig::default());
        assert_eq!(info.cell_of(Vector2::new(-100.0, -100.0)), Some(0));
        assert_eq!(info.cell_of(Vector2::new(-94.0, -100.0)), Some(1));
        assert_eq!(info.cell_of(Vector2::new(-100.0, -94.0)), Some(40));
        assert_eq!(info.cell_of(Vector2::new(0.0, 0.0)), Some(20 * 40 + 20));
        assert_eq!(info.cell_of(Vector2::new(99.9, 99.9)), Some(1599));
    }

    #[test]
    fn cell_of_rejects_outside_positions() {
        let info = GridInfo::new(&GridConfig::default());
        assert_eq!(info.cell_of(Vector2::new(-100.5, 0.0)), None);
        assert_eq!(info.cell_of(Vector2::new(0.0, 100.0)), None);
        assert_eq!(info.cell_of(Vector2::new(150.0, 150.0)), None);
        assert_eq!(info.cell_of(Vector2::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn clamped_cell_of_snaps_to_edges() {
        let info = GridInfo::new(&GridConfig::default());
        assert_eq!(info.clamped_cell_of(Vector2::new(-500.0, -500.0)), Some(0));
        assert_eq!(info.clamped_cell_of(Vector2::new(500.0, 500.0)), Some(1599));
        assert_eq!(info.clamped_cell_of(Vector2::new(0.0, 0.0)), info.cell_of(Vector2::zero()));
        assert_eq!(info.clamped_cell_of(Vector2::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn offset_cell_stops_at_edges() {
        let info = GridInfo::new(&GridConfig::new(Vector2::zero(), Vector2::new(10.0, 10.0), 5.0));
        assert_eq!(info.offset_cell(0, 1, 0), Some(1));
        assert_eq!(info.offset_cell(0, 0, 1), Some(2));
        assert_eq!(info.offset_cell(0, 1, 1), Some(3));
        assert_eq!(info.offset_cell(0, -1, 1), None);
        assert_eq!(info.offset_cell(1, 1, 0), None);
        assert_eq!(info.offset_cell(1, -1, 1), Some(2));
    }

    #[test]
    fn clear_keeps_cell_count() {
        let mut grid = SpatialGrid::new(&GridConfig::default());
        grid.insert(3, 7);
        grid.insert(3, 8);
        grid.insert(10_000, 9);
        assert_eq!(grid.cell(3), &[7, 8]);
        assert_eq!(grid.occupancy(), 2);
        grid.clear();
        assert_eq!(grid.occupancy(), 0);
        assert_eq!(grid.cell_count(), 1600);
    }
}
