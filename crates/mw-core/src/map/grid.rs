//! Cell grid

use thiserror::Error;

use super::{CellType, Position};

/// Errors from [`Grid::from_ascii`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridParseError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map symbol '{symbol}' at {position}")]
    UnknownSymbol { symbol: char, position: Position },
}

/// Width and height of a grid, and the row-major indexing shared by every
/// per-cell mask sized to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridBounds {
    pub width: usize,
    pub height: usize,
}

impl GridBounds {
    pub fn contains(self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Row-major index of an in-bounds position
    pub fn index(self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn position_of(self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }
}

/// Width x height cell storage, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
}

impl Grid {
    /// Create a grid filled with `fill`
    pub fn new(width: usize, height: usize, fill: CellType) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Create a solid-wall grid
    pub fn walls(width: usize, height: usize) -> Self {
        Self::new(width, height, CellType::Wall)
    }

    /// Parse a map drawn with `#` for wall and `.` for floor, one row per line.
    ///
    /// Leading/trailing blank lines and per-line surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };
        let width = first.chars().count();
        let mut grid = Grid::walls(width, rows.len());

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let typ = CellType::from_symbol(symbol)
                    .ok_or(GridParseError::UnknownSymbol { symbol, position })?;
                grid.cells[y * width + x] = typ;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds {
            width: self.width,
            height: self.height,
        }
    }

    /// Number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Check whether a position lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        self.bounds().contains(pos)
    }

    /// Row-major index of an in-bounds position
    pub fn index(&self, pos: Position) -> Option<usize> {
        self.bounds().index(pos)
    }

    /// Position of a row-major index
    pub fn position_of(&self, index: usize) -> Position {
        self.bounds().position_of(index)
    }

    /// Cell type at `pos`, or `None` outside the grid
    pub fn cell_type(&self, pos: Position) -> Option<CellType> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Whether `pos` is inside the grid and floor
    pub fn is_floor(&self, pos: Position) -> bool {
        self.cell_type(pos) == Some(CellType::Floor)
    }

    /// Set the cell at `pos`. Returns false (and does nothing) outside the grid.
    pub fn set_cell_type(&mut self, pos: Position, typ: CellType) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = typ;
                true
            }
            None => false,
        }
    }

    /// All positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(|i| self.position_of(i))
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_passable()).count()
    }

    /// Floor cells 4-connected to `start`, as a per-cell membership mask.
    ///
    /// Empty (all false) when `start` is not floor.
    pub fn floor_component(&self, start: Position) -> Vec<bool> {
        let mut visited = vec![false; self.cells.len()];
        if !self.is_floor(start) {
            return visited;
        }
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            let Some(i) = self.index(pos) else {
                continue;
            };
            if visited[i] || !self.cells[i].is_passable() {
                continue;
            }
            visited[i] = true;
            stack.extend(pos.neighbors());
        }
        visited
    }

    /// Whether all floor cells form one 4-connected component.
    ///
    /// A grid with no floor counts as connected.
    pub fn is_floor_connected(&self) -> bool {
        let Some(start) = self.positions().find(|&p| self.is_floor(p)) else {
            return true;
        };
        let reached = self.floor_component(start).iter().filter(|&&v| v).count();
        reached == self.floor_count()
    }
}

impl core::fmt::Display for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::walls(4, 3);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(3, 2)));
        assert!(!grid.contains(Position::new(4, 0)));
        assert!(!grid.contains(Position::new(0, 3)));
        assert!(!grid.contains(Position::new(-1, 1)));
        assert_eq!(grid.cell_type(Position::new(-1, 1)), None);
    }

    #[test]
    fn test_bounds_index() {
        let bounds = Grid::walls(4, 3).bounds();
        assert_eq!(bounds.index(Position::new(3, 1)), Some(7));
        assert_eq!(bounds.position_of(7), Position::new(3, 1));
        assert_eq!(bounds.index(Position::new(4, 1)), None);
        assert_eq!(bounds.index(Position::new(0, -1)), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = Grid::walls(2, 2);
        assert!(!grid.set_cell_type(Position::new(5, 5), CellType::Floor));
        assert_eq!(grid.floor_count(), 0);
        assert!(grid.set_cell_type(Position::new(1, 1), CellType::Floor));
        assert!(grid.is_floor(Position::new(1, 1)));
    }

    #[test]
    fn test_ascii_roundtrip() {
        let text = "#..#\n#..#\n####\n";
        let grid = Grid::from_ascii(text).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.floor_count(), 4);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_ascii_errors() {
        assert_eq!(Grid::from_ascii("\n  \n"), Err(GridParseError::Empty));
        assert_eq!(
            Grid::from_ascii("###\n##"),
            Err(GridParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            Grid::from_ascii("#x#"),
            Err(GridParseError::UnknownSymbol { symbol: 'x', .. })
        ));
    }

    #[test]
    fn test_floor_component() {
        let grid = Grid::from_ascii(
            "
            ..#.
            #.#.
            ",
        )
        .unwrap();
        let reached = grid.floor_component(Position::new(0, 0));
        assert_eq!(reached.iter().filter(|&&v| v).count(), 3);
        assert!(!grid.is_floor_connected());
        assert!(grid.floor_component(Position::new(2, 0)).iter().all(|&v| !v));
    }

    #[test]
    fn test_floor_connected() {
        let grid = Grid::from_ascii(
            "
            ....
            #.#.
            ",
        )
        .unwrap();
        assert!(grid.is_floor_connected());
        assert!(Grid::walls(3, 3).is_floor_connected());
    }
}
