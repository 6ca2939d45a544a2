//! Grid: The maze as a fixed-shape array of tiles.
//!
//! Tiles are stored in row-major order in one contiguous `Vec`.
//! The shape never changes after loading; the only mutation is clearing a
//! pickup tile to [`Tile::Empty`] once the player consumes it.

use crate::error::{LoadError, MazeError};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Impassable. Never changes.
    Wall,
    /// Worth one point; all dots eaten wins the game.
    Dot,
    /// Worth ten points and starts power mode.
    Power,
    /// Nothing here.
    Empty,
}

impl Tile {
    /// Source character for a wall.
    pub const WALL: char = '#';
    /// Source character for a dot.
    pub const DOT: char = '.';
    /// Source character for a power pickup.
    pub const POWER: char = 'X';
    /// Source character for the player start.
    pub const PLAYER: char = 'P';
    /// Source character for a pursuer start.
    pub const PURSUER: char = 'G';
    /// Source character for an empty cell.
    pub const EMPTY: char = ' ';

    /// Whether the player can consume this tile.
    #[inline]
    pub const fn is_pickup(self) -> bool {
        matches!(self, Self::Dot | Self::Power)
    }
}

/// A `(row, col)` coordinate inside a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The maze tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Contiguous tile storage (row-major order).
    tiles: Vec<Tile>,
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
}

impl Grid {
    /// Build a grid from rows of tiles.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::Empty`] for no rows or zero-width rows and
    /// [`MazeError::RaggedRow`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, MazeError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            tiles.extend_from_slice(line);
        }

        Ok(Self {
            tiles,
            rows: rows.len(),
            cols,
        })
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    const fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Get the tile at `pos`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index_of(pos).map(|i| self.tiles[i])
    }

    /// Whether `pos` is a wall. Out-of-bounds positions count as walls.
    #[inline]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos).map_or(true, |tile| tile == Tile::Wall)
    }

    /// Clear a pickup at `pos` and return what was there.
    ///
    /// Returns `None` (and changes nothing) unless the tile was a dot or a
    /// power pickup. Walls are never touched.
    pub fn take_pickup(&mut self, pos: Position) -> Option<Tile> {
        let index = self.index_of(pos)?;
        let tile = self.tiles[index];
        if !tile.is_pickup() {
            return None;
        }
        self.tiles[index] = Tile::Empty;
        Some(tile)
    }

    /// Count the tiles of one kind.
    pub fn count(&self, kind: Tile) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    /// Iterate over rows as tile slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks_exact(self.cols)
    }
}

/// A parsed maze: the grid plus the entity start cells found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    /// Tiles, with start cells turned into [`Tile::Empty`].
    pub grid: Grid,
    /// Where the player starts and respawns.
    pub player_spawn: Position,
    /// Where each pursuer starts, in reading order.
    pub pursuer_spawns: Vec<Position>,
}

impl Maze {
    /// Read and parse a maze file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(source.parse::<Self>()?)
    }

    /// Number of dots left to eat at load time.
    pub fn dot_count(&self) -> usize {
        self.grid.count(Tile::Dot)
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        let mut player_spawn = None;
        let mut pursuer_spawns = Vec::new();

        for (row, line) in source.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut tiles = Vec::with_capacity(line.len());

            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    Tile::WALL => Tile::Wall,
                    Tile::DOT => Tile::Dot,
                    Tile::POWER => Tile::Power,
                    Tile::EMPTY => Tile::Empty,
                    Tile::PLAYER => {
                        if player_spawn.is_some() {
                            return Err(MazeError::DuplicatePlayer { row, col });
                        }
                        player_spawn = Some(Position::new(row, col));
                        Tile::Empty
                    }
                    Tile::PURSUER => {
                        pursuer_spawns.push(Position::new(row, col));
                        Tile::Empty
                    }
                    ch => return Err(MazeError::UnknownTile { row, col, ch }),
                };
                tiles.push(tile);
            }

            rows.push(tiles);
        }

        // Trailing blank lines are not part of the maze.
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }

        let grid = Grid::from_rows(rows)?;
        let player_spawn = player_spawn.ok_or(MazeError::MissingPlayer)?;

        Ok(Self {
            grid,
            player_spawn,
            pursuer_spawns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "#####\n#P.X#\n#G..#\n#####\n";

    #[test]
    fn test_parse_small_maze() {
        let maze: Maze = SMALL.parse().unwrap();
        assert_eq!(maze.grid.rows(), 4);
        assert_eq!(maze.grid.cols(), 5);
        assert_eq!(maze.player_spawn, Position::new(1, 1));
        assert_eq!(maze.pursuer_spawns, vec![Position::new(2, 1)]);
        assert_eq!(maze.dot_count(), 3);
        assert_eq!(maze.grid.count(Tile::Power), 1);
    }

    #[test]
    fn test_start_cells_become_empty() {
        let maze: Maze = SMALL.parse().unwrap();
        assert_eq!(maze.grid.get(maze.player_spawn), Some(Tile::Empty));
        assert_eq!(maze.grid.get(maze.pursuer_spawns[0]), Some(Tile::Empty));
    }

    #[test]
    fn test_crlf_lines() {
        let maze: Maze = "###\r\n#P#\r\n###\r\n".parse().unwrap();
        assert_eq!(maze.grid.cols(), 3);
    }

    #[test]
    fn test_trailing_blank_lines() {
        let maze: Maze = "###\n#P#\n###\n\n\r\n".parse().unwrap();
        assert_eq!(maze.grid.rows(), 3);
        assert_eq!(maze.grid.cols(), 3);

        // Blank lines inside the maze are still ragged rows.
        assert_eq!(
            "#P#\n\n###\n".parse::<Maze>(),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 0
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Maze>(), Err(MazeError::Empty));
        assert_eq!(
            "###\n#P\n".parse::<Maze>(),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "#P?".parse::<Maze>(),
            Err(MazeError::UnknownTile {
                row: 0,
                col: 2,
                ch: '?'
            })
        );
        assert_eq!("#.#".parse::<Maze>(), Err(MazeError::MissingPlayer));
        assert_eq!(
            "PP".parse::<Maze>(),
            Err(MazeError::DuplicatePlayer { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_bounds() {
        let maze: Maze = SMALL.parse().unwrap();
        let grid = &maze.grid;
        assert!(grid.get(Position::new(3, 4)).is_some());
        assert!(grid.get(Position::new(4, 0)).is_none());
        assert!(grid.get(Position::new(0, 5)).is_none());
        assert!(grid.is_wall(Position::new(9, 9)));
    }

    #[test]
    fn test_take_pickup_once() {
        let mut grid = SMALL.parse::<Maze>().unwrap().grid;
        let dot = Position::new(1, 2);
        assert_eq!(grid.take_pickup(dot), Some(Tile::Dot));
        assert_eq!(grid.get(dot), Some(Tile::Empty));
        assert_eq!(grid.take_pickup(dot), None);
    }

    #[test]
    fn test_take_pickup_leaves_walls() {
        let mut grid = SMALL.parse::<Maze>().unwrap().grid;
        assert_eq!(grid.take_pickup(Position::new(0, 0)), None);
        assert_eq!(grid.get(Position::new(0, 0)), Some(Tile::Wall));
    }

    #[test]
    fn test_iter_rows() {
        let grid = SMALL.parse::<Maze>().unwrap().grid;
        let rows: Vec<_> = grid.iter_rows().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].iter().all(|&t| t == Tile::Wall));
        assert_eq!(rows[1][3], Tile::Power);
    }

    #[test]
    fn test_bundled_maze() {
        let maze: Maze = include_str!("../../assets/maze.txt").parse().unwrap();
        assert_eq!(maze.grid.cols(), 28);
        assert_eq!(maze.pursuer_spawns.len(), 3);
        assert_eq!(maze.grid.count(Tile::Power), 4);
        assert!(maze.dot_count() > 0);
    }
}
