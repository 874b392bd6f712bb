//! Randomized layouts for the three grid games.
//!
//! All grids are square and stored row-major; cell `i` sits at
//! `(i / side, i % side)`. Placements sample without replacement from the
//! eligible cells, so no two features ever share a cell.

use crate::catalog::{item_pool, Item, ItemKind};
use crate::config::{EscapeConfig, LevelConfig};
use crate::rng::GameRng;

// ── Geometry ──────────────────────────────────────────────────

pub fn row_col(index: usize, side: usize) -> (usize, usize) {
    (index / side, index % side)
}

pub fn manhattan(a: usize, b: usize, side: usize) -> u32 {
    let (ar, ac) = row_col(a, side);
    let (br, bc) = row_col(b, side);
    (ar.abs_diff(br) + ac.abs_diff(bc)) as u32
}

pub fn is_boundary(index: usize, side: usize) -> bool {
    let (r, c) = row_col(index, side);
    r == 0 || c == 0 || r == side - 1 || c == side - 1
}

pub fn is_corner(index: usize, side: usize) -> bool {
    let (r, c) = row_col(index, side);
    (r == 0 || r == side - 1) && (c == 0 || c == side - 1)
}

// ── Digging ───────────────────────────────────────────────────

/// What is buried in a dig cell. Fixed at generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Empty,
    Trash(&'static Item),
    Decoy(&'static Item),
    Trap(&'static Item),
}

impl Occupant {
    pub fn item(&self) -> Option<&'static Item> {
        match *self {
            Occupant::Empty => None,
            Occupant::Trash(i) | Occupant::Decoy(i) | Occupant::Trap(i) => Some(i),
        }
    }

    pub fn is_trash(&self) -> bool {
        matches!(self, Occupant::Trash(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigCell {
    pub index: usize,
    pub occupant: Occupant,
    pub revealed: bool,
}

/// Build a level's dig grid. Returns the grid and the trash goal, which is
/// always exactly the number of trash cells in the grid.
pub fn generate_dig_grid(level: &LevelConfig, rng: &mut GameRng) -> (Vec<DigCell>, usize) {
    let cells = level.cells();

    let mut occupants: Vec<Occupant> = Vec::with_capacity(cells);
    occupants.extend(draw(ItemKind::Trash, level.trash, rng).into_iter().map(Occupant::Trash));
    occupants.extend(draw(ItemKind::Decoy, level.decoys, rng).into_iter().map(Occupant::Decoy));
    occupants.extend(draw(ItemKind::Trap, level.traps, rng).into_iter().map(Occupant::Trap));
    occupants.truncate(cells);
    occupants.resize(cells, Occupant::Empty);
    rng.shuffle(&mut occupants);

    let grid = occupants
        .into_iter()
        .enumerate()
        .map(|(index, occupant)| DigCell {
            index,
            occupant,
            revealed: false,
        })
        .collect::<Vec<_>>();
    let goal = grid.iter().filter(|c| c.occupant.is_trash()).count();
    (grid, goal)
}

/// Draw `n` items of a kind without replacement. When the pool is smaller
/// than `n`, it is reshuffled and drawn again so the count is always met.
fn draw(kind: ItemKind, n: usize, rng: &mut GameRng) -> Vec<&'static Item> {
    let pool = item_pool(kind);
    let mut out = Vec::with_capacity(n);
    if pool.is_empty() {
        return out;
    }
    while out.len() < n {
        let take = (n - out.len()).min(pool.len());
        out.extend(rng.sample(&pool, take));
    }
    out
}

// ── Hide-and-seek ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCell {
    pub index: usize,
    pub revealed: bool,
    /// Manhattan distance to the hidden target; 0 only on the target.
    pub distance: u32,
}

/// Hide the target uniformly, then pre-reveal up to `cold_reveals` cells
/// farther than `cold_distance` from it. Returns the grid and target index.
pub fn generate_search_grid(
    side: usize,
    cold_reveals: usize,
    cold_distance: u32,
    rng: &mut GameRng,
) -> (Vec<SearchCell>, usize) {
    let cells = side * side;
    let target = rng.index(cells);

    let mut grid: Vec<SearchCell> = (0..cells)
        .map(|index| SearchCell {
            index,
            revealed: false,
            distance: manhattan(index, target, side),
        })
        .collect();

    if cold_reveals > 0 {
        let cold: Vec<usize> = grid
            .iter()
            .filter(|c| c.distance > cold_distance)
            .map(|c| c.index)
            .collect();
        for idx in rng.sample(&cold, cold_reveals) {
            grid[idx].revealed = true;
        }
    }
    (grid, target)
}

// ── Escape ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeKind {
    Wall { durability: u32 },
    Floor,
    Trap,
    Water,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeCell {
    pub index: usize,
    pub kind: EscapeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscapeLayout {
    pub side: usize,
    pub cells: Vec<EscapeCell>,
    pub start: usize,
}

/// Walled ring, exit on a non-corner cell of the top wall, traps and water
/// scattered over interior floor (never on the start cell).
pub fn generate_escape_grid(config: &EscapeConfig, rng: &mut GameRng) -> EscapeLayout {
    let side = config.grid;
    let start = config.start_cell();
    let wall = EscapeKind::Wall {
        durability: config.wall_durability,
    };

    let mut cells: Vec<EscapeCell> = (0..side * side)
        .map(|index| EscapeCell {
            index,
            kind: if is_boundary(index, side) {
                wall
            } else {
                EscapeKind::Floor
            },
        })
        .collect();

    // Top row, excluding both corners.
    let exit = 1 + rng.index(side - 2);
    cells[exit].kind = EscapeKind::Exit;

    let floor: Vec<usize> = cells
        .iter()
        .filter(|c| c.kind == EscapeKind::Floor && c.index != start)
        .map(|c| c.index)
        .collect();
    let picked = rng.sample(&floor, config.traps + config.waters);
    for (n, idx) in picked.into_iter().enumerate() {
        cells[idx].kind = if n < config.traps {
            EscapeKind::Trap
        } else {
            EscapeKind::Water
        };
    }

    EscapeLayout { side, cells, start }
}

/// Cells eligible to become the exit after a relocation: boundary,
/// non-corner, currently wall, and not the one just vacated.
pub fn exit_candidates(cells: &[EscapeCell], side: usize, vacated: Option<usize>) -> Vec<usize> {
    cells
        .iter()
        .filter(|c| {
            is_boundary(c.index, side)
                && !is_corner(c.index, side)
                && Some(c.index) != vacated
                && matches!(c.kind, EscapeKind::Wall { .. })
        })
        .map(|c| c.index)
        .collect()
}
