/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type for mines and total cells; `u8 x u8` boards always fit.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Converts coordinates into an `ndarray` index.
pub const fn grid_index((x, y): Coord2) -> [usize; 2] {
    [x as usize, y as usize]
}

pub const fn cell_product(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn offset(coords: Coord2, delta: (i16, i16), bounds: Coord2) -> Option<Coord2> {
    let x = (coords.0 as i16) + delta.0;
    let y = (coords.1 as i16) + delta.1;

    if (0..bounds.0 as i16).contains(&x) && (0..bounds.1 as i16).contains(&y) {
        Some((x as Coord, y as Coord))
    } else {
        None
    }
}

/// Iterates the up-to-8 in-bounds neighbors of `center`.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS
        .iter()
        .filter_map(move |&delta| offset(center, delta, bounds))
}

/// Iterates every coordinate of a `bounds`-sized grid in column order.
pub fn iter_coords((width, height): Coord2) -> impl Iterator<Item = Coord2> {
    (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
}
