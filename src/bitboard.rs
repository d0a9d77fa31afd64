use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Maximum number of cells a single-word bitboard can describe.
pub const MAX_CELLS: usize = 64;

/// One bit per cell, packed into a single `u64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(u64);

impl Bitboard {
    /// All bits zero.
    #[inline]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// Single bit set at `index`.
    #[inline]
    pub const fn single(index: usize) -> Self {
        debug_assert!(index < MAX_CELLS);
        Bitboard(1u64 << index)
    }

    /// Construct from a raw word.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// The raw word.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Test whether bit `index` is set.
    #[inline]
    pub fn get(self, index: usize) -> bool {
        debug_assert!(index < MAX_CELLS);
        (self.0 >> index) & 1 != 0
    }

    /// Set bit `index` to 1.
    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < MAX_CELLS);
        self.0 |= 1u64 << index;
    }

    /// Clear bit `index` to 0.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < MAX_CELLS);
        self.0 &= !(1u64 << index);
    }

    /// True if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit is set.
    #[inline]
    pub const fn is_nonzero(self) -> bool {
        self.0 != 0
    }

    /// True if `self` and `other` share at least one bit.
    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Population count.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Shift toward higher indices. Bits pushed past bit 63 are lost.
    #[inline]
    pub const fn shift_left(self, n: usize) -> Self {
        if n >= MAX_CELLS {
            return Bitboard(0);
        }
        Bitboard(self.0 << n)
    }

    /// Shift toward lower indices. Bits pushed below bit 0 are lost.
    #[inline]
    pub const fn shift_right(self, n: usize) -> Self {
        if n >= MAX_CELLS {
            return Bitboard(0);
        }
        Bitboard(self.0 >> n)
    }

    /// Iterate over indices of set bits, lowest first.
    #[inline]
    pub fn iter_ones(self) -> BitIterator {
        BitIterator { word: self.0 }
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl From<u64> for Bitboard {
    fn from(bits: u64) -> Self {
        Bitboard(bits)
    }
}

impl From<Bitboard> for u64 {
    fn from(bb: Bitboard) -> u64 {
        bb.0
    }
}

/// Iterator over set-bit indices in a `Bitboard`.
pub struct BitIterator {
    word: u64,
}

impl Iterator for BitIterator {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        // Clear lowest set bit
        self.word &= self.word - 1;
        Some(bit)
    }
}

/// The eight compass directions a flip scan can travel in.
///
/// North is toward row 0, west is toward column 0. With the board's index
/// layout (row 0, column 0 in the most significant used bit) moving north
/// or west shifts toward higher bit indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Row and column delta of a single step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }
}

/// Precomputed masks for a given board geometry. Created once per board size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub rows: usize,
    pub columns: usize,
    pub area: usize,
    /// 1s at every valid cell (indices 0..area).
    pub board_mask: Bitboard,
    /// board_mask minus the first and last rows, for vertical steps.
    pub vertical_mask: Bitboard,
    /// board_mask minus the first and last columns, for horizontal steps.
    pub horizontal_mask: Bitboard,
    /// Intersection of the vertical and horizontal masks, for diagonal steps.
    pub diagonal_mask: Bitboard,
}

impl Geometry {
    /// Build geometry for a `rows × columns` board.
    ///
    /// Dimensions are validated by the board constructors; this only
    /// requires that the area fits in one word.
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        debug_assert!(rows >= 2 && columns >= 2);
        debug_assert!(rows * columns <= MAX_CELLS);
        let area = rows * columns;

        let board_mask = if area == MAX_CELLS {
            Bitboard(u64::MAX)
        } else {
            Bitboard((1u64 << area) - 1)
        };

        let mut geometry = Geometry {
            rows,
            columns,
            area,
            board_mask,
            vertical_mask: board_mask,
            horizontal_mask: board_mask,
            diagonal_mask: board_mask,
        };

        for col in 0..columns {
            geometry.vertical_mask.clear(geometry.index(0, col));
            geometry.vertical_mask.clear(geometry.index(rows - 1, col));
        }
        for row in 0..rows {
            geometry.horizontal_mask.clear(geometry.index(row, 0));
            geometry.horizontal_mask.clear(geometry.index(row, columns - 1));
        }
        geometry.diagonal_mask = geometry.vertical_mask & geometry.horizontal_mask;

        geometry
    }

    /// Bit index of `(row, col)`. Row 0, column 0 maps to the highest used bit.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.columns);
        (self.rows - 1 - row) * self.columns + (self.columns - 1 - col)
    }

    /// Inverse of [`Geometry::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.area);
        let flipped = self.area - 1 - index;
        (flipped / self.columns, flipped % self.columns)
    }

    /// Advance every bit in `bb` one cell in `direction`.
    #[inline]
    pub fn step(&self, bb: Bitboard, direction: Direction) -> Bitboard {
        let c = self.columns;
        match direction {
            Direction::North => bb.shift_left(c),
            Direction::South => bb.shift_right(c),
            Direction::West => bb.shift_left(1),
            Direction::East => bb.shift_right(1),
            Direction::NorthWest => bb.shift_left(c + 1),
            Direction::NorthEast => bb.shift_left(c - 1),
            Direction::SouthWest => bb.shift_right(c - 1),
            Direction::SouthEast => bb.shift_right(c + 1),
        }
    }

    /// The boundary mask that keeps a step in `direction` from wrapping.
    #[inline]
    pub fn mask_for(&self, direction: Direction) -> Bitboard {
        match direction {
            Direction::North | Direction::South => self.vertical_mask,
            Direction::East | Direction::West => self.horizontal_mask,
            _ => self.diagonal_mask,
        }
    }

    /// Opponent stones sandwiched between `origin` and one of `own`'s stones
    /// along `direction`.
    ///
    /// Walks from `origin` while each step lands on a masked opponent stone.
    /// The run counts only when the first cell past it holds an `own` stone;
    /// running off the board or onto an empty or masked-out cell yields an
    /// empty pattern.
    #[inline]
    pub fn flip_line(
        &self,
        origin: Bitboard,
        own: Bitboard,
        opponent: Bitboard,
        direction: Direction,
    ) -> Bitboard {
        let masked_opponent = opponent & self.mask_for(direction);
        let mut flips = Bitboard::empty();
        let mut cursor = self.step(origin, direction);

        while cursor.is_nonzero() && cursor.intersects(masked_opponent) {
            flips |= cursor;
            cursor = self.step(cursor, direction);
        }

        if cursor.intersects(own) {
            flips
        } else {
            Bitboard::empty()
        }
    }

    /// Union of [`Geometry::flip_line`] over all eight directions.
    #[inline]
    pub fn flip_pattern(&self, origin: Bitboard, own: Bitboard, opponent: Bitboard) -> Bitboard {
        Direction::ALL
            .iter()
            .fold(Bitboard::empty(), |acc, &direction| {
                acc | self.flip_line(origin, own, opponent, direction)
            })
    }
}
