//! Character boards and stock transforms over them.
//!
//! Many turn-based games observe the world as a rectangular grid of
//! ASCII characters. [`Board`] is that grid; [`CharacterRepainter`]
//! substitutes characters, and [`BoardToArray`] / [`BoardToFeatureArray`]
//! turn a board into numeric arrays ready for an agent.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use ndarray::{Array2, Array3, ArrayD};
use tessera_core::{DType, ObsArray};

use crate::distiller::{Distill, Distilled, Repaint};

/// Errors from constructing a [`Board`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// The art has no rows, or its first row is empty.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        got: usize,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "board art is empty"),
            Self::RaggedRow { row, expected, got } => {
                write!(f, "row {row} has width {got}, expected {expected}")
            }
        }
    }
}

impl Error for BoardError {}

/// A rectangular grid of byte characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Array2<u8>,
}

impl Board {
    /// Build a board from equal-width rows of ASCII art.
    pub fn from_art<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(BoardError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            let bytes = row.as_ref().as_bytes();
            if bytes.len() != width {
                return Err(BoardError::RaggedRow {
                    row: i,
                    expected: width,
                    got: bytes.len(),
                });
            }
            cells.extend_from_slice(bytes);
        }
        // Length is rows * width by construction.
        let cells = Array2::from_shape_vec((rows.len(), width), cells)
            .map_err(|_| BoardError::Empty)?;
        Ok(Self { cells })
    }

    /// Wrap an existing character array.
    pub fn from_cells(cells: Array2<u8>) -> Self {
        Self { cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Character at `(row, col)`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get((row, col)).copied()
    }

    /// Overwrite the character at `(row, col)`. Returns `false` if out of range.
    pub fn set(&mut self, row: usize, col: usize, ch: u8) -> bool {
        match self.cells.get_mut((row, col)) {
            Some(cell) => {
                *cell = ch;
                true
            }
            None => false,
        }
    }

    /// The underlying character grid.
    pub fn cells(&self) -> &Array2<u8> {
        &self.cells
    }

    /// Rows rendered back to strings (lossy for non-UTF-8 bytes).
    pub fn to_art(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|r| String::from_utf8_lossy(&r.to_vec()).into_owned())
            .collect()
    }
}

/// Substitutes characters on a board; unmapped characters are kept.
#[derive(Clone, Debug, Default)]
pub struct CharacterRepainter {
    table: HashMap<u8, u8>,
}

impl CharacterRepainter {
    /// Create an empty (identity) repainter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `from` to `to`.
    pub fn with(mut self, from: u8, to: u8) -> Self {
        self.table.insert(from, to);
        self
    }
}

impl FromIterator<(u8, u8)> for CharacterRepainter {
    fn from_iter<I: IntoIterator<Item = (u8, u8)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

impl Repaint<Board> for CharacterRepainter {
    fn repaint(&self, board: &Board) -> Board {
        Board {
            cells: board
                .cells
                .mapv(|c| self.table.get(&c).copied().unwrap_or(c)),
        }
    }
}

/// Maps each character to a numeric value, producing one 2-D array.
///
/// Characters without a mapping take the configured fill value.
/// Values are converted to the output dtype with Rust's `as` casts:
/// integer dtypes saturate at their range limits, drop any fraction,
/// and map NaN to `0`.
#[derive(Clone, Debug)]
pub struct BoardToArray {
    values: HashMap<u8, f64>,
    fill: f64,
    dtype: DType,
}

impl BoardToArray {
    /// Create a converter emitting `dtype`, with fill value `0`.
    pub fn new(dtype: DType) -> Self {
        Self {
            values: HashMap::new(),
            fill: 0.0,
            dtype,
        }
    }

    /// Map `ch` to `value`.
    pub fn with_value(mut self, ch: u8, value: f64) -> Self {
        self.values.insert(ch, value);
        self
    }

    /// Value used for unmapped characters.
    pub fn with_fill(mut self, fill: f64) -> Self {
        self.fill = fill;
        self
    }

    /// Emit raw character codes instead of looked-up values.
    pub fn raw(dtype: DType) -> Self {
        let values = (0..=u8::MAX).map(|c| (c, f64::from(c))).collect();
        Self {
            values,
            fill: 0.0,
            dtype,
        }
    }

    fn lookup(&self, ch: u8) -> f64 {
        self.values.get(&ch).copied().unwrap_or(self.fill)
    }
}

impl Distill<Board> for BoardToArray {
    fn distill(&self, board: &Board) -> Distilled {
        let values = board.cells.mapv(|c| self.lookup(c)).into_dyn();
        Distilled::Board(cast(values, self.dtype))
    }
}

/// One binary plane per listed character, shape `[layers, rows, cols]`.
#[derive(Clone, Debug)]
pub struct BoardToFeatureArray {
    layers: Vec<u8>,
}

impl BoardToFeatureArray {
    /// Create a converter with planes in the order of `layers`.
    pub fn new(layers: impl Into<Vec<u8>>) -> Self {
        Self {
            layers: layers.into(),
        }
    }

    /// The characters with a plane, in plane order.
    pub fn layers(&self) -> &[u8] {
        &self.layers
    }
}

impl Distill<Board> for BoardToFeatureArray {
    fn distill(&self, board: &Board) -> Distilled {
        let (rows, cols) = (board.rows(), board.cols());
        let planes = Array3::from_shape_fn((self.layers.len(), rows, cols), |(l, r, c)| {
            if board.cells[(r, c)] == self.layers[l] {
                1.0f32
            } else {
                0.0
            }
        });
        Distilled::Board(ObsArray::F32(planes.into_dyn()))
    }
}

/// Saturating conversion, see [`BoardToArray`].
fn cast(values: ArrayD<f64>, dtype: DType) -> ObsArray {
    match dtype {
        DType::U8 => ObsArray::U8(values.mapv(|v| v as u8)),
        DType::I32 => ObsArray::I32(values.mapv(|v| v as i32)),
        DType::F32 => ObsArray::F32(values.mapv(|v| v as f32)),
        DType::F64 => ObsArray::F64(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distiller::{Distiller, BOARD_KEY};
    use proptest::prelude::*;

    fn maze() -> Board {
        Board::from_art(&["#####", "#A G#", "#####"]).unwrap()
    }

    #[test]
    fn from_art_checks_shape() {
        let b = maze();
        assert_eq!((b.rows(), b.cols()), (3, 5));
        assert_eq!(b.get(1, 1), Some(b'A'));
        assert_eq!(b.get(3, 0), None);
        assert_eq!(
            Board::from_art(&["###", "##"]),
            Err(BoardError::RaggedRow {
                row: 1,
                expected: 3,
                got: 2
            })
        );
        assert_eq!(Board::from_art::<&str>(&[]), Err(BoardError::Empty));
    }

    #[test]
    fn art_round_trips() {
        let b = maze();
        assert_eq!(b.to_art(), vec!["#####", "#A G#", "#####"]);
    }

    #[test]
    fn repainter_substitutes_only_mapped_characters() {
        let repainter = CharacterRepainter::new().with(b'A', b'P');
        let original = maze();
        let repainted = repainter.repaint(&original);
        assert_eq!(repainted.get(1, 1), Some(b'P'));
        assert_eq!(repainted.get(1, 3), Some(b'G'));
        assert_eq!(original.get(1, 1), Some(b'A'));
    }

    #[test]
    fn board_to_array_uses_lookup_and_fill() {
        let conv = BoardToArray::new(DType::I32)
            .with_value(b'#', 1.0)
            .with_value(b'A', 2.0)
            .with_fill(-1.0);
        let out = conv.distill(&maze()).into_observations();
        let board = &out[BOARD_KEY];
        assert_eq!(board.dtype(), DType::I32);
        assert_eq!(board.shape(), &[3, 5]);
        let flat = board.to_f64_vec();
        assert_eq!(&flat[5..10], &[1.0, 2.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn integer_dtypes_saturate_out_of_range_values() {
        let board = Board::from_art(&["#."]).unwrap();
        let u8_out = BoardToArray::new(DType::U8)
            .with_value(b'#', 300.0)
            .with_fill(-1.0)
            .distill(&board)
            .into_observations();
        assert_eq!(u8_out[BOARD_KEY].to_f64_vec(), vec![255.0, 0.0]);

        let i32_out = BoardToArray::new(DType::I32)
            .with_value(b'#', 1e12)
            .with_fill(2.7)
            .distill(&board)
            .into_observations();
        assert_eq!(
            i32_out[BOARD_KEY].to_f64_vec(),
            vec![f64::from(i32::MAX), 2.0]
        );
    }

    #[test]
    fn raw_emits_character_codes() {
        let out = BoardToArray::raw(DType::U8).distill(&maze()).into_observations();
        assert_eq!(out[BOARD_KEY].to_f64_vec()[6], f64::from(b'A'));
    }

    #[test]
    fn feature_planes_are_one_hot() {
        let conv = BoardToFeatureArray::new(b"#AG".to_vec());
        let out = conv.distill(&maze()).into_observations();
        let planes = &out[BOARD_KEY];
        assert_eq!(planes.shape(), &[3, 3, 5]);
        assert_eq!(planes.dtype(), DType::F32);
        let flat = planes.to_f64_vec();
        // Plane 1 ('A') is hot only at (1, 1).
        let plane_a = &flat[15..30];
        assert_eq!(plane_a.iter().sum::<f64>(), 1.0);
        assert_eq!(plane_a[6], 1.0);
    }

    #[test]
    fn repaint_then_convert_through_distiller() {
        let distiller = Distiller::new(BoardToArray::new(DType::U8).with_value(b'P', 9.0))
            .with_repainter(CharacterRepainter::new().with(b'A', b'P'));
        let out = distiller.distill(&maze()).into_observations();
        assert_eq!(out[BOARD_KEY].to_f64_vec()[6], 9.0);
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        (1usize..5, 1usize..6).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(proptest::sample::select(b"#.AGP".to_vec()), rows * cols)
                .prop_map(move |cells| {
                    Board::from_cells(Array2::from_shape_vec((rows, cols), cells).unwrap())
                })
        })
    }

    proptest! {
        #[test]
        fn repainter_keeps_unmapped_characters(board in arb_board()) {
            let repainted = CharacterRepainter::new().with(b'A', b'P').repaint(&board);
            for ((r, c), &ch) in board.cells().indexed_iter() {
                let expected = if ch == b'A' { b'P' } else { ch };
                prop_assert_eq!(repainted.get(r, c), Some(expected));
            }
        }

        #[test]
        fn feature_planes_are_at_most_one_hot_per_cell(board in arb_board()) {
            let out = BoardToFeatureArray::new(b"#AG".to_vec())
                .distill(&board)
                .into_observations();
            let ObsArray::F32(planes) = &out[BOARD_KEY] else {
                panic!("feature planes are f32");
            };
            for ((r, c), &ch) in board.cells().indexed_iter() {
                let hot: f32 = (0..3).map(|l| planes[&[l, r, c][..]]).sum();
                let listed = b"#AG".contains(&ch);
                prop_assert_eq!(hot, if listed { 1.0 } else { 0.0 });
            }
        }
    }
}
