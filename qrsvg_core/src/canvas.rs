use bitvec::{slice::BitSlice, vec::BitVec};

/// Module (aka, a cell) of a QR code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        match value {
            Module::Dark => true,
            Module::Light => false,
        }
    }
}

/// A square matrix of modules, as produced by an encoder.
///
/// The matrix is stored row-major: the module in row `i` and column `j` lives at bit `size * i + j`.
#[derive(Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    data: BitVec,
    size: usize,
}

impl ModuleMatrix {
    /// Return a matrix of size `size` filled with `module`.
    /// # Example
    /// ```
    /// use qrsvg_core::{Module, ModuleMatrix};
    /// let matrix = ModuleMatrix::filled(3, Module::Light);
    /// assert_eq!(matrix.size(), 3);
    /// assert_eq!(matrix.dark_count(), 0);
    /// ```
    pub fn filled(size: usize, module: Module) -> Self {
        Self {
            data: BitVec::repeat(module.into(), size * size),
            size,
        }
    }

    /// Build a matrix from its rows. Returns `None` if the rows do not form a square.
    /// # Example
    /// ```
    /// use qrsvg_core::{Module, ModuleMatrix};
    /// let matrix = ModuleMatrix::from_rows([[true, false], [false, true]]).unwrap();
    /// assert_eq!(matrix.get(1, 1), Some(Module::Dark));
    /// assert!(ModuleMatrix::from_rows([vec![true, false], vec![true]]).is_none());
    /// ```
    pub fn from_rows<R, I>(rows: R) -> Option<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = bool>,
    {
        let mut data = BitVec::new();
        let mut height = 0;
        let mut width = None;
        for row in rows {
            let start = data.len();
            data.extend(row);
            let row_width = data.len() - start;
            if *width.get_or_insert(row_width) != row_width {
                return None;
            }
            height += 1;
        }
        if data.len() != height * height {
            return None;
        }
        Some(Self { data, size: height })
    }

    /// Build a matrix of size `size` from modules yielded in row-major order. Returns `None` if the iterator does not
    /// yield exactly `size * size` modules.
    pub fn from_modules<I>(size: usize, modules: I) -> Option<Self>
    where
        I: IntoIterator<Item = Module>,
    {
        let data: BitVec = modules.into_iter().map(bool::from).collect();
        if data.len() == size * size {
            Some(Self { data, size })
        } else {
            None
        }
    }

    /// Get the size (side length in modules) of the matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the 1D index of the data array corresponding to position `(i, j)`, checking for validity.
    #[inline]
    fn linearized_index(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.size && j < self.size {
            Some(self.size * i + j)
        } else {
            None
        }
    }

    /// Get the module at row `i` and column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Module> {
        self.data
            .get(self.linearized_index(i, j)?)
            .map(|bit| Module::from(*bit))
    }

    /// Set the module at row `i` and column `j`.
    /// # Panics
    /// Panics if position `(i, j)` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Module) {
        let index = self.linearized_index(i, j).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the size is {} but the index is ({}, {})",
                self.size, i, j
            )
        });
        self.data.set(index, value.into())
    }

    /// Iterate over the rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> + '_ {
        // `chunks_exact(0)` panics, and an empty matrix has no rows anyway.
        self.data.chunks_exact(self.size.max(1))
    }

    /// Iterate over the `(row, column)` positions of the dark modules in row-major order.
    pub fn dark_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.data.iter_ones().map(move |index| (index / size, index % size))
    }

    /// Count the dark modules.
    pub fn dark_count(&self) -> usize {
        self.data.count_ones()
    }
}

impl std::fmt::Debug for ModuleMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ModuleMatrix({}x{}) {{", self.size, self.size)?;
        for row in self.rows() {
            let line: String = row.iter().map(|bit| if *bit { '#' } else { '.' }).collect();
            writeln!(f, "    {}", line)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn checker() -> ModuleMatrix {
        ModuleMatrix::from_rows([
            [true, false, true],
            [false, true, false],
            [true, false, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let matrix = ModuleMatrix::from_rows([[true, true], [false, false]]).unwrap();
        assert_eq!(matrix.get(0, 1), Some(Module::Dark));
        assert_eq!(matrix.get(1, 0), Some(Module::Light));
        assert_eq!(matrix.get(2, 0), None);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        assert!(ModuleMatrix::from_rows([vec![true, false, true], vec![true, false, true]]).is_none());
        assert!(ModuleMatrix::from_rows([vec![true], vec![true, false]]).is_none());
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = ModuleMatrix::from_rows(Vec::<Vec<bool>>::new()).unwrap();
        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.rows().count(), 0);
        assert_eq!(matrix.dark_positions().count(), 0);
    }

    #[test]
    fn test_dark_positions() {
        let matrix = checker();
        assert_eq!(matrix.dark_count(), 5);
        assert_eq!(
            matrix.dark_positions().collect::<Vec<_>>(),
            vec![(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]
        );
    }

    #[test]
    fn test_from_modules() {
        let modules = [Module::Dark, Module::Light, Module::Light, Module::Dark];
        let matrix = ModuleMatrix::from_modules(2, modules).unwrap();
        assert_eq!(matrix, ModuleMatrix::from_rows([[true, false], [false, true]]).unwrap());
        assert!(ModuleMatrix::from_modules(3, modules).is_none());
    }

    #[test]
    fn test_set() {
        let mut matrix = ModuleMatrix::filled(4, Module::Light);
        matrix.set(2, 3, Module::Dark);
        assert_eq!(matrix.get(2, 3), Some(Module::Dark));
        assert_eq!(matrix.dark_positions().collect::<Vec<_>>(), vec![(2, 3)]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the size is 2 but the index is (2, 0)")]
    fn test_set_out_of_bounds() {
        ModuleMatrix::filled(2, Module::Light).set(2, 0, Module::Dark);
    }
}
