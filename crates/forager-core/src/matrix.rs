/// Dense row-major matrix with a shape fixed at construction.
///
/// Shape mismatches in any operation are wiring bugs, so they panic instead of
/// returning an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be positive, got {rows}x{cols}"
        );
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row {row} out of range for {} rows", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// `v · M`, where `v` has one entry per row. Returns one entry per column.
    pub fn vec_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(
            v.len(),
            self.rows,
            "dimension mismatch: vector of length {} times {}x{} matrix",
            v.len(),
            self.rows,
            self.cols
        );
        let mut out = vec![0.0; self.cols];
        for (i, &x) in v.iter().enumerate() {
            for (o, &w) in out.iter_mut().zip(self.row(i)) {
                *o += x * w;
            }
        }
        out
    }

    /// `M · v`, where `v` has one entry per column. Returns one entry per row.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(
            v.len(),
            self.cols,
            "dimension mismatch: {}x{} matrix times vector of length {}",
            self.rows,
            self.cols,
            v.len()
        );
        (0..self.rows)
            .map(|i| self.row(i).iter().zip(v).map(|(w, x)| w * x).sum::<f64>())
            .collect()
    }

    /// In-place `M -= alpha * outer(a, b)`.
    pub fn sub_scaled_outer(&mut self, alpha: f64, a: &[f64], b: &[f64]) {
        assert!(
            a.len() == self.rows && b.len() == self.cols,
            "dimension mismatch: outer product {}x{} against {}x{} matrix",
            a.len(),
            b.len(),
            self.rows,
            self.cols
        );
        for (row, &ai) in self.data.chunks_exact_mut(self.cols).zip(a) {
            for (w, &bj) in row.iter_mut().zip(b) {
                *w -= alpha * ai * bj;
            }
        }
    }
}
