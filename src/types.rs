use serde::Serialize;

/// Shape of a dense feature array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureShape {
    /// 1-D array of the given length.
    Vector(usize),
    /// Row-major 2-D array.
    Matrix { rows: usize, cols: usize },
}

impl FeatureShape {
    pub fn len(&self) -> usize {
        match *self {
            FeatureShape::Vector(n) => n,
            FeatureShape::Matrix { rows, cols } => rows * cols,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensions as a list, outermost first.
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            FeatureShape::Vector(n) => vec![n],
            FeatureShape::Matrix { rows, cols } => vec![rows, cols],
        }
    }
}

/// Dense histogram features in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DenseFeatures {
    shape: FeatureShape,
    data: Vec<f64>,
}

impl DenseFeatures {
    /// Wrap `data`; `None` if its length does not match `shape`.
    pub fn new(shape: FeatureShape, data: Vec<f64>) -> Option<Self> {
        (shape.len() == data.len()).then_some(Self { shape, data })
    }

    pub fn vector(data: Vec<f64>) -> Self {
        Self {
            shape: FeatureShape::Vector(data.len()),
            data,
        }
    }

    pub fn shape(&self) -> FeatureShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Row `r` of a matrix; the whole array for a vector when `r == 0`.
    pub fn row(&self, r: usize) -> Option<&[f64]> {
        match self.shape {
            FeatureShape::Vector(n) => (r == 0).then_some(&self.data[..n]),
            FeatureShape::Matrix { rows, cols } => {
                (r < rows).then(|| &self.data[r * cols..(r + 1) * cols])
            }
        }
    }

    pub fn rows(&self) -> usize {
        match self.shape {
            FeatureShape::Vector(_) => 1,
            FeatureShape::Matrix { rows, .. } => rows,
        }
    }
}

/// Non-zero entries of a 1-D histogram sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SparseFeatures {
    /// Length of the dense vector the entries come from.
    dense_len: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseFeatures {
    /// Keep every entry of `dense` that is not exactly zero.
    pub fn from_dense(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self {
            dense_len: dense.len(),
            indices,
            values,
        }
    }

    pub fn dense_len(&self) -> usize {
        self.dense_len
    }

    /// Ascending indices of the non-zero entries.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Two-row `[indices; values]` matrix, indices stored as `f64`.
    pub fn to_rows(&self) -> [Vec<f64>; 2] {
        [
            self.indices.iter().map(|&i| i as f64).collect(),
            self.values.clone(),
        ]
    }

    pub fn to_dense(&self) -> DenseFeatures {
        let mut data = vec![0.0; self.dense_len];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            data[i] = v;
        }
        DenseFeatures::vector(data)
    }
}

/// Result of one extraction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Features {
    Dense(DenseFeatures),
    Sparse(SparseFeatures),
}

impl Features {
    pub fn as_dense(&self) -> Option<&DenseFeatures> {
        match self {
            Features::Dense(d) => Some(d),
            Features::Sparse(_) => None,
        }
    }

    pub fn as_sparse(&self) -> Option<&SparseFeatures> {
        match self {
            Features::Sparse(s) => Some(s),
            Features::Dense(_) => None,
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Features::Sparse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_rows_follow_shape() {
        let d = DenseFeatures::new(
            FeatureShape::Matrix { rows: 2, cols: 3 },
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        assert_eq!(d.rows(), 2);
        assert_eq!(d.row(1).unwrap(), &[4.0, 5.0, 6.0]);
        assert!(d.row(2).is_none());
        assert!(DenseFeatures::new(FeatureShape::Vector(4), vec![0.0; 3]).is_none());
    }

    #[test]
    fn sparse_keeps_exact_non_zeros_only() {
        let s = SparseFeatures::from_dense(&[0.0, 1e-300, 0.0, 2.0, -0.0]);
        assert_eq!(s.indices(), &[1, 3]);
        assert_eq!(s.values(), &[1e-300, 2.0]);
        assert_eq!(s.to_rows(), [vec![1.0, 3.0], vec![1e-300, 2.0]]);
        assert_eq!(s.to_dense().as_slice(), &[0.0, 1e-300, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn features_serialize_with_kind_tag() {
        let f = Features::Sparse(SparseFeatures::from_dense(&[0.0, 3.0]));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "sparse");
        assert_eq!(json["indices"], serde_json::json!([1]));
        let f = Features::Dense(DenseFeatures::vector(vec![1.0]));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "dense");
        assert_eq!(json["shape"], serde_json::json!({ "vector": 1 }));
    }
}
