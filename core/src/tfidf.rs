use crate::matrix::DenseMatrix;
use crate::tf::TfMatrix;

pub type TfIdfMatrix = DenseMatrix<f64>;

/// `tfidf[d][t] = tf[d][t] * idf[t]`. Zero counts stay zero.
pub fn build_tfidf(tf: &TfMatrix, idf: &[f64]) -> TfIdfMatrix {
    let mut out = TfIdfMatrix::zeros(tf.rows(), tf.cols());
    for (d, counts) in tf.iter_rows().enumerate() {
        for ((w, &count), &weight) in out.row_mut(d).iter_mut().zip(counts).zip(idf) {
            if count != 0 {
                *w = count as f64 * weight;
            }
        }
    }
    tracing::info!(rows = out.rows(), cols = out.cols(), "tf-idf matrix built");
    out
}
