use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::matrix::DenseMatrix;
use crate::tokenizer::tokenize;
use crate::vocabulary::Vocabulary;

/// Raw term counts, `[document id][term id]`.
pub type TfMatrix = DenseMatrix<u32>;

/// Count every document's terms into a row sized to the vocabulary.
///
/// The vocabulary must have been built from this same corpus snapshot; a term
/// it does not know is reported as [`Error::Consistency`] instead of being
/// dropped.
pub fn build_tf(corpus: &Corpus, vocab: &Vocabulary) -> Result<TfMatrix> {
    let mut tf = TfMatrix::zeros(corpus.len(), vocab.len());
    for doc in corpus {
        let row = tf.row_mut(doc.id() as usize);
        for term in tokenize(doc.text()) {
            let tid = vocab.id(&term).ok_or(Error::Consistency { term })?;
            row[tid as usize] += 1;
        }
    }
    tracing::info!(rows = tf.rows(), cols = tf.cols(), "tf matrix built");
    Ok(tf)
}
