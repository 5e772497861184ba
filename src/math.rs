use super::*;

/// Index of the largest value, or `None` for an empty sequence.
///
/// Ties resolve to the last maximal index. Incomparable values such as `NaN`
/// are treated as equal.
pub(crate) fn argmax<T: PartialOrd>(
  values: impl IntoIterator<Item = T>,
) -> Option<usize> {
  values
    .into_iter()
    .enumerate()
    .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    .map(|(index, _)| index)
}

pub(crate) fn relu(x: f64) -> f64 {
  x.max(0.0)
}

pub(crate) fn sigmoid(x: f64) -> f64 {
  1.0 / (1.0 + (-x).exp())
}
