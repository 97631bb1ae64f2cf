//! Statistical helpers shared by batch-level computations.

/// Arithmetic mean of the finite values, ignoring NaN and infinities.
///
/// The values are summed in ascending order, so the result does not depend
/// on the order in which they were supplied. Returns `None` when no finite
/// value is present.
///
/// # Examples
///
/// ```
/// use screener_traits::stats::mean_of_finite;
///
/// assert_eq!(mean_of_finite(&[10.0, f64::NAN, 20.0]), Some(15.0));
/// assert_eq!(mean_of_finite(&[]), None);
/// ```
pub fn mean_of_finite(values: &[f64]) -> Option<f64> {
    let mut finite: Vec<f64> = values.iter().filter(|x| x.is_finite()).copied().collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(f64::total_cmp);
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}
