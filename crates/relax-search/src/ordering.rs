use crate::types::LocationResult;

/// Sorts results by rating, highest first.
///
/// The sort is stable: equal ratings keep their incoming order. Ratings are
/// compared with `f64::total_cmp`, so the order is total even for inputs
/// that should never reach here (NaN).
pub fn sort_by_rating_desc(results: &mut [LocationResult]) {
    results.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}
