/// Squared Euclidean distance between `a` and `b`, giving up early.
///
/// Once the running sum exceeds `bailout` the scan stops and `bailout` is
/// returned, which callers read as "not closer than the current worst
/// neighbour". No square root is taken.
pub fn euclidean(a: &[f64], b: &[f64], bailout: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        let diff = x - y;
        sum += diff * diff;
        if sum > bailout {
            return bailout;
        }
    }
    sum
}
