/// Exponential moving average over `values` (oldest first), one output per input.
///
/// Uses the recursive form seeded with the first value:
/// `ema[0] = v[0]`, `ema[i] = α·v[i] + (1 − α)·ema[i−1]` with `α = 2 / (span + 1)`.
/// Early entries are only partially warmed; they are returned anyway.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}
