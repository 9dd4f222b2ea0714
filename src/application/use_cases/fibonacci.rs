pub const DEFAULT_FIBONACCI_TERMS: u32 = 50;

/// Sum of the first `n` Fibonacci terms (0, 1, 1, 2, 3, ...).
///
/// Returns `None` when the sum does not fit in a `u128` (`n > 185`).
pub fn fibonacci_sum(n: u32) -> Option<u128> {
    let (mut a, mut b) = (0u128, 1u128);
    let mut total = 0u128;

    for i in 0..n {
        total = total.checked_add(a)?;
        // The term after the last one summed is never needed.
        if i + 1 < n {
            let next = a.checked_add(b)?;
            a = b;
            b = next;
        }
    }

    Some(total)
}
