//! Small numerical kernels: sign, sampling grids, quadrature and root finding.

/// Sign of `v` with an exact zero mapping to zero (unlike `f64::signum`).
#[inline]
pub fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        0.0
    }
}

/// `n` evenly spaced samples over `[a, b]`, both ends included.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { b } else { a + step * i as f64 })
                .collect()
        }
    }
}

const SIMPSON_MAX_DEPTH: u32 = 24;

/// Adaptive Simpson quadrature of `f` over `[a, b]`.
///
/// Subdivides until the Richardson error estimate on a panel drops below
/// `15·tol` (with `tol` halved per level) or the recursion depth is exhausted.
/// `b < a` integrates with the usual orientation sign.
pub fn adaptive_simpson<F>(f: F, a: f64, b: f64, tol: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return 0.0;
    }
    let fa = f(a);
    let fb = f(b);
    let m = 0.5 * (a + b);
    let fm = f(m);
    let whole = simpson(a, b, fa, fm, fb);
    simpson_step(&f, a, b, fa, fm, fb, whole, tol.abs(), SIMPSON_MAX_DEPTH)
}

#[inline]
fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn simpson_step<F>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    depth: u32,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);
    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;
    if depth == 0 || !delta.is_finite() || delta.abs() <= 15.0 * tol {
        return left + right + delta / 15.0;
    }
    simpson_step(f, a, m, fa, flm, fm, left, 0.5 * tol, depth - 1)
        + simpson_step(f, m, b, fm, frm, fb, right, 0.5 * tol, depth - 1)
}

const BISECT_MAX_ITERS: usize = 200;

/// Bisection for a root of `f` in the bracket spanned by `a` and `b`.
///
/// Returns `None` when `f(a)` and `f(b)` share a sign (no bracketed root) or
/// either end is not finite. Endpoint roots are returned as-is.
pub fn bisect<F>(f: F, a: f64, b: f64, xtol: f64) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a;
    let mut hi = b;
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if !f_lo.is_finite() || !f_hi.is_finite() {
        return None;
    }
    if f_lo == 0.0 {
        return Some(lo);
    }
    if f_hi == 0.0 {
        return Some(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return None;
    }
    for _ in 0..BISECT_MAX_ITERS {
        let mid = 0.5 * (lo + hi);
        if (hi - lo).abs() <= xtol {
            return Some(mid);
        }
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Some(mid);
        }
        if !f_mid.is_finite() {
            return None;
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Some(0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_maps_zero_to_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
        assert_eq!(sign(-1e-300), -1.0);
        assert!(sign(f64::NAN).is_nan());
    }

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(0.0, -10.0, 5);
        assert_eq!(v, vec![0.0, -2.5, -5.0, -7.5, -10.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn simpson_integrates_exponential() {
        let l = 300.0;
        let got = adaptive_simpson(|x: f64| (-x / l).exp(), 0.0, 3000.0, 1e-10);
        let expected = l * (1.0 - (-10.0f64).exp());
        assert!((got - expected).abs() < 1e-6, "got {got}, expected {expected}");
    }

    #[test]
    fn simpson_handles_kinked_integrand() {
        let got = adaptive_simpson(|x: f64| (1.0 - x.abs()).max(0.0), -2.0, 2.0, 1e-12);
        assert!((got - 1.0).abs() < 1e-8, "got {got}");
        let reversed = adaptive_simpson(|x: f64| x, 1.0, 0.0, 1e-12);
        assert!((reversed + 0.5).abs() < 1e-12);
    }

    #[test]
    fn bisect_finds_bracketed_root() {
        let root = bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-12).unwrap();
        assert!((root - 2.0f64.sqrt()).abs() < 1e-10);
        let neg = bisect(|x| x + 3.0, 0.0, -10.0, 1e-12).unwrap();
        assert!((neg + 3.0).abs() < 1e-10);
    }

    #[test]
    fn bisect_rejects_unbracketed_interval() {
        assert!(bisect(|x| x * x + 1.0, -1.0, 1.0, 1e-9).is_none());
        assert!(bisect(|_| f64::NAN, -1.0, 1.0, 1e-9).is_none());
    }
}
