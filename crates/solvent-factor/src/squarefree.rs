//! Squarefree decomposition of polynomials over Q.
//!
//! Produces a factorization where each factor is squarefree
//! (no repeated roots).

use solvent_poly::{make_monic, poly_div_rem, poly_gcd, DensePoly};

fn quo(a: &DensePoly, b: &DensePoly) -> DensePoly {
    poly_div_rem(a, b).0
}

/// Computes the squarefree decomposition of `p` with Yun's algorithm.
///
/// Returns monic factors `a_i` with multiplicities `i` such that
/// `p = lc(p) * prod a_i**i`; factors equal to one are omitted. Constant
/// input gives an empty list.
#[must_use]
pub fn squarefree_decomposition(p: &DensePoly) -> Vec<(DensePoly, usize)> {
    if p.degree() == 0 {
        return Vec::new();
    }

    let f = make_monic(p);
    let df = f.derivative();
    let a0 = poly_gcd(&f, &df);
    let mut b = quo(&f, &a0);
    let c = quo(&df, &a0);
    let mut d = c.sub(&b.derivative());

    let mut out = Vec::new();
    let mut i = 1;
    while b.degree() > 0 {
        let a = poly_gcd(&b, &d);
        if a.degree() > 0 {
            out.push((a.clone(), i));
        }
        b = quo(&b, &a);
        let c = quo(&d, &a);
        d = c.sub(&b.derivative());
        i += 1;
    }
    out
}
