//! Smallest enclosing circle of a set of circles

use super::Circle;

/// Deterministic linear congruential generator used for the shuffle
struct Lcg(u64);

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    fn next(&mut self) -> f64 {
        self.0 = (Self::A * self.0 + Self::C) % Self::M;
        self.0 as f64 / Self::M as f64
    }
}

fn shuffle(circles: &mut [Circle], random: &mut Lcg) {
    let mut m = circles.len();
    while m > 0 {
        let i = (random.next() * m as f64) as usize;
        m -= 1;
        circles.swap(m, i.min(m));
    }
}

/// Smallest circle enclosing every circle of `circles`.
///
/// Returns `None` for an empty input or when the basis update fails
/// numerically; callers fall back to [`bounding_circle`].
pub fn enclose(circles: &[Circle]) -> Option<Circle> {
    let mut circles = circles.to_vec();
    shuffle(&mut circles, &mut Lcg(1));

    let mut basis: Vec<Circle> = Vec::new();
    let mut enclosing: Option<Circle> = None;
    let mut i = 0;
    while i < circles.len() {
        let p = circles[i];
        match enclosing {
            Some(e) if encloses_weak(&e, &p) => i += 1,
            _ => {
                basis = extend_basis(&basis, p)?;
                enclosing = Some(enclose_basis(&basis));
                i = 0;
            }
        }
    }
    enclosing
}

/// Circle around the centroid of `circles` reaching every circle's far edge
pub fn bounding_circle(circles: &[Circle]) -> Circle {
    if circles.is_empty() {
        return Circle::new(0.0, 0.0, 0.0);
    }
    let n = circles.len() as f64;
    let x = circles.iter().map(|c| c.x).sum::<f64>() / n;
    let y = circles.iter().map(|c| c.y).sum::<f64>() / n;
    let r = circles
        .iter()
        .map(|c| ((c.x - x).powi(2) + (c.y - y).powi(2)).sqrt() + c.r)
        .fold(0.0, f64::max);
    Circle::new(x, y, r)
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(&p, basis) {
        return Some(vec![p]);
    }

    for &b in basis {
        if encloses_not(&p, &b) && encloses_weak_all(&enclose_basis2(&b, &p), basis) {
            return Some(vec![b, p]);
        }
    }

    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (bi, bj) = (basis[i], basis[j]);
            if encloses_not(&enclose_basis2(&bi, &bj), &p)
                && encloses_not(&enclose_basis2(&bi, &p), &bj)
                && encloses_not(&enclose_basis2(&bj, &p), &bi)
                && encloses_weak_all(&enclose_basis3(&bi, &bj, &p), basis)
            {
                return Some(vec![bi, bj, p]);
            }
        }
    }

    None
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis2(a, b),
        [a, b, c] => enclose_basis3(a, b, c),
        _ => bounding_circle(basis),
    }
}

fn enclose_basis2(a: &Circle, b: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let x21 = x2 - x1;
    let y21 = y2 - y1;
    let r21 = r2 - r1;
    let l = (x21 * x21 + y21 * y21).sqrt();
    if l == 0.0 {
        return if r1 >= r2 { *a } else { *b };
    }
    Circle::new(
        (x1 + x2 + x21 / l * r21) / 2.0,
        (y1 + y2 + y21 / l * r21) / 2.0,
        (l + r1 + r2) / 2.0,
    )
}

fn enclose_basis3(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_encloses(e: &Circle, circles: &[Circle]) {
        for c in circles {
            let d = ((c.x - e.x).powi(2) + (c.y - e.y).powi(2)).sqrt();
            assert!(d + c.r <= e.r + 1e-6, "{:?} not inside {:?}", c, e);
        }
    }

    #[test]
    fn test_single_circle() {
        let c = Circle::new(3.0, 4.0, 2.0);
        assert_eq!(enclose(&[c]), Some(c));
    }

    #[test]
    fn test_two_circles() {
        let circles = [Circle::new(-1.0, 0.0, 1.0), Circle::new(1.0, 0.0, 1.0)];
        let e = enclose(&circles).unwrap();
        assert!((e.r - 2.0).abs() < 1e-9);
        assert!(e.x.abs() < 1e-9 && e.y.abs() < 1e-9);
    }

    #[test]
    fn test_many_circles_enclosed_and_deterministic() {
        let circles: Vec<Circle> = (0..20)
            .map(|i| {
                let t = i as f64 * 0.7;
                Circle::new(t.cos() * i as f64, t.sin() * i as f64, 1.0 + (i % 3) as f64)
            })
            .collect();
        let e = enclose(&circles).unwrap();
        assert_encloses(&e, &circles);
        assert_eq!(enclose(&circles), Some(e));
    }

    #[test]
    fn test_empty() {
        assert_eq!(enclose(&[]), None);
        assert_eq!(bounding_circle(&[]).r, 0.0);
    }

    #[test]
    fn test_bounding_circle_encloses() {
        let circles = [Circle::new(0.0, 0.0, 1.0), Circle::new(10.0, 0.0, 2.0)];
        assert_encloses(&bounding_circle(&circles), &circles);
    }
}
