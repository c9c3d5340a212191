//! Front-chain packing of sibling circles
//!
//! Circles are placed one by one tangent to two neighbours on the front
//! chain, the closed loop of circles on the outside of the pack.

use super::enclose::{bounding_circle, enclose};
use super::Circle;

/// Place `circles` without overlap around the origin.
///
/// Radii are read, positions are overwritten. The result is translated so the
/// enclosing circle is centered at the origin; its radius is returned.
pub fn pack_siblings(circles: &mut [Circle]) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    let (x, y) = place(&circles[1], &circles[0], circles[2].r);
    circles[2].x = x;
    circles[2].y = y;

    let mut chain = FrontChain::new(n);
    chain.link(0, 1);
    chain.link(1, 2);
    chain.link(2, 0);
    let (mut a, mut b) = (0, 1);

    let mut i = 3;
    'pack: while i < n {
        let (x, y) = place(&circles[a], &circles[b], circles[i].r);
        circles[i].x = x;
        circles[i].y = y;
        let c = circles[i];

        // Closest intersecting circle on the chain, walking both ways
        let mut j = chain.next[b];
        let mut k = chain.prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(&circles[j], &c) {
                    b = j;
                    chain.link(a, b);
                    continue 'pack;
                }
                sj += circles[j].r;
                j = chain.next[j];
            } else {
                if intersects(&circles[k], &c) {
                    a = k;
                    chain.link(a, b);
                    continue 'pack;
                }
                sk += circles[k].r;
                k = chain.prev[k];
            }
            if j == chain.next[k] {
                break;
            }
        }

        chain.link(a, i);
        chain.link(i, b);
        b = i;

        // New pair closest to the centroid
        let mut best = score(circles, &chain, a);
        let mut node = chain.next[b];
        while node != b {
            let s = score(circles, &chain, node);
            if s < best {
                a = node;
                best = s;
            }
            node = chain.next[node];
        }
        b = chain.next[a];
        i += 1;
    }

    let mut front = vec![circles[b]];
    let mut node = chain.next[b];
    while node != b {
        front.push(circles[node]);
        node = chain.next[node];
    }
    let enclosing = enclose(&front).unwrap_or_else(|| {
        tracing::warn!("Enclosing circle did not converge, using bounding circle");
        bounding_circle(circles)
    });

    for circle in circles.iter_mut() {
        circle.x -= enclosing.x;
        circle.y -= enclosing.y;
    }
    enclosing.r
}

/// Doubly linked ring over circle indices
struct FrontChain {
    next: Vec<usize>,
    prev: Vec<usize>,
}

impl FrontChain {
    fn new(n: usize) -> Self {
        Self {
            next: vec![0; n],
            prev: vec![0; n],
        }
    }

    fn link(&mut self, a: usize, b: usize) {
        self.next[a] = b;
        self.prev[b] = a;
    }
}

/// Position of a circle of radius `r` tangent to both `b` and `a`
fn place(b: &Circle, a: &Circle, r: f64) -> (f64, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 == 0.0 {
        return (a.x + r, a.y);
    }

    let a2 = (a.r + r).powi(2);
    let b2 = (b.r + r).powi(2);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        (b.x - x * dx - y * dy, b.y - x * dy + y * dx)
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        (a.x + x * dx - y * dy, a.y + x * dy + y * dx)
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance to the origin of the weighted midpoint of `node` and its successor
fn score(circles: &[Circle], chain: &FrontChain, node: usize) -> f64 {
    let a = &circles[node];
    let b = &circles[chain.next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circles(radii: &[f64]) -> Vec<Circle> {
        radii.iter().map(|&r| Circle::new(0.0, 0.0, r)).collect()
    }

    fn assert_no_overlap(circles: &[Circle]) {
        for (i, a) in circles.iter().enumerate() {
            for b in &circles[i + 1..] {
                let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(d + 1e-6 >= a.r + b.r, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    fn assert_enclosed(circles: &[Circle], r: f64) {
        for c in circles {
            let d = (c.x * c.x + c.y * c.y).sqrt();
            assert!(d + c.r <= r + 1e-6, "{:?} outside radius {}", c, r);
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(pack_siblings(&mut []), 0.0);

        let mut one = circles(&[5.0]);
        assert_eq!(pack_siblings(&mut one), 5.0);
        assert_eq!((one[0].x, one[0].y), (0.0, 0.0));
    }

    #[test]
    fn test_two_circles_touch() {
        let mut two = circles(&[3.0, 1.0]);
        let r = pack_siblings(&mut two);
        assert!((r - 4.0).abs() < 1e-9);
        assert_no_overlap(&two);
        assert_enclosed(&two, r);
    }

    #[test]
    fn test_many_circles_no_overlap() {
        let radii: Vec<f64> = (0..40).map(|i| 2.0 + (i % 7) as f64 * 2.5).collect();
        let mut packed = circles(&radii);
        let r = pack_siblings(&mut packed);

        assert_no_overlap(&packed);
        assert_enclosed(&packed, r);
    }

    #[test]
    fn test_equal_circles() {
        let mut packed = circles(&[4.0; 12]);
        let r = pack_siblings(&mut packed);
        assert_no_overlap(&packed);
        assert_enclosed(&packed, r);
        // Twelve circles cannot fit in less than three radii
        assert!(r >= 12.0);
    }

    #[test]
    fn test_deterministic() {
        let radii = [9.0, 7.5, 7.5, 5.0, 3.0, 3.0, 2.0, 2.0, 2.0];
        let mut first = circles(&radii);
        let mut second = circles(&radii);
        assert_eq!(pack_siblings(&mut first), pack_siblings(&mut second));
        assert_eq!(first, second);
    }
}
