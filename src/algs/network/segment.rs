//! Centerline segments, bifurcation records and the degenerate-junction cleanup.

use serde::{Deserialize, Serialize};

use crate::algs::network::profile::Profile;
use crate::geometry::vector::{add, centroid, scale, Vec3};

/// Bifurcation ids at the two ends of a segment; `None` is an open end.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SegmentTopology {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl SegmentTopology {
    /// Pair as stored in the `Topology` cell array, `-1` for open ends.
    pub fn as_pair(&self) -> [i64; 2] {
        let f = |b: Option<usize>| b.map_or(-1, |k| k as i64);
        [f(self.start), f(self.end)]
    }

    fn touches(&self, k: usize) -> bool {
        self.start == Some(k) || self.end == Some(k)
    }
}

/// Polyline of sphere centers with one radius per point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    points: Vec<Vec3>,
    radii: Vec<f64>,
    topology: SegmentTopology,
}

impl Segment {
    pub fn new(start: Option<usize>) -> Self {
        Self {
            topology: SegmentTopology { start, end: None },
            ..Self::default()
        }
    }

    /// Append a point unless it repeats the last one.
    pub fn push(&mut self, point: Vec3, radius: f64) {
        if self.points.last() == Some(&point) {
            return;
        }
        self.points.push(point);
        self.radii.push(radius);
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    #[inline]
    pub fn topology(&self) -> SegmentTopology {
        self.topology
    }

    pub fn set_end(&mut self, end: Option<usize>) {
        self.topology.end = end;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn mean_radius(&self) -> f64 {
        if self.radii.is_empty() {
            0.0
        } else {
            self.radii.iter().sum::<f64>() / self.radii.len() as f64
        }
    }

    /// Same polyline walked the other way.
    pub fn reversed(mut self) -> Self {
        self.points.reverse();
        self.radii.reverse();
        self.topology = SegmentTopology {
            start: self.topology.end,
            end: self.topology.start,
        };
        self
    }
}

/// A junction: its center followed by the barycenters of the profiles meeting there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bifurcation {
    points: Vec<Vec3>,
    radii: Vec<f64>,
}

impl Bifurcation {
    /// Record holding only a center, used for the root.
    pub fn root(center: Vec3, radius: f64) -> Self {
        Self {
            points: vec![center],
            radii: vec![radius],
        }
    }

    /// Junction of `profiles`, centered at their radius-weighted barycenter.
    pub fn from_profiles<'a>(profiles: impl IntoIterator<Item = &'a Profile>) -> Self {
        let (centers, radii): (Vec<Vec3>, Vec<f64>) = profiles
            .into_iter()
            .map(|p| (p.barycenter(), p.mean_radius()))
            .unzip();
        let weight: f64 = radii.iter().sum();
        let center = if weight > f64::EPSILON {
            let sum = centers
                .iter()
                .zip(&radii)
                .fold([0.0; 3], |acc, (&c, &r)| add(acc, scale(c, r)));
            scale(sum, 1.0 / weight)
        } else {
            centroid(centers.iter().copied())
        };
        let mean = if radii.is_empty() {
            0.0
        } else {
            weight / radii.len() as f64
        };
        let mut points = Vec::with_capacity(centers.len() + 1);
        points.push(center);
        points.extend(centers);
        let mut all_radii = Vec::with_capacity(radii.len() + 1);
        all_radii.push(mean);
        all_radii.extend(radii);
        Self {
            points,
            radii: all_radii,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.points[0]
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radii[0]
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }
}

/// Number of segment ends attached to each bifurcation.
pub fn bifurcation_degrees(segments: &[Segment], n_bifurcations: usize) -> Vec<usize> {
    let mut degree = vec![0; n_bifurcations];
    for s in segments {
        let t = s.topology();
        for k in [t.start, t.end].into_iter().flatten() {
            if let Some(d) = degree.get_mut(k) {
                *d += 1;
            }
        }
    }
    degree
}

/// Splice `a` and `b` at their shared bifurcation `k`.
fn join(a: Segment, b: Segment, k: usize) -> Segment {
    let a = if a.topology.end == Some(k) { a } else { a.reversed() };
    let b = if b.topology.start == Some(k) { b } else { b.reversed() };
    let mut out = Segment {
        points: a.points,
        radii: a.radii,
        topology: SegmentTopology {
            start: a.topology.start,
            end: b.topology.end,
        },
    };
    for (p, r) in b.points.into_iter().zip(b.radii) {
        out.push(p, r);
    }
    out
}

/// Remove bifurcations with fewer than three attached segment ends.
///
/// Index 0 (the root) is never removed. A junction joining two segments is
/// spliced away; one touched by a single end (or by both ends of one
/// segment) opens those ends. Remaining bifurcations are renumbered densely
/// in their original order.
pub fn remove_degenerate_bifurcations(segments: &mut Vec<Segment>, bifurcations: &mut Vec<Bifurcation>) {
    let n = bifurcations.len();
    let mut removed = vec![false; n];
    loop {
        let degree = bifurcation_degrees(segments, n);
        let Some(k) = (1..n).find(|&k| !removed[k] && degree[k] < 3) else {
            break;
        };
        removed[k] = true;
        let touching: Vec<usize> = (0..segments.len())
            .filter(|&i| segments[i].topology.touches(k))
            .collect();
        match touching.as_slice() {
            &[lo, hi] => {
                let b = segments.remove(hi);
                let a = std::mem::take(&mut segments[lo]);
                segments[lo] = join(a, b, k);
                log::debug!("spliced segments {lo} and {hi} at bifurcation {k}");
            }
            _ => {
                for &i in &touching {
                    let t = &mut segments[i].topology;
                    if t.start == Some(k) {
                        t.start = None;
                    }
                    if t.end == Some(k) {
                        t.end = None;
                    }
                }
                log::debug!("opened {} segment ends at bifurcation {k}", touching.len());
            }
        }
    }

    let mut renumber = vec![None; n];
    let mut next = 0;
    for (k, slot) in renumber.iter_mut().enumerate() {
        if !removed[k] {
            *slot = Some(next);
            next += 1;
        }
    }
    for s in segments.iter_mut() {
        s.topology.start = s.topology.start.and_then(|k| renumber[k]);
        s.topology.end = s.topology.end.and_then(|k| renumber[k]);
    }
    let mut k = 0;
    bifurcations.retain(|_| {
        let keep = !removed[k];
        k += 1;
        keep
    });
}
