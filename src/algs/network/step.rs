//! One advance of the front: flood a virtual sphere and classify what it leaves behind.

use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::algs::network::profile::{reconstruct_profiles, EdgeTable, Profile};
use crate::algs::network::Extractor;
use crate::geometry::vector::{centroid, distance, distance2, Vec3};
use crate::mesh_error::MeshError;

/// Sweep state of a surface point.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    NonVisited,
    Visited,
    /// Inner point of a profile still waiting in the queue.
    Global,
}

impl Mark {
    /// Value written to the `Marks` point array.
    pub fn as_i64(self) -> i64 {
        match self {
            Mark::NonVisited => 0,
            Mark::Visited => 1,
            Mark::Global => 2,
        }
    }
}

/// The virtual sphere of one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
}

/// What a step found beyond the current base profiles.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Exactly one profile ahead of a single base: keep going.
    Proceed { profile: Profile, sphere: Sphere },
    /// The sphere touched waiting profiles; they join the base (queue indices).
    Redefine { merged: Vec<usize> },
    /// Two base profiles met and nothing lies ahead.
    StopEnd { sphere: Sphere },
    /// A single base closed on itself.
    StopClosed { sphere: Sphere },
    /// More than two profiles meet here.
    StopBifurcation {
        new_profiles: Vec<Profile>,
        sphere: Sphere,
    },
}

struct Flood<'s> {
    center: Vec3,
    radius2: f64,
    base_inner: &'s HashSet<usize>,
    visited: Vec<usize>,
    queue: VecDeque<usize>,
    crossing: EdgeTable,
    hits: Vec<[usize; 2]>,
}

impl Flood<'_> {
    fn visit(&mut self, from: usize, q: usize, points: &[Vec3], marks: &mut [Mark]) {
        match marks[q] {
            Mark::Visited => {}
            Mark::Global if self.base_inner.contains(&q) => {}
            Mark::Global => {
                if !self.hits.contains(&[q, from]) {
                    self.hits.push([q, from]);
                }
            }
            Mark::NonVisited => {
                if distance2(points[q], self.center) <= self.radius2 {
                    marks[q] = Mark::Visited;
                    self.visited.push(q);
                    self.queue.push_back(q);
                } else {
                    self.crossing.insert_unique(from, q);
                }
            }
        }
    }
}

impl Extractor<'_> {
    /// Advance from `base` once.
    ///
    /// The sphere is centered at the mean of the base barycenters and reaches
    /// `advancement_ratio` times the farthest base point. When it would not
    /// move (center within `minimum_step` of the previous one and no larger)
    /// the previous radius is doubled instead.
    pub(crate) fn step_iteration(
        &mut self,
        base: &[Profile],
        base_inner: &HashSet<usize>,
        previous: Option<Sphere>,
    ) -> Result<StepOutcome, MeshError> {
        let center = centroid(base.iter().map(Profile::barycenter));
        let mut radius = self.opts.advancement_ratio
            * base
                .iter()
                .map(|p| p.max_distance(center))
                .fold(0.0, f64::max);
        if let Some(prev) = previous {
            if distance(center, prev.center) < self.opts.minimum_step && radius <= prev.radius {
                log::trace!("stalled at radius {radius:.4e}, doubling {:.4e}", prev.radius);
                radius = 2.0 * prev.radius;
            }
        }
        let sphere = Sphere { center, radius };

        let mesh = self.mesh;
        let points = mesh.points();
        let mut flood = Flood {
            center,
            radius2: radius * radius,
            base_inner,
            visited: Vec::new(),
            queue: VecDeque::new(),
            crossing: EdgeTable::new(),
            hits: Vec::new(),
        };
        for profile in base {
            for [a, b] in profile.edges().iter() {
                if a == b {
                    for &q in &self.neighbors[a] {
                        flood.visit(a, q, points, &mut self.marks);
                    }
                } else {
                    flood.visit(a, b, points, &mut self.marks);
                }
            }
        }
        while let Some(p) = flood.queue.pop_front() {
            for &q in &self.neighbors[p] {
                flood.visit(p, q, points, &mut self.marks);
            }
        }

        if !flood.hits.is_empty() {
            for &p in &flood.visited {
                self.marks[p] = Mark::NonVisited;
            }
            return Ok(StepOutcome::Redefine {
                merged: self.waiting_profiles_hit(&flood.hits),
            });
        }

        let mut new_profiles = reconstruct_profiles(mesh, &flood.crossing, center, radius)?;
        log::trace!(
            "sphere r={radius:.4e} swept {} points, {} profiles ahead",
            flood.visited.len(),
            new_profiles.len()
        );
        Ok(match (base.len(), new_profiles.len()) {
            (1, 0) => StepOutcome::StopClosed { sphere },
            (2, 0) => StepOutcome::StopEnd { sphere },
            (1, 1) => StepOutcome::Proceed {
                profile: new_profiles.remove(0),
                sphere,
            },
            _ => StepOutcome::StopBifurcation {
                new_profiles,
                sphere,
            },
        })
    }

    /// Queue indices of the waiting profiles owning each hit `(global, from)`.
    ///
    /// A profile owns a hit when it holds the exact crossing edge, or failing
    /// that, when the hit point is one of its inner points. Global points no
    /// waiting profile owns are demoted to visited.
    fn waiting_profiles_hit(&mut self, hits: &[[usize; 2]]) -> Vec<usize> {
        let mut merged = Vec::new();
        for &[g, from] in hits {
            let owner = self
                .waiting
                .iter()
                .position(|p| p.edges().position(g, from).is_some())
                .or_else(|| self.waiting.iter().position(|p| p.edges().contains_inner(g)));
            match owner {
                Some(i) => {
                    if !merged.contains(&i) {
                        merged.push(i);
                    }
                }
                None => {
                    log::warn!("global point {g} belongs to no waiting profile");
                    self.marks[g] = Mark::Visited;
                }
            }
        }
        merged
    }
}
