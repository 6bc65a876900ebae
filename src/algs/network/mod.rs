//! Network extraction: topological skeleton of a tubular surface.
//!
//! Every open boundary of the surface becomes a profile in a FIFO work list.
//! Each profile taken from the list starts a segment that advances by virtual
//! spheres ([`step`]) until it ends, closes, meets another front, or splits.
//! Splits record a [`Bifurcation`] and queue the profiles leaving it. The
//! profile that started the first segment is the root, bifurcation 0.
//!
//! Points are marked as the sweep goes (see [`Mark`]); the marks are returned
//! on a copy of the input in the `Marks` point array.

pub mod graph;
pub mod profile;
pub mod segment;
pub mod step;

use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::algs::boundary::{extract_boundaries, loops_from_polylines};
use crate::data::arrays::{MARKS_ARRAY, RADIUS_ARRAY, TOPOLOGY_ARRAY};
use crate::geometry::Vec3;
use crate::mesh_error::MeshError;
use crate::topology::mesh::{DataSetKind, Mesh};

pub use profile::{locate_virtual_point, reconstruct_profiles, EdgeTable, Profile};
pub use segment::{
    bifurcation_degrees, remove_degenerate_bifurcations, Bifurcation, Segment, SegmentTopology,
};
pub use step::{Mark, Sphere, StepOutcome};

/// Parameters of [`extract_network`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkExtractionOpts {
    /// Sphere radius over the farthest base-profile point. Must exceed 1.
    pub advancement_ratio: f64,
    /// Center displacement below which a step counts as stalled.
    pub minimum_step: f64,
    /// Steps one segment may take before extraction gives up.
    pub max_steps_per_segment: usize,
    pub marks_array_name: String,
    pub radius_array_name: String,
    pub topology_array_name: String,
}

impl Default for NetworkExtractionOpts {
    fn default() -> Self {
        Self {
            advancement_ratio: 1.05,
            minimum_step: 5.0e-4,
            max_steps_per_segment: 100_000,
            marks_array_name: MARKS_ARRAY.to_string(),
            radius_array_name: RADIUS_ARRAY.to_string(),
            topology_array_name: TOPOLOGY_ARRAY.to_string(),
        }
    }
}

impl NetworkExtractionOpts {
    fn validate(&self) -> Result<(), MeshError> {
        if !(self.advancement_ratio.is_finite() && self.advancement_ratio > 1.0) {
            return Err(MeshError::InvalidOption(format!(
                "advancement_ratio must be a finite value above 1, got {}",
                self.advancement_ratio
            )));
        }
        if !(self.minimum_step.is_finite() && self.minimum_step >= 0.0) {
            return Err(MeshError::InvalidOption(format!(
                "minimum_step must be finite and non-negative, got {}",
                self.minimum_step
            )));
        }
        if self.max_steps_per_segment == 0 {
            return Err(MeshError::InvalidOption(
                "max_steps_per_segment must be positive".into(),
            ));
        }
        for name in [
            &self.marks_array_name,
            &self.radius_array_name,
            &self.topology_array_name,
        ] {
            if name.is_empty() {
                return Err(MeshError::InvalidOption("array names must not be empty".into()));
            }
        }
        Ok(())
    }
}

/// Everything an extraction produces.
#[derive(Clone, Debug)]
pub struct NetworkExtraction {
    /// Polylines of sphere centers, point `Radius`, cell `Topology`.
    pub network: Mesh,
    /// One line per segment between its endpoints, cell `Radius` and `Topology`.
    pub graph: Mesh,
    /// Copy of the input with the `Marks` point array.
    pub model: Mesh,
    pub segments: Vec<Segment>,
    pub bifurcations: Vec<Bifurcation>,
    /// False when the surface had no boundary or a segment failed.
    pub complete: bool,
    /// Points no longer unvisited when extraction stopped.
    pub swept_points: usize,
}

/// Extract the network of `surface`.
///
/// Only poly data is accepted. A surface without open boundaries yields an
/// empty, incomplete result. A segment that cannot be advanced stops the
/// extraction; what was built before it is still returned with `complete`
/// unset.
pub fn extract_network(
    surface: &Mesh,
    opts: &NetworkExtractionOpts,
) -> Result<NetworkExtraction, MeshError> {
    extract_network_with_progress(surface, opts, |_| {})
}

/// [`extract_network`], reporting the swept fraction after every segment.
pub fn extract_network_with_progress<F>(
    surface: &Mesh,
    opts: &NetworkExtractionOpts,
    mut progress: F,
) -> Result<NetworkExtraction, MeshError>
where
    F: FnMut(f64),
{
    if surface.kind() != DataSetKind::PolyData {
        log::error!("network extraction needs poly data, got {:?}", surface.kind());
        return Err(MeshError::UnsupportedDataSet {
            expected: DataSetKind::PolyData,
            found: surface.kind(),
        });
    }
    opts.validate()?;

    let mut extractor = Extractor::new(surface, opts)?;
    let complete = if extractor.waiting.is_empty() {
        log::warn!("surface has no open boundary, nothing to extract");
        false
    } else {
        extractor.global_iteration(&mut progress)
    };
    extractor.finish(complete)
}

/// Sweep state owned by one extraction run.
pub(crate) struct Extractor<'a> {
    mesh: &'a Mesh,
    opts: &'a NetworkExtractionOpts,
    neighbors: Vec<Vec<usize>>,
    marks: Vec<Mark>,
    waiting: VecDeque<Profile>,
    segments: Vec<Segment>,
    bifurcations: Vec<Bifurcation>,
}

impl<'a> Extractor<'a> {
    fn new(mesh: &'a Mesh, opts: &'a NetworkExtractionOpts) -> Result<Self, MeshError> {
        let neighbors = (0..mesh.number_of_points())
            .map(|p| mesh.point_edge_neighbors(p))
            .collect::<Result<Vec<_>, _>>()?;
        let mut marks = vec![Mark::NonVisited; mesh.number_of_points()];
        let mut waiting = VecDeque::new();
        for boundary in loops_from_polylines(&extract_boundaries(mesh)?)? {
            let profile = Profile::boundary(mesh, &boundary.point_ids)?;
            for p in profile.edges().inner_points() {
                marks[p] = Mark::Global;
            }
            waiting.push_back(profile);
        }
        let mut bifurcations = Vec::new();
        if let Some(root) = waiting.front_mut() {
            bifurcations.push(Bifurcation::root(root.barycenter(), root.mean_radius()));
            root.origin = Some(0);
        }
        log::debug!("network extraction starts from {} boundary profiles", waiting.len());
        Ok(Self {
            mesh,
            opts,
            neighbors,
            marks,
            waiting,
            segments: Vec::new(),
            bifurcations,
        })
    }

    /// Drain the work list. Returns false if a segment failed.
    fn global_iteration(&mut self, progress: &mut dyn FnMut(f64)) -> bool {
        let total = self.marks.len().max(1) as f64;
        while let Some(profile) = self.waiting.pop_front() {
            if let Err(err) = self.segment_iteration(profile) {
                log::error!("network extraction stopped: {err}");
                return false;
            }
            let swept = self.swept_points();
            log::debug!(
                "{} segments, {} waiting profiles, swept {swept}/{}",
                self.segments.len(),
                self.waiting.len(),
                self.marks.len()
            );
            progress(swept as f64 / total);
        }
        true
    }

    /// Advance one segment from `start` until a stop outcome.
    fn segment_iteration(&mut self, start: Profile) -> Result<(), MeshError> {
        let id = self.segments.len();
        let mut segment = Segment::new(start.origin());
        let (anchor, anchor_radius) = self.anchor(&start);
        segment.push(anchor, anchor_radius);

        let mut base_inner = HashSet::new();
        self.activate(&start, &mut base_inner);
        let mut base = vec![start];
        let mut previous = None;
        let mut steps = 0;
        loop {
            steps += 1;
            if steps > self.opts.max_steps_per_segment {
                log::error!("segment {id} exceeded {} steps", self.opts.max_steps_per_segment);
                return Err(MeshError::StepLimit {
                    segment: id,
                    steps: self.opts.max_steps_per_segment,
                });
            }
            match self.step_iteration(&base, &base_inner, previous)? {
                StepOutcome::Redefine { mut merged } => {
                    merged.sort_unstable();
                    let mut taken: Vec<Profile> = merged
                        .iter()
                        .rev()
                        .filter_map(|&i| self.waiting.remove(i))
                        .collect();
                    taken.reverse();
                    log::debug!("segment {id}: merged {} waiting profiles", taken.len());
                    for profile in taken {
                        self.activate(&profile, &mut base_inner);
                        base.push(profile);
                    }
                }
                StepOutcome::Proceed { profile, sphere } => {
                    segment.push(sphere.center, mean_radius(&base));
                    base_inner = profile.edges().inner_points().collect();
                    base = vec![profile];
                    previous = Some(sphere);
                }
                StepOutcome::StopClosed { sphere } => {
                    segment.push(sphere.center, mean_radius(&base));
                    log::debug!("segment {id}: closed after {steps} steps");
                    break;
                }
                StepOutcome::StopEnd { sphere } => {
                    segment.push(sphere.center, mean_radius(&base));
                    let other = &base[1];
                    let (anchor, radius) = self.anchor(other);
                    segment.push(anchor, radius);
                    segment.set_end(other.origin());
                    log::debug!("segment {id}: met another front after {steps} steps");
                    break;
                }
                StepOutcome::StopBifurcation {
                    new_profiles,
                    sphere,
                } => {
                    let k = self.bifurcations.len();
                    let bifurcation = Bifurcation::from_profiles(base.iter().chain(&new_profiles));
                    segment.push(sphere.center, mean_radius(&base));
                    segment.push(bifurcation.center(), bifurcation.radius());
                    segment.set_end(Some(k));
                    let center = (bifurcation.center(), bifurcation.radius());
                    self.bifurcations.push(bifurcation);
                    log::debug!(
                        "segment {id}: bifurcation {k} with {} base and {} new profiles",
                        base.len(),
                        new_profiles.len()
                    );
                    self.segments.push(segment);
                    for merged in &base[1..] {
                        let mut connector = Segment::new(Some(k));
                        connector.push(center.0, center.1);
                        let (anchor, radius) = self.anchor(merged);
                        connector.push(anchor, radius);
                        connector.set_end(merged.origin());
                        self.segments.push(connector);
                    }
                    for mut profile in new_profiles {
                        profile.origin = Some(k);
                        for p in profile.edges().inner_points() {
                            self.marks[p] = Mark::Global;
                        }
                        self.waiting.push_back(profile);
                    }
                    return Ok(());
                }
            }
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Where a segment touching `profile` attaches: its bifurcation, else its barycenter.
    fn anchor(&self, profile: &Profile) -> (Vec3, f64) {
        match profile.origin().and_then(|k| self.bifurcations.get(k)) {
            Some(b) => (b.center(), b.radius()),
            None => (profile.barycenter(), profile.mean_radius()),
        }
    }

    /// Take `profile` into the base. Its inner points become visited unless
    /// another waiting profile still shares them.
    fn activate(&mut self, profile: &Profile, base_inner: &mut HashSet<usize>) {
        for p in profile.edges().inner_points() {
            base_inner.insert(p);
            if !self.waiting.iter().any(|w| w.edges().contains_inner(p)) {
                self.marks[p] = Mark::Visited;
            }
        }
    }

    fn swept_points(&self) -> usize {
        self.marks.iter().filter(|&&m| m != Mark::NonVisited).count()
    }

    fn finish(mut self, complete: bool) -> Result<NetworkExtraction, MeshError> {
        remove_degenerate_bifurcations(&mut self.segments, &mut self.bifurcations);
        let opts = self.opts;
        let network = graph::network_mesh(
            &self.segments,
            &opts.radius_array_name,
            &opts.topology_array_name,
        )?;
        let graph = graph::graph_mesh(
            &self.segments,
            &opts.radius_array_name,
            &opts.topology_array_name,
        )?;
        let model = graph::marked_model(self.mesh, &self.marks, &opts.marks_array_name)?;
        log::debug!(
            "extracted {} segments and {} bifurcations",
            self.segments.len(),
            self.bifurcations.len()
        );
        Ok(NetworkExtraction {
            network,
            graph,
            model,
            swept_points: self.swept_points(),
            segments: self.segments,
            bifurcations: self.bifurcations,
            complete,
        })
    }
}

fn mean_radius(profiles: &[Profile]) -> f64 {
    if profiles.is_empty() {
        return 0.0;
    }
    profiles.iter().map(Profile::mean_radius).sum::<f64>() / profiles.len() as f64
}

#[cfg(test)]
mod thread_safety {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(NetworkExtraction: Send, Sync, Clone);
    assert_impl_all!(Profile: Send, Sync);
    assert_impl_all!(Mesh: Send, Sync);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::meshgen::{bifurcating_tube, cylinder_shell, sphere_shell, BifurcatingTubeOpts};

    #[test]
    fn cylinder_is_one_rooted_segment() {
        let tube = cylinder_shell(1.0, 6.0, 16, 12).unwrap();
        let out = extract_network(&tube, &NetworkExtractionOpts::default()).unwrap();
        assert!(out.complete);
        assert_eq!(out.segments.len(), 1);
        assert_eq!(out.bifurcations.len(), 1);
        assert_eq!(out.segments[0].topology().as_pair(), [0, -1]);
        assert_eq!(out.swept_points, tube.number_of_points());
    }

    #[test]
    fn y_tube_has_one_junction() {
        let tube = bifurcating_tube(&BifurcatingTubeOpts::default()).unwrap();
        let out = extract_network(&tube, &NetworkExtractionOpts::default()).unwrap();
        assert!(out.complete);
        assert_eq!(out.segments.len(), 3);
        assert_eq!(out.bifurcations.len(), 2);
        assert_eq!(bifurcation_degrees(&out.segments, 2)[1], 3);
        assert_eq!(out.graph.number_of_cells(), 3);
        assert_eq!(out.graph.number_of_points(), 4);
    }

    #[test]
    fn closed_surface_gives_empty_incomplete_result() {
        let ball = sphere_shell(1.0, 6, 8).unwrap();
        let out = extract_network(&ball, &NetworkExtractionOpts::default()).unwrap();
        assert!(!out.complete);
        assert!(out.segments.is_empty());
        assert_eq!(out.network.number_of_cells(), 0);
        assert_eq!(out.swept_points, 0);
    }

    #[test]
    fn bad_ratio_is_rejected() {
        let tube = cylinder_shell(1.0, 2.0, 8, 2).unwrap();
        let opts = NetworkExtractionOpts {
            advancement_ratio: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            extract_network(&tube, &opts),
            Err(MeshError::InvalidOption(_))
        ));
    }
}
