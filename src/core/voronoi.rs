//! Voronoi partition of the plot rectangle around hit-test seeds.
//!
//! Each cell is the intersection of the plot rectangle with the half-planes
//! closer to its seed than to every other seed. Cells are built by clipping
//! the rectangle against perpendicular bisectors, visiting neighbours in
//! order of horizontal distance and stopping once no remaining neighbour can
//! reach the cell. The index is immutable: a redraw builds a new one.

use std::collections::HashSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{PixelPoint, PlotSize, SamplePoint};

type Polygon = SmallVec<[PixelPoint; 8]>;

const CONTAINS_EPSILON: f64 = 1e-9;

/// Convex hit region owned by exactly one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiCell {
    pub sample_index: usize,
    pub polygon: Vec<PixelPoint>,
    min: PixelPoint,
    max: PixelPoint,
}

impl VoronoiCell {
    fn new(sample_index: usize, polygon: Vec<PixelPoint>) -> Self {
        let mut min = PixelPoint::new(f64::INFINITY, f64::INFINITY);
        let mut max = PixelPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for vertex in &polygon {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
        }
        Self {
            sample_index,
            polygon,
            min,
            max,
        }
    }

    /// Boundary-inclusive point test.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        if point.x < self.min.x - CONTAINS_EPSILON
            || point.x > self.max.x + CONTAINS_EPSILON
            || point.y < self.min.y - CONTAINS_EPSILON
            || point.y > self.max.y + CONTAINS_EPSILON
        {
            return false;
        }

        let mut sign = 0.0f64;
        let n = self.polygon.len();
        for idx in 0..n {
            let a = self.polygon[idx];
            let b = self.polygon[(idx + 1) % n];
            let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
            if cross.abs() <= CONTAINS_EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.polygon.len();
        let twice: f64 = (0..n)
            .map(|idx| {
                let a = self.polygon[idx];
                let b = self.polygon[(idx + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Path data in `M x,y L x,y .. Z` form.
    #[must_use]
    pub fn path_data(&self) -> String {
        let body = self
            .polygon
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join("L");
        format!("M{body}Z")
    }
}

/// Nearest-seed lookup over a tessellated plot rectangle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialIndex {
    extent: Option<PlotSize>,
    cells: Vec<VoronoiCell>,
    cell_by_sample: Vec<Option<usize>>,
}

impl SpatialIndex {
    /// Tessellates `[[0,0],[width,height]]` around the sample positions.
    #[must_use]
    pub fn build(samples: &[SamplePoint], extent: PlotSize) -> Self {
        let seeds: Vec<PixelPoint> = samples.iter().map(|s| s.position).collect();
        Self::from_seeds(&seeds, extent)
    }

    /// Same as [`SpatialIndex::build`] over bare positions.
    ///
    /// Non-finite seeds get no cell. Of several exactly coincident seeds only
    /// the first gets a cell.
    #[must_use]
    pub fn from_seeds(seeds: &[PixelPoint], extent: PlotSize) -> Self {
        let mut cell_by_sample = vec![None; seeds.len()];
        if !(extent.width > 0.0 && extent.height > 0.0) {
            debug!(
                width = extent.width,
                height = extent.height,
                "empty plot extent, skipping tessellation"
            );
            return Self {
                extent: Some(extent),
                cells: Vec::new(),
                cell_by_sample,
            };
        }

        let mut seen: HashSet<(OrderedFloat<f64>, OrderedFloat<f64>)> = HashSet::new();
        let mut skipped_non_finite = 0usize;
        let mut unique = Vec::with_capacity(seeds.len());
        for (idx, seed) in seeds.iter().enumerate() {
            if !seed.is_finite() {
                skipped_non_finite += 1;
            } else if seen.insert((OrderedFloat(seed.x), OrderedFloat(seed.y))) {
                unique.push(idx);
            }
        }
        if skipped_non_finite > 0 {
            warn!(
                skipped = skipped_non_finite,
                "non-finite samples excluded from tessellation"
            );
        }

        unique.sort_by(|a, b| seeds[*a].x.total_cmp(&seeds[*b].x));

        let mut cells = Vec::with_capacity(unique.len());
        for rank in 0..unique.len() {
            let polygon = clip_cell(seeds, &unique, rank, extent);
            if polygon.len() >= 3 {
                cells.push(VoronoiCell::new(unique[rank], polygon.into_vec()));
            }
        }
        cells.sort_by_key(|cell| cell.sample_index);
        for (pos, cell) in cells.iter().enumerate() {
            cell_by_sample[cell.sample_index] = Some(pos);
        }

        debug!(
            seeds = seeds.len(),
            cells = cells.len(),
            "built voronoi tessellation"
        );
        Self {
            extent: Some(extent),
            cells,
            cell_by_sample,
        }
    }

    #[must_use]
    pub fn extent(&self) -> Option<PlotSize> {
        self.extent
    }

    /// Cells ordered by sample index.
    #[must_use]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn cell_for_sample(&self, sample_index: usize) -> Option<&VoronoiCell> {
        let pos = (*self.cell_by_sample.get(sample_index)?)?;
        self.cells.get(pos)
    }

    /// Sample index of the cell containing `point`, if it lies in the plot.
    #[must_use]
    pub fn locate(&self, point: PixelPoint) -> Option<usize> {
        let extent = self.extent?;
        if !point.is_finite() || !extent.contains(point) {
            return None;
        }
        self.cells
            .iter()
            .find(|cell| cell.contains(point))
            .map(|cell| cell.sample_index)
    }
}

fn clip_cell(seeds: &[PixelPoint], order: &[usize], rank: usize, extent: PlotSize) -> Polygon {
    let site = seeds[order[rank]];
    let mut polygon: Polygon = SmallVec::from_slice(&[
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(extent.width, 0.0),
        PixelPoint::new(extent.width, extent.height),
        PixelPoint::new(0.0, extent.height),
    ]);

    let mut left = rank.checked_sub(1);
    let mut right = (rank + 1 < order.len()).then_some(rank + 1);
    loop {
        let from_left = left.map(|i| (i, site.x - seeds[order[i]].x));
        let from_right = right.map(|i| (i, seeds[order[i]].x - site.x));
        let (pos, dx, is_left) = match (from_left, from_right) {
            (Some((i, l)), Some((_, r))) if l <= r => (i, l, true),
            (Some((i, l)), None) => (i, l, true),
            (_, Some((i, r))) => (i, r, false),
            (None, None) => break,
        };

        let reach_sq = polygon
            .iter()
            .map(|v| v.distance_squared(site))
            .fold(0.0, f64::max);
        if dx * dx > 4.0 * reach_sq {
            break;
        }

        if is_left {
            left = pos.checked_sub(1);
        } else {
            right = Some(pos + 1).filter(|i| *i < order.len());
        }

        polygon = clip_half_plane(&polygon, site, seeds[order[pos]]);
        if polygon.len() < 3 {
            break;
        }
    }
    polygon
}

/// Keeps the part of `polygon` at least as close to `site` as to `other`.
fn clip_half_plane(polygon: &Polygon, site: PixelPoint, other: PixelPoint) -> Polygon {
    let mid = site.lerp(other, 0.5);
    let normal = PixelPoint::new(other.x - site.x, other.y - site.y);
    let side = |v: PixelPoint| (v.x - mid.x) * normal.x + (v.y - mid.y) * normal.y;

    let mut clipped = Polygon::new();
    let n = polygon.len();
    for idx in 0..n {
        let a = polygon[idx];
        let b = polygon[(idx + 1) % n];
        let (fa, fb) = (side(a), side(b));
        if fa <= 0.0 {
            clipped.push(a);
        }
        if (fa < 0.0 && fb > 0.0) || (fa > 0.0 && fb < 0.0) {
            clipped.push(a.lerp(b, fa / (fa - fb)));
        }
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::SpatialIndex;
    use crate::core::{PixelPoint, PlotSize};
    use approx::assert_relative_eq;

    fn nearest(seeds: &[PixelPoint], p: PixelPoint) -> usize {
        let mut best = 0;
        for (idx, seed) in seeds.iter().enumerate() {
            if seed.distance_squared(p) < seeds[best].distance_squared(p) {
                best = idx;
            }
        }
        best
    }

    #[test]
    fn two_seeds_split_the_rectangle_in_half() {
        let seeds = [PixelPoint::new(25.0, 50.0), PixelPoint::new(75.0, 50.0)];
        let index = SpatialIndex::from_seeds(&seeds, PlotSize::new(100.0, 100.0));
        assert_eq!(index.len(), 2);
        assert_relative_eq!(index.cells()[0].area(), 5_000.0);
        assert_relative_eq!(index.cells()[1].area(), 5_000.0);
        assert_eq!(index.locate(PixelPoint::new(10.0, 90.0)), Some(0));
        assert_eq!(index.locate(PixelPoint::new(90.0, 10.0)), Some(1));
    }

    #[test]
    fn cells_tile_the_plot() {
        let seeds: Vec<PixelPoint> = (0..40)
            .map(|i| {
                let t = i as f64;
                PixelPoint::new((t * 37.0) % 300.0, (t * t * 13.0) % 200.0)
            })
            .collect();
        let index = SpatialIndex::from_seeds(&seeds, PlotSize::new(300.0, 200.0));
        let total: f64 = index.cells().iter().map(|c| c.area()).sum();
        assert_relative_eq!(total, 60_000.0, max_relative = 1e-9);

        for gx in 0..30 {
            for gy in 0..20 {
                let p = PixelPoint::new(gx as f64 * 10.0 + 3.3, gy as f64 * 10.0 + 4.7);
                let hit = index.locate(p).expect("every plot pixel is covered");
                let expected = nearest(&seeds, p);
                assert_relative_eq!(
                    seeds[hit].distance(p),
                    seeds[expected].distance(p),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn coincident_and_non_finite_seeds_get_no_cell() {
        let seeds = [
            PixelPoint::new(10.0, 10.0),
            PixelPoint::new(10.0, 10.0),
            PixelPoint::new(f64::NAN, 3.0),
            PixelPoint::new(80.0, 80.0),
        ];
        let index = SpatialIndex::from_seeds(&seeds, PlotSize::new(100.0, 100.0));
        assert_eq!(index.len(), 2);
        assert!(index.cell_for_sample(0).is_some());
        assert!(index.cell_for_sample(1).is_none());
        assert!(index.cell_for_sample(2).is_none());
        assert_eq!(index.cell_for_sample(3).map(|c| c.sample_index), Some(3));
    }

    #[test]
    fn points_outside_the_plot_are_not_located() {
        let index =
            SpatialIndex::from_seeds(&[PixelPoint::new(5.0, 5.0)], PlotSize::new(10.0, 10.0));
        assert_eq!(index.locate(PixelPoint::new(5.0, 5.0)), Some(0));
        assert_eq!(index.locate(PixelPoint::new(-1.0, 5.0)), None);
        assert_eq!(index.locate(PixelPoint::new(5.0, 11.0)), None);
    }

    #[test]
    fn degenerate_extent_builds_nothing() {
        let index =
            SpatialIndex::from_seeds(&[PixelPoint::new(5.0, 5.0)], PlotSize::new(0.0, 10.0));
        assert!(index.is_empty());
    }

    #[test]
    fn path_data_closes_the_polygon() {
        let index =
            SpatialIndex::from_seeds(&[PixelPoint::new(5.0, 5.0)], PlotSize::new(10.0, 20.0));
        assert_eq!(index.cells()[0].path_data(), "M0,0L10,0L10,20L0,20Z");
    }
}
