use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{GossipError, GossipResult};
use crate::graph::model::Graph;

const MAX_OVERLAP_SWEEPS: usize = 500;
const OVERLAP_SLACK: f64 = 1e-3;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Layout tuning. Distances are in output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOpts {
    /// Radius of every node marker.
    pub node_radius: f64,
    /// Minimum gap between two node markers.
    pub separation: f64,
    /// Rest length of an edge in the force simulation.
    pub edge_length: f64,
    /// Force simulation steps.
    pub iterations: u32,
    /// Pull toward the centroid; keeps disconnected components together.
    pub gravity: f64,
    /// Empty border around the drawing.
    pub margin: f64,
    /// Upper bound for either canvas side.
    pub max_side: u32,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            node_radius: 7.0,
            separation: 10.0,
            edge_length: 40.0,
            iterations: 300,
            gravity: 0.05,
            margin: 12.0,
            max_side: 2048,
        }
    }
}

impl LayoutOpts {
    /// Check that every distance is finite and in range.
    pub fn validate(&self) -> GossipResult<()> {
        let positive = [("node_radius", self.node_radius), ("edge_length", self.edge_length)];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(GossipError::render(format!("{name} must be > 0, got {v}")));
            }
        }
        let non_negative = [
            ("separation", self.separation),
            ("gravity", self.gravity),
            ("margin", self.margin),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(GossipError::render(format!("{name} must be >= 0, got {v}")));
            }
        }
        let min_side = 2.0 * (self.node_radius + self.margin);
        if f64::from(self.max_side) < min_side {
            return Err(GossipError::render(format!(
                "max_side {} cannot fit a single node ({min_side} px)",
                self.max_side
            )));
        }
        Ok(())
    }

    /// Smallest allowed distance between two node centers.
    pub fn min_center_distance(&self) -> f64 {
        2.0 * self.node_radius + self.separation
    }
}

/// Source of node positions.
///
/// Implementations return one position per node, in node order, in any coordinate frame; the
/// caller translates and scales the result onto the canvas.
pub trait LayoutProvider {
    /// Compute positions for every node of `graph`.
    fn compute_positions(&self, graph: &Graph) -> GossipResult<Vec<Point>>;
}

/// Deterministic force-directed layout with overlap removal.
///
/// Seeds nodes on a phyllotaxis spiral, runs a Fruchterman-Reingold style simulation with linear
/// cooling, then pushes apart any pair closer than [`LayoutOpts::min_center_distance`].
#[derive(Clone, Debug, Default)]
pub struct ForceLayout {
    opts: LayoutOpts,
}

impl ForceLayout {
    /// Layout with the given options.
    pub fn new(opts: LayoutOpts) -> Self {
        Self { opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &LayoutOpts {
        &self.opts
    }
}

impl LayoutProvider for ForceLayout {
    #[tracing::instrument(skip_all, fields(nodes = graph.node_count()))]
    fn compute_positions(&self, graph: &Graph) -> GossipResult<Vec<Point>> {
        self.opts.validate()?;

        let n = graph.node_count();
        let k = self.opts.edge_length;
        let mut pos: Vec<Vec2> = (0..n).map(|i| seed_position(i, k)).collect();

        if n > 1 {
            simulate(&mut pos, &graph.drawn_edges(), &self.opts);
        }
        let sweeps = remove_overlaps(&mut pos, self.opts.min_center_distance());
        if sweeps == MAX_OVERLAP_SWEEPS {
            tracing::warn!(sweeps, "overlap removal did not settle");
        }

        if pos.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GossipError::render("force layout produced a non-finite position"));
        }
        Ok(pos.into_iter().map(Vec2::to_point).collect())
    }
}

fn seed_position(i: usize, k: f64) -> Vec2 {
    let r = k * 0.5 * ((i as f64) + 0.5).sqrt();
    let theta = (i as f64) * GOLDEN_ANGLE;
    Vec2::from_angle(theta) * r
}

// Stable push direction for coincident points.
fn tie_break(i: usize, j: usize) -> Vec2 {
    Vec2::from_angle((i * 31 + j * 17) as f64)
}

fn simulate(pos: &mut [Vec2], edges: &[(usize, usize)], opts: &LayoutOpts) {
    let n = pos.len();
    let k = opts.edge_length;
    let steps = opts.iterations.max(1);
    let mut temp = k * (n as f64).sqrt();
    let cool = temp / (f64::from(steps) + 1.0);
    let mut disp = vec![Vec2::ZERO; n];

    for _ in 0..steps {
        disp.fill(Vec2::ZERO);

        for i in 0..n {
            for j in (i + 1)..n {
                let mut d = pos[i] - pos[j];
                let mut dist = d.hypot();
                if dist < 1e-9 {
                    d = tie_break(i, j) * 1e-3;
                    dist = d.hypot();
                }
                let push = d * (k * k / (dist * dist));
                disp[i] += push;
                disp[j] -= push;
            }
        }

        for &(a, b) in edges {
            let d = pos[a] - pos[b];
            let dist = d.hypot();
            if dist < 1e-9 {
                continue;
            }
            let pull = d * (dist / k);
            disp[a] -= pull;
            disp[b] += pull;
        }

        let centroid = pos.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / (n as f64);
        for (d, p) in disp.iter_mut().zip(pos.iter()) {
            *d -= (*p - centroid) * opts.gravity;
        }

        for (p, d) in pos.iter_mut().zip(disp.iter()) {
            let len = d.hypot();
            if len > 0.0 {
                *p += *d * (len.min(temp) / len);
            }
        }
        temp -= cool;
    }
}

/// Returns the number of sweeps performed.
fn remove_overlaps(pos: &mut [Vec2], min_dist: f64) -> usize {
    let n = pos.len();
    for sweep in 0..MAX_OVERLAP_SWEEPS {
        let mut moved = false;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = pos[j] - pos[i];
                let dist = d.hypot();
                if dist >= min_dist {
                    continue;
                }
                let dir = if dist < 1e-9 {
                    tie_break(i, j)
                } else {
                    d / dist
                };
                let shift = dir * ((min_dist - dist) * 0.5 + OVERLAP_SLACK);
                pos[i] -= shift;
                pos[j] += shift;
                moved = true;
            }
        }
        if !moved {
            return sweep;
        }
    }
    MAX_OVERLAP_SWEEPS
}

#[cfg(test)]
#[path = "../../tests/unit/layout/force.rs"]
mod tests;
