//! Diagram geometry: vertical packing for the flow diagram, polar placement
//! for the radar. Pure functions returning coordinates; rendering lives in
//! the output layer.

use crate::visualization::radar::RadarData;
use crate::visualization::sankey::{SankeyData, SankeyNode, SankeyNodeGroup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Flow diagram canvas parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub node_width: f64,
    pub node_padding: f64,
    pub min_node_height: f64,
    /// Horizontal inset of the outer columns
    pub column_inset: f64,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 420.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            node_width: 170.0,
            node_padding: 12.0,
            min_node_height: 12.0,
            column_inset: 24.0,
        }
    }
}

/// Radar canvas parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarLayout {
    pub size: f64,
    pub radius: f64,
    pub rings: usize,
    pub label_offset: f64,
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            size: 420.0,
            radius: 150.0,
            rings: 5,
            label_offset: 18.0,
        }
    }
}

/// Vertical extent of one packed node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub y: f64,
    pub height: f64,
}

/// Stack values top to bottom with heights proportional to value.
///
/// Heights are first scaled to fill the available space and floored at
/// `min_height`; if the floor pushes the total past the available space,
/// all heights shrink uniformly so the column still fits. Nodes never
/// overlap; proportionality gives way when the column is crowded.
pub fn pack_column(values: &[f64], height: f64, margin_top: f64, margin_bottom: f64, padding: f64, min_height: f64) -> Vec<Span> {
    if values.is_empty() {
        return Vec::new();
    }

    let gaps = padding * (values.len() - 1) as f64;
    let available = (height - margin_top - margin_bottom - gaps).max(0.0);
    let total: f64 = values.iter().sum();
    let scale = if total > 0.0 { available / total } else { 0.0 };

    let raw: Vec<f64> = values.iter().map(|v| (v * scale).max(min_height)).collect();
    let raw_total: f64 = raw.iter().sum();
    let shrink = if raw_total > available && raw_total > 0.0 {
        available / raw_total
    } else {
        1.0
    };

    let mut y = margin_top;
    raw.into_iter()
        .map(|h| {
            let span = Span { y, height: h * shrink };
            y += span.height + padding;
            span
        })
        .collect()
}

/// A flow node with its rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub node: SankeyNode,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedNode {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A link as a cubic Bézier between two node edges.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    pub stroke_width: f64,
}

impl LinkPath {
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            self.start.x, self.start.y, self.control1.x, self.control1.y, self.control2.x, self.control2.y, self.end.x, self.end.y
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowDiagram {
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<LinkPath>,
}

impl FlowLayout {
    fn column_x(&self, group: SankeyNodeGroup) -> f64 {
        match group {
            SankeyNodeGroup::Resume => self.column_inset,
            SankeyNodeGroup::Capability => self.width / 2.0 - self.node_width / 2.0,
            SankeyNodeGroup::Job => self.width - self.node_width - self.column_inset,
        }
    }

    /// Place every node in its column, largest first, and route the links.
    pub fn layout(&self, data: &SankeyData) -> FlowDiagram {
        let mut nodes = Vec::with_capacity(data.nodes.len());

        for group in SankeyNodeGroup::COLUMNS {
            let mut column: Vec<&SankeyNode> = data.nodes_in(group).collect();
            column.sort_by(|a, b| b.value.cmp(&a.value));

            let values: Vec<f64> = column.iter().map(|n| n.value as f64).collect();
            let spans = pack_column(
                &values,
                self.height,
                self.margin_top,
                self.margin_bottom,
                self.node_padding,
                self.min_node_height,
            );

            let x = self.column_x(group);
            nodes.extend(column.into_iter().zip(spans).map(|(node, span)| PositionedNode {
                node: node.clone(),
                x,
                y: span.y,
                width: self.node_width,
                height: span.height,
            }));
        }

        let by_id: HashMap<&str, &PositionedNode> = nodes.iter().map(|p| (p.node.id.as_str(), p)).collect();
        let links = data
            .links
            .iter()
            .filter_map(|link| {
                let source = by_id.get(link.source.as_str())?;
                let target = by_id.get(link.target.as_str())?;
                Some(Self::route(source, target, link.value))
            })
            .collect();

        FlowDiagram { nodes, links }
    }

    fn route(source: &PositionedNode, target: &PositionedNode, weight: usize) -> LinkPath {
        let sx = source.x + source.width;
        let sy = source.y + source.height / 2.0;
        let tx = target.x;
        let ty = target.y + target.height / 2.0;
        LinkPath {
            start: Point { x: sx, y: sy },
            control1: Point { x: sx + (tx - sx) * 0.4, y: sy },
            control2: Point { x: sx + (tx - sx) * 0.6, y: ty },
            end: Point { x: tx, y: ty },
            stroke_width: (weight as f64 * 2.0).max(1.0),
        }
    }
}

/// Angle of axis `index` of `axes`, starting at the top and running clockwise.
pub fn axis_angle(index: usize, axes: usize) -> f64 {
    if axes == 0 {
        return -PI / 2.0;
    }
    -PI / 2.0 + 2.0 * PI * index as f64 / axes as f64
}

/// Point at `distance` from `center` along the given axis.
pub fn polar_point(center: Point, distance: f64, index: usize, axes: usize) -> Point {
    let angle = axis_angle(index, axes);
    Point {
        x: center.x + distance * angle.cos(),
        y: center.y + distance * angle.sin(),
    }
}

/// Closed SVG path through `points`.
pub fn polygon_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut path: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {:.2} {:.2}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect();
    path.push("Z".to_string());
    path.join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub label: String,
    pub end: Point,
    pub label_at: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarDiagram {
    pub center: Point,
    pub axes: Vec<RadarAxis>,
    pub rings: Vec<f64>,
    pub resume_polygon: Vec<Point>,
    pub job_polygon: Vec<Point>,
}

impl RadarLayout {
    pub fn center(&self) -> Point {
        Point {
            x: self.size / 2.0,
            y: self.size / 2.0,
        }
    }

    /// Vertices for a 0-100 value series, one per axis.
    pub fn polygon(&self, values: &[u32]) -> Vec<Point> {
        let center = self.center();
        let axes = values.len();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| polar_point(center, (*v as f64 / 100.0) * self.radius, i, axes))
            .collect()
    }

    pub fn layout(&self, data: &RadarData) -> RadarDiagram {
        let center = self.center();
        let count = data.axis_count();

        let axes = data
            .categories
            .iter()
            .enumerate()
            .map(|(i, label)| RadarAxis {
                label: label.clone(),
                end: polar_point(center, self.radius, i, count),
                label_at: polar_point(center, self.radius + self.label_offset, i, count),
            })
            .collect();

        let rings = (1..=self.rings)
            .map(|step| step as f64 / self.rings as f64 * self.radius)
            .collect();

        RadarDiagram {
            center,
            axes,
            rings,
            resume_polygon: self.polygon(&data.resume),
            job_polygon: self.polygon(&data.job),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dictionary::CapabilityDictionary;
    use crate::visualization::sankey::build_sankey;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_pack_column_proportional() {
        // available = 420 - 20 - 20 - 12 = 368
        let spans = pack_column(&[3.0, 1.0], 420.0, 20.0, 20.0, 12.0, 12.0);
        assert!((spans[0].height - 276.0).abs() < EPS);
        assert!((spans[1].height - 92.0).abs() < EPS);
        assert!((spans[0].y - 20.0).abs() < EPS);
        assert!((spans[1].y - (20.0 + 276.0 + 12.0)).abs() < EPS);
    }

    #[test]
    fn test_pack_column_applies_floor() {
        let spans = pack_column(&[100.0, 1.0], 420.0, 20.0, 20.0, 12.0, 12.0);
        let proportional = 368.0 / 101.0;
        assert!(spans[1].height > proportional * 2.0);

        // floor pushed the column over, so it was shrunk back to fit exactly
        let used: f64 = spans.iter().map(|s| s.height).sum();
        assert!((used - 368.0).abs() < 1e-6);
    }

    #[test]
    fn test_pack_column_shrinks_crowded_column() {
        let values = vec![1.0; 30];
        let spans = pack_column(&values, 420.0, 20.0, 20.0, 12.0, 12.0);
        let available = 420.0 - 40.0 - 12.0 * 29.0;
        let used: f64 = spans.iter().map(|s| s.height).sum();
        assert!(used <= available + EPS);

        for pair in spans.windows(2) {
            assert!(pair[0].y + pair[0].height <= pair[1].y + EPS);
        }
        let last = spans.last().unwrap();
        assert!(last.y + last.height <= 420.0 - 20.0 + EPS);
    }

    #[test]
    fn test_pack_column_empty_and_zero() {
        assert!(pack_column(&[], 420.0, 20.0, 20.0, 12.0, 12.0).is_empty());
        let spans = pack_column(&[0.0, 0.0], 420.0, 20.0, 20.0, 12.0, 12.0);
        assert!(spans.iter().all(|s| (s.height - 12.0).abs() < EPS));
    }

    #[test]
    fn test_flow_layout_columns_and_links() {
        let data = build_sankey(
            CapabilityDictionary::global(),
            &["PYTHON".to_string(), "AZURE".to_string()],
            &["AWS".to_string(), "GRAFANA".to_string()],
        );
        let layout = FlowLayout::default();
        let diagram = layout.layout(&data);

        assert_eq!(diagram.nodes.len(), data.nodes.len());
        assert_eq!(diagram.links.len(), data.links.len());

        for node in &diagram.nodes {
            let expected_x = match node.node.group {
                SankeyNodeGroup::Resume => 24.0,
                SankeyNodeGroup::Capability => 365.0,
                SankeyNodeGroup::Job => 706.0,
            };
            assert!((node.x - expected_x).abs() < EPS);
        }

        let first_capability = diagram
            .nodes
            .iter()
            .find(|n| n.node.group == SankeyNodeGroup::Capability)
            .unwrap();
        let max_capability = data.nodes_in(SankeyNodeGroup::Capability).map(|n| n.value).max().unwrap();
        assert_eq!(first_capability.node.value, max_capability);

        for link in &diagram.links {
            assert!(link.start.x < link.end.x);
            assert!(link.stroke_width >= 1.0);
        }
    }

    #[test]
    fn test_axis_angles_start_at_top_clockwise() {
        let center = Point { x: 0.0, y: 0.0 };
        let top = polar_point(center, 10.0, 0, 4);
        assert!(top.x.abs() < EPS && (top.y + 10.0).abs() < EPS);
        let right = polar_point(center, 10.0, 1, 4);
        assert!((right.x - 10.0).abs() < EPS && right.y.abs() < EPS);
    }

    #[test]
    fn test_radar_layout() {
        let data = RadarData {
            categories: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            resume: vec![100, 50, 0, 100],
            job: vec![0, 100, 100, 100],
        };
        let layout = RadarLayout::default();
        let diagram = layout.layout(&data);

        assert_eq!(diagram.axes.len(), 4);
        assert_eq!(diagram.rings.len(), 5);
        assert!((diagram.rings[4] - 150.0).abs() < EPS);

        // first vertex sits straight above the centre at full radius
        let v0 = diagram.resume_polygon[0];
        assert!((v0.x - 210.0).abs() < EPS);
        assert!((v0.y - 60.0).abs() < EPS);

        // value 50 on the right-hand axis
        let v1 = diagram.resume_polygon[1];
        assert!((v1.x - 285.0).abs() < EPS);

        // zero collapses to the centre
        let v2 = diagram.resume_polygon[2];
        assert!((v2.x - 210.0).abs() < EPS && (v2.y - 210.0).abs() < EPS);
    }

    #[test]
    fn test_polygon_path_closes() {
        let path = polygon_path(&[Point { x: 0.0, y: 0.0 }, Point { x: 1.0, y: 2.0 }]);
        assert_eq!(path, "M 0.00 0.00 L 1.00 2.00 Z");
        assert_eq!(polygon_path(&[]), "");
    }
}
