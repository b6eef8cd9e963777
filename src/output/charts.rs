//! SVG rendering of the flow and radar diagrams

use crate::config::LayoutConfig;
use crate::processing::analyzer::AnalysisReport;
use crate::visualization::layout::{polygon_path, FlowDiagram, FlowLayout, RadarDiagram, RadarLayout};
use crate::visualization::sankey::SankeyNodeGroup;
use std::fmt::Write;

const RESUME_COLOR: &str = "#2563eb";
const CAPABILITY_COLOR: &str = "#7c3aed";
const JOB_COLOR: &str = "#dc2626";

fn group_color(group: SankeyNodeGroup) -> &'static str {
    match group {
        SankeyNodeGroup::Resume => RESUME_COLOR,
        SankeyNodeGroup::Capability => CAPABILITY_COLOR,
        SankeyNodeGroup::Job => JOB_COLOR,
    }
}

/// Escape text for use inside SVG/XML content and attributes.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn flow_svg(diagram: &FlowDiagram, layout: &FlowLayout) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" class="flow">"#,
        w = layout.width,
        h = layout.height
    );

    for link in &diagram.links {
        let _ = write!(
            svg,
            r##"<path d="{}" fill="none" stroke="#94a3b8" stroke-opacity="0.45" stroke-width="{:.1}"/>"##,
            link.to_svg_path(),
            link.stroke_width
        );
    }

    for node in &diagram.nodes {
        let color = group_color(node.node.group);
        let center = node.center();
        let _ = write!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="3" fill="{}" fill-opacity="0.85"/>"#,
            node.x, node.y, node.width, node.height, color
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="11" fill="{}" text-anchor="middle" dominant-baseline="middle">{} ({})</text>"#,
            center.x,
            center.y,
            if node.height >= 14.0 { "#ffffff" } else { color },
            escape_xml(&node.node.label),
            node.node.value
        );
    }

    svg.push_str("</svg>");
    svg
}

pub fn radar_svg(diagram: &RadarDiagram, layout: &RadarLayout) -> String {
    let mut svg = String::new();
    let center = diagram.center;
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}" class="radar">"#,
        s = layout.size
    );

    for radius in &diagram.rings {
        let _ = write!(
            svg,
            r##"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="#e2e8f0"/>"##,
            center.x, center.y, radius
        );
    }

    for axis in &diagram.axes {
        let _ = write!(
            svg,
            r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#cbd5e1"/>"##,
            center.x, center.y, axis.end.x, axis.end.y
        );
        let anchor = if (axis.label_at.x - center.x).abs() < 1.0 {
            "middle"
        } else if axis.label_at.x > center.x {
            "start"
        } else {
            "end"
        };
        let _ = write!(
            svg,
            r##"<text x="{:.2}" y="{:.2}" font-size="11" fill="#334155" text-anchor="{}" dominant-baseline="middle">{}</text>"##,
            axis.label_at.x,
            axis.label_at.y,
            anchor,
            escape_xml(&axis.label)
        );
    }

    // job underneath so the resume outline stays visible
    let _ = write!(
        svg,
        r#"<path d="{}" fill="{c}" fill-opacity="0.2" stroke="{c}" stroke-width="2"/>"#,
        polygon_path(&diagram.job_polygon),
        c = JOB_COLOR
    );
    let _ = write!(
        svg,
        r#"<path d="{}" fill="{c}" fill-opacity="0.3" stroke="{c}" stroke-width="2"/>"#,
        polygon_path(&diagram.resume_polygon),
        c = RESUME_COLOR
    );

    svg.push_str("</svg>");
    svg
}

/// Lay out and render both diagrams for a report.
pub fn render_charts(report: &AnalysisReport, layout: &LayoutConfig) -> (String, String) {
    let flow = layout.flow.layout(&report.sankey);
    let radar = layout.radar.layout(&report.radar);
    (flow_svg(&flow, &layout.flow), radar_svg(&radar, &layout.radar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::analyze;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A&B <C#>"), "A&amp;B &lt;C#&gt;");
    }

    #[test]
    fn test_charts_contain_every_element() {
        let report = analyze("Python, AWS, Kubernetes, Grafana", "Python, Azure, Docker").unwrap();
        let (flow, radar) = render_charts(&report, &LayoutConfig::default());

        assert!(flow.starts_with("<svg") && flow.ends_with("</svg>"));
        assert_eq!(flow.matches("<rect").count(), report.sankey.nodes.len());
        assert_eq!(flow.matches("<path").count(), report.sankey.links.len());
        assert!(flow.contains("GRAFANA (1)"));

        assert_eq!(radar.matches("<circle").count(), 5);
        assert_eq!(radar.matches("<line").count(), 8);
        assert!(radar.contains("Distributed Exec"));
        assert_eq!(radar.matches(" Z\"").count(), 2);
    }
}
