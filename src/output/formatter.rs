//! Output formatters: console, JSON, Markdown and HTML renderings of a skill report

use crate::config::{LayoutConfig, OutputFormat};
use crate::error::{Result, SkillTopologyError};
use crate::output::charts::{escape_xml, render_charts};
use crate::output::report::{SkillReport, Verdict};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting skill reports
pub trait OutputFormatter {
    fn format_report(&self, report: &SkillReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colours and bar charts
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the analysis object
pub struct JsonFormatter {
    pretty: bool,
    include_metadata: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded SVG charts
pub struct HtmlFormatter {
    include_styles: bool,
    layout: LayoutConfig,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Skill Topology Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #1e293b;
            max-width: 980px;
            margin: 0 auto;
            padding: 20px;
            background: #f8fafc;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.08);
        }
        .scores {
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 15px;
            margin: 20px 0;
        }
        .score-item {
            background: #f1f5f9;
            padding: 15px;
            border-radius: 6px;
            text-align: center;
        }
        .score-item strong { font-size: 2em; display: block; }
        .verdict-strong { border-left: 4px solid #16a34a; }
        .verdict-inline { border-left: 4px solid #0284c7; }
        .verdict-overstated { border-left: 4px solid #dc2626; }
        .verdict { padding: 10px 15px; background: #f8fafc; margin: 15px 0; }
        .chart { overflow-x: auto; margin: 15px 0; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e2e8f0; }
        .tag {
            display: inline-block;
            background: #e2e8f0;
            border-radius: 12px;
            padding: 2px 10px;
            margin: 2px;
            font-size: 0.9em;
        }
        .risk { color: #b91c1c; }
        .metadata { color: #64748b; font-size: 0.85em; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Skill Topology Report</h1>

        <div class="scores">
            <div class="score-item"><span>Keyword match</span><strong>{{ keyword_match }}%</strong></div>
            <div class="score-item"><span>Capability match</span><strong>{{ capability_match }}%</strong></div>
            <div class="score-item"><span>Delta</span><strong>{{ delta }}</strong></div>
        </div>

        <div class="verdict {{ verdict_class }}">
            <strong>{{ verdict }}</strong>
            <p>{{ verdict_explanation }}</p>
        </div>

        <h2>Capability flow</h2>
        <div class="chart">{{ flow_svg | safe }}</div>

        <h2>Capability radar</h2>
        <div class="chart">{{ radar_svg | safe }}</div>

        <h2>Gaps by ATS priority</h2>
        {% if has_gaps %}
        <table>
            <tr><th>Technology</th><th>Occurrences</th><th>Capabilities</th><th>Score</th><th>Transferable experience</th></tr>
            {{ gap_rows_html | safe }}
        </table>
        {% else %}
        <p>No missing technologies.</p>
        {% endif %}

        {% if has_risk_flags %}
        <h2>Risk flags</h2>
        <ul class="risk">
            {{ risk_flags_html | safe }}
        </ul>
        {% endif %}

        <h2>Technologies</h2>
        <p><strong>Job:</strong> {{ job_techs_html | safe }}</p>
        <p><strong>Resume:</strong> {{ resume_techs_html | safe }}</p>

        <div class="metadata">
            <p>Generated by skill-topology v{{ version }} at {{ generated_at }}</p>
            <p><strong>Job:</strong> {{ job_source }} | <strong>Resume:</strong> {{ resume_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    keyword_match: u32,
    capability_match: u32,
    delta: String,
    verdict: String,
    verdict_class: String,
    verdict_explanation: String,
    flow_svg: String,
    radar_svg: String,
    has_gaps: bool,
    gap_rows_html: String,
    has_risk_flags: bool,
    risk_flags_html: String,
    job_techs_html: String,
    resume_techs_html: String,
    version: String,
    generated_at: String,
    job_source: String,
    resume_source: String,
}

fn format_timestamp(report: &SkillReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn signed(delta: i32) -> String {
    format!("{:+}", delta)
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn bar(&self, value: u32, color: Color) -> String {
        const WIDTH: u32 = 20;
        let filled = (value.min(100) * WIDTH / 100) as usize;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(WIDTH as usize - filled));
        self.colorize(&bar, color)
    }

    fn verdict_color(verdict: Verdict) -> Color {
        match verdict {
            Verdict::StrongCapabilityMatch => Color::Green,
            Verdict::InLineWithKeywords => Color::Cyan,
            Verdict::KeywordsOverstateFit => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &SkillReport) -> Result<String> {
        let analysis = &report.analysis;
        let score = &analysis.score;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 SKILL TOPOLOGY ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Job: {} | Resume: {}\n",
            report.metadata.job_source, report.metadata.resume_source
        ));

        output.push_str(&self.format_header("Scores", 2));
        output.push_str(&format!(
            "🔍 Keyword match:    {:>3}% {}\n",
            score.keyword_match,
            self.bar(score.keyword_match, Color::Yellow)
        ));
        output.push_str(&format!(
            "🧭 Capability match: {:>3}% {}\n",
            score.capability_match,
            self.bar(score.capability_match, Color::Blue)
        ));
        output.push_str(&format!("Δ  Delta:            {}\n", signed(score.delta)));
        let verdict = report.verdict();
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(verdict.headline(), Self::verdict_color(verdict))
        ));
        output.push_str(&format!("{}\n", verdict.explanation()));

        if !report.summary.covered_axes.is_empty() {
            let axes: Vec<&str> = report.summary.covered_axes.iter().map(|c| c.label()).collect();
            output.push_str(&format!("✅ Covered: {}\n", axes.join(", ")));
        }
        if !report.summary.short_axes.is_empty() {
            let axes: Vec<&str> = report.summary.short_axes.iter().map(|c| c.label()).collect();
            output.push_str(&format!("⚠️  Short on: {}\n", axes.join(", ")));
        }

        output.push_str(&self.format_header("Gaps by ATS priority", 2));
        if analysis.ats_priority.is_empty() {
            output.push_str("No missing technologies.\n");
        }
        for (index, gap) in analysis.ats_priority.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} (score {} = {} × {})\n",
                index + 1,
                self.colorize(&gap.tech, Color::Red),
                gap.score,
                gap.occurrences,
                gap.capability_weight
            ));
            if let Some(transfer) = analysis.transfer_map.get(&gap.tech) {
                if transfer.resume_techs.is_empty() {
                    output.push_str("   no transferable experience\n");
                } else {
                    output.push_str(&format!(
                        "   transfer from: {}\n",
                        self.colorize(&transfer.resume_techs.join(", "), Color::Green)
                    ));
                }
            }
        }

        if !analysis.risk_flags.is_empty() {
            output.push_str(&self.format_header("Risk flags", 2));
            for flag in &analysis.risk_flags {
                output.push_str(&format!("🚩 {}\n", flag));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Capability radar", 3));
            let radar = &analysis.radar;
            for (i, category) in radar.categories.iter().enumerate() {
                output.push_str(&format!(
                    "{:<18} resume {:>3}% {}  job {:>3}% {}\n",
                    category,
                    radar.resume[i],
                    self.bar(radar.resume[i], Color::Blue),
                    radar.job[i],
                    self.bar(radar.job[i], Color::Red)
                ));
            }

            output.push_str(&self.format_header("Technologies", 3));
            output.push_str(&format!("Job:    {}\n", score.job_techs.join(", ")));
            output.push_str(&format!("Resume: {}\n", score.resume_techs.join(", ")));
        }

        if let Some(id) = &report.metadata.result_id {
            output.push_str(&format!("\nℹ️  Result id: {}\n", id));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, include_metadata: bool) -> Self {
        Self { pretty, include_metadata }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &SkillReport) -> Result<String> {
        let value = if self.include_metadata {
            serde_json::to_value(report)?
        } else {
            serde_json::to_value(&report.analysis)?
        };
        if self.pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &SkillReport) -> Result<String> {
        let analysis = &report.analysis;
        let score = &analysis.score;
        let mut output = String::new();

        output.push_str("# 📊 Skill Topology Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Job:** `{}` | **Resume:** `{}`\n\n",
                format_timestamp(report),
                report.metadata.job_source,
                report.metadata.resume_source
            ));
        }

        output.push_str("## Scores\n\n");
        output.push_str("| Keyword match | Capability match | Delta |\n");
        output.push_str("|---:|---:|---:|\n");
        output.push_str(&format!(
            "| {}% | {}% | {} |\n\n",
            score.keyword_match,
            score.capability_match,
            signed(score.delta)
        ));
        output.push_str(&format!(
            "**{}.** {}\n\n",
            report.verdict().headline(),
            report.verdict().explanation()
        ));

        output.push_str("## Gaps by ATS priority\n\n");
        if analysis.ats_priority.is_empty() {
            output.push_str("No missing technologies.\n\n");
        } else {
            output.push_str("| # | Technology | Occurrences | Capabilities | Score | Transfer from |\n");
            output.push_str("|---|---|---:|---:|---:|---|\n");
            for (index, gap) in analysis.ats_priority.iter().enumerate() {
                let transfer = analysis
                    .transfer_map
                    .get(&gap.tech)
                    .filter(|t| !t.resume_techs.is_empty())
                    .map(|t| t.resume_techs.join(", "))
                    .unwrap_or_else(|| "–".to_string());
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    index + 1,
                    gap.tech,
                    gap.occurrences,
                    gap.capability_weight,
                    gap.score,
                    transfer
                ));
            }
            output.push('\n');
        }

        if !analysis.risk_flags.is_empty() {
            output.push_str("## 🚩 Risk flags\n\n");
            for flag in &analysis.risk_flags {
                output.push_str(&format!("- {}\n", flag));
            }
            output.push('\n');
        }

        output.push_str("## Capability radar\n\n");
        output.push_str("| Axis | Resume | Job |\n|---|---:|---:|\n");
        let radar = &analysis.radar;
        for (i, category) in radar.categories.iter().enumerate() {
            output.push_str(&format!("| {} | {} | {} |\n", category, radar.resume[i], radar.job[i]));
        }
        output.push('\n');

        output.push_str("## Technologies\n\n");
        output.push_str(&format!("- **Job:** {}\n", score.job_techs.join(", ")));
        output.push_str(&format!("- **Resume:** {}\n", score.resume_techs.join(", ")));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, layout: LayoutConfig) -> Self {
        Self { include_styles, layout }
    }

    fn tags(items: &[String]) -> String {
        if items.is_empty() {
            return "<em>none detected</em>".to_string();
        }
        items
            .iter()
            .map(|item| format!(r#"<span class="tag">{}</span>"#, escape_xml(item)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn create_template_data(&self, report: &SkillReport) -> HtmlTemplate {
        let analysis = &report.analysis;
        let score = &analysis.score;
        let (flow_svg, radar_svg) = render_charts(analysis, &self.layout);

        let verdict_class = match report.verdict() {
            Verdict::StrongCapabilityMatch => "verdict-strong",
            Verdict::InLineWithKeywords => "verdict-inline",
            Verdict::KeywordsOverstateFit => "verdict-overstated",
        };

        let gap_rows_html = analysis
            .ats_priority
            .iter()
            .map(|gap| {
                let transfer = analysis
                    .transfer_map
                    .get(&gap.tech)
                    .map(|t| Self::tags(&t.resume_techs))
                    .unwrap_or_default();
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_xml(&gap.tech),
                    gap.occurrences,
                    gap.capability_weight,
                    gap.score,
                    transfer
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let risk_flags_html = analysis
            .risk_flags
            .iter()
            .map(|flag| format!("<li>{}</li>", escape_xml(flag)))
            .collect::<Vec<_>>()
            .join("\n");

        HtmlTemplate {
            include_styles: self.include_styles,
            keyword_match: score.keyword_match,
            capability_match: score.capability_match,
            delta: signed(score.delta),
            verdict: report.verdict().headline().to_string(),
            verdict_class: verdict_class.to_string(),
            verdict_explanation: report.verdict().explanation().to_string(),
            flow_svg,
            radar_svg,
            has_gaps: !analysis.ats_priority.is_empty(),
            gap_rows_html,
            has_risk_flags: !analysis.risk_flags.is_empty(),
            risk_flags_html,
            job_techs_html: Self::tags(&score.job_techs),
            resume_techs_html: Self::tags(&score.resume_techs),
            version: report.metadata.version.clone(),
            generated_at: format_timestamp(report),
            job_source: report.metadata.job_source.clone(),
            resume_source: report.metadata.resume_source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &SkillReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| SkillTopologyError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, false, true, LayoutConfig::default())
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
        layout: LayoutConfig,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json, include_metadata),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(include_html_styles, layout),
        }
    }

    pub fn generate_report(&self, report: &SkillReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    let base_name = if base_name.is_empty() { "skill".into() } else { base_name };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_topology{}.{}", base_name, timestamp_suffix, extension)
}

/// Where `--save` writes: the path itself, or a generated file name inside it
/// when it names an existing directory.
pub fn resolve_output_path(save: &Path, format: &OutputFormat, source_name: &str) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, source_name, true))
    } else {
        save.to_path_buf()
    }
}
