//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use coursemap_domain::{CourseId, EffectiveStatus, Status};
use coursemap_engine::{sorted, Graph, RoadmapView};
use coursemap_store::{CatalogEntry, CoursePage, ImportReport, Program};
use serde_json::json;
use std::collections::HashMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the roadmap view.
    pub fn format_roadmap(&self, view: &RoadmapView) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let nodes: Vec<serde_json::Value> = view
                    .nodes
                    .iter()
                    .map(|n| {
                        json!({
                            "id": n.id.as_str(),
                            "status": n.status.as_str(),
                            "declared": n.declared.as_str(),
                            "prerequisites": id_strings(&n.prerequisites),
                        })
                    })
                    .collect();
                let edges: Vec<serde_json::Value> = view
                    .edges
                    .iter()
                    .map(|e| json!({ "from": e.from.as_str(), "to": e.to.as_str() }))
                    .collect();
                let cycles: Vec<serde_json::Value> = view
                    .cycles
                    .iter()
                    .map(|c| json!({ "course": c.course.as_str(), "prerequisite": c.prerequisite.as_str() }))
                    .collect();

                Ok(serde_json::to_string_pretty(&json!({
                    "nodes": nodes,
                    "edges": edges,
                    "dangling": id_strings(&view.dangling),
                    "cycles": cycles,
                }))?)
            }
            OutputFormat::Quiet => Ok(view
                .nodes
                .iter()
                .map(|n| format!("{}\t{}", n.id, n.status))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if view.nodes.is_empty() {
                    return Ok(self.colorize("No courses found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Course", "Status", "Requires"]);
                for node in &view.nodes {
                    builder.push_record([
                        node.id.to_string(),
                        self.status_cell(node.status),
                        join_ids(&node.prerequisites),
                    ]);
                }

                let mut out = self.table(builder);
                out.push('\n');
                out.push_str(&self.info(&format!(
                    "{} course(s): {} passed, {} failed, {} blocked, {} not started",
                    view.nodes.len(),
                    view.count(EffectiveStatus::Passed),
                    view.count(EffectiveStatus::Failed),
                    view.count(EffectiveStatus::Blocked),
                    view.count(EffectiveStatus::NotStarted),
                )));
                self.push_graph_warnings(&mut out, &view.dangling, view.cycles.len());
                Ok(out)
            }
        }
    }

    /// Format a prerequisite closure.
    pub fn format_closure(&self, graph: &Graph) -> Result<String> {
        let ids = graph.sorted_ids();
        let dangling = graph.dangling_prerequisites();

        match self.format {
            OutputFormat::Json => {
                let courses: Vec<serde_json::Value> = ids
                    .iter()
                    .map(|id| {
                        let prerequisites = graph
                            .get(id)
                            .map(|r| id_strings(&r.prerequisite_ids))
                            .unwrap_or_default();
                        json!({ "id": id.as_str(), "prerequisites": prerequisites })
                    })
                    .collect();
                let edges: Vec<serde_json::Value> = graph
                    .edges()
                    .iter()
                    .map(|e| json!({ "from": e.from.as_str(), "to": e.to.as_str() }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "courses": courses,
                    "edges": edges,
                    "dangling": id_strings(&dangling),
                }))?)
            }
            OutputFormat::Quiet => Ok(ids.iter().map(CourseId::to_string).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if ids.is_empty() {
                    return Ok(self.colorize("No courses found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Course", "Prerequisites"]);
                for id in &ids {
                    let prerequisites = graph
                        .get(id)
                        .map(|r| join_ids(&sorted(r.prerequisite_ids.iter().cloned())))
                        .unwrap_or_default();
                    builder.push_record([id.to_string(), prerequisites]);
                }

                let mut out = self.table(builder);
                self.push_graph_warnings(&mut out, &dangling, 0);
                Ok(out)
            }
        }
    }

    /// Format one catalog course.
    pub fn format_course(&self, entry: &CatalogEntry) -> Result<String> {
        let id = &entry.record.id;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "id": id.as_str(),
                "title": entry.title,
                "level": entry.level,
                "units": entry.units,
                "description": entry.description,
                "prerequisites_text": entry.prerequisites_text,
                "prerequisites": id_strings(&entry.record.prerequisite_ids),
                "incompatible": id_strings(&entry.incompatible_ids),
            }))?),
            OutputFormat::Quiet => Ok(id.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Code".to_string(), id.to_string()]);
                builder.push_record(["Title".to_string(), entry.title.clone()]);
                if let Some(level) = &entry.level {
                    builder.push_record(["Level".to_string(), level.clone()]);
                }
                if let Some(units) = entry.units {
                    builder.push_record(["Units".to_string(), units.to_string()]);
                }
                if let Some(text) = &entry.prerequisites_text {
                    builder.push_record(["Prerequisite rule".to_string(), text.clone()]);
                }
                builder.push_record(["Prerequisites".to_string(), join_ids(&entry.record.prerequisite_ids)]);
                if !entry.incompatible_ids.is_empty() {
                    builder.push_record(["Incompatible".to_string(), join_ids(&entry.incompatible_ids)]);
                }

                let mut out = self.table(builder);
                if let Some(description) = &entry.description {
                    out.push_str("\n\n");
                    out.push_str(description);
                }
                Ok(out)
            }
        }
    }

    /// Format declared statuses, or a status delta.
    pub fn format_statuses(&self, statuses: &HashMap<CourseId, Status>) -> Result<String> {
        let ids = sorted(statuses.keys().cloned());

        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = ids
                    .iter()
                    .map(|id| (id.to_string(), json!(statuses[id].as_str())))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Quiet => Ok(ids.iter().map(CourseId::to_string).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if ids.is_empty() {
                    return Ok(self.colorize("No statuses recorded.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Course", "Status"]);
                for id in &ids {
                    builder.push_record([id.to_string(), self.status_cell(statuses[id].into())]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format one page of a catalog listing.
    pub fn format_course_page(&self, page: &CoursePage) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let courses: Vec<serde_json::Value> = page
                    .courses
                    .iter()
                    .map(|c| json!({ "id": c.id.as_str(), "title": c.title }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "courses": courses,
                    "total": page.total,
                    "page": page.page,
                    "page_size": page.page_size,
                }))?)
            }
            OutputFormat::Quiet => Ok(page
                .courses
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if page.courses.is_empty() {
                    return Ok(self.colorize("No courses found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Course", "Title"]);
                for course in &page.courses {
                    builder.push_record([course.id.to_string(), course.title.clone()]);
                }

                let mut out = self.table(builder);
                out.push('\n');
                out.push_str(&self.info(&format!(
                    "Page {} of {} ({} course(s))",
                    page.page,
                    page.page_count(),
                    page.total
                )));
                Ok(out)
            }
        }
    }

    /// Format a list of programs.
    pub fn format_programs(&self, programs: &[Program]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_programs: Vec<serde_json::Value> = programs
                    .iter()
                    .map(|p| {
                        json!({
                            "name": p.name,
                            "faculty": p.faculty,
                            "total_units": p.total_units,
                            "courses": id_strings(&p.course_ids),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_programs)?)
            }
            OutputFormat::Quiet => Ok(programs.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if programs.is_empty() {
                    return Ok(self.colorize("No programs found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Program", "Faculty", "Units", "Courses"]);
                for program in programs {
                    builder.push_record([
                        program.name.clone(),
                        program.faculty.clone().unwrap_or_default(),
                        program.total_units.to_string(),
                        program.course_ids.len().to_string(),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a catalog import report.
    pub fn format_import(&self, report: &ImportReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "imported": report.imported,
                "skipped": report.skipped,
            }))?),
            OutputFormat::Quiet => Ok(report.imported.to_string()),
            OutputFormat::Table => {
                let mut out = self.success(&format!("Imported {} course(s)", report.imported));
                for reason in &report.skipped {
                    out.push('\n');
                    out.push_str(&self.warning(&format!("Skipped {}", reason)));
                }
                Ok(out)
            }
        }
    }

    /// Format the result of a missing-course check.
    pub fn format_missing(&self, expected: usize, missing: &[CourseId]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&id_strings(missing))?),
            OutputFormat::Quiet => Ok(missing.iter().map(CourseId::to_string).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if missing.is_empty() {
                    return Ok(self.success(&format!("All {} expected course(s) are in the catalog", expected)));
                }
                let mut out = self.warning(&format!(
                    "{} of {} expected course(s) missing",
                    missing.len(),
                    expected
                ));
                for id in missing {
                    out.push_str(&format!("\n  {}", id));
                }
                Ok(out)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether human-readable table output is selected.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn push_graph_warnings(&self, out: &mut String, dangling: &[CourseId], cycles: usize) {
        if !dangling.is_empty() {
            out.push('\n');
            out.push_str(&self.warning(&format!("Not in catalog: {}", join_ids(dangling))));
        }
        if cycles > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!("{} prerequisite cycle(s) in catalog data", cycles)));
        }
    }

    fn status_cell(&self, status: EffectiveStatus) -> String {
        let color = match status {
            EffectiveStatus::Passed => "green",
            EffectiveStatus::Failed => "red",
            EffectiveStatus::Blocked => "magenta",
            EffectiveStatus::NotStarted => "",
        };
        self.colorize(status.label(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn id_strings(ids: &[CourseId]) -> Vec<&str> {
    ids.iter().map(CourseId::as_str).collect()
}

fn join_ids(ids: &[CourseId]) -> String {
    id_strings(ids).join(", ")
}
