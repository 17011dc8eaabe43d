//! Report rendering seam.
//!
//! A renderer is a pure function from a template and a [`ReportContext`]
//! to bytes. The document engine itself is external; [`PlainTextRenderer`]
//! is the built-in fallback used by the CLI and tests.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use grc_core::entities::{Audit, AuditItem, Standard};
use grc_core::enums::ReportTemplate;
use serde::Serialize;

/// Failure inside a renderer.
#[derive(Debug, thiserror::Error)]
#[error("{template}: {message}")]
pub struct RenderError {
    pub template: ReportTemplate,
    pub message: String,
}

impl RenderError {
    #[must_use]
    pub fn new(template: ReportTemplate, message: impl Into<String>) -> Self {
        Self {
            template,
            message: message.into(),
        }
    }
}

/// One audit item with the code and title of the entity it evaluates.
#[derive(Debug, Clone, Serialize)]
pub struct ReportItem {
    pub item: AuditItem,
    pub code: String,
    pub title: String,
}

/// Everything a report template can see.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub audit: Audit,
    pub standard: Option<Standard>,
    pub items: Vec<ReportItem>,
    pub generated_at: DateTime<Utc>,
}

pub trait ReportRenderer: Send + Sync {
    /// # Errors
    ///
    /// Returns `RenderError` if the template cannot be produced.
    fn render(&self, template: ReportTemplate, ctx: &ReportContext) -> Result<Vec<u8>, RenderError>;
}

/// Fixed-layout UTF-8 text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    fn heading(template: ReportTemplate) -> &'static str {
        match template {
            ReportTemplate::Standard => "AUDIT REPORT",
            ReportTemplate::Implementation => "IMPLEMENTATION AUDIT REPORT",
        }
    }

    fn write(template: ReportTemplate, ctx: &ReportContext) -> Result<String, std::fmt::Error> {
        let audit = &ctx.audit;
        let mut out = String::new();

        writeln!(out, "{}", Self::heading(template))?;
        writeln!(out, "{}", "=".repeat(Self::heading(template).len()))?;
        writeln!(out)?;
        writeln!(out, "Audit:      {} ({})", audit.title, audit.id)?;
        writeln!(out, "Status:     {}", audit.status.label())?;
        writeln!(out, "Manager:    {}", audit.manager_id)?;
        writeln!(out, "Period:     {} to {}", audit.start_date, audit.end_date)?;
        if let Some(ref standard) = ctx.standard {
            writeln!(out, "Standard:   {} - {}", standard.code, standard.name)?;
        }
        writeln!(out, "Generated:  {}", ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        if let Some(ref description) = audit.description {
            writeln!(out)?;
            writeln!(out, "{description}")?;
        }

        writeln!(out)?;
        writeln!(out, "Items ({})", ctx.items.len())?;
        writeln!(out, "{}", "-".repeat(72))?;
        for entry in &ctx.items {
            writeln!(out, "{}  {}", entry.code, entry.title)?;
            writeln!(
                out,
                "    status: {} | applicability: {} | effectiveness: {}",
                entry.item.status.label(),
                entry.item.applicability.label(),
                entry.item.effectiveness.label()
            )?;
            if let Some(ref notes) = entry.item.auditor_notes {
                writeln!(out, "    notes: {notes}")?;
            }
        }
        Ok(out)
    }
}

impl ReportRenderer for PlainTextRenderer {
    fn render(&self, template: ReportTemplate, ctx: &ReportContext) -> Result<Vec<u8>, RenderError> {
        Self::write(template, ctx)
            .map(String::into_bytes)
            .map_err(|e| RenderError::new(template, e.to_string()))
    }
}
