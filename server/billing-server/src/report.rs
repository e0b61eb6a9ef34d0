//! One-shot billing report printed by the `report` subcommand

use billing_service::{BillingService, ListQuery, Presented};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportEntity {
    All,
    Procedures,
    Surgeries,
    Invoices,
    Patients,
}

impl ReportEntity {
    fn includes(self, other: ReportEntity) -> bool {
        self == ReportEntity::All || self == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}

/// Render stats plus filtered rows for the selected entities.
///
/// # Errors
///
/// Fails only if a record cannot be serialized to JSON.
pub fn render(
    service: &BillingService,
    entity: ReportEntity,
    query: &ListQuery,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => render_json(service, entity, query),
        ReportFormat::Text => Ok(render_text(service, entity, query)),
    }
}

fn section<S: Serialize, T: Serialize>(stats: S, rows: &[Presented<T>]) -> Result<Value, serde_json::Error> {
    Ok(json!({
        "stats": serde_json::to_value(stats)?,
        "rows": serde_json::to_value(rows)?,
    }))
}

fn render_json(
    service: &BillingService,
    entity: ReportEntity,
    query: &ListQuery,
) -> Result<String, serde_json::Error> {
    let mut report = Map::new();

    if entity == ReportEntity::All {
        report.insert("dashboard".to_string(), serde_json::to_value(service.dashboard())?);
    }
    if entity.includes(ReportEntity::Procedures) {
        let rows = service.list_procedures(query);
        report.insert("procedures".to_string(), section(service.procedure_stats(), &rows)?);
    }
    if entity.includes(ReportEntity::Surgeries) {
        let rows = service.list_surgeries(query);
        report.insert("surgeries".to_string(), section(service.surgery_stats(), &rows)?);
    }
    if entity.includes(ReportEntity::Invoices) {
        let rows = service.list_invoices(query);
        report.insert("invoices".to_string(), section(service.invoice_stats(), &rows)?);
    }
    if entity.includes(ReportEntity::Patients) {
        let rows = service.list_patients(query);
        report.insert("patients".to_string(), section(service.patient_stats(), &rows)?);
    }

    serde_json::to_string_pretty(&Value::Object(report))
}

fn render_text(service: &BillingService, entity: ReportEntity, query: &ListQuery) -> String {
    let mut lines: Vec<String> = Vec::new();

    if entity == ReportEntity::All {
        let dashboard = service.dashboard();
        lines.push("== Dashboard ==".to_string());
        lines.push(format!(
            "revenue {} | completed surgeries {} | active patients {} | pending invoices {}",
            dashboard.revenue,
            dashboard.completed_surgeries,
            dashboard.active_patients,
            dashboard.pending_invoices
        ));
        for recent in &dashboard.recent_surgeries {
            lines.push(format!(
                "  {}  {}  {}  {}  {}",
                recent.id, recent.date, recent.patient, recent.value, recent.status
            ));
        }
    }

    if entity.includes(ReportEntity::Procedures) {
        let stats = service.procedure_stats();
        let rows = service.list_procedures(query);
        lines.push(format!("== Procedures ({}/{}) ==", rows.len(), stats.total));
        lines.push(format!(
            "surgeries {} | consultations {} | exams {}",
            stats.surgeries, stats.consultations, stats.exams
        ));
        for row in &rows {
            let p = &row.record;
            lines.push(format!(
                "  {}  {}  {}  {}  {}",
                p.id, p.code, p.name, p.procedure_type, p.complexity
            ));
        }
    }

    if entity.includes(ReportEntity::Surgeries) {
        let stats = service.surgery_stats();
        let rows = service.list_surgeries(query);
        lines.push(format!("== Surgeries ({}/{}) ==", rows.len(), stats.total));
        lines.push(format!(
            "total value {} | completed {} | scheduled {}",
            stats.total_value, stats.completed, stats.scheduled
        ));
        for row in &rows {
            let s = &row.record;
            lines.push(format!(
                "  {}  {} {}  {}  {}  {}  {}",
                s.id, s.date, s.time, s.patient_name, s.procedure, s.final_value, s.status
            ));
        }
    }

    if entity.includes(ReportEntity::Invoices) {
        let stats = service.invoice_stats();
        let rows = service.list_invoices(query);
        lines.push(format!("== Invoices ({}/{}) ==", rows.len(), stats.total));
        lines.push(format!(
            "total {} | paid {} | pending {} | overdue {}",
            stats.total_amount, stats.paid_amount, stats.pending_amount, stats.overdue_count
        ));
        for row in &rows {
            let i = &row.record;
            lines.push(format!(
                "  {}  {}  {}  due {}  {}  {}",
                i.id, i.surgery_id, i.patient_name, i.due_date, i.amount, i.status
            ));
        }
    }

    if entity.includes(ReportEntity::Patients) {
        let stats = service.patient_stats();
        let rows = service.list_patients(query);
        let average_age = stats
            .average_age
            .map_or_else(|| "-".to_string(), |age| age.to_string());
        lines.push(format!("== Patients ({}/{}) ==", rows.len(), stats.total));
        lines.push(format!(
            "active {} | revenue {} | average age {}",
            stats.active, stats.total_revenue, average_age
        ));
        for row in &rows {
            let p = &row.record;
            lines.push(format!(
                "  {}  {}  {}  surgeries {}  invoices {}  {}",
                p.id, p.name, p.status, p.total_surgeries, p.total_invoices, p.total_amount
            ));
        }
    }

    lines.join("\n")
}
