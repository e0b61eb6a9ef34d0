use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::age::age_on;
use crate::models::{
    ActivityStatus, Invoice, InvoiceStatus, Patient, Procedure, ProcedureType, Surgery,
    SurgeryStatus,
};
use crate::presentation::{surgery_status_badge, Badge};

/// Procedure catalogue counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureStats {
    pub total: usize,
    pub surgeries: usize,
    pub consultations: usize,
    pub exams: usize,
}

/// Surgery totals. Money sums saturate at `Decimal::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryStats {
    pub total: usize,
    pub total_value: Decimal,
    pub completed: usize,
    pub scheduled: usize,
}

/// Invoice totals by payment status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub total: usize,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
    pub overdue_count: usize,
}

/// Patient register totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub total: usize,
    pub active: usize,
    pub total_revenue: Decimal,
    /// Mean age rounded to whole years; absent for an empty register
    pub average_age: Option<i64>,
}

pub fn procedure_stats(procedures: &[Procedure]) -> ProcedureStats {
    procedures
        .iter()
        .fold(ProcedureStats::default(), |mut stats, procedure| {
            stats.total += 1;
            match procedure.procedure_type {
                ProcedureType::Surgery => stats.surgeries += 1,
                ProcedureType::Consultation => stats.consultations += 1,
                ProcedureType::Exam => stats.exams += 1,
            }
            stats
        })
}

pub fn surgery_stats(surgeries: &[Surgery]) -> SurgeryStats {
    surgeries
        .iter()
        .fold(SurgeryStats::default(), |mut stats, surgery| {
            stats.total += 1;
            stats.total_value = stats.total_value.saturating_add(surgery.final_value);
            match surgery.status {
                SurgeryStatus::Completed => stats.completed += 1,
                SurgeryStatus::Scheduled => stats.scheduled += 1,
                SurgeryStatus::InProgress | SurgeryStatus::Cancelled => {}
            }
            stats
        })
}

pub fn invoice_stats(invoices: &[Invoice]) -> InvoiceStats {
    invoices
        .iter()
        .fold(InvoiceStats::default(), |mut stats, invoice| {
            stats.total += 1;
            stats.total_amount = stats.total_amount.saturating_add(invoice.amount);
            match invoice.status {
                InvoiceStatus::Paid => {
                    stats.paid_amount = stats.paid_amount.saturating_add(invoice.amount);
                }
                InvoiceStatus::Pending => {
                    stats.pending_amount = stats.pending_amount.saturating_add(invoice.amount);
                }
                InvoiceStatus::Overdue => stats.overdue_count += 1,
                InvoiceStatus::Cancelled => {}
            }
            stats
        })
}

/// Patient totals with ages taken at `reference`.
pub fn patient_stats(patients: &[Patient], reference: NaiveDate) -> PatientStats {
    let mut stats = PatientStats::default();
    let mut age_sum: i64 = 0;

    for patient in patients {
        stats.total += 1;
        if patient.status == ActivityStatus::Active {
            stats.active += 1;
        }
        stats.total_revenue = stats.total_revenue.saturating_add(patient.total_amount);
        age_sum += i64::from(age_on(patient.birth_date, reference));
    }

    stats.average_age = rounded_mean(age_sum, stats.total);
    stats
}

fn rounded_mean(sum: i64, count: usize) -> Option<i64> {
    if count == 0 {
        return None;
    }
    (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Row of the dashboard's recent surgeries table
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentSurgery {
    pub id: String,
    pub patient: String,
    pub procedure: String,
    pub surgeon: String,
    pub date: NaiveDate,
    pub value: Decimal,
    pub status: SurgeryStatus,
    pub badge: Badge,
}

/// Dashboard stat cards plus the latest surgeries
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of paid invoices
    pub revenue: Decimal,
    pub completed_surgeries: usize,
    pub active_patients: usize,
    pub pending_invoices: usize,
    pub recent_surgeries: Vec<RecentSurgery>,
}

pub fn dashboard_summary(
    surgeries: &[Surgery],
    invoices: &[Invoice],
    patients: &[Patient],
    recent_limit: usize,
) -> DashboardSummary {
    let invoices_summary = invoice_stats(invoices);
    let pending_invoices = invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Pending)
        .count();
    let active_patients = patients
        .iter()
        .filter(|p| p.status == ActivityStatus::Active)
        .count();

    let mut latest: Vec<&Surgery> = surgeries.iter().collect();
    // newest first; stable sort keeps list order for identical slots
    latest.sort_by(|a, b| (b.date, &b.time).cmp(&(a.date, &a.time)));

    let recent_surgeries = latest
        .into_iter()
        .take(recent_limit)
        .map(|s| RecentSurgery {
            id: s.id.clone(),
            patient: s.patient_name.clone(),
            procedure: s.procedure.clone(),
            surgeon: s.surgeon.clone(),
            date: s.date,
            value: s.final_value,
            status: s.status,
            badge: surgery_status_badge(s.status),
        })
        .collect();

    DashboardSummary {
        revenue: invoices_summary.paid_amount,
        completed_surgeries: surgery_stats(surgeries).completed,
        active_patients,
        pending_invoices,
        recent_surgeries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invoice_stats_over_seed() {
        let seed = SeedData::load().unwrap();
        let stats = invoice_stats(&seed.invoices);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.total_amount, Decimal::from(26100));
        assert_eq!(stats.paid_amount, Decimal::from(3000));
        assert_eq!(stats.pending_amount, Decimal::from(8700));
        assert_eq!(stats.overdue_count, 1);
    }

    #[test]
    fn test_surgery_stats_over_seed() {
        let seed = SeedData::load().unwrap();
        let stats = surgery_stats(&seed.surgeries);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.total_value, Decimal::from(26100));
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.scheduled, 2);
    }

    #[test]
    fn test_procedure_stats_over_seed() {
        let seed = SeedData::load().unwrap();
        assert_eq!(
            procedure_stats(&seed.procedures),
            ProcedureStats {
                total: 6,
                surgeries: 4,
                consultations: 1,
                exams: 1,
            }
        );
    }

    #[test]
    fn test_patient_stats_pinned_reference_date() {
        let seed = SeedData::load().unwrap();
        // ages 39, 31, 45, 59 -> 43.5 -> 44
        let stats = patient_stats(&seed.patients, date(2024, 6, 1));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.total_revenue, Decimal::from(29600));
        assert_eq!(stats.average_age, Some(44));
    }

    #[test]
    fn test_patient_average_age_rounds_down_below_half() {
        let seed = SeedData::load().unwrap();
        // 2024-01-01: ages 38, 31, 45, 58 -> 43.0
        let stats = patient_stats(&seed.patients, date(2024, 1, 1));
        assert_eq!(stats.average_age, Some(43));
    }

    #[test]
    fn test_empty_lists_reduce_to_zero() {
        assert_eq!(invoice_stats(&[]), InvoiceStats::default());
        assert_eq!(surgery_stats(&[]).total_value, Decimal::ZERO);
        assert_eq!(patient_stats(&[], date(2024, 6, 1)).average_age, None);
    }

    #[test]
    fn test_dashboard_summary_over_seed() {
        let seed = SeedData::load().unwrap();
        let summary = dashboard_summary(&seed.surgeries, &seed.invoices, &seed.patients, 3);
        assert_eq!(summary.revenue, Decimal::from(3000));
        assert_eq!(summary.completed_surgeries, 1);
        assert_eq!(summary.active_patients, 4);
        assert_eq!(summary.pending_invoices, 2);
        let ids: Vec<&str> = summary.recent_surgeries.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["CIR004", "CIR003", "CIR002"]);
        assert_eq!(summary.recent_surgeries[0].value, Decimal::from(14400));
    }

    #[test]
    fn test_money_sums_saturate_instead_of_overflowing() {
        let mut seed = SeedData::load().unwrap();
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        for invoice in &mut seed.invoices[..2] {
            invoice.amount = half;
            invoice.status = InvoiceStatus::Paid;
        }
        for surgery in &mut seed.surgeries {
            surgery.final_value = half;
        }

        let stats = invoice_stats(&seed.invoices);
        assert_eq!(stats.total_amount, Decimal::MAX);
        assert_eq!(stats.paid_amount, Decimal::MAX);
        assert_eq!(surgery_stats(&seed.surgeries).total_value, Decimal::MAX);

        let summary = dashboard_summary(&seed.surgeries, &seed.invoices, &seed.patients, 3);
        assert_eq!(summary.revenue, Decimal::MAX);
    }
}
