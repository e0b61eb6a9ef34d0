use std::borrow::Cow;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::BillingResult;
use crate::filter::{ListQuery, Searchable};
use crate::models::{
    Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice, NewPatient, NewProcedure, NewSurgery,
    Patient, PatientUpdate, PaymentRecord, Procedure, ProcedureUpdate, Surgery, SurgeryUpdate,
};
use crate::presentation::{Presentable, Presented};
use crate::reporting::{
    dashboard_summary, invoice_stats, patient_stats, procedure_stats, surgery_stats,
    DashboardSummary, InvoiceStats, PatientStats, ProcedureStats, SurgeryStats,
};
use crate::settings::{AggregatePolicy, BillingSettings};
use crate::store::BillingStore;

/// Billing service
///
/// Owns the entity lists and answers the list, stats and dashboard queries the
/// billing pages issue. Mutations go through [`BillingStore`] and are logged.
#[derive(Debug, Clone)]
pub struct BillingService {
    store: BillingStore,
    settings: BillingSettings,
}

impl BillingService {
    pub fn new(store: BillingStore, settings: BillingSettings) -> Self {
        Self { store, settings }
    }

    /// Service over the compiled-in seed lists.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings or malformed seed data.
    pub fn seeded(settings: BillingSettings) -> BillingResult<Self> {
        settings.validate()?;
        let store = BillingStore::seeded()?;
        info!(
            procedures = store.procedures().len(),
            surgeries = store.surgeries().len(),
            invoices = store.invoices().len(),
            patients = store.patients().len(),
            policy = ?settings.aggregate_policy,
            "Billing store seeded"
        );
        Ok(Self::new(store, settings))
    }

    pub fn settings(&self) -> &BillingSettings {
        &self.settings
    }

    pub fn store(&self) -> &BillingStore {
        &self.store
    }

    /// Patients with counters resolved under the configured policy.
    pub fn patients(&self) -> Cow<'_, [Patient]> {
        match self.settings.aggregate_policy {
            AggregatePolicy::Cached => Cow::Borrowed(self.store.patients()),
            AggregatePolicy::Derived => Cow::Owned(
                self.store
                    .patients()
                    .iter()
                    .map(|p| self.derive_counters(p))
                    .collect(),
            ),
        }
    }

    fn derive_counters(&self, patient: &Patient) -> Patient {
        let surgeries = self
            .store
            .surgeries()
            .iter()
            .filter(|s| s.patient_id == patient.id)
            .count();
        let (invoices, amount) = self
            .store
            .invoices()
            .iter()
            .filter(|i| i.patient_id == patient.id)
            .fold((0usize, Decimal::ZERO), |(count, amount), invoice| {
                if invoice.status == InvoiceStatus::Cancelled {
                    (count + 1, amount)
                } else {
                    (count + 1, amount.saturating_add(invoice.amount))
                }
            });

        Patient {
            total_surgeries: saturating_u32(surgeries),
            total_invoices: saturating_u32(invoices),
            total_amount: amount,
            ..patient.clone()
        }
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    pub fn list_procedures(&self, query: &ListQuery) -> Vec<Presented<Procedure>> {
        present("procedures", query, self.store.procedures())
    }

    pub fn list_surgeries(&self, query: &ListQuery) -> Vec<Presented<Surgery>> {
        present("surgeries", query, self.store.surgeries())
    }

    pub fn list_invoices(&self, query: &ListQuery) -> Vec<Presented<Invoice>> {
        present("invoices", query, self.store.invoices())
    }

    pub fn list_patients(&self, query: &ListQuery) -> Vec<Presented<Patient>> {
        present("patients", query, &self.patients())
    }

    // ------------------------------------------------------------------
    // Aggregates (always over the unfiltered lists)
    // ------------------------------------------------------------------

    pub fn procedure_stats(&self) -> ProcedureStats {
        procedure_stats(self.store.procedures())
    }

    pub fn surgery_stats(&self) -> SurgeryStats {
        surgery_stats(self.store.surgeries())
    }

    pub fn invoice_stats(&self) -> InvoiceStats {
        invoice_stats(self.store.invoices())
    }

    pub fn patient_stats(&self) -> PatientStats {
        patient_stats(&self.patients(), self.settings.today())
    }

    pub fn dashboard(&self) -> DashboardSummary {
        dashboard_summary(
            self.store.surgeries(),
            self.store.invoices(),
            &self.patients(),
            self.settings.recent_surgeries_limit,
        )
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn create_procedure(&mut self, input: NewProcedure) -> BillingResult<Procedure> {
        let procedure = self.store.create_procedure(input)?;
        info!(procedure_id = %procedure.id, code = %procedure.code, "Procedure registered");
        Ok(procedure)
    }

    pub fn update_procedure(&mut self, id: &str, update: ProcedureUpdate) -> BillingResult<Procedure> {
        let procedure = self.store.update_procedure(id, update)?;
        info!(procedure_id = %id, "Procedure updated");
        Ok(procedure)
    }

    pub fn delete_procedure(&mut self, id: &str) -> BillingResult<Procedure> {
        let procedure = self.store.delete_procedure(id)?;
        info!(procedure_id = %id, "Procedure deleted");
        Ok(procedure)
    }

    pub fn create_surgery(&mut self, input: NewSurgery) -> BillingResult<Surgery> {
        let surgery = self.store.create_surgery(input)?;
        info!(
            surgery_id = %surgery.id,
            complexity = %surgery.complexity,
            final_value = %surgery.final_value,
            "Surgery scheduled"
        );
        Ok(surgery)
    }

    pub fn update_surgery(&mut self, id: &str, update: SurgeryUpdate) -> BillingResult<Surgery> {
        let surgery = self.store.update_surgery(id, update)?;
        info!(surgery_id = %id, status = %surgery.status, final_value = %surgery.final_value, "Surgery updated");
        Ok(surgery)
    }

    pub fn delete_surgery(&mut self, id: &str) -> BillingResult<Surgery> {
        let surgery = self.store.delete_surgery(id)?;
        info!(surgery_id = %id, "Surgery deleted");
        Ok(surgery)
    }

    pub fn create_invoice(&mut self, input: NewInvoice) -> BillingResult<Invoice> {
        let invoice = self.store.create_invoice(input)?;
        info!(
            invoice_id = %invoice.id,
            surgery_id = %invoice.surgery_id,
            amount = %invoice.amount,
            "Invoice issued"
        );
        Ok(invoice)
    }

    pub fn update_invoice(&mut self, id: &str, update: InvoiceUpdate) -> BillingResult<Invoice> {
        let invoice = self.store.update_invoice(id, update)?;
        info!(invoice_id = %id, status = %invoice.status, "Invoice updated");
        Ok(invoice)
    }

    pub fn record_payment(&mut self, id: &str, payment: PaymentRecord) -> BillingResult<Invoice> {
        let invoice = self.store.record_payment(id, payment)?;
        info!(
            invoice_id = %id,
            amount = %invoice.amount,
            method = invoice.payment_method.as_deref().unwrap_or_default(),
            "Payment recorded"
        );
        Ok(invoice)
    }

    pub fn delete_invoice(&mut self, id: &str) -> BillingResult<Invoice> {
        let invoice = self.store.delete_invoice(id)?;
        info!(invoice_id = %id, "Invoice deleted");
        Ok(invoice)
    }

    /// Register a patient dated at the configured reference date.
    pub fn create_patient(&mut self, input: NewPatient) -> BillingResult<Patient> {
        let registered_on = self.settings.today();
        let patient = self.store.create_patient(input, registered_on)?;
        info!(patient_id = %patient.id, %registered_on, "Patient registered");
        Ok(patient)
    }

    pub fn update_patient(&mut self, id: &str, update: PatientUpdate) -> BillingResult<Patient> {
        let patient = self.store.update_patient(id, update)?;
        info!(patient_id = %id, status = %patient.status, "Patient updated");
        Ok(patient)
    }

    pub fn delete_patient(&mut self, id: &str) -> BillingResult<Patient> {
        let patient = self.store.delete_patient(id)?;
        info!(patient_id = %id, "Patient deleted");
        Ok(patient)
    }
}

fn present<T>(entity: &str, query: &ListQuery, records: &[T]) -> Vec<Presented<T>>
where
    T: Searchable + Presentable + Clone,
{
    let rows: Vec<Presented<T>> = query
        .apply(records)
        .into_iter()
        .map(|record| Presented::new(record.clone()))
        .collect();
    debug!(
        entity,
        search = %query.search,
        filter = %query.filter,
        matched = rows.len(),
        total = records.len(),
        "List query"
    );
    rows
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
