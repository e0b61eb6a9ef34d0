//! In-memory entity lists with create/update/delete
//!
//! Ids are generated per entity as prefix + the next sequence number, padded
//! to three digits (`PROC007`, `CIR005`, `FAT005`, `PAC005`). Each entity keeps
//! the highest sequence it has issued, so deleting a record never frees its id
//! for reuse. Updates are applied to a copy and only stored once the result
//! validates, so a rejected update leaves the record unchanged.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{BillingError, BillingResult};
use crate::models::{
    ActivityStatus, Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice, NewPatient, NewProcedure,
    NewSurgery, Patient, PatientUpdate, PaymentRecord, Procedure, ProcedureUpdate, Surgery,
    SurgeryStatus, SurgeryUpdate,
};
use crate::pricing::{final_value, MAX_CURRENCY};
use crate::seed::SeedData;

pub const PROCEDURE_PREFIX: &str = "PROC";
pub const SURGERY_PREFIX: &str = "CIR";
pub const INVOICE_PREFIX: &str = "FAT";
pub const PATIENT_PREFIX: &str = "PAC";

/// Last sequence number issued per entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Sequences {
    procedure: u32,
    surgery: u32,
    invoice: u32,
    patient: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BillingStore {
    procedures: Vec<Procedure>,
    surgeries: Vec<Surgery>,
    invoices: Vec<Invoice>,
    patients: Vec<Patient>,
    sequences: Sequences,
}

impl From<SeedData> for BillingStore {
    fn from(seed: SeedData) -> Self {
        let sequences = Sequences {
            procedure: highest_sequence(PROCEDURE_PREFIX, seed.procedures.iter().map(|p| p.id.as_str())),
            surgery: highest_sequence(SURGERY_PREFIX, seed.surgeries.iter().map(|s| s.id.as_str())),
            invoice: highest_sequence(INVOICE_PREFIX, seed.invoices.iter().map(|i| i.id.as_str())),
            patient: highest_sequence(PATIENT_PREFIX, seed.patients.iter().map(|p| p.id.as_str())),
        };
        Self {
            procedures: seed.procedures,
            surgeries: seed.surgeries,
            invoices: seed.invoices,
            patients: seed.patients,
            sequences,
        }
    }
}

impl BillingStore {
    /// Store holding the compiled-in seed lists.
    ///
    /// # Errors
    ///
    /// Propagates [`BillingError::Seed`] from [`SeedData::load`].
    pub fn seeded() -> BillingResult<Self> {
        SeedData::load().map(Self::from)
    }

    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    pub fn surgeries(&self) -> &[Surgery] {
        &self.surgeries
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn procedure(&self, id: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.id == id)
    }

    pub fn surgery(&self, id: &str) -> Option<&Surgery> {
        self.surgeries.iter().find(|s| s.id == id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    // ------------------------------------------------------------------
    // Procedures
    // ------------------------------------------------------------------

    /// # Errors
    ///
    /// [`BillingError::Validation`] when name, category or code is blank.
    pub fn create_procedure(&mut self, input: NewProcedure) -> BillingResult<Procedure> {
        let (sequence, id) = next_id(PROCEDURE_PREFIX, self.sequences.procedure);
        let procedure = Procedure {
            id,
            name: input.name,
            procedure_type: input.procedure_type,
            category: input.category,
            code: input.code,
            description: input.description,
            complexity: input.complexity,
            estimated_time: input.estimated_time,
            status: ActivityStatus::Active,
        };
        validate_procedure(&procedure)?;
        self.sequences.procedure = sequence;
        self.procedures.push(procedure.clone());
        Ok(procedure)
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id, [`BillingError::Validation`]
    /// when the updated record is invalid.
    pub fn update_procedure(&mut self, id: &str, update: ProcedureUpdate) -> BillingResult<Procedure> {
        let slot = self
            .procedures
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BillingError::not_found("procedure", id))?;

        let mut updated = slot.clone();
        set(&mut updated.name, update.name);
        set(&mut updated.procedure_type, update.procedure_type);
        set(&mut updated.category, update.category);
        set(&mut updated.code, update.code);
        set(&mut updated.description, update.description);
        set(&mut updated.complexity, update.complexity);
        set(&mut updated.estimated_time, update.estimated_time);
        set(&mut updated.status, update.status);
        validate_procedure(&updated)?;

        *slot = updated.clone();
        Ok(updated)
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id.
    pub fn delete_procedure(&mut self, id: &str) -> BillingResult<Procedure> {
        remove_by(&mut self.procedures, "procedure", id, |p| p.id.as_str())
    }

    // ------------------------------------------------------------------
    // Surgeries
    // ------------------------------------------------------------------

    /// Schedule a surgery, pricing it from base value and complexity.
    ///
    /// # Errors
    ///
    /// [`BillingError::Validation`] for blank required fields or a base value
    /// outside `0..=MAX_CURRENCY`.
    pub fn create_surgery(&mut self, input: NewSurgery) -> BillingResult<Surgery> {
        let (sequence, id) = next_id(SURGERY_PREFIX, self.sequences.surgery);
        let surgery = Surgery {
            id,
            patient_name: input.patient_name,
            patient_id: input.patient_id,
            procedure: input.procedure,
            surgeon: input.surgeon,
            date: input.date,
            time: input.time,
            complexity: input.complexity,
            base_value: input.base_value,
            complexity_multiplier: input.complexity.multiplier(),
            final_value: final_value(input.base_value, input.complexity)?,
            status: SurgeryStatus::Scheduled,
            room: input.room,
            duration: input.duration,
            notes: input.notes,
        };
        validate_surgery(&surgery)?;
        self.sequences.surgery = sequence;
        self.surgeries.push(surgery.clone());
        Ok(surgery)
    }

    /// Update a surgery. The stored price is kept unless base value or
    /// complexity change, in which case it is recomputed.
    ///
    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id, [`BillingError::Validation`]
    /// when the updated record is invalid.
    pub fn update_surgery(&mut self, id: &str, update: SurgeryUpdate) -> BillingResult<Surgery> {
        let slot = self
            .surgeries
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| BillingError::not_found("surgery", id))?;

        let mut updated = slot.clone();
        let reprice = update.base_value.is_some_and(|v| v != slot.base_value)
            || update.complexity.is_some_and(|c| c != slot.complexity);

        set(&mut updated.surgeon, update.surgeon);
        set(&mut updated.date, update.date);
        set(&mut updated.time, update.time);
        set(&mut updated.complexity, update.complexity);
        set(&mut updated.base_value, update.base_value);
        set(&mut updated.status, update.status);
        set(&mut updated.room, update.room);
        set(&mut updated.duration, update.duration);
        if update.notes.is_some() {
            updated.notes = update.notes;
        }
        if reprice {
            updated.complexity_multiplier = updated.complexity.multiplier();
            updated.final_value = final_value(updated.base_value, updated.complexity)?;
        }
        validate_surgery(&updated)?;

        *slot = updated.clone();
        Ok(updated)
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id.
    pub fn delete_surgery(&mut self, id: &str) -> BillingResult<Surgery> {
        remove_by(&mut self.surgeries, "surgery", id, |s| s.id.as_str())
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    /// Issue a pending invoice. Without an explicit amount the referenced
    /// surgery's final value is billed.
    ///
    /// # Errors
    ///
    /// [`BillingError::Validation`] for blank required fields, an amount
    /// outside `0..=MAX_CURRENCY`, or a missing amount when the surgery id is
    /// unknown.
    pub fn create_invoice(&mut self, input: NewInvoice) -> BillingResult<Invoice> {
        let amount = match input.amount {
            Some(amount) => amount,
            None => self
                .surgery(&input.surgery_id)
                .map(|s| s.final_value)
                .ok_or_else(|| {
                    BillingError::Validation(format!(
                        "amount is required: surgery {} is not registered",
                        input.surgery_id
                    ))
                })?,
        };

        let (sequence, id) = next_id(INVOICE_PREFIX, self.sequences.invoice);
        let invoice = Invoice {
            id,
            patient_name: input.patient_name,
            patient_id: input.patient_id,
            surgery_id: input.surgery_id,
            procedure: input.procedure,
            surgeon: input.surgeon,
            surgery_date: input.surgery_date,
            issue_date: input.issue_date,
            due_date: input.due_date,
            amount,
            status: InvoiceStatus::Pending,
            payment_method: None,
            payment_date: None,
            notes: input.notes,
        };
        validate_invoice(&invoice)?;
        self.sequences.invoice = sequence;
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id; [`BillingError::Validation`]
    /// when the update is invalid, tries to mark the invoice paid (use
    /// [`BillingStore::record_payment`]), moves a paid invoice to another
    /// status, or changes the amount of a paid or cancelled invoice.
    pub fn update_invoice(&mut self, id: &str, update: InvoiceUpdate) -> BillingResult<Invoice> {
        let slot = self
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BillingError::not_found("invoice", id))?;

        check_invoice_update(slot, &update)?;

        let mut updated = slot.clone();
        set(&mut updated.due_date, update.due_date);
        set(&mut updated.amount, update.amount);
        set(&mut updated.status, update.status);
        if update.notes.is_some() {
            updated.notes = update.notes;
        }
        validate_invoice(&updated)?;

        *slot = updated.clone();
        Ok(updated)
    }

    /// Settle an invoice.
    ///
    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id; [`BillingError::Validation`]
    /// when the invoice is already paid or cancelled, or the method is blank.
    pub fn record_payment(&mut self, id: &str, payment: PaymentRecord) -> BillingResult<Invoice> {
        let slot = self
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BillingError::not_found("invoice", id))?;

        match slot.status {
            InvoiceStatus::Paid | InvoiceStatus::Cancelled => {
                return Err(BillingError::Validation(format!(
                    "invoice {id} is {} and cannot receive a payment",
                    slot.status
                )));
            }
            InvoiceStatus::Pending | InvoiceStatus::Overdue => {}
        }
        require_text("paymentMethod", &payment.payment_method)?;

        slot.status = InvoiceStatus::Paid;
        slot.payment_method = Some(payment.payment_method);
        slot.payment_date = Some(payment.payment_date);
        Ok(slot.clone())
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id.
    pub fn delete_invoice(&mut self, id: &str) -> BillingResult<Invoice> {
        remove_by(&mut self.invoices, "invoice", id, |i| i.id.as_str())
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    /// Register an active patient with zeroed counters.
    ///
    /// # Errors
    ///
    /// [`BillingError::Validation`] for blank required fields or a malformed
    /// email address.
    pub fn create_patient(&mut self, input: NewPatient, registered_on: NaiveDate) -> BillingResult<Patient> {
        let (sequence, id) = next_id(PATIENT_PREFIX, self.sequences.patient);
        let patient = Patient {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            birth_date: input.birth_date,
            gender: input.gender,
            address: input.address,
            city: input.city,
            zip_code: input.zip_code,
            emergency_contact: input.emergency_contact,
            emergency_phone: input.emergency_phone,
            insurance_provider: input.insurance_provider,
            insurance_number: input.insurance_number,
            medical_history: input.medical_history,
            status: ActivityStatus::Active,
            registration_date: registered_on,
            total_surgeries: 0,
            total_invoices: 0,
            total_amount: Decimal::ZERO,
        };
        validate_patient(&patient)?;
        self.sequences.patient = sequence;
        self.patients.push(patient.clone());
        Ok(patient)
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id, [`BillingError::Validation`]
    /// when the updated record is invalid.
    pub fn update_patient(&mut self, id: &str, update: PatientUpdate) -> BillingResult<Patient> {
        let slot = self
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BillingError::not_found("patient", id))?;

        let mut updated = slot.clone();
        set(&mut updated.name, update.name);
        set(&mut updated.email, update.email);
        set(&mut updated.phone, update.phone);
        set(&mut updated.address, update.address);
        set(&mut updated.city, update.city);
        set(&mut updated.zip_code, update.zip_code);
        set(&mut updated.emergency_contact, update.emergency_contact);
        set(&mut updated.emergency_phone, update.emergency_phone);
        if update.insurance_provider.is_some() {
            updated.insurance_provider = update.insurance_provider;
        }
        if update.insurance_number.is_some() {
            updated.insurance_number = update.insurance_number;
        }
        set(&mut updated.medical_history, update.medical_history);
        set(&mut updated.status, update.status);
        validate_patient(&updated)?;

        *slot = updated.clone();
        Ok(updated)
    }

    /// # Errors
    ///
    /// [`BillingError::NotFound`] for an unknown id.
    pub fn delete_patient(&mut self, id: &str) -> BillingResult<Patient> {
        remove_by(&mut self.patients, "patient", id, |p| p.id.as_str())
    }
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn highest_sequence<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> u32 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Sequence and id following `last`. The caller commits the sequence only
/// once the new record is stored.
fn next_id(prefix: &str, last: u32) -> (u32, String) {
    let sequence = last.saturating_add(1);
    (sequence, format!("{prefix}{sequence:03}"))
}

fn check_invoice_update(current: &Invoice, update: &InvoiceUpdate) -> BillingResult<()> {
    match (current.status, update.status) {
        (InvoiceStatus::Paid, Some(status)) if status != InvoiceStatus::Paid => {
            return Err(BillingError::Validation(format!(
                "invoice {} is paid and cannot move to {status}",
                current.id
            )));
        }
        (status, Some(InvoiceStatus::Paid)) if status != InvoiceStatus::Paid => {
            return Err(BillingError::Validation(
                "invoices are marked paid by recording a payment".to_string(),
            ));
        }
        _ => {}
    }

    let settled = matches!(current.status, InvoiceStatus::Paid | InvoiceStatus::Cancelled);
    if settled && update.amount.is_some_and(|amount| amount != current.amount) {
        return Err(BillingError::Validation(format!(
            "invoice {} is {} and its amount cannot change",
            current.id, current.status
        )));
    }
    Ok(())
}

fn remove_by<T, F>(records: &mut Vec<T>, entity: &'static str, id: &str, key: F) -> BillingResult<T>
where
    F: Fn(&T) -> &str,
{
    let position = records
        .iter()
        .position(|r| key(r) == id)
        .ok_or_else(|| BillingError::not_found(entity, id))?;
    Ok(records.remove(position))
}

fn require_text(field: &str, value: &str) -> BillingResult<()> {
    if value.trim().is_empty() {
        return Err(BillingError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_currency(field: &str, value: Decimal) -> BillingResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BillingError::Validation(format!("{field} must not be negative")));
    }
    if value > MAX_CURRENCY {
        return Err(BillingError::Validation(format!(
            "{field} must not exceed {MAX_CURRENCY}"
        )));
    }
    Ok(())
}

fn require_email(value: &str) -> BillingResult<()> {
    require_text("email", value)?;
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !valid {
        return Err(BillingError::Validation(format!("email {value:?} is not valid")));
    }
    Ok(())
}

fn validate_procedure(p: &Procedure) -> BillingResult<()> {
    require_text("name", &p.name)?;
    require_text("category", &p.category)?;
    require_text("code", &p.code)
}

fn validate_surgery(s: &Surgery) -> BillingResult<()> {
    require_text("patientName", &s.patient_name)?;
    require_text("patientId", &s.patient_id)?;
    require_text("procedure", &s.procedure)?;
    require_text("surgeon", &s.surgeon)?;
    require_text("time", &s.time)?;
    require_text("room", &s.room)?;
    require_currency("baseValue", s.base_value)
}

fn validate_invoice(i: &Invoice) -> BillingResult<()> {
    require_text("surgeryId", &i.surgery_id)?;
    require_text("patientName", &i.patient_name)?;
    require_text("patientId", &i.patient_id)?;
    require_text("procedure", &i.procedure)?;
    require_currency("amount", i.amount)
}

fn validate_patient(p: &Patient) -> BillingResult<()> {
    require_text("name", &p.name)?;
    require_email(&p.email)?;
    require_text("phone", &p.phone)?;
    require_text("gender", &p.gender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Complexity, ProcedureType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_surgery(base: i64, complexity: Complexity) -> NewSurgery {
        NewSurgery {
            patient_name: "Pedro Oliveira".to_string(),
            patient_id: "PAC003".to_string(),
            procedure: "Hernioplastia Inguinal".to_string(),
            surgeon: "Dr. Maria Santos".to_string(),
            date: date(2024, 2, 1),
            time: "09:00".to_string(),
            complexity,
            base_value: Decimal::from(base),
            room: "Centro Cirúrgico 2".to_string(),
            duration: "75 min".to_string(),
            notes: None,
        }
    }

    fn new_invoice(surgery_id: &str, amount: Option<Decimal>) -> NewInvoice {
        NewInvoice {
            surgery_id: surgery_id.to_string(),
            patient_name: "Pedro Oliveira".to_string(),
            patient_id: "PAC003".to_string(),
            procedure: "Hernioplastia Inguinal".to_string(),
            surgeon: "Dr. Maria Santos".to_string(),
            surgery_date: date(2024, 2, 1),
            issue_date: date(2024, 2, 1),
            due_date: date(2024, 3, 1),
            amount,
            notes: None,
        }
    }

    #[test]
    fn test_next_id_continues_sequence() {
        let last = highest_sequence("CIR", ["CIR001", "CIR004", "X9"].into_iter());
        assert_eq!(next_id("CIR", last), (5, "CIR005".to_string()));
        assert_eq!(next_id("PAC", highest_sequence("PAC", std::iter::empty())).1, "PAC001");
    }

    #[test]
    fn test_deleted_ids_are_not_reissued() {
        let mut store = BillingStore::seeded().unwrap();
        let created = store.create_surgery(new_surgery(5000, Complexity::High)).unwrap();
        assert_eq!(created.id, "CIR005");
        store.delete_surgery("CIR005").unwrap();

        let next = store.create_surgery(new_surgery(5000, Complexity::Low)).unwrap();
        assert_eq!(next.id, "CIR006");

        store.delete_invoice("FAT004").unwrap();
        let invoice = store.create_invoice(new_invoice("CIR006", None)).unwrap();
        assert_eq!(invoice.id, "FAT005");
    }

    #[test]
    fn test_rejected_create_does_not_consume_an_id() {
        let mut store = BillingStore::seeded().unwrap();
        assert!(store.create_surgery(new_surgery(-1, Complexity::Low)).is_err());
        let surgery = store.create_surgery(new_surgery(1000, Complexity::Low)).unwrap();
        assert_eq!(surgery.id, "CIR005");
    }

    #[test]
    fn test_create_surgery_prices_and_schedules() {
        let mut store = BillingStore::seeded().unwrap();
        let surgery = store.create_surgery(new_surgery(5000, Complexity::High)).unwrap();
        assert_eq!(surgery.id, "CIR005");
        assert_eq!(surgery.complexity_multiplier, Decimal::new(18, 1));
        assert_eq!(surgery.final_value, Decimal::from(9000));
        assert_eq!(surgery.status, SurgeryStatus::Scheduled);
        assert_eq!(store.surgeries().len(), 5);
    }

    #[test]
    fn test_create_surgery_rejects_negative_base() {
        let mut store = BillingStore::seeded().unwrap();
        let err = store.create_surgery(new_surgery(-1, Complexity::Low)).unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
        assert_eq!(store.surgeries().len(), 4);
    }

    #[test]
    fn test_create_surgery_rejects_oversized_base() {
        let mut store = BillingStore::seeded().unwrap();
        let mut input = new_surgery(0, Complexity::High);
        input.base_value = Decimal::MAX;
        let err = store.create_surgery(input.clone()).unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));

        input.base_value = MAX_CURRENCY + Decimal::ONE;
        input.complexity = Complexity::Low;
        assert!(store.create_surgery(input.clone()).is_err());

        input.base_value = MAX_CURRENCY;
        input.complexity = Complexity::High;
        let priced = store.create_surgery(input).unwrap();
        assert_eq!(priced.final_value, MAX_CURRENCY * Decimal::new(18, 1));
        assert_eq!(store.surgeries().len(), 5);
    }

    #[test]
    fn test_update_surgery_rejects_oversized_base() {
        let mut store = BillingStore::seeded().unwrap();
        let err = store
            .update_surgery(
                "CIR004",
                SurgeryUpdate {
                    base_value: Some(Decimal::MAX),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
        assert_eq!(store.surgery("CIR004").unwrap().final_value, Decimal::from(14400));
    }

    #[test]
    fn test_update_surgery_keeps_price_unless_inputs_change() {
        let mut store = BillingStore::seeded().unwrap();
        let moved = store
            .update_surgery(
                "CIR002",
                SurgeryUpdate {
                    room: Some("Centro Cirúrgico 3".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(moved.final_value, Decimal::from(5200));

        let upgraded = store
            .update_surgery(
                "CIR002",
                SurgeryUpdate {
                    complexity: Some(Complexity::High),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(upgraded.final_value, Decimal::from(7200));
        assert_eq!(store.surgery("CIR002").unwrap().complexity_multiplier, Decimal::new(18, 1));
    }

    #[test]
    fn test_rejected_update_leaves_record_unchanged() {
        let mut store = BillingStore::seeded().unwrap();
        let err = store
            .update_procedure(
                "PROC001",
                ProcedureUpdate {
                    name: Some("   ".to_string()),
                    procedure_type: Some(ProcedureType::Exam),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
        let kept = store.procedure("PROC001").unwrap();
        assert_eq!(kept.name, "Apendicectomia");
        assert_eq!(kept.procedure_type, ProcedureType::Surgery);
    }

    #[test]
    fn test_invoice_amount_defaults_to_surgery_value() {
        let mut store = BillingStore::seeded().unwrap();
        let invoice = store.create_invoice(new_invoice("CIR004", None)).unwrap();
        assert_eq!(invoice.id, "FAT005");
        assert_eq!(invoice.amount, Decimal::from(14400));
        assert_eq!(invoice.status, InvoiceStatus::Pending);

        let err = store.create_invoice(new_invoice("CIR999", None)).unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));

        let explicit = store
            .create_invoice(new_invoice("CIR999", Some(Decimal::from(1200))))
            .unwrap();
        assert_eq!(explicit.id, "FAT006");
    }

    #[test]
    fn test_invoice_amount_is_capped() {
        let mut store = BillingStore::seeded().unwrap();
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let err = store.create_invoice(new_invoice("CIR004", Some(half))).unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
        assert_eq!(store.invoices().len(), 4);

        let err = store
            .update_invoice(
                "FAT002",
                InvoiceUpdate {
                    amount: Some(half),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
        assert_eq!(store.invoice("FAT002").unwrap().amount, Decimal::from(5200));
    }

    #[test]
    fn test_paid_invoice_cannot_return_to_open_status() {
        let mut store = BillingStore::seeded().unwrap();
        for status in [InvoiceStatus::Pending, InvoiceStatus::Overdue, InvoiceStatus::Cancelled] {
            let err = store
                .update_invoice(
                    "FAT001",
                    InvoiceUpdate {
                        status: Some(status),
                        ..Default::default()
                    },
                )
                .unwrap_err();
            assert!(matches!(err, BillingError::Validation(_)));
        }
        let kept = store.invoice("FAT001").unwrap();
        assert_eq!(kept.status, InvoiceStatus::Paid);
        assert_eq!(kept.payment_method.as_deref(), Some("Cartão de Crédito"));
        assert_eq!(kept.payment_date, Some(date(2024, 1, 20)));

        let noted = store
            .update_invoice(
                "FAT001",
                InvoiceUpdate {
                    status: Some(InvoiceStatus::Paid),
                    notes: Some("conferido".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(noted.notes.as_deref(), Some("conferido"));
    }

    #[test]
    fn test_settled_invoice_amount_is_frozen() {
        let mut store = BillingStore::seeded().unwrap();
        let change = |amount: i64| InvoiceUpdate {
            amount: Some(Decimal::from(amount)),
            ..Default::default()
        };
        assert!(store.update_invoice("FAT001", change(1)).is_err());
        assert_eq!(store.invoice("FAT001").unwrap().amount, Decimal::from(3000));
        // restating the stored amount is not a change
        assert!(store.update_invoice("FAT001", change(3000)).is_ok());

        store
            .update_invoice(
                "FAT003",
                InvoiceUpdate {
                    status: Some(InvoiceStatus::Cancelled),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(store.update_invoice("FAT003", change(100)).is_err());
        let open = store.update_invoice("FAT002", change(5000)).unwrap();
        assert_eq!(open.amount, Decimal::from(5000));
    }

    #[test]
    fn test_record_payment_settles_pending_invoice_once() {
        let mut store = BillingStore::seeded().unwrap();
        let payment = PaymentRecord {
            payment_method: "PIX".to_string(),
            payment_date: date(2024, 2, 10),
        };
        let paid = store.record_payment("FAT002", payment.clone()).unwrap();
        assert_eq!(paid.status, InvoiceStatus::Paid);
        assert_eq!(paid.payment_method.as_deref(), Some("PIX"));

        let again = store.record_payment("FAT002", payment).unwrap_err();
        assert!(matches!(again, BillingError::Validation(_)));
    }

    #[test]
    fn test_update_cannot_mark_invoice_paid() {
        let mut store = BillingStore::seeded().unwrap();
        let err = store
            .update_invoice(
                "FAT003",
                InvoiceUpdate {
                    status: Some(InvoiceStatus::Paid),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
        let cancelled = store
            .update_invoice(
                "FAT003",
                InvoiceUpdate {
                    status: Some(InvoiceStatus::Cancelled),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cancelled.status, InvoiceStatus::Cancelled);
    }

    #[test]
    fn test_create_patient_validates_email() {
        let mut store = BillingStore::seeded().unwrap();
        let mut input = NewPatient {
            name: "Lucia Prado".to_string(),
            email: "lucia.prado".to_string(),
            phone: "(11) 91234-5678".to_string(),
            birth_date: date(1990, 4, 2),
            gender: "Feminino".to_string(),
            address: String::new(),
            city: String::new(),
            zip_code: String::new(),
            emergency_contact: String::new(),
            emergency_phone: String::new(),
            insurance_provider: None,
            insurance_number: None,
            medical_history: Vec::new(),
        };
        assert!(store.create_patient(input.clone(), date(2024, 6, 1)).is_err());

        input.email = "lucia.prado@email.com".to_string();
        let patient = store.create_patient(input, date(2024, 6, 1)).unwrap();
        assert_eq!(patient.id, "PAC005");
        assert_eq!(patient.status, ActivityStatus::Active);
        assert_eq!(patient.registration_date, date(2024, 6, 1));
        assert_eq!(patient.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let mut store = BillingStore::seeded().unwrap();
        assert_eq!(
            store.delete_patient("PAC404").unwrap_err(),
            BillingError::not_found("patient", "PAC404")
        );
        let removed = store.delete_patient("PAC004").unwrap();
        assert_eq!(removed.name, "Maria Fernandes");
        assert!(store.patient("PAC004").is_none());
    }
}
