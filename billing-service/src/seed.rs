//! Compiled-in seed lists the in-memory store starts from

use serde::de::DeserializeOwned;

use crate::error::{BillingError, BillingResult};
use crate::models::{Invoice, Patient, Procedure, Surgery};

const PROCEDURES: &str = include_str!("../seed/procedures.json");
const SURGERIES: &str = include_str!("../seed/surgeries.json");
const INVOICES: &str = include_str!("../seed/invoices.json");
const PATIENTS: &str = include_str!("../seed/patients.json");

#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub procedures: Vec<Procedure>,
    pub surgeries: Vec<Surgery>,
    pub invoices: Vec<Invoice>,
    pub patients: Vec<Patient>,
}

impl SeedData {
    /// Parse the embedded seed lists.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Seed`] if an embedded list does not match the
    /// record shape.
    pub fn load() -> BillingResult<Self> {
        Ok(Self {
            procedures: parse("procedures", PROCEDURES)?,
            surgeries: parse("surgeries", SURGERIES)?,
            invoices: parse("invoices", INVOICES)?,
            patients: parse("patients", PATIENTS)?,
        })
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> BillingResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| BillingError::Seed(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, SurgeryStatus};

    #[test]
    fn test_seed_lists_load() {
        let seed = SeedData::load().unwrap();
        assert_eq!(seed.procedures.len(), 6);
        assert_eq!(seed.surgeries.len(), 4);
        assert_eq!(seed.invoices.len(), 4);
        assert_eq!(seed.patients.len(), 4);
    }

    #[test]
    fn test_seed_keeps_optional_fields() {
        let seed = SeedData::load().unwrap();
        let paid = &seed.invoices[0];
        assert_eq!(paid.status, InvoiceStatus::Paid);
        assert_eq!(paid.payment_method.as_deref(), Some("Cartão de Crédito"));
        assert!(seed.invoices[1].payment_date.is_none());
        assert!(seed.patients[2].insurance_provider.is_none());
        assert_eq!(seed.surgeries[3].status, SurgeryStatus::InProgress);
    }
}
