use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed enum whose wire form is the label shown on the billing pages
macro_rules! labeled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum! {
    /// Complexity tier; drives the surgery price multiplier
    Complexity {
        Low => "Baixa",
        Medium => "Média",
        High => "Alta",
    }
}

labeled_enum! {
    /// Kind of catalogued procedure
    ProcedureType {
        Surgery => "Cirurgia",
        Consultation => "Consulta",
        Exam => "Exame",
    }
}

labeled_enum! {
    /// Active/inactive flag shared by procedures and patients
    ActivityStatus {
        Active => "Ativo",
        Inactive => "Inativo",
    }
}

labeled_enum! {
    /// Surgery lifecycle status
    SurgeryStatus {
        Scheduled => "Agendada",
        InProgress => "Em Andamento",
        Completed => "Concluída",
        Cancelled => "Cancelada",
    }
}

labeled_enum! {
    /// Invoice payment status
    InvoiceStatus {
        Pending => "Pendente",
        Paid => "Pago",
        Overdue => "Vencida",
        Cancelled => "Cancelada",
    }
}

/// Catalogued procedure (surgery, consultation or exam)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub procedure_type: ProcedureType,
    pub category: String,
    pub code: String, // ICD-9-CM / SUS table code
    pub description: String,
    pub complexity: Complexity,
    pub estimated_time: String,
    pub status: ActivityStatus,
}

/// Scheduled or performed surgery with its priced value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Surgery {
    pub id: String,
    pub patient_name: String,
    pub patient_id: String,
    pub procedure: String,
    pub surgeon: String,
    pub date: NaiveDate,
    pub time: String,
    pub complexity: Complexity,
    pub base_value: Decimal,
    pub complexity_multiplier: Decimal,
    /// Stored at creation; never recomputed on read
    pub final_value: Decimal,
    pub status: SurgeryStatus,
    pub room: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Invoice issued for a surgery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub patient_name: String,
    pub patient_id: String,
    pub surgery_id: String,
    pub procedure: String,
    pub surgeon: String,
    pub surgery_date: NaiveDate,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Registered patient with cached billing counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_number: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    pub status: ActivityStatus,
    pub registration_date: NaiveDate,
    pub total_surgeries: u32,
    pub total_invoices: u32,
    pub total_amount: Decimal,
}

/// Input for registering a procedure
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProcedure {
    pub name: String,
    #[serde(rename = "type")]
    pub procedure_type: ProcedureType,
    pub category: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub complexity: Complexity,
    #[serde(default)]
    pub estimated_time: String,
}

/// Partial update for a procedure; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub procedure_type: Option<ProcedureType>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub complexity: Option<Complexity>,
    pub estimated_time: Option<String>,
    pub status: Option<ActivityStatus>,
}

/// Input for scheduling a surgery; the price is derived from base value and complexity
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSurgery {
    pub patient_name: String,
    pub patient_id: String,
    pub procedure: String,
    pub surgeon: String,
    pub date: NaiveDate,
    pub time: String,
    pub complexity: Complexity,
    pub base_value: Decimal,
    pub room: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryUpdate {
    pub surgeon: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub complexity: Option<Complexity>,
    pub base_value: Option<Decimal>,
    pub status: Option<SurgeryStatus>,
    pub room: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

/// Input for issuing an invoice against a surgery
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub surgery_id: String,
    pub patient_name: String,
    pub patient_id: String,
    pub procedure: String,
    pub surgeon: String,
    pub surgery_date: NaiveDate,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Defaults to the referenced surgery's final value
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdate {
    pub due_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
}

/// Payment settling an invoice
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub payment_method: String,
    pub payment_date: NaiveDate,
}

/// Input for registering a patient
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub emergency_phone: String,
    #[serde(default)]
    pub insurance_provider: Option<String>,
    #[serde(default)]
    pub insurance_number: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub medical_history: Option<Vec<String>>,
    pub status: Option<ActivityStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for status in SurgeryStatus::ALL {
            assert_eq!(SurgeryStatus::from_label(status.label()), Some(*status));
        }
        assert_eq!(InvoiceStatus::from_label("Vencida"), Some(InvoiceStatus::Overdue));
        assert_eq!(Complexity::from_label("Media"), None);
    }

    #[test]
    fn test_enums_serialize_as_labels() {
        let json = serde_json::to_string(&SurgeryStatus::InProgress).unwrap();
        assert_eq!(json, "\"Em Andamento\"");
        let parsed: Complexity = serde_json::from_str("\"Média\"").unwrap();
        assert_eq!(parsed, Complexity::Medium);
    }

    #[test]
    fn test_procedure_type_field_is_named_type() {
        let value = serde_json::json!({
            "id": "PROC009",
            "name": "Ultrassom Abdominal",
            "type": "Exame",
            "category": "Diagnóstico",
            "code": "88.76",
            "description": "Exame de ultrassonografia do abdome",
            "complexity": "Baixa",
            "estimatedTime": "20 min",
            "status": "Ativo"
        });
        let procedure: Procedure = serde_json::from_value(value).unwrap();
        assert_eq!(procedure.procedure_type, ProcedureType::Exam);
        assert_eq!(procedure.estimated_time, "20 min");
    }
}
