//! Enum → badge lookup tables consumed by list views
//!
//! Every closed enum value has an entry. Labels arriving as free text go
//! through [`badge_for_label`], which falls back to the neutral badge for
//! anything it does not recognize.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    ActivityStatus, Complexity, Invoice, InvoiceStatus, Patient, Procedure, ProcedureType,
    Surgery, SurgeryStatus,
};

/// Colour tone; serialized as the style classes the dashboard applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Tone {
    #[serde(rename = "bg-medical-green/10 text-medical-green")]
    Success,
    #[serde(rename = "bg-warning/10 text-warning")]
    Warning,
    #[serde(rename = "bg-destructive/10 text-destructive")]
    Danger,
    #[serde(rename = "bg-info/10 text-info")]
    Info,
    #[serde(rename = "bg-muted text-muted-foreground")]
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Clock,
    CheckCircle,
    XCircle,
    Activity,
    Stethoscope,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Badge {
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl Badge {
    pub const NEUTRAL: Badge = Badge::tone(Tone::Muted);

    pub const fn tone(tone: Tone) -> Self {
        Self { tone, icon: None }
    }

    pub const fn with_icon(tone: Tone, icon: Icon) -> Self {
        Self {
            tone,
            icon: Some(icon),
        }
    }
}

pub fn complexity_badge(complexity: Complexity) -> Badge {
    match complexity {
        Complexity::Low => Badge::tone(Tone::Success),
        Complexity::Medium => Badge::tone(Tone::Warning),
        Complexity::High => Badge::tone(Tone::Danger),
    }
}

pub fn surgery_status_badge(status: SurgeryStatus) -> Badge {
    match status {
        SurgeryStatus::Scheduled => Badge::tone(Tone::Info),
        SurgeryStatus::InProgress => Badge::tone(Tone::Warning),
        SurgeryStatus::Completed => Badge::tone(Tone::Success),
        SurgeryStatus::Cancelled => Badge::tone(Tone::Danger),
    }
}

pub fn invoice_status_badge(status: InvoiceStatus) -> Badge {
    match status {
        InvoiceStatus::Pending => Badge::with_icon(Tone::Warning, Icon::Clock),
        InvoiceStatus::Paid => Badge::with_icon(Tone::Success, Icon::CheckCircle),
        InvoiceStatus::Overdue => Badge::with_icon(Tone::Danger, Icon::XCircle),
        InvoiceStatus::Cancelled => Badge::with_icon(Tone::Muted, Icon::XCircle),
    }
}

pub fn activity_status_badge(status: ActivityStatus) -> Badge {
    match status {
        ActivityStatus::Active => Badge::tone(Tone::Success),
        ActivityStatus::Inactive => Badge::tone(Tone::Muted),
    }
}

pub fn procedure_type_badge(procedure_type: ProcedureType) -> Badge {
    match procedure_type {
        ProcedureType::Surgery => Badge::with_icon(Tone::Muted, Icon::Activity),
        ProcedureType::Consultation => Badge::with_icon(Tone::Muted, Icon::Stethoscope),
        ProcedureType::Exam => Badge::with_icon(Tone::Muted, Icon::Search),
    }
}

/// Which lookup table a free-text label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Complexity,
    SurgeryStatus,
    InvoiceStatus,
    ActivityStatus,
    ProcedureType,
}

/// Badge for a label that may fall outside the closed set.
pub fn badge_for_label(kind: BadgeKind, label: &str) -> Badge {
    let known = match kind {
        BadgeKind::Complexity => Complexity::from_label(label).map(complexity_badge),
        BadgeKind::SurgeryStatus => SurgeryStatus::from_label(label).map(surgery_status_badge),
        BadgeKind::InvoiceStatus => InvoiceStatus::from_label(label).map(invoice_status_badge),
        BadgeKind::ActivityStatus => ActivityStatus::from_label(label).map(activity_status_badge),
        BadgeKind::ProcedureType => ProcedureType::from_label(label).map(procedure_type_badge),
    };
    known.unwrap_or(match kind {
        BadgeKind::InvoiceStatus => Badge::with_icon(Tone::Muted, Icon::Clock),
        BadgeKind::ProcedureType => Badge::with_icon(Tone::Muted, Icon::Search),
        _ => Badge::NEUTRAL,
    })
}

/// Badges shown on one list row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowBadges {
    pub status: Badge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Badge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Badge>,
}

pub trait Presentable {
    fn badges(&self) -> RowBadges;
}

impl Presentable for Procedure {
    fn badges(&self) -> RowBadges {
        RowBadges {
            status: activity_status_badge(self.status),
            complexity: Some(complexity_badge(self.complexity)),
            kind: Some(procedure_type_badge(self.procedure_type)),
        }
    }
}

impl Presentable for Surgery {
    fn badges(&self) -> RowBadges {
        RowBadges {
            status: surgery_status_badge(self.status),
            complexity: Some(complexity_badge(self.complexity)),
            kind: None,
        }
    }
}

impl Presentable for Invoice {
    fn badges(&self) -> RowBadges {
        RowBadges {
            status: invoice_status_badge(self.status),
            complexity: None,
            kind: None,
        }
    }
}

impl Presentable for Patient {
    fn badges(&self) -> RowBadges {
        RowBadges {
            status: activity_status_badge(self.status),
            complexity: None,
            kind: None,
        }
    }
}

/// Record plus its row badges, flattened into one JSON object
#[derive(Debug, Clone, Serialize)]
pub struct Presented<T> {
    #[serde(flatten)]
    pub record: T,
    pub badges: RowBadges,
}

impl<T: Presentable> Presented<T> {
    pub fn new(record: T) -> Self {
        let badges = record.badges();
        Self { record, badges }
    }
}
