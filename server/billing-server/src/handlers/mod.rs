pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod patients;
pub mod procedures;
pub mod surgeries;
