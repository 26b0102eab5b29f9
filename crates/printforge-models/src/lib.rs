//! Core data models for Printforge.
//!
//! This crate provides the record types shared across the workspace:
//! quotes and their workflow status, production jobs, and the reference
//! data (materials, machines, cost constants, customers) the calculators
//! consume.

pub mod catalog;
pub mod ids;
pub mod production;
pub mod quote;

// Re-export main types
pub use catalog::{CostConstant, Customer, Machine, Material, PrintType};
pub use ids::{ConstantId, CustomerId, JobId, MachineId, MaterialId, QuoteId};
pub use production::{JobPriority, JobStatus, ProductionJob};
pub use quote::{ConsumableCharge, CostBreakdown, PrintParameters, Quote, QuoteStatus};
