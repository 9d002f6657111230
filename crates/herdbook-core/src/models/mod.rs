//! Data models for the farm-management API.
//!
//! This module contains the wire types exchanged with the API:
//!
//! - `User`: the authenticated account profile
//! - `Animal`, `AnimalType`, `DeletionCheck`: livestock records
//! - `PregnancyTracking`, `BreederNote`: per-animal sub-records
//! - `Sale`, `Purchase`, `Expense`: finance records
//! - `StatsResponse`: aggregated dashboard figures
//!
//! Write payloads (`New*` / `*Patch`) serialize only the fields that are
//! set, matching the API's partial-update semantics.

pub mod animal;
pub mod finance;
pub mod pregnancy;
pub mod stats;
pub mod user;

pub use animal::{
    Animal, AnimalPatch, AnimalStatus, AnimalType, AnimalTypePatch, DeletionCheck, Gender,
    NewAnimal, NewAnimalType,
};
pub use finance::{
    Expense, ExpensePatch, ExpenseType, NewExpense, NewPurchase, NewSale, Purchase, PurchasePatch,
    Sale, SalePatch,
};
pub use pregnancy::{
    BreederNote, NewNote, NewPregnancy, NotePatch, PregnancyPatch, PregnancyStatus,
    PregnancyTracking,
};
pub use stats::{AnimalStats, PeriodStats, StatsResponse, TypeCount};
pub use user::User;
