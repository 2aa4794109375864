/// Domain profiles - Gateway

mod catalog;

pub use catalog::{DomainProfile, ProfileKind, REAL_ESTATE, VM0042_BASIC, VM0042_EXTENDED};
