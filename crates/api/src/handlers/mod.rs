pub mod animal;
pub mod entity;
pub mod translation;
