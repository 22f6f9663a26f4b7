pub mod agenda;
pub mod new;
pub mod rm;
pub mod toggle;
pub mod update;
