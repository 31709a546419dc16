//! Shared record types for the Playervault persistence layer.
//!
//! This crate defines the flat, serialization-ready shape of a player's
//! persisted state. It has no I/O and no knowledge of the live game model;
//! `playervault-provider` converts between the two. Record types are exported
//! to `TypeScript` via `ts-rs` for tooling that inspects player files.
//!
//! # Modules
//!
//! - [`ids`] -- The [`PlayerId`] identity wrapper
//! - [`enums`] -- [`GameMode`] and [`Dimension`] with their persisted id tables
//! - [`records`] -- [`PlayerRecord`] and its nested item, inventory and effect records
//! - [`lenient`] -- Integer decoding that also accepts float literals
//! - [`finite`] -- Float encoding that refuses NaN and infinity

pub mod enums;
pub mod finite;
pub mod ids;
pub mod lenient;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use enums::{Dimension, GameMode};
pub use ids::PlayerId;
pub use records::{
    EffectRecord, EnchantmentRecord, InventoryRecord, ItemStackRecord, PlayerRecord,
    PropertyValue, Vec3,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::PlayerId::export_all();
        let _ = crate::enums::GameMode::export_all();
        let _ = crate::enums::Dimension::export_all();
        let _ = crate::records::Vec3::export_all();
        let _ = crate::records::PropertyValue::export_all();
        let _ = crate::records::EnchantmentRecord::export_all();
        let _ = crate::records::ItemStackRecord::export_all();
        let _ = crate::records::InventoryRecord::export_all();
        let _ = crate::records::EffectRecord::export_all();
        let _ = crate::records::PlayerRecord::export_all();
    }
}
