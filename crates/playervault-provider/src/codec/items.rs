//! Item stack, enchantment and inventory conversions.
//!
//! Every element decodes on its own. An item name the catalog does not know
//! becomes an empty slot and an unknown enchantment is dropped from its stack;
//! neither affects the siblings around it.

use playervault_types::{EnchantmentRecord, InventoryRecord, ItemStackRecord};

use super::DecodeIssue;
use crate::catalog::Catalog;
use crate::live::{Enchantment, ItemStack, LiveInventory};

/// Convert a live stack to its record. Empty stacks become the zero record.
pub fn stack_to_record(stack: &ItemStack) -> ItemStackRecord {
    let Some(item) = stack.item.as_ref().filter(|_| !stack.is_empty()) else {
        return ItemStackRecord::default();
    };
    ItemStackRecord {
        name: item.name.clone(),
        meta: item.meta,
        count: stack.count,
        custom_name: stack.custom_name.clone(),
        lore: stack.lore.clone(),
        damage: stack.damage,
        anvil_cost: stack.anvil_cost,
        data: stack.values.clone(),
        enchantments: enchantments_to_records(&stack.enchantments),
    }
}

/// Convert a record back to a live stack.
///
/// The zero record, or any record without an item name, decodes to the empty
/// stack. An item the catalog cannot resolve also decodes to the empty stack
/// and is reported in `issues`.
pub fn stack_from_record(
    record: &ItemStackRecord,
    catalog: &dyn Catalog,
    issues: &mut Vec<DecodeIssue>,
) -> ItemStack {
    if record.name.is_empty() {
        return ItemStack::default();
    }
    let Some(item) = catalog.item(&record.name, record.meta) else {
        issues.push(DecodeIssue::UnknownItem {
            name: record.name.clone(),
            meta: record.meta,
        });
        return ItemStack::default();
    };

    let mut stack = ItemStack::new(item, record.count)
        .with_custom_name(record.custom_name.clone())
        .with_lore(record.lore.iter().cloned())
        .with_damage(record.damage)
        .with_anvil_cost(record.anvil_cost);
    stack.values.clone_from(&record.data);

    for ench in &record.enchantments {
        match catalog.enchantment(&ench.name) {
            Some(kind) => stack = stack.with_enchantment(Enchantment::new(kind, ench.level)),
            None => issues.push(DecodeIssue::UnknownEnchantment {
                name: ench.name.clone(),
            }),
        }
    }
    stack
}

/// Convert enchantments to records, preserving order.
pub fn enchantments_to_records(enchantments: &[Enchantment]) -> Vec<EnchantmentRecord> {
    enchantments
        .iter()
        .map(|e| EnchantmentRecord {
            name: e.kind.name.clone(),
            level: e.level,
        })
        .collect()
}

/// Convert a slice of stacks, keeping empty slots in place.
pub fn stacks_to_records(stacks: &[ItemStack]) -> Vec<ItemStackRecord> {
    stacks.iter().map(stack_to_record).collect()
}

/// Decode a slice of stack records, keeping slot positions.
pub fn stacks_from_records(
    records: &[ItemStackRecord],
    catalog: &dyn Catalog,
    issues: &mut Vec<DecodeIssue>,
) -> Vec<ItemStack> {
    records
        .iter()
        .map(|r| stack_from_record(r, catalog, issues))
        .collect()
}

/// Convert a live inventory to its record.
pub fn inventory_to_record(inventory: &LiveInventory) -> InventoryRecord {
    InventoryRecord {
        items: stacks_to_records(&inventory.items),
        boots: stack_to_record(&inventory.boots),
        leggings: stack_to_record(&inventory.leggings),
        chestplate: stack_to_record(&inventory.chestplate),
        helmet: stack_to_record(&inventory.helmet),
        off_hand: stack_to_record(&inventory.off_hand),
        main_hand_slot: inventory.main_hand_slot,
    }
}

/// Decode an inventory record. Never fails as a whole.
pub fn inventory_from_record(
    record: &InventoryRecord,
    catalog: &dyn Catalog,
    issues: &mut Vec<DecodeIssue>,
) -> LiveInventory {
    LiveInventory {
        items: stacks_from_records(&record.items, catalog, issues),
        helmet: stack_from_record(&record.helmet, catalog, issues),
        chestplate: stack_from_record(&record.chestplate, catalog, issues),
        leggings: stack_from_record(&record.leggings, catalog, issues),
        boots: stack_from_record(&record.boots, catalog, issues),
        off_hand: stack_from_record(&record.off_hand, catalog, issues),
        main_hand_slot: record.main_hand_slot,
    }
}

#[cfg(test)]
mod tests {
    use playervault_types::PropertyValue;

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::live::{EnchantmentType, ItemType};

    fn catalog() -> StaticCatalog {
        StaticCatalog::vanilla()
    }

    fn sword() -> ItemStack {
        ItemStack::new(ItemType::new("minecraft:diamond_sword", 0), 1)
            .with_custom_name("Needle")
            .with_lore(["forged in fire", "quenched in ice"])
            .with_damage(12)
            .with_anvil_cost(3)
            .with_value("soulbound", true)
            .with_value("kills", 41.0)
            .with_enchantment(Enchantment::new(EnchantmentType::new("sharpness"), 5))
            .with_enchantment(Enchantment::new(EnchantmentType::new("unbreaking"), 3))
    }

    #[test]
    fn empty_stacks_encode_to_zero_record() {
        let empties = [
            ItemStack::default(),
            ItemStack::new(ItemType::new("minecraft:apple", 0), 0),
            ItemStack {
                count: 4,
                custom_name: String::from("ghost"),
                ..ItemStack::default()
            },
        ];
        for stack in &empties {
            assert!(stack_to_record(stack).is_empty());
        }
    }

    #[test]
    fn zero_record_decodes_to_empty_stack() {
        let mut issues = Vec::new();
        let stack = stack_from_record(&ItemStackRecord::default(), &catalog(), &mut issues);
        assert_eq!(stack, ItemStack::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn full_stack_survives_conversion() {
        let stack = sword();
        let record = stack_to_record(&stack);
        assert_eq!(record.name, "minecraft:diamond_sword");
        assert_eq!(record.data.get("soulbound"), Some(&PropertyValue::Bool(true)));

        let mut issues = Vec::new();
        let back = stack_from_record(&record, &catalog(), &mut issues);
        assert_eq!(back, stack);
        assert!(issues.is_empty());
    }

    #[test]
    fn unknown_item_becomes_empty_slot() {
        let record = ItemStackRecord {
            name: String::from("modded:laser"),
            count: 1,
            ..ItemStackRecord::default()
        };
        let mut issues = Vec::new();
        let stack = stack_from_record(&record, &catalog(), &mut issues);
        assert!(stack.is_empty());
        assert_eq!(
            issues,
            vec![DecodeIssue::UnknownItem {
                name: String::from("modded:laser"),
                meta: 0
            }]
        );
    }

    #[test]
    fn unknown_enchantment_is_dropped_alone() {
        let mut record = stack_to_record(&sword());
        record.enchantments.insert(
            1,
            EnchantmentRecord {
                name: String::from("telepathy"),
                level: 1,
            },
        );

        let mut issues = Vec::new();
        let stack = stack_from_record(&record, &catalog(), &mut issues);
        let names: Vec<&str> = stack
            .enchantments
            .iter()
            .map(|e| e.kind.name.as_str())
            .collect();
        assert_eq!(names, vec!["sharpness", "unbreaking"]);
        assert_eq!(
            issues,
            vec![DecodeIssue::UnknownEnchantment {
                name: String::from("telepathy")
            }]
        );
    }

    #[test]
    fn bad_slot_does_not_abort_inventory() {
        let inventory = LiveInventory {
            items: vec![
                ItemStack::new(ItemType::new("minecraft:apple", 0), 5),
                ItemStack::default(),
                ItemStack::new(ItemType::new("minecraft:torch", 0), 64),
            ],
            helmet: ItemStack::new(ItemType::new("minecraft:diamond_helmet", 0), 1),
            off_hand: ItemStack::new(ItemType::new("minecraft:shield", 0), 1),
            main_hand_slot: 2,
            ..LiveInventory::default()
        };
        let mut record = inventory_to_record(&inventory);
        if let Some(first) = record.items.first_mut() {
            first.name = String::from("modded:unobtainium");
        }

        let mut issues = Vec::new();
        let back = inventory_from_record(&record, &catalog(), &mut issues);
        assert_eq!(back.items.len(), 3);
        assert!(back.items.first().is_some_and(ItemStack::is_empty));
        assert_eq!(back.items.get(2), inventory.items.get(2));
        assert_eq!(back.helmet, inventory.helmet);
        assert_eq!(back.off_hand, inventory.off_hand);
        assert_eq!(back.main_hand_slot, 2);
        assert_eq!(issues.len(), 1);
    }
}
