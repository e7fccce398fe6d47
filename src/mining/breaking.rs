//! Tool selection and face choice for the breaking executor.

use crate::core::{BlockPos, Command, Face, Inventory, Material, Vec3};

/// Command needed to bring the best tool for `material` into the hand, if
/// the active slot does not already hold it.
///
/// The whole inventory is scanned; ties favor the lower slot index and
/// only items strictly faster than the bare hand are worth a swap. Hotbar
/// hits are selected directly, deeper hits are swapped against the active
/// slot.
pub fn select_best_tool(inventory: &Inventory, material: Material) -> Option<Command> {
    let mut best: Option<(usize, f32)> = None;
    for (index, slot) in inventory.slots.iter().enumerate() {
        let Some(stack) = slot else { continue };
        let speed = stack.mining_speed(material);
        if speed > best.map_or(1.0, |(_, s)| s) {
            best = Some((index, speed));
        }
    }

    let (slot, _) = best?;
    if slot == inventory.selected {
        None
    } else if slot < inventory.hotbar_size {
        Some(Command::SelectSlot(slot))
    } else {
        Some(Command::SwapSlots {
            slot,
            hotbar: inventory.selected,
        })
    }
}

/// Face of `target` nearest the eye, by dominant axis offset.
pub fn nearest_face(eye: Vec3, target: BlockPos) -> Face {
    let center = target.center();
    let dx = eye.x - center.x;
    let dy = eye.y - center.y;
    let dz = eye.z - center.z;

    let ax = dx.abs();
    let ay = dy.abs();
    let az = dz.abs();

    if ay >= ax && ay >= az {
        if dy > 0.0 {
            Face::Up
        } else {
            Face::Down
        }
    } else if ax >= az {
        if dx > 0.0 {
            Face::East
        } else {
            Face::West
        }
    } else if dz > 0.0 {
        Face::South
    } else {
        Face::North
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ItemKind, ItemStack};
    use std::collections::HashMap;

    fn tool(speed: f32) -> Option<ItemStack> {
        let mut speeds = HashMap::new();
        speeds.insert(Material::STONE, speed);
        Some(ItemStack {
            kind: ItemKind::Tool { speeds },
            count: 1,
        })
    }

    #[test]
    fn test_best_tool_from_hotbar() {
        let mut inventory = Inventory::new(vec![None, tool(2.0), tool(6.0), None], 4);
        inventory.selected = 0;
        assert_eq!(
            select_best_tool(&inventory, Material::STONE),
            Some(Command::SelectSlot(2))
        );
    }

    #[test]
    fn test_best_tool_already_held() {
        let mut inventory = Inventory::new(vec![tool(6.0), tool(2.0)], 2);
        inventory.selected = 0;
        assert_eq!(select_best_tool(&inventory, Material::STONE), None);
    }

    #[test]
    fn test_ties_favor_lower_slot() {
        let mut inventory = Inventory::new(vec![None, tool(6.0), tool(6.0)], 3);
        inventory.selected = 0;
        assert_eq!(
            select_best_tool(&inventory, Material::STONE),
            Some(Command::SelectSlot(1))
        );
    }

    #[test]
    fn test_deep_slot_swaps_into_hand() {
        let mut inventory = Inventory::new(vec![tool(2.0), None, tool(6.0)], 2);
        inventory.selected = 0;
        assert_eq!(
            select_best_tool(&inventory, Material::STONE),
            Some(Command::SwapSlots { slot: 2, hotbar: 0 })
        );
    }

    #[test]
    fn test_no_tool_beats_bare_hand() {
        let mut inventory = Inventory::new(vec![tool(1.0), None], 2);
        inventory.selected = 1;
        assert_eq!(select_best_tool(&inventory, Material::STONE), None);
    }

    #[test]
    fn test_nearest_face_dominant_axis() {
        let target = BlockPos::new(0, 64, 0);
        // Eye above: top face.
        assert_eq!(
            nearest_face(Vec3::new(0.5, 66.5, 0.5), target),
            Face::Up
        );
        // Eye to the -X side: west face.
        assert_eq!(
            nearest_face(Vec3::new(-2.0, 64.5, 0.5), target),
            Face::West
        );
        // Eye to the +Z side: south face.
        assert_eq!(
            nearest_face(Vec3::new(0.5, 64.5, 3.0), target),
            Face::South
        );
    }
}
