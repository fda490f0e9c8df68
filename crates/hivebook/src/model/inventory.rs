//! Equipment and feed counters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The single inventory record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub supers: u32,
    pub boxes: u32,
    pub feeders: u32,
    /// Litres of syrup.
    #[serde(rename = "syrupL")]
    pub syrup_l: u32,
}

/// One of the four inventory counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryItem {
    Supers,
    Boxes,
    Feeders,
    SyrupL,
}

impl InventoryItem {
    pub const ALL: [InventoryItem; 4] = [
        InventoryItem::Supers,
        InventoryItem::Boxes,
        InventoryItem::Feeders,
        InventoryItem::SyrupL,
    ];

    /// Wire name of the counter.
    pub fn key(&self) -> &'static str {
        match self {
            InventoryItem::Supers => "supers",
            InventoryItem::Boxes => "boxes",
            InventoryItem::Feeders => "feeders",
            InventoryItem::SyrupL => "syrupL",
        }
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InventoryItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supers" => Ok(InventoryItem::Supers),
            "boxes" => Ok(InventoryItem::Boxes),
            "feeders" => Ok(InventoryItem::Feeders),
            "syrupl" | "syrup" => Ok(InventoryItem::SyrupL),
            _ => Err(format!(
                "Unknown inventory item: {}. Use supers, boxes, feeders, or syrupL.",
                s
            )),
        }
    }
}

impl Inventory {
    pub fn get(&self, item: InventoryItem) -> u32 {
        match item {
            InventoryItem::Supers => self.supers,
            InventoryItem::Boxes => self.boxes,
            InventoryItem::Feeders => self.feeders,
            InventoryItem::SyrupL => self.syrup_l,
        }
    }

    pub fn set(&mut self, item: InventoryItem, value: u32) {
        match item {
            InventoryItem::Supers => self.supers = value,
            InventoryItem::Boxes => self.boxes = value,
            InventoryItem::Feeders => self.feeders = value,
            InventoryItem::SyrupL => self.syrup_l = value,
        }
    }

    /// Add `delta` to a counter, never dropping below zero.
    pub fn adjust(&mut self, item: InventoryItem, delta: i64) -> u32 {
        let next = (i64::from(self.get(item)) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.set(item, next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_clamps_at_zero() {
        let mut inventory = Inventory {
            supers: 2,
            ..Inventory::default()
        };
        assert_eq!(inventory.adjust(InventoryItem::Supers, -1), 1);
        assert_eq!(inventory.adjust(InventoryItem::Supers, -5), 0);
        assert_eq!(inventory.adjust(InventoryItem::Feeders, 3), 3);
    }

    #[test]
    fn test_item_parsing() {
        assert_eq!("SyrupL".parse::<InventoryItem>(), Ok(InventoryItem::SyrupL));
        assert_eq!("boxes".parse::<InventoryItem>(), Ok(InventoryItem::Boxes));
        assert!("frames".parse::<InventoryItem>().is_err());
    }

    #[test]
    fn test_syrup_wire_name() {
        let json = serde_json::to_value(Inventory::default()).unwrap();
        assert!(json.get("syrupL").is_some());
    }
}
