//! Inventory item catalog. Items are value objects defined at process start;
//! each fulfills exactly one need type.

use serde::{Deserialize, Serialize};

use crate::needs::NeedType;

/// The closed set of inventory items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemId {
    Food,
    Water,
    Medicine,
    Toys,
}

impl ItemId {
    /// All items, in display order.
    pub const ALL: [ItemId; 4] = [ItemId::Food, ItemId::Water, ItemId::Medicine, ItemId::Toys];

    /// The full item record for this id.
    pub fn item(self) -> &'static Item {
        match self {
            ItemId::Food => &Item {
                id: ItemId::Food,
                name: "Food",
                icon: "🍽️",
                description: "Satisfies hunger",
                fulfills: NeedType::Hunger,
            },
            ItemId::Water => &Item {
                id: ItemId::Water,
                name: "Water",
                icon: "💧",
                description: "Satisfies thirst",
                fulfills: NeedType::Thirst,
            },
            ItemId::Medicine => &Item {
                id: ItemId::Medicine,
                name: "Medicine",
                icon: "🏥",
                description: "Treats illness",
                fulfills: NeedType::Illness,
            },
            ItemId::Toys => &Item {
                id: ItemId::Toys,
                name: "Toys",
                icon: "🧸",
                description: "Cheers up sad cats",
                fulfills: NeedType::Sadness,
            },
        }
    }

    /// The need this item resolves.
    pub fn fulfills(self) -> NeedType {
        self.item().fulfills
    }

    /// Wire/display id, also accepted by [`FromStr`](std::str::FromStr).
    pub fn as_str(self) -> &'static str {
        match self {
            ItemId::Food => "food",
            ItemId::Water => "water",
            ItemId::Medicine => "medicine",
            ItemId::Toys => "toys",
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemId {
    type Err = UnknownItemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(ItemId::Food),
            "water" => Ok(ItemId::Water),
            "medicine" => Ok(ItemId::Medicine),
            "toys" => Ok(ItemId::Toys),
            other => Err(UnknownItemId(other.to_string())),
        }
    }
}

/// An item id that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownItemId(pub String);

impl std::fmt::Display for UnknownItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown item id: {:?}", self.0)
    }
}

impl std::error::Error for UnknownItemId {}

/// Static item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// The one need type this item resolves.
    pub fulfills: NeedType,
}

impl Item {
    /// Inverse lookup: the item that resolves `need`.
    pub fn fulfilling(need: NeedType) -> &'static Item {
        match need {
            NeedType::Hunger => ItemId::Food.item(),
            NeedType::Thirst => ItemId::Water.item(),
            NeedType::Illness => ItemId::Medicine.item(),
            NeedType::Sadness => ItemId::Toys.item(),
        }
    }
}
