//! Static business data rendered by the app shell: the manual-add catalog,
//! the leaderboard, the rewards list, and the rotating quotes. All of it is
//! fixed demo content; nothing here is computed or persisted.

use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// A pre-declared recyclable the user can credit without scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub points: u32,
    pub icon: &'static str,
}

pub static CATALOG: [CatalogItem; 2] = [
    CatalogItem {
        id: "plastic",
        name: "Plastic Bottle",
        category: Category::Plastic,
        points: 20,
        icon: "fa-solid fa-bottle-water",
    },
    CatalogItem {
        id: "tin",
        name: "Tin Can",
        category: Category::Metal,
        points: 40,
        icon: "fa-solid fa-box",
    },
];

/// Looks up a catalog item by id.
pub fn catalog_item(id: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    pub points: u32,
}

pub static LEADERS: [LeaderboardEntry; 5] = [
    LeaderboardEntry { rank: 1, name: "Sarah Green", points: 2840 },
    LeaderboardEntry { rank: 2, name: "Alex Rivers", points: 2650 },
    LeaderboardEntry { rank: 3, name: "Maya Earth", points: 2420 },
    LeaderboardEntry { rank: 4, name: "John Forest", points: 2180 },
    LeaderboardEntry { rank: 5, name: "Emma Ocean", points: 1950 },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u32,
    pub name: &'static str,
    pub points: u32,
    pub description: &'static str,
    pub icon: &'static str,
}

pub static REWARDS: [Reward; 4] = [
    Reward {
        id: 1,
        name: "Café Voucher",
        points: 500,
        description: "$5 off at partner cafés",
        icon: "fa-solid fa-mug-hot",
    },
    Reward {
        id: 2,
        name: "Amazon Gift Card",
        points: 1000,
        description: "$10 Amazon credit",
        icon: "fa-solid fa-bag-shopping",
    },
    Reward {
        id: 3,
        name: "Flipkart Voucher",
        points: 1000,
        description: "$10 shopping credit",
        icon: "fa-solid fa-gift",
    },
    Reward {
        id: 4,
        name: "Cash Back",
        points: 2000,
        description: "$20 direct cashback",
        icon: "fa-solid fa-dollar-sign",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub static QUOTES: [Quote; 5] = [
    Quote {
        text: "The greatest threat to our planet is the belief that someone else will save it.",
        author: "Robert Swan",
    },
    Quote {
        text: "We don't need a handful of people doing zero waste perfectly. We need millions of people doing it imperfectly.",
        author: "Anne Marie Bonneau",
    },
    Quote {
        text: "The Earth is what we all have in common.",
        author: "Wendell Berry",
    },
    Quote {
        text: "Every piece of plastic ever made still exists somewhere on Earth.",
        author: "Environmental Fact",
    },
    Quote {
        text: "Recycling is not just a good idea, it's the law of nature.",
        author: "Unknown",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_points_match_their_category() {
        for item in &CATALOG {
            assert_eq!(item.points, item.category.points(), "item {}", item.id);
        }
    }

    #[test]
    fn catalog_lookup_by_id() {
        assert_eq!(catalog_item("tin").unwrap().name, "Tin Can");
        assert!(catalog_item("glass").is_none());
    }
}
