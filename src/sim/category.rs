//! Physics categories and contact classification
//!
//! Categories are tags, not combinable masks. A pair of bodies is put in
//! canonical order by `bits()` before being classified.

use serde::{Deserialize, Serialize};

/// Collision tag carried by every physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicsCategory {
    None,
    All,
    Monster,
    Projectile,
    Player,
}

impl PhysicsCategory {
    /// Raw category value, used only for ordering a contact pair
    pub const fn bits(self) -> u32 {
        match self {
            PhysicsCategory::None => 0,
            PhysicsCategory::All => u32::MAX,
            PhysicsCategory::Monster => 0b1,
            PhysicsCategory::Projectile => 0b10,
            PhysicsCategory::Player => 0b11,
        }
    }

    /// Whether a body testing against `self` wants contacts with `other`
    pub fn accepts(self, other: PhysicsCategory) -> bool {
        match self {
            PhysicsCategory::None => false,
            PhysicsCategory::All => true,
            tag => tag == other,
        }
    }
}

/// Outcome class of a canonically ordered contact pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    ProjectileHitMonster,
    MonsterHitPlayer,
    Ignored,
}

impl ContactKind {
    /// Classify an unordered pair of categories
    pub fn classify(a: PhysicsCategory, b: PhysicsCategory) -> Self {
        let (first, second) = if a.bits() < b.bits() { (a, b) } else { (b, a) };
        match (first, second) {
            (PhysicsCategory::Monster, PhysicsCategory::Projectile) => {
                ContactKind::ProjectileHitMonster
            }
            (PhysicsCategory::Monster, PhysicsCategory::Player) => ContactKind::MonsterHitPlayer,
            (
                PhysicsCategory::None
                | PhysicsCategory::All
                | PhysicsCategory::Monster
                | PhysicsCategory::Projectile
                | PhysicsCategory::Player,
                _,
            ) => ContactKind::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct() {
        let all = [
            PhysicsCategory::None,
            PhysicsCategory::All,
            PhysicsCategory::Monster,
            PhysicsCategory::Projectile,
            PhysicsCategory::Player,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.bits(), b.bits());
            }
        }
    }

    #[test]
    fn test_classify_is_order_independent() {
        use PhysicsCategory::*;
        assert_eq!(
            ContactKind::classify(Projectile, Monster),
            ContactKind::ProjectileHitMonster
        );
        assert_eq!(
            ContactKind::classify(Monster, Projectile),
            ContactKind::ProjectileHitMonster
        );
        assert_eq!(
            ContactKind::classify(Player, Monster),
            ContactKind::MonsterHitPlayer
        );
        assert_eq!(
            ContactKind::classify(Monster, Player),
            ContactKind::MonsterHitPlayer
        );
    }

    #[test]
    fn test_projectile_player_is_ignored() {
        use PhysicsCategory::*;
        assert_eq!(ContactKind::classify(Projectile, Player), ContactKind::Ignored);
        assert_eq!(ContactKind::classify(Monster, Monster), ContactKind::Ignored);
        assert_eq!(ContactKind::classify(None, All), ContactKind::Ignored);
    }

    #[test]
    fn test_accepts() {
        use PhysicsCategory::*;
        assert!(Monster.accepts(Monster));
        assert!(All.accepts(Projectile));
        assert!(!None.accepts(None));
        // Player's tag is not a superset of Monster's
        assert!(!Monster.accepts(Player));
        assert!(!Projectile.accepts(Player));
    }
}
