//! Room name generation.

use rand::seq::SliceRandom;

/// Produces display names for rooms created without an explicit name.
pub trait RoomNameGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> RoomNameGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

const ADJECTIVES: &[&str] = &[
    "Brave", "Calm", "Clever", "Eager", "Gentle", "Happy", "Jolly", "Keen", "Lively", "Lucky",
    "Mellow", "Nimble", "Proud", "Quiet", "Quick", "Rapid", "Shy", "Silly", "Sunny", "Witty",
];

const COLORS: &[&str] = &[
    "Amber", "Aqua", "Azure", "Black", "Blue", "Bronze", "Coral", "Crimson", "Gold", "Green",
    "Indigo", "Ivory", "Lime", "Magenta", "Olive", "Orange", "Plum", "Scarlet", "Silver", "Teal",
];

const ANIMALS: &[&str] = &[
    "Badger", "Beaver", "Crane", "Dolphin", "Falcon", "Ferret", "Gecko", "Heron", "Koala",
    "Lemur", "Lynx", "Marten", "Otter", "Panda", "Puffin", "Raven", "Salmon", "Tapir", "Walrus",
    "Wombat",
];

/// Adjective-color-animal names such as `Brave-Teal-Otter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoomNames;

impl RoomNameGenerator for RandomRoomNames {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        [ADJECTIVES, COLORS, ANIMALS]
            .iter()
            .filter_map(|words| words.choose(&mut rng))
            .copied()
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_room_name_has_three_capitalized_parts() {
        // テスト項目: 生成されるルーム名は「形容詞-色-動物」の3語で構成される
        // given (前提条件):
        let generator = RandomRoomNames;

        // when (操作):
        let name = generator.generate();

        // then (期待する結果):
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(COLORS.contains(&parts[1]));
        assert!(ANIMALS.contains(&parts[2]));
    }

    #[test]
    fn test_closure_as_generator() {
        // テスト項目: クロージャを名前生成器として使える
        // given (前提条件):
        let generator = || "Fixed-Name".to_string();

        // when (操作):
        let name = generator.generate();

        // then (期待する結果):
        assert_eq!(name, "Fixed-Name");
    }
}
