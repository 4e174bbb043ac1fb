// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use rand::{Rng, rngs::ThreadRng};

const PET_NAMES: [&str; 12] = [
    "buddy", "max", "bella", "charlie", "lucy", "daisy", "molly", "lola", "sadie",
    "duke", "rocky", "zoey",
];

const FRUIT_NAMES: [&str; 12] = [
    "apple", "banana", "orange", "pear", "peach", "grape", "kiwi", "mango", "cherry",
    "lemon", "lime", "plum",
];

/// Eg: `lucy-mango-042`. Used to name scratch directories and log files that must not
/// collide with those of another process.
#[must_use]
pub fn generate_friendly_random_id() -> String {
    let mut rng: ThreadRng = rand::rng();

    let pet = PET_NAMES[rng.random_range(0..PET_NAMES.len())];
    let fruit = FRUIT_NAMES[rng.random_range(0..FRUIT_NAMES.len())];
    let number: u16 = rng.random_range(0..1000);

    format!("{pet}-{fruit}-{number:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_of_id() {
        let id = generate_friendly_random_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(PET_NAMES.contains(&parts[0]));
        assert!(FRUIT_NAMES.contains(&parts[1]));
        assert_eq!(parts[2].len(), 3);
    }
}
