//! Name generation utilities

use rand::Rng;

/// Pick a random name from the shelter's name pool.
pub fn random_name(rng: &mut impl Rng) -> String {
    CAT_NAMES[rng.gen_range(0..CAT_NAMES.len())].to_string()
}

static CAT_NAMES: &[&str] = &[
    "Whiskers",
    "Mittens",
    "Shadow",
    "Luna",
    "Oliver",
    "Bella",
    "Max",
    "Lucy",
    "Charlie",
    "Lily",
    "Milo",
    "Chloe",
    "Leo",
    "Nala",
    "Simba",
    "Zoe",
    "Tiger",
    "Princess",
    "Smokey",
    "Angel",
    "Buddy",
    "Coco",
    "Oreo",
    "Patches",
];
