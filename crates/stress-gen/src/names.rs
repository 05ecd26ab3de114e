//! Random name tokens.
//!
//! These functions make no promise about uniqueness. Callers that need
//! unique names go through [`Namespace`](crate::Namespace), which layers a
//! retry loop over them.

use rand::Rng;

const SHORT_FIRST: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const SHORT_REST: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const MODIFIERS: &[&str] = &[
    "alt", "backup", "extra", "mirror", "other", "shadow", "spare", "twin",
];

const ADJECTIVES: &[&str] = &[
    "agreeable", "brave", "calm", "clumsy", "eager", "fluffy", "gentle", "grumpy",
    "jolly", "lively", "nervous", "proud", "silly", "sleepy", "tiny", "witty",
];

const COLOURS: &[&str] = &[
    "amber", "azure", "crimson", "golden", "green", "indigo", "ivory", "lilac",
    "maroon", "olive", "orange", "pink", "silver", "teal", "violet", "white",
];

const ANIMALS: &[&str] = &[
    "aardvarks", "badgers", "capybaras", "cats", "dogs", "ferrets", "geckos", "hedgehogs",
    "llamas", "moles", "newts", "otters", "pandas", "quokkas", "tapirs", "wombats",
];

const OPINIONS: &[&str] = &[
    "adorable", "awesome", "delightful", "excellent", "fabulous", "fantastic", "great",
    "lovely", "magnificent", "marvellous", "splendid", "superb", "terrific", "underrated",
    "wonderful", "wise",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words[rng.gen_range(0..words.len())]
}

/// Generate a short identifier suitable for use inside the Terraform
/// language itself: a lowercase letter followed by one to five lowercase
/// letters or digits.
pub fn generate_short_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(2..=6);
    let mut name = String::with_capacity(len);
    name.push(SHORT_FIRST[rng.gen_range(0..SHORT_FIRST.len())] as char);
    for _ in 1..len {
        name.push(SHORT_REST[rng.gen_range(0..SHORT_REST.len())] as char);
    }
    name
}

/// Generate a short name with a modifier word in front, like `extra_k3p`.
pub fn generate_short_modifier_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let modifier = pick(rng, MODIFIERS);
    format!("{modifier}_{}", generate_short_name(rng))
}

/// Generate a long dash-separated name, like
/// `fluffy-orange-otters-are-great`.
///
/// Long names are meant for objects in the simulated remote systems, so a
/// reader can tell them apart from short language-level identifiers at a
/// glance. They currently express opinions about animals.
pub fn generate_long_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = pick(rng, ADJECTIVES);
    let colour = pick(rng, COLOURS);
    let animal = pick(rng, ANIMALS);
    let opinion = pick(rng, OPINIONS);
    format!("{adjective}-{colour}-{animal}-are-{opinion}")
}
