//! Engine variant to engine family table.
//!
//! The wiki files every major engine revision under its own page
//! (`Unreal Engine 1` .. `Unreal Engine 5`), which splits one technology
//! across several rows of any per-engine count. This table folds the known
//! variants back into one family name. Lookups are exact and case-sensitive,
//! since the names come straight from wiki page titles.

/// `(variant, family)` pairs. A variant must appear at most once.
pub static ENGINE_FAMILIES: &[(&str, &str)] = &[
    ("CryEngine V", "CryEngine"),
    ("CryEngine (4th generation)", "CryEngine"),
    ("CryEngine 2", "CryEngine"),
    ("CryEngine 3", "CryEngine"),
    ("Id Tech 1", "Id Tech"),
    ("Id Tech 2", "Id Tech"),
    ("Id Tech 3", "Id Tech"),
    ("Id Tech 4", "Id Tech"),
    ("Id Tech 5", "Id Tech"),
    ("Id Tech 6", "Id Tech"),
    ("Id Tech 7", "Id Tech"),
    ("Quake engine", "Id Tech"),
    ("QuakeWorld", "Id Tech"),
    ("Frostbite 1.5", "Frostbite"),
    ("Frostbite 2", "Frostbite"),
    ("Frostbite 3", "Frostbite"),
    ("SAGE 2.0", "SAGE"),
    ("Unreal Engine 1", "Unreal Engine"),
    ("Unreal Engine 2", "Unreal Engine"),
    ("Unreal Engine 2.5", "Unreal Engine"),
    ("Unreal Engine 3", "Unreal Engine"),
    ("Unreal Engine 4", "Unreal Engine"),
    ("Unreal Engine 5", "Unreal Engine"),
    ("Gamebryo (TES Engine)", "Gamebryo"),
    ("GEM 2", "GEM"),
    ("GEM 3", "GEM"),
    ("AGL 2", "AGL"),
    ("AGL 3", "AGL"),
    ("AGL 4", "AGL"),
    ("The Sims 2 Engine", "The Sims Engine"),
    ("The Sims 3 Engine", "The Sims Engine"),
    ("Glacier 2", "Glacier"),
    ("Avalanche Engine 3.0", "Avalanche Engine"),
    ("Avalanche Engine 2.0", "Avalanche Engine"),
    ("Ptero Engine II", "Ptero Engine"),
    ("Ptero Engine III", "Ptero Engine"),
    ("Refractor 2", "Refractor"),
    ("Construct Classic", "Construct"),
    ("Construct 2", "Construct"),
    ("Construct 3", "Construct"),
    ("Photex2", "Photex"),
    ("Dunia 2", "Dunia"),
    ("Source 2", "Source"),
    ("Vicious Engine 2", "Vicious Engine"),
    ("KiriKiri Z", "KiriKiri"),
];

/// Look up the family of a known engine variant.
pub fn engine_family(variant: &str) -> Option<&'static str> {
    ENGINE_FAMILIES
        .iter()
        .find(|(v, _)| *v == variant)
        .map(|(_, family)| *family)
}

/// Map an engine name to its family, or return it unchanged if it is not a
/// known variant.
pub fn canonical_engine(name: &str) -> &str {
    engine_family(name).unwrap_or(name)
}

/// Distinct family names, sorted.
pub fn families() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = ENGINE_FAMILIES.iter().map(|(_, f)| *f).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// All variants that fold into `family`, in table order.
pub fn variants_of(family: &str) -> Vec<&'static str> {
    ENGINE_FAMILIES
        .iter()
        .filter(|(_, f)| *f == family)
        .map(|(v, _)| *v)
        .collect()
}

#[cfg(test)]
#[path = "tests/synonyms_tests.rs"]
mod tests;
