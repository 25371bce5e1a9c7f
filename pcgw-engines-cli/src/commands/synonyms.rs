use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pcgw_engines_core::synonyms::{families, variants_of};

/// Print every engine family with the variants folded into it.
pub(crate) fn run_synonyms() {
    log::info!("Engine families:");
    log::info!("");

    for family in families() {
        log::info!("{}", family.if_supports_color(Stdout, |t| t.bold()));
        for variant in variants_of(family) {
            log::info!("    {}", variant.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}
