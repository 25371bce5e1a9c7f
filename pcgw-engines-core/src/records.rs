use crate::synonyms::canonical_engine;

/// An engine page from the wiki's `Category:Engines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    /// Wiki page id, kept as text since it is only ever compared and written out
    pub id: String,
    /// Page title without the `Engine:` namespace prefix
    pub title: String,
}

/// A game row as fetched from the wiki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub title: String,
    /// Engine title, matching [`Engine::title`] by name only
    pub engine: String,
    /// Engine build or version string, verbatim from the wiki
    pub engine_build: Option<String>,
    /// Four-digit year of the first release date, or empty when unknown
    pub release_year: String,
}

/// A game row after its engine has been collapsed to the engine family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGame {
    pub title: String,
    pub engine: String,
    pub release_year: String,
}

impl Game {
    pub fn new(
        title: impl Into<String>,
        engine: impl Into<String>,
        engine_build: Option<String>,
        release_year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            engine: engine.into(),
            engine_build,
            release_year: release_year.into(),
        }
    }

    /// Build the normalized form of this game. The build column is dropped.
    pub fn normalized(&self) -> NormalizedGame {
        NormalizedGame {
            title: self.title.clone(),
            engine: canonical_engine(&self.engine).to_string(),
            release_year: self.release_year.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_build_and_maps_engine() {
        let game = Game::new("Foo", "Unreal Engine 3", Some("1.0".to_string()), "2015");
        let n = game.normalized();
        assert_eq!(n.title, "Foo");
        assert_eq!(n.engine, "Unreal Engine");
        assert_eq!(n.release_year, "2015");
    }

    #[test]
    fn test_normalized_leaves_source_untouched() {
        let game = Game::new("Bar", "Source 2", None, "");
        let _ = game.normalized();
        assert_eq!(game.engine, "Source 2");
    }
}
