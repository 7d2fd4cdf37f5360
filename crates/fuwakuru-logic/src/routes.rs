//! Logical routes and the entry guard.
//!
//! Title → character select → island select → {mat island, vault island} →
//! technique detail. Every route after character select requires a player
//! name and a selected character.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Stage, Technique};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Title,
    CharacterSelect,
    IslandSelect,
    MatIsland,
    VaultIsland,
    Technique(String),
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Title => "/".to_string(),
            Route::CharacterSelect => "/character-select".to_string(),
            Route::IslandSelect => "/island-select".to_string(),
            Route::MatIsland => "/mat-island".to_string(),
            Route::VaultIsland => "/vault-island".to_string(),
            Route::Technique(id) => format!("/technique/{id}"),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Route::Title,
            "/character-select" => Route::CharacterSelect,
            "/island-select" => Route::IslandSelect,
            "/mat-island" => Route::MatIsland,
            "/vault-island" => Route::VaultIsland,
            other => match other.strip_prefix("/technique/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Technique(id.to_string()),
                _ => Route::NotFound,
            },
        }
    }

    /// Whether entering this route needs a complete player identity.
    pub fn is_gated(&self) -> bool {
        matches!(
            self,
            Route::IslandSelect | Route::MatIsland | Route::VaultIsland | Route::Technique(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolve where a navigation to `route` actually lands.
///
/// Gated routes fall back to character select without a complete identity;
/// technique routes with unknown ids land on [`Route::NotFound`].
pub fn guard(route: Route, can_enter: bool, catalog: &Catalog) -> Route {
    if route.is_gated() && !can_enter {
        return Route::CharacterSelect;
    }
    match route {
        Route::Technique(id) if catalog.get(&id).is_none() => Route::NotFound,
        other => other,
    }
}

/// Where the back button of a technique page leads.
pub fn exit_route(technique: &Technique) -> Route {
    match technique.stage {
        Stage::Vault => Route::VaultIsland,
        Stage::Netspring | Stage::Headspring => Route::MatIsland,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_back() {
        for route in [
            Route::Title,
            Route::CharacterSelect,
            Route::IslandSelect,
            Route::MatIsland,
            Route::VaultIsland,
            Route::Technique("tripod".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::parse("/nowhere"), Route::NotFound);
        assert_eq!(Route::parse("/technique/"), Route::NotFound);
    }

    #[test]
    fn gated_routes_redirect_without_identity() {
        let catalog = Catalog::builtin();
        assert_eq!(guard(Route::MatIsland, false, &catalog), Route::CharacterSelect);
        assert_eq!(
            guard(Route::Technique("front-roll".into()), false, &catalog),
            Route::CharacterSelect
        );
        assert_eq!(guard(Route::Title, false, &catalog), Route::Title);
        assert_eq!(guard(Route::CharacterSelect, false, &catalog), Route::CharacterSelect);
    }

    #[test]
    fn unknown_technique_is_not_found() {
        let catalog = Catalog::builtin();
        assert_eq!(guard(Route::Technique("handstand".into()), true, &catalog), Route::NotFound);
        assert_eq!(
            guard(Route::Technique("tripod".into()), true, &catalog),
            Route::Technique("tripod".into())
        );
    }

    #[test]
    fn exit_depends_on_stage() {
        let catalog = Catalog::builtin();
        assert_eq!(exit_route(catalog.get("vault-neck-spring").unwrap()), Route::VaultIsland);
        assert_eq!(exit_route(catalog.get("tripod").unwrap()), Route::MatIsland);
    }
}
