use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::state::{catalog_path, resolve_cardyield_home};
use crate::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSourceKind {
    Explicit,
    Home,
    Bundled,
}

impl CatalogSourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Home => "home",
            Self::Bundled => "bundled",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSource {
    pub kind: CatalogSourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CatalogContext {
    pub catalog: Catalog,
    pub source: CatalogSource,
}

/// Loads the catalog from an explicit path, then the cardyield home
/// directory, then the bundled demo catalog.
pub fn resolve_catalog(
    explicit: Option<&Path>,
    home_override: Option<&Path>,
) -> ClientResult<CatalogContext> {
    if let Some(path) = explicit {
        let catalog = Catalog::load(path)?;
        info!(path = %path.display(), cards = catalog.len(), "loaded explicit catalog");
        return Ok(CatalogContext {
            catalog,
            source: CatalogSource {
                kind: CatalogSourceKind::Explicit,
                path: Some(path.to_path_buf()),
            },
        });
    }

    match resolve_cardyield_home(home_override) {
        Ok(home) => {
            let candidate = catalog_path(&home);
            if candidate.is_file() {
                let catalog = Catalog::load(&candidate)?;
                info!(path = %candidate.display(), cards = catalog.len(), "loaded home catalog");
                return Ok(CatalogContext {
                    catalog,
                    source: CatalogSource {
                        kind: CatalogSourceKind::Home,
                        path: Some(candidate),
                    },
                });
            }
            debug!(path = %candidate.display(), "no home catalog; using bundled demo catalog");
        }
        Err(error) => {
            debug!(error = %error, "home directory unresolved; using bundled demo catalog");
        }
    }

    Ok(CatalogContext {
        catalog: Catalog::bundled_demo()?,
        source: CatalogSource {
            kind: CatalogSourceKind::Bundled,
            path: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{CatalogSourceKind, resolve_catalog};

    const ONE_CARD: &str = r#"{"cards":[{"id":"solo","name":"Solo","issuer":"Bank","annual_fee":0,"base_rate":1.0}]}"#;

    #[test]
    fn empty_home_falls_back_to_bundled_catalog() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let context = resolve_catalog(None, Some(dir.path()));
            assert!(context.is_ok());
            if let Ok(context) = context {
                assert_eq!(context.source.kind, CatalogSourceKind::Bundled);
                assert!(context.catalog.len() > 1);
            }
        }
    }

    #[test]
    fn home_catalog_is_preferred_over_bundled() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            assert!(fs::write(dir.path().join("catalog.json"), ONE_CARD).is_ok());
            let context = resolve_catalog(None, Some(dir.path()));
            assert!(context.is_ok());
            if let Ok(context) = context {
                assert_eq!(context.source.kind, CatalogSourceKind::Home);
                assert_eq!(context.catalog.ids(), vec!["solo"]);
            }
        }
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let missing = dir.path().join("missing.json");
            let context = resolve_catalog(Some(&missing), Some(dir.path()));
            assert!(context.is_err());
            if let Err(error) = context {
                assert_eq!(error.code, "catalog_unreadable");
            }
        }
    }
}
