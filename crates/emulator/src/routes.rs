//! Route geometry loading
//!
//! Routes are plain JSON files in a directory, one per route: an object with
//! a `name` and an ordered `coordinates` list of `[lat, lng]` pairs. Extra
//! fields (stop names and the like) are ignored. Loaded once at startup and
//! shared read-only across all buses on the route.

use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("failed to read route directory {path}: {source}")]
    ReadDir { path: String, source: io::Error },
    #[error("failed to read route file {path}: {source}")]
    ReadFile { path: String, source: io::Error },
    #[error("failed to parse route file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("route {name} has no coordinates")]
    Empty { name: String },
}

/// One named route: an ordered polyline of `(lat, lng)` points.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub name: String,
    pub coordinates: Vec<(f64, f64)>,
}

/// Load up to `limit` routes from `*.json` files under `dir`, in file-name
/// order. A route without coordinates is a startup error.
pub fn load_routes(dir: &Path, limit: usize) -> Result<Vec<Arc<Route>>, RouteError> {
    let entries = fs::read_dir(dir).map_err(|source| RouteError::ReadDir {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut routes = Vec::new();
    for path in paths.into_iter().take(limit) {
        let text = fs::read_to_string(&path).map_err(|source| RouteError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let route: Route = serde_json::from_str(&text).map_err(|source| RouteError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        if route.coordinates.is_empty() {
            return Err(RouteError::Empty { name: route.name });
        }
        routes.push(Arc::new(route));
    }

    Ok(routes)
}
