//! Location/route host-service contracts used to keep the address bar in sync with open windows.

use std::{cell::RefCell, rc::Rc};

/// Host service exposing the current route path and pushing new ones.
pub trait RouteService {
    /// Returns the current route path (for example `/about`).
    fn current_path(&self) -> String;

    /// Pushes `path` as the new route. Implementations skip pushing the current path again.
    fn push_path(&self, path: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Route service that always reports `/` and ignores pushes.
pub struct NoopRouteService;

impl RouteService for NoopRouteService {
    fn current_path(&self) -> String {
        "/".to_string()
    }

    fn push_path(&self, _path: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// In-memory route history.
pub struct MemoryRouteService {
    history: Rc<RefCell<Vec<String>>>,
}

impl Default for MemoryRouteService {
    fn default() -> Self {
        Self::starting_at("/")
    }
}

impl MemoryRouteService {
    /// Creates a history whose first entry is `path`.
    pub fn starting_at(path: &str) -> Self {
        Self {
            history: Rc::new(RefCell::new(vec![path.to_string()])),
        }
    }

    /// Returns every path visited, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl RouteService for MemoryRouteService {
    fn current_path(&self) -> String {
        self.history
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn push_path(&self, path: &str) -> Result<(), String> {
        if self.current_path() == path {
            return Ok(());
        }
        self.history.borrow_mut().push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_routes_skip_duplicate_pushes() {
        let routes = MemoryRouteService::default();
        routes.push_path("/about").unwrap();
        routes.push_path("/about").unwrap();
        routes.push_path("/").unwrap();

        assert_eq!(routes.history(), vec!["/", "/about", "/"]);
        assert_eq!(routes.current_path(), "/");
    }
}
