//! Cyclic route traversal
//!
//! Each simulated bus owns one walker. A walker starts at a uniformly random
//! point on its route so buses spawned together don't bunch up, then follows
//! the route forward forever, wrapping at the end.

use std::sync::Arc;

use rand::Rng;

use crate::routes::Route;

pub struct RouteWalker {
    route: Arc<Route>,
    position: usize,
}

impl RouteWalker {
    /// Walker starting at a random point on the route.
    pub fn new(route: Arc<Route>) -> Self {
        let start = rand::rng().random_range(0..route.coordinates.len());
        Self::starting_at(route, start)
    }

    /// Walker starting at a fixed index (wrapped to the route length).
    pub fn starting_at(route: Arc<Route>, start: usize) -> Self {
        let position = start % route.coordinates.len();
        Self { route, position }
    }

    /// The next coordinate on the route, cycling forever.
    pub fn step(&mut self) -> (f64, f64) {
        let coords = self.route.coordinates[self.position];
        self.position = (self.position + 1) % self.route.coordinates.len();
        coords
    }
}

impl Iterator for RouteWalker {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<(f64, f64)> {
        Some(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(coordinates: Vec<(f64, f64)>) -> Arc<Route> {
        Arc::new(Route {
            name: "104".to_string(),
            coordinates,
        })
    }

    #[test]
    fn test_walks_forward_and_wraps() {
        let route = route(vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let mut walker = RouteWalker::starting_at(route, 1);

        assert_eq!(walker.step(), (2.0, 2.0));
        assert_eq!(walker.step(), (3.0, 3.0));
        assert_eq!(walker.step(), (1.0, 1.0));
        assert_eq!(walker.step(), (2.0, 2.0));
    }

    #[test]
    fn test_random_start_is_on_the_route() {
        let coords = vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)];
        let route = route(coords.clone());

        for _ in 0..50 {
            let mut walker = RouteWalker::new(Arc::clone(&route));
            assert!(coords.contains(&walker.step()));
        }
    }

    #[test]
    fn test_single_point_route() {
        let mut walker = RouteWalker::new(route(vec![(5.0, 6.0)]));
        assert_eq!(walker.step(), (5.0, 6.0));
        assert_eq!(walker.step(), (5.0, 6.0));
    }

    #[test]
    fn test_iterator_is_infinite() {
        let route = route(vec![(1.0, 1.0), (2.0, 2.0)]);
        let walker = RouteWalker::starting_at(route, 0);

        let taken: Vec<_> = walker.take(5).collect();
        assert_eq!(
            taken,
            vec![(1.0, 1.0), (2.0, 2.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]
        );
    }
}
