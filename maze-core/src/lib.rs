//! The routing engine: grid occupancy, cost model, per-net search, and
//! the net scheduler (§4 of the routing specification).

pub mod cost;
pub mod grid;
pub mod net;
pub mod scheduler;
pub mod search;

pub use cost::{step_cost, Penalties, Step};
pub use grid::Grid;
pub use net::Net;
pub use scheduler::{route_all, RouteAllResult, RoutedNet};
pub use search::{route_net, SearchOutcome};
