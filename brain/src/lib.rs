pub mod containers;
pub mod controller;
pub mod params;
pub mod route;
pub mod velocity;

pub use containers::{EmptyError, ForwardQueue, VisitedStack};
pub use controller::{Leg, NavEvent, NavigationController, Phase, Tick};
pub use params::{NavParams, ParamsError};
pub use route::{DEFAULT_ROUTE_FILE, RouteError, load_route, read_route};
pub use velocity::VelocityLaw;
