//! Port model and extraction.
//!
//! Turns the port list of a parsed module into an ordered list of [`Port`]
//! records: name, direction, net kind and optional [`BusRange`]. Bus widths
//! come from the first bracketed range on each declaration's source text.

#![warn(missing_docs)]

pub mod bus;
pub mod extract;
pub mod port;

pub use bus::{find_bus_annotation, BusRange, MAX_BUS_WIDTH};
pub use extract::{extract_ports, ExtractError};
pub use port::{Direction, NetKind, Port, PortKind};
