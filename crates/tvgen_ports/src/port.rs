//! The port model: direction and net-kind classification.

use crate::bus::BusRange;
use serde::Serialize;
use std::fmt;
use tvgen_frontend::{HdlToken, PortDirection};
use tvgen_source::Span;

/// Port direction as classified for vector layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
    /// Anything else: `ref`, interface ports, undeclared names.
    Unknown,
}

const DIRECTIONS: [(PortDirection, Direction, &str); 3] = [
    (PortDirection::Input, Direction::Input, "input"),
    (PortDirection::Output, Direction::Output, "output"),
    (PortDirection::Inout, Direction::Inout, "inout"),
];

impl Direction {
    /// Classifies a declared direction. Directions outside the table, and
    /// missing ones, are [`Direction::Unknown`].
    pub fn classify(direction: Option<PortDirection>) -> Self {
        direction
            .and_then(|d| DIRECTIONS.iter().find(|(key, _, _)| *key == d))
            .map_or(Direction::Unknown, |(_, dir, _)| *dir)
    }

    /// Display string; `"Unknown dir"` for [`Direction::Unknown`].
    pub fn as_str(self) -> &'static str {
        DIRECTIONS
            .iter()
            .find(|(_, dir, _)| *dir == self)
            .map_or("Unknown dir", |(_, _, text)| text)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the net and variable kinds with a fixed display string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[allow(missing_docs)]
pub enum NetKind {
    Real,
    Wire,
    Logic,
    Reg,
    Tri,
    Wand,
    Triand,
    Wor,
    Trior,
    Trireg,
    Tri0,
    Tri1,
    Uwire,
    Supply0,
    Supply1,
    Integer,
    Int,
    Byte,
    Shortint,
    Longint,
    Bit,
    Shortreal,
}

const NET_KINDS: [(HdlToken, NetKind, &str); 22] = [
    (HdlToken::Real, NetKind::Real, "real"),
    (HdlToken::Wire, NetKind::Wire, "wire"),
    (HdlToken::Logic, NetKind::Logic, "logic"),
    (HdlToken::Reg, NetKind::Reg, "reg"),
    (HdlToken::Tri, NetKind::Tri, "tri"),
    (HdlToken::Wand, NetKind::Wand, "wand"),
    (HdlToken::Triand, NetKind::Triand, "triand"),
    (HdlToken::Wor, NetKind::Wor, "wor"),
    (HdlToken::Trior, NetKind::Trior, "trior"),
    (HdlToken::Trireg, NetKind::Trireg, "trireg"),
    (HdlToken::Tri0, NetKind::Tri0, "tri0"),
    (HdlToken::Tri1, NetKind::Tri1, "tri1"),
    (HdlToken::Uwire, NetKind::Uwire, "uwire"),
    (HdlToken::Supply0, NetKind::Supply0, "supply0"),
    (HdlToken::Supply1, NetKind::Supply1, "supply1"),
    (HdlToken::Integer, NetKind::Integer, "integer"),
    (HdlToken::Int, NetKind::Int, "int"),
    (HdlToken::Byte, NetKind::Byte, "byte"),
    (HdlToken::Shortint, NetKind::Shortint, "shortint"),
    (HdlToken::Longint, NetKind::Longint, "longint"),
    (HdlToken::Bit, NetKind::Bit, "bit"),
    (HdlToken::Shortreal, NetKind::Shortreal, "shortreal"),
];

impl NetKind {
    /// Looks up the kind for a type keyword.
    pub fn from_keyword(keyword: HdlToken) -> Option<Self> {
        NET_KINDS
            .iter()
            .find(|(key, _, _)| *key == keyword)
            .map(|(_, kind, _)| *kind)
    }

    /// Display string, e.g. `"supply0"`.
    pub fn as_str(self) -> &'static str {
        NET_KINDS
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map_or("Unknown", |(_, _, text)| text)
    }
}

/// A port's type classification.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum PortKind {
    /// A kind from the fixed table.
    Net(NetKind),
    /// Any other type, by its declared name (`time`, `my_t`, `bus_if`).
    Named(String),
    /// No type information available.
    Unknown,
}

impl PortKind {
    /// Display string: table entry, type name, or `"Unknown"`.
    pub fn as_str(&self) -> &str {
        match self {
            PortKind::Net(kind) => kind.as_str(),
            PortKind::Named(name) => name,
            PortKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module port, one per declared identifier.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Port {
    /// Port name.
    pub name: String,
    /// Classified direction.
    pub direction: Direction,
    /// Classified type.
    pub kind: PortKind,
    /// Bit range for bus ports; `None` for scalars.
    pub bus_range: Option<BusRange>,
    /// Named as a clock in the configuration.
    pub is_clock: bool,
    /// Declaration span.
    #[serde(skip)]
    pub span: Span,
}

impl Port {
    /// Number of vector columns this port occupies.
    pub fn width(&self) -> u64 {
        self.bus_range.map_or(1, |range| range.width())
    }

    /// Only `input` ports are stimulus columns; every other direction is
    /// laid out with the outputs.
    pub fn is_input(&self) -> bool {
        self.direction == Direction::Input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_table() {
        assert_eq!(
            Direction::classify(Some(PortDirection::Input)),
            Direction::Input
        );
        assert_eq!(
            Direction::classify(Some(PortDirection::Inout)),
            Direction::Inout
        );
        assert_eq!(
            Direction::classify(Some(PortDirection::Ref)),
            Direction::Unknown
        );
        assert_eq!(Direction::classify(None), Direction::Unknown);
        assert_eq!(Direction::Output.to_string(), "output");
        assert_eq!(Direction::Unknown.to_string(), "Unknown dir");
    }

    #[test]
    fn every_table_keyword_round_trips_its_text() {
        for (keyword, kind, text) in NET_KINDS {
            assert_eq!(NetKind::from_keyword(keyword), Some(kind));
            assert_eq!(kind.as_str(), text);
        }
    }

    #[test]
    fn keywords_outside_table() {
        assert_eq!(NetKind::from_keyword(HdlToken::Time), None);
        assert_eq!(NetKind::from_keyword(HdlToken::String), None);
    }

    #[test]
    fn port_kind_display() {
        assert_eq!(PortKind::Net(NetKind::Trireg).to_string(), "trireg");
        assert_eq!(PortKind::Named("my_t".to_string()).to_string(), "my_t");
        assert_eq!(PortKind::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn width_and_input() {
        let mut port = Port {
            name: "sum".to_string(),
            direction: Direction::Output,
            kind: PortKind::Net(NetKind::Wire),
            bus_range: Some(BusRange::new(4, 0)),
            is_clock: false,
            span: Span::DUMMY,
        };
        assert_eq!(port.width(), 5);
        assert!(!port.is_input());
        port.bus_range = None;
        port.direction = Direction::Input;
        assert_eq!(port.width(), 1);
        assert!(port.is_input());
    }

    #[test]
    fn port_serializes_without_span() {
        let port = Port {
            name: "clk".to_string(),
            direction: Direction::Input,
            kind: PortKind::Net(NetKind::Logic),
            bus_range: None,
            is_clock: true,
            span: Span::DUMMY,
        };
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json["name"], "clk");
        assert_eq!(json["direction"], "Input");
        assert_eq!(json["is_clock"], true);
        assert!(json.get("span").is_none());
    }
}
