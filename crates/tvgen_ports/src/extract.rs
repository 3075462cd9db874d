//! Port extraction: module header port list to [`Port`] records.

use crate::bus::{find_bus_annotation, BusRange, MAX_BUS_WIDTH};
use crate::port::{Direction, NetKind, Port, PortKind};
use tvgen_common::{Ident, Interner};
use tvgen_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tvgen_frontend::{DataType, ModuleDecl, PortConnect, PortDirection};
use tvgen_source::{SourceDb, Span};

/// Port extraction failures.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Port-list entries that are neither ANSI declarations nor plain names.
    /// Each one has been reported as a diagnostic.
    #[error("module '{module}' has {count} unsupported port expression(s)")]
    UnsupportedPorts {
        /// Module name.
        module: String,
        /// Number of rejected entries.
        count: usize,
    },
}

/// Extracts one [`Port`] per declared identifier, in header order.
///
/// Empty list entries are skipped. Unsupported entries are each reported
/// with their location and the walk continues; if there were any, the
/// result is an error. Names listed in `clocks` are flagged as clocks.
pub fn extract_ports(
    module: &ModuleDecl,
    source_db: &SourceDb,
    interner: &Interner,
    clocks: &[String],
    sink: &DiagnosticSink,
) -> Result<Vec<Port>, ExtractError> {
    let extractor = Extractor {
        source_db,
        interner,
        clocks,
        sink,
    };
    let mut ports = Vec::new();
    let mut unsupported = 0;

    for entry in &module.ports {
        match entry {
            PortConnect::Empty { .. } => {}
            PortConnect::Ansi(group) => {
                for port in &group.ports {
                    let direction = port.direction.or(group.direction);
                    let data_type = port.data_type.as_ref().unwrap_or(&group.data_type);
                    ports.push(extractor.build(
                        port.name,
                        direction,
                        data_type,
                        port.span,
                        &[port.head],
                    ));
                }
            }
            PortConnect::IdRef { name, span } => match module.declarations.get(name) {
                Some(decl) => {
                    let heads: Vec<Span> = std::iter::once(decl.head).chain(decl.net_head).collect();
                    ports.push(extractor.build(
                        *name,
                        decl.direction,
                        &decl.data_type,
                        decl.span,
                        &heads,
                    ));
                }
                None => ports.push(extractor.undeclared(*name, *span)),
            },
            PortConnect::Unsupported { span } => {
                sink.emit(
                    Diagnostic::error(DiagnosticCode::UNSUPPORTED_PORT, "unknown port found", *span)
                        .with_label("port expression")
                        .with_help("declare the port by name, e.g. `input [3:0] a`"),
                );
                unsupported += 1;
            }
        }
    }

    if unsupported > 0 {
        return Err(ExtractError::UnsupportedPorts {
            module: interner.resolve(module.name),
            count: unsupported,
        });
    }
    Ok(ports)
}

struct Extractor<'a> {
    source_db: &'a SourceDb,
    interner: &'a Interner,
    clocks: &'a [String],
    sink: &'a DiagnosticSink,
}

impl Extractor<'_> {
    /// `heads` are the declaration heads naming this port, searched in
    /// order for the first bus annotation.
    fn build(
        &self,
        name: Ident,
        direction: Option<PortDirection>,
        data_type: &DataType,
        span: Span,
        heads: &[Span],
    ) -> Port {
        let name = self.interner.resolve(name);

        let direction_class = Direction::classify(direction);
        if direction_class == Direction::Unknown {
            self.sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::UNKNOWN_DIRECTION,
                    format!("port '{name}' is not an input, output or inout"),
                    span,
                )
                .with_note("it is laid out with the output columns"),
            );
        }

        Port {
            is_clock: self.clocks.contains(&name),
            direction: direction_class,
            kind: self.classify_kind(data_type),
            bus_range: self.bus_range(&name, heads),
            span,
            name,
        }
    }

    fn undeclared(&self, name: Ident, span: Span) -> Port {
        let name = self.interner.resolve(name);
        self.sink.emit(
            Diagnostic::warning(
                DiagnosticCode::UNDECLARED_PORT,
                format!("port '{name}' has no declaration in the module body"),
                span,
            )
            .with_note("its direction and type are unknown"),
        );
        Port {
            is_clock: self.clocks.contains(&name),
            direction: Direction::Unknown,
            kind: PortKind::Unknown,
            bus_range: None,
            span,
            name,
        }
    }

    /// Table keyword, then declared type name; an untyped declaration is an
    /// implicit `wire`.
    fn classify_kind(&self, data_type: &DataType) -> PortKind {
        if let Some(kind) = data_type.keyword.and_then(NetKind::from_keyword) {
            return PortKind::Net(kind);
        }
        match data_type.name {
            Some(name) => PortKind::Named(self.interner.resolve(name)),
            None if data_type.keyword.is_none() => PortKind::Net(NetKind::Wire),
            None => PortKind::Unknown,
        }
    }

    fn bus_range(&self, name: &str, heads: &[Span]) -> Option<BusRange> {
        let (annotation, span) = heads.iter().find_map(|span| {
            find_bus_annotation(self.source_db.snippet(*span)).map(|text| (text, *span))
        })?;
        let range = BusRange::parse(annotation);
        if range.is_valid() && range.width() > MAX_BUS_WIDTH {
            self.sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::BUS_TOO_WIDE,
                    format!(
                        "bus range '{annotation}' of port '{name}' is {} bits wide, more than {MAX_BUS_WIDTH}",
                        range.width()
                    ),
                    span,
                )
                .with_help("the port is treated as a single bit"),
            );
            return None;
        }
        if range.is_valid() {
            return Some(range);
        }
        self.sink.emit(
            Diagnostic::warning(
                DiagnosticCode::UNRESOLVED_BUS_RANGE,
                format!("bus range '{annotation}' of port '{name}' does not resolve to integer bounds"),
                span,
            )
            .with_help("the port is treated as a single bit"),
        );
        None
    }
}
