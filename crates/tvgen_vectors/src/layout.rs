//! Column layout: one column per port bit, inputs first.

use tvgen_ports::Port;

/// Column names of a vector file, split into the input and output sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Stimulus columns, from `input` ports.
    pub inputs: Vec<String>,
    /// Everything else: `output`, `inout` and unknown-direction ports.
    pub outputs: Vec<String>,
}

impl ColumnLayout {
    /// Lays out `ports` in declaration order. Bus ports expand to one
    /// `name[bit]` column per bit, most significant bit first.
    pub fn from_ports(ports: &[Port]) -> Self {
        let mut layout = Self::default();
        for port in ports {
            let section = if port.is_input() {
                &mut layout.inputs
            } else {
                &mut layout.outputs
            };
            match port.bus_range {
                Some(range) => section.extend(range.bits().map(|bit| format!("{}[{bit}]", port.name))),
                None => section.push(port.name.clone()),
            }
        }
        layout
    }

    /// Total number of columns, i.e. the length of every vector.
    pub fn width(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    /// The header line: input names, ` | `, output names.
    pub fn header_line(&self) -> String {
        format!("{} | {}", self.inputs.join(", "), self.outputs.join(", "))
    }
}
