//! Top-module selection.

use crate::ast::{ModuleDecl, SourceUnit};
use std::collections::HashSet;
use tvgen_common::Ident;

/// Returns the modules that no module in `unit` instantiates, in declaration
/// order.
///
/// Instantiations of names that are not declared in the unit (library cells,
/// interfaces, primitives) are ignored. A module that instantiates itself,
/// or belongs to an instantiation cycle, is never a top module.
pub fn top_modules(unit: &SourceUnit) -> Vec<&ModuleDecl> {
    let instantiated: HashSet<Ident> = unit
        .modules
        .iter()
        .flat_map(|m| m.instantiations.iter().map(|i| i.module))
        .collect();
    unit.modules
        .iter()
        .filter(|m| !instantiated.contains(&m.name))
        .collect()
}

/// Finds a declared module by name.
pub fn find_module(unit: &SourceUnit, name: Ident) -> Option<&ModuleDecl> {
    unit.modules.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;
    use tvgen_common::Interner;
    use tvgen_diagnostics::DiagnosticSink;
    use tvgen_source::FileId;

    fn tops(source: &str) -> Vec<String> {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let unit = parse_str(source, FileId::from_raw(0), &interner, &sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        top_modules(&unit)
            .iter()
            .map(|m| interner.resolve(m.name))
            .collect()
    }

    #[test]
    fn single_module_is_top() {
        assert_eq!(tops("module a; endmodule"), vec!["a"]);
    }

    #[test]
    fn instantiated_module_is_not_top() {
        let source = "module leaf(input x); endmodule\n\
                      module root(input x); leaf u_leaf(.x(x)); endmodule";
        assert_eq!(tops(source), vec!["root"]);
    }

    #[test]
    fn multiple_tops_in_declaration_order() {
        let source = "module b; endmodule\n\
                      module a; endmodule\n\
                      module c; b u_b(); endmodule";
        assert_eq!(tops(source), vec!["a", "c"]);
    }

    #[test]
    fn undeclared_instantiations_are_ignored() {
        assert_eq!(
            tops("module a; SB_LUT4 lut (.O(o)); endmodule"),
            vec!["a"]
        );
    }

    #[test]
    fn recursion_yields_no_top() {
        assert!(tops("module a; a u_a(); endmodule").is_empty());
        assert!(tops("module a; b u_b(); endmodule\nmodule b; a u_a(); endmodule").is_empty());
    }

    #[test]
    fn find_module_by_name() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let unit = parse_str(
            "module a; endmodule module b; endmodule",
            FileId::from_raw(0),
            &interner,
            &sink,
        );
        let b = interner.get("b").unwrap();
        assert_eq!(find_module(&unit, b).map(|m| m.name), Some(b));
        let missing = interner.get_or_intern("zzz");
        assert!(find_module(&unit, missing).is_none());
    }
}
