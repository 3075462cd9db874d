//! The generation pipeline.
//!
//! 1. Load `tvgen.toml` (explicit `--config`, else the current directory)
//! 2. Merge it with the command-line flags
//! 3. Parse the input file
//! 4. Select the top module
//! 5. Extract its ports
//! 6. Write the vector file

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tvgen_common::Interner;
use tvgen_config::{GeneratorConfig, OutputPolicy, Overrides, Settings, CONFIG_FILE_NAME};
use tvgen_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, JsonRenderer, Severity,
    TerminalRenderer,
};
use tvgen_frontend::{find_module, top_modules, ModuleDecl, SourceUnit};
use tvgen_ports::{extract_ports, Port};
use tvgen_source::{SourceDb, Span};
use tvgen_vectors::ColumnLayout;

use crate::{
    Cli, GlobalArgs, OutputsArg, ReportFormat, EXIT_FAILURE, EXIT_NO_TOP_MODULE, EXIT_OK,
    EXIT_PARSE_ERROR, EXIT_UNSUPPORTED_PORTS,
};

/// Runs the generator for the parsed command line.
///
/// Returns the process exit code. Nothing is written unless every stage
/// before the write succeeded.
pub fn run(cli: &Cli, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let Some(input) = cli.input.as_deref() else {
        println!("Input file is missing!");
        return Ok(EXIT_FAILURE);
    };

    // Steps 1-2: configuration
    let config = load_generator_config(global.config.as_deref())?;
    let settings = tvgen_config::resolve_settings(&config, &overrides_from(cli))?;

    // Step 3: parse
    if !global.quiet {
        eprintln!("   Analyzing {}", input.display());
    }
    let mut source_db = SourceDb::new();
    let file_id = source_db
        .load_file(input)
        .map_err(|e| format!("cannot read input file '{}': {e}", input.display()))?;
    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let unit = tvgen_frontend::parse_file(file_id, &source_db, &interner, &sink);

    if sink.has_errors() {
        report(&sink, &source_db, global);
        return Ok(EXIT_PARSE_ERROR);
    }

    // Step 4: top module
    let Some(module) = select_top_module(&unit, settings.top.as_deref(), &interner, &sink) else {
        report(&sink, &source_db, global);
        return Ok(EXIT_NO_TOP_MODULE);
    };
    let module_name = interner.resolve(module.name);
    if global.verbose {
        eprintln!("      Top module {module_name}");
    }

    // Step 5: ports
    let ports = match extract_ports(module, &source_db, &interner, &settings.clocks, &sink) {
        Ok(ports) => ports,
        Err(e) => {
            report(&sink, &source_db, global);
            eprintln!("error: {e}");
            return Ok(EXIT_UNSUPPORTED_PORTS);
        }
    };
    report(&sink, &source_db, global);
    if global.verbose {
        print_ports(&ports);
    }

    // Step 6: vectors
    let layout = ColumnLayout::from_ports(&ports);
    let seed = settings.seed.unwrap_or_else(wall_clock_seed);
    if global.verbose {
        eprintln!("      Seed {seed}");
    }
    let mut rng = StdRng::seed_from_u64(seed);
    tvgen_vectors::write_vectors(
        &settings.output_path,
        &layout,
        settings.vectors,
        vector_policy(&settings),
        &mut rng,
    )?;

    if !global.quiet {
        eprintln!(
            "       Wrote {} ({} column(s), {} random vector(s))",
            settings.output_path.display(),
            layout.width(),
            settings.vectors
        );
    }
    Ok(EXIT_OK)
}

/// An explicit `--config` must load. Otherwise `./tvgen.toml` is used if
/// present, and built-in defaults if not.
fn load_generator_config(
    path: Option<&Path>,
) -> Result<GeneratorConfig, tvgen_config::ConfigError> {
    match path {
        Some(path) => tvgen_config::load_config(path),
        None if Path::new(CONFIG_FILE_NAME).is_file() => {
            tvgen_config::load_config(Path::new(CONFIG_FILE_NAME))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn overrides_from(cli: &Cli) -> Overrides {
    Overrides {
        top: cli.top.clone(),
        output_path: cli.testvec.clone(),
        vectors: cli.vec_number,
        outputs: cli.outputs.map(|o| match o {
            OutputsArg::Random => OutputPolicy::Random,
            OutputsArg::DontCare => OutputPolicy::DontCare,
        }),
        seed: cli.seed,
        clocks: cli.clocks.clone(),
    }
}

fn vector_policy(settings: &Settings) -> tvgen_vectors::OutputPolicy {
    match settings.outputs {
        OutputPolicy::Random => tvgen_vectors::OutputPolicy::Random,
        OutputPolicy::DontCare => tvgen_vectors::OutputPolicy::DontCare,
    }
}

/// The named module, or the first top-level module in declaration order.
fn select_top_module<'u>(
    unit: &'u SourceUnit,
    requested: Option<&str>,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Option<&'u ModuleDecl> {
    if let Some(name) = requested {
        let found = interner.get(name).and_then(|ident| find_module(unit, ident));
        if found.is_none() {
            sink.emit(
                Diagnostic::error(
                    DiagnosticCode::UNKNOWN_TOP_MODULE,
                    format!("module '{name}' is not declared in the input file"),
                    Span::DUMMY,
                )
                .with_help("check the `-top` option or the `top` key in tvgen.toml"),
            );
        }
        return found;
    }

    let top = top_modules(unit).first().copied();
    if top.is_none() {
        sink.emit(
            Diagnostic::error(
                DiagnosticCode::NO_TOP_MODULE,
                "cannot find any top module",
                Span::DUMMY,
            )
            .with_note("check for recursive instantiation"),
        );
    }
    top
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Renders accumulated diagnostics. Under `--quiet` only errors are shown.
fn report(sink: &DiagnosticSink, source_db: &SourceDb, global: &GlobalArgs) {
    let diagnostics = sink.take_all();
    let shown = diagnostics
        .iter()
        .filter(|d| !global.quiet || d.severity == Severity::Error);

    match global.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in shown {
                eprint!("{}", renderer.render(diag, source_db));
            }
        }
        ReportFormat::Json => {
            for diag in shown {
                println!("{}", JsonRenderer.render(diag, source_db));
            }
        }
    }
}

fn print_ports(ports: &[Port]) {
    for port in ports {
        let range = port
            .bus_range
            .map(|r| r.to_string())
            .unwrap_or_default();
        let clock = if port.is_clock { " (clock)" } else { "" };
        eprintln!(
            "      {:<11} {:<10} {}{range}{clock}",
            port.direction.as_str(),
            port.kind.as_str(),
            port.name
        );
    }
}
