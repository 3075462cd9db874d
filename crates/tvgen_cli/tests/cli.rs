//! End-to-end tests running the `tvgen` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const ADDER: &str = "module adder(input [3:0] a, input [3:0] b, output [4:0] sum);\n\
                     \x20 assign sum = a + b;\n\
                     endmodule\n";

fn tvgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tvgen"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run tvgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn project(source: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("design.v"), source).unwrap();
    dir
}

#[test]
fn adder_vectors() {
    let dir = project(ADDER);
    let output = tvgen(
        dir.path(),
        &["-i", "design.v", "-testvec", "adder.tv", "-vecNumber", "2", "--seed", "1"],
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = fs::read_to_string(dir.path().join("adder.tv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Ports:");
    assert_eq!(lines[1], "#\t\tINPUT\t|\tOUTPUT ");
    assert_eq!(
        lines[2],
        "a[3], a[2], a[1], a[0], b[3], b[2], b[1], b[0] | sum[4], sum[3], sum[2], sum[1], sum[0]"
    );
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "00000000XXXXX");
    assert_eq!(lines.len(), 8);
    for line in &lines[5..7] {
        assert_eq!(line.len(), 13);
        assert!(line.chars().all(|c| c == '0' || c == '1'));
    }
    assert_eq!(lines[7], "#End of testvector file! ");
}

#[test]
fn default_output_path_and_count() {
    let dir = project(ADDER);
    let output = tvgen(dir.path(), &["-i", "design.v", "-q"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).is_empty());
    let text = fs::read_to_string(dir.path().join("test_vecs.tv")).unwrap();
    assert_eq!(text.lines().count(), 7);
}

#[test]
fn zero_vectors() {
    let dir = project(ADDER);
    let output = tvgen(dir.path(), &["-i", "design.v", "-vecNumber", "0"]);
    assert_eq!(output.status.code(), Some(0));
    let text = fs::read_to_string(dir.path().join("test_vecs.tv")).unwrap();
    assert!(text.ends_with("\n\n00000000XXXXX\n#End of testvector file! \n"));
}

#[test]
fn fixed_seed_is_reproducible() {
    let dir = project(ADDER);
    let run = |path: &str| {
        tvgen(
            dir.path(),
            &["-i", "design.v", "-vecNumber", "20", "--seed", "1234", "-testvec", path],
        )
    };
    assert_eq!(run("one.tv").status.code(), Some(0));
    assert_eq!(run("two.tv").status.code(), Some(0));
    let one = fs::read(dir.path().join("one.tv")).unwrap();
    let two = fs::read(dir.path().join("two.tv")).unwrap();
    assert_eq!(one, two);
}

#[test]
fn no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = tvgen(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage"));
}

#[test]
fn missing_input_option() {
    let dir = tempfile::tempdir().unwrap();
    let output = tvgen(dir.path(), &["-vecNumber", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Input file is missing!"));
    assert!(!dir.path().join("test_vecs.tv").exists());
}

#[test]
fn unreadable_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = tvgen(dir.path(), &["-i", "nope.v"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read input file"));
}

#[test]
fn output_path_is_directory() {
    let dir = project(ADDER);
    fs::create_dir(dir.path().join("out")).unwrap();
    let output = tvgen(dir.path(), &["-i", "design.v", "-testvec", "out"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(dir.path().join("out").is_dir());
}

#[test]
fn parse_error_exits_2() {
    let dir = project("module m(input a);\n  § \nendmodule\n");
    let output = tvgen(dir.path(), &["-i", "design.v", "--color", "never"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error[E101]"));
    assert!(!dir.path().join("test_vecs.tv").exists());
}

#[test]
fn recursive_instantiation_exits_4() {
    let dir = project("module r(input x);\n  r u(.x(x));\nendmodule\n");
    let output = tvgen(dir.path(), &["-i", "design.v", "--color", "never"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("cannot find any top module"));
    assert!(!dir.path().join("test_vecs.tv").exists());
}

#[test]
fn unknown_top_exits_4() {
    let dir = project(ADDER);
    let output = tvgen(dir.path(), &["-i", "design.v", "-top", "alu"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn named_top_module() {
    let dir = project(&format!("{ADDER}module other(input x, output y); endmodule\n"));
    let output = tvgen(dir.path(), &["-i", "design.v", "-top", "other", "-vecNumber", "0"]);
    assert_eq!(output.status.code(), Some(0));
    let text = fs::read_to_string(dir.path().join("test_vecs.tv")).unwrap();
    assert!(text.contains("\nx | y\n\n0X\n"));
}

#[test]
fn port_expression_exits_3() {
    let dir = project("module m(.a(x), b);\n  input x;\n  input b;\nendmodule\n");
    let output = tvgen(dir.path(), &["-i", "design.v", "--color", "never"]);
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("error[E201]: unknown port found"));
    assert!(err.contains("design.v:1:10"));
    assert!(!dir.path().join("test_vecs.tv").exists());
}

#[test]
fn non_ansi_module() {
    let dir = project(
        "module m(clk, d, q);\n\
         \x20 input clk;\n\
         \x20 input [1:0] d;\n\
         \x20 output q;\n\
         \x20 reg q;\n\
         endmodule\n",
    );
    let output = tvgen(dir.path(), &["-i", "design.v", "-vecNumber", "0"]);
    assert_eq!(output.status.code(), Some(0));
    let text = fs::read_to_string(dir.path().join("test_vecs.tv")).unwrap();
    assert!(text.contains("\nclk, d[1], d[0] | q\n\n000X\n"));
}

#[test]
fn config_file_in_working_directory() {
    let dir = project(ADDER);
    fs::write(
        dir.path().join("tvgen.toml"),
        "[output]\npath = \"cfg.tv\"\nvectors = 3\noutputs = \"dont-care\"\n[random]\nseed = 5\n",
    )
    .unwrap();
    let output = tvgen(dir.path(), &["-i", "design.v"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = fs::read_to_string(dir.path().join("cfg.tv")).unwrap();
    let vectors: Vec<&str> = text.lines().skip(5).take(3).collect();
    assert_eq!(vectors.len(), 3);
    assert!(vectors.iter().all(|v| v.ends_with("XXXXX")));
}

#[test]
fn invalid_config_exits_1() {
    let dir = project(ADDER);
    fs::write(dir.path().join("bad.toml"), "[output]\nvectors = \"many\"\n").unwrap();
    let output = tvgen(dir.path(), &["-i", "design.v", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to parse configuration"));
}

#[test]
fn json_diagnostics() {
    let dir = project("module m #(parameter W = 4) (input [W-1:0] d, output q); endmodule\n");
    let output = tvgen(dir.path(), &["-i", "design.v", "--format", "json", "-vecNumber", "0"]);
    assert_eq!(output.status.code(), Some(0));
    let records: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["code"], "W202");
    let text = fs::read_to_string(dir.path().join("test_vecs.tv")).unwrap();
    assert!(text.contains("\nd | q\n\n0X\n"));
}
