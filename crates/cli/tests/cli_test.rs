use clap::Parser;
use flowlang_cli::{run, Cli, Command, RenderFormat};
use pretty_assertions::assert_eq;
use std::fs;

const SOURCE: &str = r#"Diagram [color: blue, layout: horizontal, title: "Refunds"] {
  Requested [type: event, icon: flag, label: "Refund Requested"]
  Review [type: decision, icon: search, label: "Review"]
  Requested **>** Review : triage
}"#;

fn execute(args: &[&str], stdin: &str) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut stdin.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_args_defaults() {
    let cli = Cli::try_parse_from(["flowlang", "render"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Command::Render { file, format } => {
            assert!(file.is_none());
            assert_eq!(format, RenderFormat::Svg);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_render_svg_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refunds.flow");
    fs::write(&path, SOURCE).unwrap();

    let output = execute(&["flowlang", "render", path.to_str().unwrap()], "").unwrap();
    assert!(output.starts_with("<svg"));
    assert!(output.contains("Refund Requested"));
    assert!(output.contains(">triage</text>"));
}

#[test]
fn test_render_graphml_from_stdin() {
    let output = execute(&["flowlang", "render", "--format", "graphml"], SOURCE).unwrap();
    assert!(output.contains("<graphml"));
    assert!(output.contains(r#"<node id="node-Requested-0">"#));
}

#[test]
fn test_save_then_load_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let store = store.to_str().unwrap();

    let key = execute(&["flowlang", "--store", store, "save"], SOURCE).unwrap();
    assert_eq!(key, "refunds\n");

    let listing = execute(&["flowlang", "--store", store, "list"], "").unwrap();
    assert_eq!(listing, "refunds\tRefunds\n");

    let graph = execute(&["flowlang", "--store", store, "load", "refunds", "--graph"], "").unwrap();
    let value: serde_json::Value = serde_json::from_str(&graph).unwrap();
    assert_eq!(value["edges"][0]["label"], "triage");
    assert_eq!(value["edges"][0]["animated"], false);
}

#[test]
fn test_load_missing_diagram_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().to_str().unwrap();
    let err = execute(&["flowlang", "--store", store, "load", "nothing"], "").unwrap_err();
    assert!(err.to_string().contains("nothing"));
}

#[test]
fn test_parse_envelope_reports_success() {
    let output = execute(&["flowlang", "parse", "--envelope"], SOURCE).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(2));
}
