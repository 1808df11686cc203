//! Command implementations.

use anyhow::{Context, Result};
use flowlang_graph::{render_graphml, render_svg, DiagramGraph};
use flowlang_parser::completion::{self, CompletionError, CompletionReply, CompletionRequest};
use flowlang_parser::response::{self, respond};
use flowlang_parser::serializer::{self, SyncOutput, SyncRequest};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::args::{Command, RenderFormat};
use crate::store::{DiagramRecord, DiagramStore};

pub(crate) fn dispatch(
    command: &Command,
    store: &dyn DiagramStore,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Parse { file, envelope } => {
            let source = read_input(file.as_deref(), stdin)?;
            parse(&source, *envelope, out)
        }
        Command::Sync {
            file,
            title,
            envelope,
        } => {
            let input = read_input(file.as_deref(), stdin)?;
            sync(&input, title.as_deref(), *envelope, out)
        }
        Command::Render { file, format } => {
            let source = read_input(file.as_deref(), stdin)?;
            render(&source, *format, out)
        }
        Command::Prompt { text, model } => prompt(text, model.as_deref(), out),
        Command::Clean {
            file,
            chat_response,
        } => {
            let input = read_input(file.as_deref(), stdin)?;
            clean(input, *chat_response, out)
        }
        Command::Save {
            file,
            title,
            prompt,
        } => {
            let source = read_input(file.as_deref(), stdin)?;
            save(store, source, title.as_deref(), prompt.as_deref(), out)
        }
        Command::Load { key, graph } => load(store, key, *graph, out),
        Command::List => list(store, out),
    }
}

fn read_input(file: Option<&Path>, stdin: &mut dyn Read) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            stdin
                .read_to_string(&mut input)
                .context("failed to read standard input")?;
            Ok(input)
        }
    }
}

fn parse(source: &str, envelope: bool, out: &mut dyn Write) -> Result<()> {
    if envelope {
        writeln!(out, "{}", flowlang_parser::parse_flowlang_json(source))?;
        return Ok(());
    }
    let diagram = flowlang_parser::parse(source)?;
    serde_json::to_writer_pretty(&mut *out, &diagram)?;
    writeln!(out)?;
    Ok(())
}

fn sync_request(input: &str, title: Option<&str>) -> flowlang_parser::Result<SyncOutput> {
    let mut request: SyncRequest = serde_json::from_str(input)?;
    if let Some(title) = title {
        request.diagram_title = title.to_string();
    }
    serializer::sync_diagram(&request)
}

fn sync(input: &str, title: Option<&str>, envelope: bool, out: &mut dyn Write) -> Result<()> {
    if envelope {
        let result = respond(|| sync_request(input, title));
        writeln!(out, "{}", response::to_json(&result))?;
        return Ok(());
    }
    let output = sync_request(input, title)?;
    writeln!(out, "{}", output.flowlang_code)?;
    Ok(())
}

fn render(source: &str, format: RenderFormat, out: &mut dyn Write) -> Result<()> {
    let diagram = flowlang_parser::parse(source)?;
    let graph = DiagramGraph::from_parsed(&diagram)?;
    if !graph.dangling_edges().is_empty() {
        tracing::warn!(
            count = graph.dangling_edges().len(),
            "connections to undeclared nodes are not drawn"
        );
    }

    let rendered = match format {
        RenderFormat::Svg => render_svg(&graph)?,
        RenderFormat::Graphml => render_graphml(&graph)?,
        RenderFormat::Stats => serde_json::to_string_pretty(&graph.stats())?,
    };
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

fn prompt(text: &str, model: Option<&str>, out: &mut dyn Write) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CompletionError::MissingPrompt.into());
    }
    let request = CompletionRequest::for_prompt(text, model);
    serde_json::to_writer_pretty(&mut *out, &request)?;
    writeln!(out)?;
    Ok(())
}

fn clean(input: String, chat_response: bool, out: &mut dyn Write) -> Result<()> {
    let content = if chat_response {
        completion::extract_content(&CompletionReply {
            status: 200,
            body: input,
        })?
    } else {
        input
    };
    writeln!(out, "{}", completion::strip_code_fences(&content))?;
    Ok(())
}

fn save(
    store: &dyn DiagramStore,
    source: String,
    title: Option<&str>,
    prompt: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let diagram = flowlang_parser::parse(&source)?;
    let title = title
        .map(str::to_string)
        .or_else(|| diagram.diagram_info.title.clone())
        .context("the diagram has no title; pass --title")?;

    let mut record = DiagramRecord::new(title, source, diagram);
    if let Some(prompt) = prompt {
        record = record.with_prompt(prompt);
    }
    let key = store.save(&record)?;
    tracing::info!(%key, nodes = record.nodes.len(), "diagram saved");
    writeln!(out, "{key}")?;
    Ok(())
}

fn load(store: &dyn DiagramStore, key: &str, graph: bool, out: &mut dyn Write) -> Result<()> {
    let record = store.load(key)?;
    if graph {
        let value = serde_json::json!({ "nodes": record.nodes, "edges": record.edges });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", record.flowlang_code.trim_end())?;
    }
    Ok(())
}

fn list(store: &dyn DiagramStore, out: &mut dyn Write) -> Result<()> {
    for key in store.list()? {
        match store.load(&key) {
            Ok(record) => writeln!(out, "{key}\t{}", record.title)?,
            Err(err) => {
                tracing::warn!(%key, error = %err, "unreadable diagram record");
                writeln!(out, "{key}")?;
            }
        }
    }
    Ok(())
}
