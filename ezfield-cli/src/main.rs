use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use ezfield::{
    DocumentFormat, FormDocument, MemoryStore, OutputDestination, OutputOptions, StoreSnapshot,
    ThemeName, emit_html, form_document_schema, parse_document_str, parse_form_document,
    render_document_html,
};

#[derive(Debug, Parser)]
#[command(
    name = "ezfield",
    version,
    about = "Render declarative form documents to themed HTML fields"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render every field of a form document against a store snapshot
    Render(RenderArgs),
    /// Print the JSON Schema accepted for form documents
    Schema,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Form spec: file path, inline payload, or "-" for stdin
    #[arg(short = 'f', long = "form", value_name = "SPEC")]
    form: String,

    /// Store snapshot spec (values, errors, touched, submitCount, ezUse, ezCss)
    #[arg(short = 's', long = "state", value_name = "SPEC")]
    state: Option<String>,

    /// Theme overriding the snapshot's ezUse (default, bootstrap, spectre)
    #[arg(short = 't', long = "theme", value_name = "NAME")]
    theme: Option<ThemeName>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DEST",
        num_args = 1..,
        action = ArgAction::Append
    )]
    outputs: Vec<String>,

    /// Overwrite output files even if they already exist
    #[arg(long = "force", short_alias = 'y', alias = "yes")]
    force: bool,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(args),
        Command::Schema => {
            let schema = form_document_schema().map_err(|err| eyre!("{err:#}"))?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let mut diagnostics = DiagnosticCollector::default();

    let form_stdin = args.form == "-";
    let state_stdin = args.state.as_deref() == Some("-");
    if form_stdin && state_stdin {
        diagnostics.push_input(
            "form/state",
            "cannot read form and state from stdin simultaneously; provide inline content or files",
        );
    }
    let both_stdin = form_stdin && state_stdin;

    let form_value = load_optional_value(
        Some(&args.form),
        format_hint(Some(&args.form)),
        "form",
        both_stdin,
        &mut diagnostics,
    );
    let state_value = load_optional_value(
        args.state.as_deref(),
        format_hint(args.state.as_deref()),
        "state",
        both_stdin,
        &mut diagnostics,
    );

    let document = form_value.and_then(|value| match parse_form_document(value) {
        Ok(document) => Some(document),
        Err(err) => {
            diagnostics.push_input("form", format!("{err:#}"));
            None
        }
    });
    let snapshot = match state_value {
        Some(value) => match serde_json::from_value::<StoreSnapshot>(value) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                diagnostics.push_input("state", format!("failed to read store snapshot: {err}"));
                None
            }
        },
        None => Some(StoreSnapshot::default()),
    };

    let (options, output_paths) = build_output_options(&args, &mut diagnostics);
    ensure_output_paths_available(&output_paths, args.force, &mut diagnostics);

    diagnostics.into_result()?;

    let (Some(document), Some(mut snapshot)) = (document, snapshot) else {
        return Err(eyre!("form document or store snapshot missing after validation"));
    };
    if let Some(theme) = args.theme {
        snapshot.config.ez_use = Some(theme.to_string());
    }

    let html = render_html(&document, snapshot)?;
    emit_html(&html, &options).map_err(|err| eyre!("{err:#}"))?;
    Ok(())
}

fn render_html(document: &FormDocument, snapshot: StoreSnapshot) -> Result<String> {
    tracing::debug!(fields = document.fields.len(), "rendering form document");
    let store = MemoryStore::new(snapshot);
    render_document_html(&store, document).map_err(|err| eyre!("{err:#}"))
}

fn format_hint(spec: Option<&str>) -> DocumentFormat {
    spec.filter(|spec| *spec != "-")
        .and_then(|spec| DocumentFormat::from_path(Path::new(spec)))
        .unwrap_or_default()
}

fn load_optional_value(
    spec: Option<&str>,
    format: DocumentFormat,
    label: &str,
    skip: bool,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Value> {
    if skip {
        return None;
    }
    let raw = spec?;
    match load_value(raw, format, label) {
        Ok(value) => Some(value),
        Err(err) => {
            diagnostics.push_input(label, err.to_string());
            None
        }
    }
}

fn load_value(spec: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    if spec == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_contents(&contents, format, label);
    }

    let path = PathBuf::from(spec);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => parse_contents(&contents, format, label),
        Err(err) => {
            if is_not_found(&err) {
                let inline_label = format!("inline {label}");
                return parse_contents(spec, format, &inline_label);
            }
            Err(err.wrap_err(format!("failed to load {label} from {}", path.display())))
        }
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    match parse_document_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(value) = parse_document_str(contents, candidate) {
                    return Ok(value);
                }
            }
            Err(Report::msg(format!(
                "failed to parse {label}: tried {} (first error: {primary})",
                format_list()
            )))
        }
    }
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_output_options(
    args: &RenderArgs,
    diagnostics: &mut DiagnosticCollector,
) -> (OutputOptions, Vec<PathBuf>) {
    let mut destinations = Vec::new();
    for raw in &args.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();

    (
        OutputOptions::default().with_destinations(destinations),
        file_paths,
    )
}

fn ensure_output_paths_available(
    paths: &[PathBuf],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_hint_follows_extension() {
        assert_eq!(format_hint(Some("form.json")), DocumentFormat::Json);
        assert_eq!(format_hint(Some("-")), DocumentFormat::default());
        assert_eq!(format_hint(None), DocumentFormat::default());
    }

    #[test]
    fn inline_payload_parses_as_json() {
        let value = parse_contents("{\"fields\": []}", DocumentFormat::Json, "form").unwrap();
        assert_eq!(value, json!({"fields": []}));
    }

    #[test]
    fn theme_override_reaches_rendered_classes() {
        let document = parse_form_document(json!({"fields": [{"children": "Email"}]})).unwrap();
        let snapshot = StoreSnapshot {
            config: ezfield::FormConfig {
                ez_use: Some("bootstrap".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render_html(&document, snapshot).unwrap();
        assert!(html.contains("form-control"));
    }
}
