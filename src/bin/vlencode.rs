use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use vlencode::{
    ChannelSpec, EncodingBuilder, ShorthandOpts, Table,
    data::{Dataset, infer_type},
    expression::{functions, parse_expr},
    shorthand::ShorthandParser,
};

#[derive(Parser, Debug)]
#[command(name = "vlencode", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a field shorthand and print the descriptor JSON.
    Shorthand(ShorthandArgs),
    /// Infer the encoding type of one column.
    Infer(InferArgs),
    /// Parse an expression and print its canonical form.
    Expr(ExprArgs),
    /// List the expression function catalog.
    Functions(FunctionsArgs),
    /// Build and validate an encoding from a request file.
    Encode(EncodeArgs),
}

#[derive(Parser, Debug)]
struct ShorthandArgs {
    /// Shorthand, e.g. `sum(profit):Q`.
    shorthand: String,

    /// JSON records (or columns) used to infer a missing type.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Read `op(field)` as a window operation instead of an aggregate.
    #[arg(long)]
    window_ops: bool,

    /// Keep a `:type` suffix as part of the field name.
    #[arg(long)]
    no_types: bool,
}

#[derive(Parser, Debug)]
struct InferArgs {
    /// JSON records (or columns).
    #[arg(long)]
    data: PathBuf,

    /// Column to inspect.
    #[arg(long)]
    column: String,
}

#[derive(Parser, Debug)]
struct ExprArgs {
    /// Expression source, e.g. `datum.x * 2 > 5`.
    src: String,
}

#[derive(Parser, Debug)]
struct FunctionsArgs {
    /// Only list functions whose name starts with this prefix.
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Request JSON: `{"mark"?: string, "encoding": {channel: spec}}`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON records (or columns) used to infer missing types.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Shorthand(args) => cmd_shorthand(args),
        Command::Infer(args) => cmd_infer(args),
        Command::Expr(args) => cmd_expr(args),
        Command::Functions(args) => cmd_functions(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn read_json(path: &Path, what: &str) -> anyhow::Result<Value> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn read_table(path: &Path) -> anyhow::Result<Table> {
    let value = read_json(path, "data")?;
    Ok(Table::from_json(&value)?)
}

fn cmd_shorthand(args: ShorthandArgs) -> anyhow::Result<()> {
    let opts = ShorthandOpts::default()
        .with_window_ops(args.window_ops)
        .with_types(!args.no_types);
    let table = args.data.as_deref().map(read_table).transpose()?;
    let mut parser = ShorthandParser::new().with_opts(opts);
    if let Some(table) = &table {
        parser = parser.with_data(table);
    }
    let descriptor = parser.parse(&args.shorthand);
    println!("{}", serde_json::to_string(&descriptor)?);
    Ok(())
}

fn cmd_infer(args: InferArgs) -> anyhow::Result<()> {
    let table = read_table(&args.data)?;
    let column = table
        .column(&args.column)
        .with_context(|| format!("no column '{}' in data", args.column))?;
    let inferred = infer_type(column);
    for warning in &inferred.warnings {
        eprintln!("warning: {warning}");
    }
    let mut out = json!({ "type": inferred.field_type });
    if let Some(sort) = inferred.sort {
        out["sort"] = Value::Array(sort);
    }
    println!("{out}");
    Ok(())
}

fn cmd_expr(args: ExprArgs) -> anyhow::Result<()> {
    let expr = parse_expr(&args.src).with_context(|| format!("parse '{}'", args.src))?;
    println!("{expr}");
    Ok(())
}

fn cmd_functions(args: FunctionsArgs) -> anyhow::Result<()> {
    let prefix = args.filter.as_deref().unwrap_or("");
    for f in functions().iter().filter(|f| f.name.starts_with(prefix)) {
        println!("{}\t{}", f.name, f.doc);
    }
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let request = read_json(&args.in_path, "request")?;
    let table = args.data.as_deref().map(read_table).transpose()?;

    let mut builder = EncodingBuilder::new();
    if let Some(table) = &table {
        builder = builder.data(table);
    }
    if let Some(mark) = request.get("mark") {
        let mark = mark.as_str().context("`mark` must be a string")?;
        builder = builder.mark(mark);
    }
    let channels = request
        .get("encoding")
        .and_then(Value::as_object)
        .context("request needs an `encoding` object")?;
    for (name, spec) in channels {
        let spec = ChannelSpec::from_json(spec).with_context(|| format!("channel '{name}'"))?;
        builder = builder.channel(name, spec)?;
    }

    let encoding = builder.build()?;
    encoding.validate().context("encoding failed validation")?;
    let out = encoding.to_spec_json();
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{out}");
    }
    Ok(())
}
