use cc_ingest::catalog::transform;
use cc_ingest::config::IngestConfig;
use cc_ingest::store::{import_catalog, ImportSummary, MemoryStore};
use cc_ingest::types::{ClassificationRecord, ElementListEntry, TreeNode};
use serde::Serialize;

type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

const USAGE: &str = "Usage: cc-ingest <catalog.xml> [--config <path>] [--skip-reset] [--no-tree]";

struct CliArgs {
    catalog_path: String,
    config_path: Option<String>,
    skip_reset: bool,
    no_tree: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IngestReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<TreeNode>,
    records: Vec<ClassificationRecord>,
    element_lists: Vec<ElementListEntry>,
    summary: ImportSummary,
}

fn parse_args(args: Vec<String>) -> Result<CliArgs, String> {
    let mut catalog_path = None;
    let mut config_path = None;
    let mut skip_reset = false;
    let mut no_tree = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().ok_or("--config needs a path")?);
            }
            "--skip-reset" => skip_reset = true,
            "--no-tree" => no_tree = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            _ if catalog_path.is_none() => catalog_path = Some(arg),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }

    Ok(CliArgs {
        catalog_path: catalog_path.ok_or("missing catalog path")?,
        config_path,
        skip_reset,
        no_tree,
    })
}

async fn run(args: CliArgs) -> Result<(), DynError> {
    let mut config = match &args.config_path {
        Some(path) => IngestConfig::load_from_file(path)?,
        None => IngestConfig::load_default()?,
    };
    if args.skip_reset {
        config.reset_store = false;
    }
    if args.no_tree {
        config.include_tree = false;
    }

    let size = std::fs::metadata(&args.catalog_path)?.len() as usize;
    config.check_input_size(size)?;
    let xml = std::fs::read_to_string(&args.catalog_path)?;

    tracing::info!("[Import] Transforming {} ({} bytes)", args.catalog_path, size);
    let output = transform(&xml)?;

    let store = MemoryStore::new();
    let summary = import_catalog(&store, &output, config.reset_store).await?;
    eprintln!(
        "Imported {} records ({} failed) and {} list items ({} failed) into {}",
        summary.records_inserted + summary.records_updated,
        summary.records_failed,
        summary.entries_inserted + summary.entries_updated,
        summary.entries_failed,
        summary.categories_used.join(", ")
    );

    let report = IngestReport {
        tree: config.include_tree.then_some(output.tree),
        records: output.records,
        element_lists: output.element_lists,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args).await {
        tracing::error!("[Import] Ingest failed: {}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
