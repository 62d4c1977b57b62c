//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::assembler::TreeAssembler;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::node_type::{
    CategoryFetcher, CmsBlockFetcher, CmsPageFetcher, NodeKind, NodeTypeRegistry, ProductFetcher,
};
use crate::services::{ExportService, ImportService};
use crate::store::{JsonCatalog, MenuSource};
use crate::tree_display::ForestDisplay;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;

    match &cli.command {
        Some(Commands::Export {
            identifier,
            out_dir,
        }) => _export(&settings, identifier, out_dir.as_deref()),
        Some(Commands::Import { file }) => _import(&settings, file),
        Some(Commands::Tree { identifier }) => _tree(&settings, identifier),
        Some(Commands::Show { identifier, store }) => _show(&settings, identifier, store),
        Some(Commands::List) => _list(&settings),
        Some(Commands::Completion { shell }) => {
            generate(*shell, &mut Cli::command(), "menutree", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog = catalog.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(settings))]
fn _export(settings: &Settings, identifier: &str, out_dir: Option<&Path>) -> CliResult<()> {
    let catalog = JsonCatalog::load(&settings.catalog)?;
    let export_dir = out_dir.unwrap_or(&settings.export_dir);

    let service = ExportService::new(export_dir);
    let path = service.export_menu(&catalog, identifier)?;

    output::success(&format!("Exported '{}' to {}", identifier, path.display()));
    Ok(())
}

#[instrument(skip(settings))]
fn _import(settings: &Settings, file: &Path) -> CliResult<()> {
    let mut catalog = JsonCatalog::open(&settings.catalog)?;

    let summary = ImportService::new().import_file(&mut catalog, file)?;
    catalog.save()?;

    output::success(&format!(
        "Imported '{}' ({} nodes) as menu {}",
        summary.identifier, summary.nodes, summary.menu_id
    ));
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(settings: &Settings, identifier: &str) -> CliResult<()> {
    let catalog = JsonCatalog::load(&settings.catalog)?;
    let menu = catalog.menu_by_identifier(identifier)?;
    let records = catalog.nodes_for_menu(menu.id);

    let arena = TreeAssembler::new().assemble(&records);
    debug!(records = records.len(), reachable = arena.len(), "assembled");

    output::header(&format!("{} ({})", identifier, menu.stores.iter().join(",")));
    for tree in arena.to_tree_strings() {
        output::info(&tree);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _show(settings: &Settings, identifier: &str, store: &str) -> CliResult<()> {
    let catalog = Arc::new(JsonCatalog::load(&settings.catalog)?);

    let mut registry = NodeTypeRegistry::with_defaults();
    registry.register(
        NodeKind::Category,
        Box::new(CategoryFetcher::new(catalog.clone())),
    );
    registry.register(
        NodeKind::Product,
        Box::new(ProductFetcher::new(catalog.clone())),
    );
    registry.register(
        NodeKind::CmsPage,
        Box::new(CmsPageFetcher::new(catalog.clone())),
    );
    registry.register(
        NodeKind::CmsBlock,
        Box::new(CmsBlockFetcher::new(catalog.clone())),
    );

    let menu = catalog.menu_by_identifier(identifier)?;
    let records = catalog.nodes_for_menu(menu.id);
    let resolved = registry.resolve(&records, store)?;

    output::header(&format!("{} @ store {}", identifier, store));
    for record in &records {
        let Some(data) = resolved.get(&record.id) else {
            continue;
        };
        let title = data
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)");
        let target = data
            .get("url")
            .or_else(|| data.get("url_key"))
            .or_else(|| data.get("content"))
            .and_then(Value::as_str)
            .unwrap_or("-");
        output::detail(&format!("{} -> {}", title, target));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _list(settings: &Settings) -> CliResult<()> {
    let catalog = JsonCatalog::load(&settings.catalog)?;

    for menu in catalog.menus() {
        let identifier = menu.identifier().unwrap_or("(no identifier)");
        let nodes = catalog.nodes_for_menu(menu.id).len();
        output::info(&format!(
            "{}  stores: [{}]  nodes: {}",
            identifier,
            menu.stores.iter().join(","),
            nodes
        ));
    }
    Ok(())
}
