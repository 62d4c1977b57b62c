//! Menu export service
//!
//! Pulls a menu and its flat node records from a source, assembles the
//! forest, encodes the exchange record and packages it as a download file.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::assembler::TreeAssembler;
use crate::codec::{encode_menu, MenuExchangeRecord};
use crate::exchange::write_exchange_file;
use crate::record::menu_export_fields;
use crate::services::ServiceResult;
use crate::store::MenuSource;

pub struct ExportService {
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Export one menu to a download file, named after its identifier.
    #[instrument(level = "debug", skip(self, source))]
    pub fn export_menu(
        &self,
        source: &dyn MenuSource,
        identifier: &str,
    ) -> ServiceResult<PathBuf> {
        let record = self.export_data(source, identifier)?;
        let path = write_exchange_file(
            &self.export_dir,
            identifier,
            &menu_export_fields(),
            &record,
        )?;
        Ok(path)
    }

    /// The in-memory exchange record for one menu, for callers that stream
    /// the content instead of writing a file.
    #[instrument(level = "debug", skip(self, source))]
    pub fn export_data(
        &self,
        source: &dyn MenuSource,
        identifier: &str,
    ) -> ServiceResult<MenuExchangeRecord> {
        let menu = source.menu_by_identifier(identifier)?;
        let records = source.nodes_for_menu(menu.id);

        let arena = TreeAssembler::new().assemble(&records);
        debug!(
            records = records.len(),
            reachable = arena.len(),
            "assembled menu forest"
        );

        let forest = arena.to_forest();
        Ok(encode_menu(&menu.payload, &menu.stores, &forest)?)
    }
}
