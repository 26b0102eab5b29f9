//! Settings export, import and reset.

use std::fs;
use std::path::Path;

use printforge_store::SettingsExport;
use tracing::info;

use super::{Result, Stores};
use crate::cli::SettingsCommand;

pub fn execute(stores: &Stores, action: SettingsCommand) -> Result<()> {
    match action {
        SettingsCommand::Export { path } => cmd_export(stores, &path),
        SettingsCommand::Import { path } => cmd_import(stores, &path),
        SettingsCommand::Reset => cmd_reset(stores),
    }
}

fn cmd_export(stores: &Stores, path: &Path) -> Result<()> {
    let export = stores.settings()?.export_settings()?;
    fs::write(path, serde_json::to_string_pretty(&export)?)?;

    println!(
        "Exported {} materials, {} machines, {} constants, {} customers to {}",
        export.materials.len(),
        export.machines.len(),
        export.constants.len(),
        export.customers.len(),
        path.display()
    );

    Ok(())
}

fn cmd_import(stores: &Stores, path: &Path) -> Result<()> {
    let payload = fs::read_to_string(path)?;
    let export: SettingsExport = serde_json::from_str(&payload)
        .map_err(|e| format!("Invalid settings file {}: {}", path.display(), e))?;

    let summary = stores.settings()?.import_settings(&export)?;

    println!(
        "Imported {} materials, {} machines, {} constants, {} customers",
        summary.materials, summary.machines, summary.constants, summary.customers
    );

    Ok(())
}

fn cmd_reset(stores: &Stores) -> Result<()> {
    stores.settings()?.reset()?;
    stores.session().clear()?;
    info!("Reset settings and session data");

    println!("Settings restored to defaults; session data cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_import_roundtrip_through_file() {
        let data_dir = tempdir().unwrap();
        let stores = Stores::new(data_dir.path());
        let file = data_dir.path().join("settings-export.json");

        cmd_export(&stores, &file).unwrap();
        cmd_import(&stores, &file).unwrap();

        // Second export matches the first apart from the timestamp.
        let first: SettingsExport =
            serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        let second = stores.settings().unwrap().export_settings().unwrap();
        assert_eq!(
            serde_json::to_value(&first.materials).unwrap(),
            serde_json::to_value(&second.materials).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&first.constants).unwrap(),
            serde_json::to_value(&second.constants).unwrap()
        );
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let data_dir = tempdir().unwrap();
        let stores = Stores::new(data_dir.path());
        let file = data_dir.path().join("broken.json");
        fs::write(&file, "{\"version\": \"1.1\"}").unwrap();

        // Missing collections: serde rejects the document.
        assert!(cmd_import(&stores, &file).is_err());
    }
}
