//! Store for the settings collections: materials, machines, cost
//! constants, and customers. Also owns settings export/import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use printforge_models::{
    ConstantId, CostConstant, Customer, CustomerId, Machine, MachineId, Material, MaterialId,
    PrintType,
};

use crate::defaults::{
    default_constants, default_machines, default_materials, SYSTEM_CONSTANT_IDS,
};
use crate::error::{Result, StoreError};
use crate::storage::{load_vec, store_vec, FileStorage, Storage};

const MATERIALS: &str = "materials";
const MACHINES: &str = "machines";
const CONSTANTS: &str = "constants";
const CUSTOMERS: &str = "customers";

/// Version stamp written into exported settings documents.
const EXPORT_VERSION: &str = "1.1";

/// A full settings snapshot, as written to an export file.
///
/// `version`, `materials`, `machines` and `constants` are required on
/// import; older exports without customers still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsExport {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub materials: Vec<Material>,
    pub machines: Vec<Machine>,
    pub constants: Vec<CostConstant>,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

/// Counts of what an import replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub materials: usize,
    pub machines: usize,
    pub constants: usize,
    pub customers: usize,
}

/// Typed accessor over the settings collections.
///
/// Opening the store seeds any missing collection with the default
/// reference data, so a fresh data directory is immediately usable.
pub struct SettingsStore<S: Storage = FileStorage> {
    storage: S,
}

impl<S: Storage> SettingsStore<S> {
    /// Opens the store, seeding defaults for absent collections.
    pub fn open(storage: S) -> Result<Self> {
        let store = Self { storage };
        store.seed_defaults()?;
        Ok(store)
    }

    fn seed_defaults(&self) -> Result<()> {
        if self.storage.read(MATERIALS)?.is_none() {
            store_vec(&self.storage, MATERIALS, &default_materials())?;
        }
        if self.storage.read(MACHINES)?.is_none() {
            store_vec(&self.storage, MACHINES, &default_machines())?;
        }
        if self.storage.read(CONSTANTS)?.is_none() {
            store_vec(&self.storage, CONSTANTS, &default_constants())?;
        }
        Ok(())
    }

    // ---- materials ----

    /// Lists materials, optionally restricted to one print type.
    pub fn materials(&self, print_type: Option<PrintType>) -> Result<Vec<Material>> {
        let materials: Vec<Material> = load_vec(&self.storage, MATERIALS)?;
        Ok(match print_type {
            Some(kind) => materials
                .into_iter()
                .filter(|m| m.print_type == kind)
                .collect(),
            None => materials,
        })
    }

    /// Looks up a material by id.
    pub fn material(&self, id: &MaterialId) -> Result<Material> {
        self.materials(None)?
            .into_iter()
            .find(|m| m.id == *id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "material",
                id: id.to_string(),
            })
    }

    /// Inserts or replaces a material, matched by id.
    pub fn save_material(&self, material: Material) -> Result<()> {
        let mut materials = self.materials(None)?;
        match materials.iter().position(|m| m.id == material.id) {
            Some(index) => materials[index] = material,
            None => materials.push(material),
        }
        store_vec(&self.storage, MATERIALS, &materials)
    }

    /// Deletes a material; deleting an unknown id is a no-op.
    pub fn delete_material(&self, id: &MaterialId) -> Result<()> {
        let mut materials = self.materials(None)?;
        materials.retain(|m| m.id != *id);
        store_vec(&self.storage, MATERIALS, &materials)
    }

    // ---- machines ----

    /// Lists machines, optionally restricted to one print type.
    pub fn machines(&self, print_type: Option<PrintType>) -> Result<Vec<Machine>> {
        let machines: Vec<Machine> = load_vec(&self.storage, MACHINES)?;
        Ok(match print_type {
            Some(kind) => machines
                .into_iter()
                .filter(|m| m.print_type == kind)
                .collect(),
            None => machines,
        })
    }

    /// Looks up a machine by id.
    pub fn machine(&self, id: &MachineId) -> Result<Machine> {
        self.machines(None)?
            .into_iter()
            .find(|m| m.id == *id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "machine",
                id: id.to_string(),
            })
    }

    /// Inserts or replaces a machine, matched by id.
    pub fn save_machine(&self, machine: Machine) -> Result<()> {
        let mut machines = self.machines(None)?;
        match machines.iter().position(|m| m.id == machine.id) {
            Some(index) => machines[index] = machine,
            None => machines.push(machine),
        }
        store_vec(&self.storage, MACHINES, &machines)
    }

    /// Deletes a machine; deleting an unknown id is a no-op.
    pub fn delete_machine(&self, id: &MachineId) -> Result<()> {
        let mut machines = self.machines(None)?;
        machines.retain(|m| m.id != *id);
        store_vec(&self.storage, MACHINES, &machines)
    }

    // ---- constants ----

    /// Lists cost constants. System rates are forced hidden regardless
    /// of what the stored data says.
    pub fn constants(&self) -> Result<Vec<CostConstant>> {
        let mut constants: Vec<CostConstant> = load_vec(&self.storage, CONSTANTS)?;
        for constant in &mut constants {
            if SYSTEM_CONSTANT_IDS.contains(&constant.id.as_str()) {
                constant.is_visible = false;
            }
        }
        Ok(constants)
    }

    /// Looks up a constant by id.
    pub fn constant(&self, id: &ConstantId) -> Result<CostConstant> {
        self.constants()?
            .into_iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "constant",
                id: id.to_string(),
            })
    }

    /// Inserts or replaces a constant, matched by id.
    pub fn save_constant(&self, constant: CostConstant) -> Result<()> {
        let mut constants = self.constants()?;
        match constants.iter().position(|c| c.id == constant.id) {
            Some(index) => constants[index] = constant,
            None => constants.push(constant),
        }
        store_vec(&self.storage, CONSTANTS, &constants)
    }

    /// Deletes a constant; deleting an unknown id is a no-op.
    pub fn delete_constant(&self, id: &ConstantId) -> Result<()> {
        let mut constants = self.constants()?;
        constants.retain(|c| c.id != *id);
        store_vec(&self.storage, CONSTANTS, &constants)
    }

    // ---- customers ----

    /// Lists customers, newest first.
    pub fn customers(&self) -> Result<Vec<Customer>> {
        load_vec(&self.storage, CUSTOMERS)
    }

    /// Looks up a customer by id.
    pub fn customer(&self, id: &CustomerId) -> Result<Customer> {
        self.customers()?
            .into_iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "customer",
                id: id.to_string(),
            })
    }

    /// Inserts (at the front) or replaces a customer, matched by id.
    pub fn save_customer(&self, customer: Customer) -> Result<()> {
        let mut customers = self.customers()?;
        match customers.iter().position(|c| c.id == customer.id) {
            Some(index) => customers[index] = customer,
            None => customers.insert(0, customer),
        }
        store_vec(&self.storage, CUSTOMERS, &customers)
    }

    /// Deletes a customer; deleting an unknown id is a no-op.
    pub fn delete_customer(&self, id: &CustomerId) -> Result<()> {
        let mut customers = self.customers()?;
        customers.retain(|c| c.id != *id);
        store_vec(&self.storage, CUSTOMERS, &customers)
    }

    // ---- export / import ----

    /// Snapshots all settings collections into an export document.
    pub fn export_settings(&self) -> Result<SettingsExport> {
        Ok(SettingsExport {
            version: EXPORT_VERSION.to_string(),
            export_date: Utc::now(),
            materials: self.materials(None)?,
            machines: self.machines(None)?,
            constants: self.constants()?,
            customers: self.customers()?,
        })
    }

    /// Replaces all four settings collections wholesale.
    ///
    /// The document is validated first; on any validation failure nothing
    /// is written.
    pub fn import_settings(&self, export: &SettingsExport) -> Result<ImportSummary> {
        if export.version.is_empty() {
            return Err(StoreError::InvalidImport("missing version".to_string()));
        }
        if export.materials.is_empty() && export.machines.is_empty() && export.constants.is_empty()
        {
            return Err(StoreError::InvalidImport(
                "no settings collections present".to_string(),
            ));
        }

        store_vec(&self.storage, MATERIALS, &export.materials)?;
        store_vec(&self.storage, MACHINES, &export.machines)?;
        store_vec(&self.storage, CONSTANTS, &export.constants)?;
        store_vec(&self.storage, CUSTOMERS, &export.customers)?;

        let summary = ImportSummary {
            materials: export.materials.len(),
            machines: export.machines.len(),
            constants: export.constants.len(),
            customers: export.customers.len(),
        };

        info!(
            materials = summary.materials,
            machines = summary.machines,
            constants = summary.constants,
            customers = summary.customers,
            "Imported settings"
        );

        Ok(summary)
    }

    /// Drops all settings collections and reseeds the defaults.
    pub fn reset(&self) -> Result<()> {
        self.storage.remove(MATERIALS)?;
        self.storage.remove(MACHINES)?;
        self.storage.remove(CONSTANTS)?;
        self.storage.remove(CUSTOMERS)?;
        self.seed_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn make_store() -> SettingsStore<MemoryStorage> {
        SettingsStore::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_open_seeds_defaults() {
        let store = make_store();

        assert!(!store.materials(None).unwrap().is_empty());
        assert!(!store.machines(None).unwrap().is_empty());
        assert!(!store.constants().unwrap().is_empty());
        assert!(store.customers().unwrap().is_empty());
    }

    #[test]
    fn test_materials_filtered_by_print_type() {
        let store = make_store();

        let fdm = store.materials(Some(PrintType::Fdm)).unwrap();
        assert!(fdm.iter().all(|m| m.print_type == PrintType::Fdm));

        let resin = store.materials(Some(PrintType::Resin)).unwrap();
        assert!(!resin.is_empty());
    }

    #[test]
    fn test_save_material_upserts() {
        let store = make_store();
        let mut material = Material::new("Wood PLA", 38.0, "kg", PrintType::Fdm);
        let id = material.id.clone();

        store.save_material(material.clone()).unwrap();
        assert_eq!(store.material(&id).unwrap().cost_per_unit, 38.0);

        material.cost_per_unit = 42.0;
        store.save_material(material).unwrap();
        assert_eq!(store.material(&id).unwrap().cost_per_unit, 42.0);
    }

    #[test]
    fn test_delete_material() {
        let store = make_store();
        let id = MaterialId::from("fdm-pla");

        store.delete_material(&id).unwrap();

        assert!(matches!(
            store.material(&id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_system_constants_forced_hidden() {
        let store = make_store();

        // Even if someone flips the flag in storage, reads hide it again.
        let mut labor = store.constant(&ConstantId::from("labor")).unwrap();
        labor.is_visible = true;
        store.save_constant(labor).unwrap();

        let labor = store.constant(&ConstantId::from("labor")).unwrap();
        assert!(!labor.is_visible);
    }

    #[test]
    fn test_customer_saved_newest_first() {
        let store = make_store();

        store.save_customer(Customer::new("First")).unwrap();
        store.save_customer(Customer::new("Second")).unwrap();

        let customers = store.customers().unwrap();
        assert_eq!(customers[0].name, "Second");
        assert_eq!(customers[1].name, "First");
    }

    #[test]
    fn test_import_replaces_wholesale() {
        let store = make_store();

        let export = SettingsExport {
            version: "1.1".to_string(),
            export_date: Utc::now(),
            materials: vec![Material::new("Only", 1.0, "kg", PrintType::Fdm)],
            machines: vec![Machine::new("Solo", 2.0, None, PrintType::Fdm)],
            constants: vec![CostConstant::new("Labor Rate", 20.0, "$/hr")],
            customers: Vec::new(),
        };

        let summary = store.import_settings(&export).unwrap();

        assert_eq!(summary.materials, 1);
        assert_eq!(store.materials(None).unwrap().len(), 1);
        assert_eq!(store.machines(None).unwrap().len(), 1);
        assert_eq!(store.constants().unwrap().len(), 1);
        assert!(store.customers().unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_empty_document() {
        let store = make_store();
        let before = store.materials(None).unwrap();

        let export = SettingsExport {
            version: "1.1".to_string(),
            export_date: Utc::now(),
            materials: Vec::new(),
            machines: Vec::new(),
            constants: Vec::new(),
            customers: Vec::new(),
        };

        assert!(matches!(
            store.import_settings(&export),
            Err(StoreError::InvalidImport(_))
        ));
        // Nothing was applied.
        assert_eq!(store.materials(None).unwrap(), before);
    }

    #[test]
    fn test_export_import_roundtrip_stable() {
        let store = make_store();
        store.save_customer(Customer::new("Roundtrip")).unwrap();

        let first = store.export_settings().unwrap();
        store.import_settings(&first).unwrap();
        let second = store.export_settings().unwrap();

        // Collections are identical; only the export timestamp may differ.
        assert_eq!(
            serde_json::to_value(&first.materials).unwrap(),
            serde_json::to_value(&second.materials).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&first.machines).unwrap(),
            serde_json::to_value(&second.machines).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&first.constants).unwrap(),
            serde_json::to_value(&second.constants).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&first.customers).unwrap(),
            serde_json::to_value(&second.customers).unwrap()
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let store = make_store();
        store.delete_material(&MaterialId::from("fdm-pla")).unwrap();

        store.reset().unwrap();

        assert!(store.material(&MaterialId::from("fdm-pla")).is_ok());
    }
}
