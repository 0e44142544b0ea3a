//! Wires a small DAO layer and tears it down again.
//!
//! Run with `RUST_LOG=switchwire=debug,household=info` to see the factory at
//! work.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use switchwire::logging;
use switchwire::prelude::*;
use tracing::info;

/// Rows per table.
#[derive(Default)]
struct Tables(Mutex<HashMap<String, Vec<String>>>);

impl Tables {
    fn insert(&self, table: &str, row: &str) {
        self.0.lock().entry(table.to_owned()).or_default().push(row.to_owned());
    }

    fn rows(&self, table: &str) -> Vec<String> {
        self.0.lock().get(table).cloned().unwrap_or_default()
    }
}

struct MemoryDataSource {
    tables: Tables,
}

struct PersonDao {
    source: Arc<MemoryDataSource>,
}

impl PersonDao {
    fn add(&self, name: &str) {
        self.source.tables.insert("person", name);
    }

    fn all(&self) -> Vec<String> {
        self.source.tables.rows("person")
    }
}

struct HouseholdDao {
    persons: OnceLock<Arc<PersonDao>>,
}

struct CompanyDao {
    name: String,
}

struct DaoFactory {
    prefix: String,
}

/// Announces every component before its init hook.
struct LogInjector;

impl ComponentPostProcessor for LogInjector {
    fn pre_init(&self, _instance: &Instance, descriptor: &ComponentDescriptor) -> Result<()> {
        info!(component = descriptor.name(), scope = descriptor.scope(), "Initializing");
        Ok(())
    }
}

fn components() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::builder("LogInjector")
            .value(LogInjector)
            .attr(Attribute::post_processor::<LogInjector>())
            .build(),
        ComponentDescriptor::builder("MemoryDataSource")
            .alias("dataSource")
            .constructor(|_| {
                Ok(MemoryDataSource {
                    tables: Tables::default(),
                })
            })
            .init_method("init", |_: &MemoryDataSource| {
                info!("MemoryDataSource ready");
                Ok(())
            })
            .destroy_method("close", |source: &MemoryDataSource| {
                info!(rows = source.tables.rows("person").len(), "Closing MemoryDataSource");
                Ok(())
            })
            .build(),
        ComponentDescriptor::builder("dao.PersonDAO")
            .constructor(|args| {
                Ok(PersonDao {
                    source: args.get(0)?,
                })
            })
            .constructor_arg(OrderedArg::reference("dataSource"))
            .build(),
        ComponentDescriptor::builder("dao.HouseholdDAO")
            .constructor(|_| {
                Ok(HouseholdDao {
                    persons: OnceLock::new(),
                })
            })
            .property(PropertyArg::new(
                "persons",
                OrderedArg::reference("dao.PersonDAO"),
                |household: &HouseholdDao, persons: Arc<PersonDao>| {
                    let _ = household.persons.set(persons);
                    Ok(())
                },
            ))
            .destroy_method("destroy", |_: &HouseholdDao| {
                info!("HouseholdDAO destroyed");
                Ok(())
            })
            .build(),
        ComponentDescriptor::builder("dao.CompanyDAO")
            .prototype()
            .factory_component("DAOFactory")
            .factory_method_fn("create_company_dao", |factory: &DaoFactory| {
                Ok(CompanyDao {
                    name: format!("{}-companies", factory.prefix),
                })
            })
            .build(),
    ]
}

fn main() -> Result<()> {
    logging::init("switchwire=info,household=info");

    // DAOFactory comes from a declarative record resolved by module path.
    let records: Vec<ComponentConfig> =
        serde_json::from_str(r#"[{ "name": "DAOFactory", "requireBase": "dao/", "module": "factory" }]"#)
            .map_err(|error| SwitchwireError::invalid_descriptor("DAOFactory", error.to_string()))?;

    let context = components()
        .into_iter()
        .fold(ComponentContext::builder(), |builder, descriptor| builder.component(descriptor))
        .module("dao/factory", Base::value(DaoFactory { prefix: "acme".into() }))
        .config(records)
        .build()?;

    let persons = context.get::<PersonDao>("dao.PersonDAO")?;
    persons.add("Ada");
    persons.add("Grace");

    let household = context.get::<HouseholdDao>("dao.HouseholdDAO")?;
    let members = household.persons.get().map(|p| p.all()).unwrap_or_default();
    info!(?members, "Household members");

    let company = context.get::<CompanyDao>("dao.CompanyDAO")?;
    info!(company = %company.name, "Company DAO created on demand");

    info!(daos = ?context.factory().components_in_namespace("dao"), "Registered DAOs");

    context.destroy();
    Ok(())
}
