//! Migrator for everything living in `login_app_schema`.
//! The schema itself is created first; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_schema;
mod m20240101_000002_create_technology;
mod m20240101_000003_create_users;
mod m20240101_000004_create_users_technologies;
mod m20240101_000005_add_indexes;

/// Postgres schema holding every table of the application.
pub const SCHEMA: &str = "login_app_schema";

pub(crate) fn schema() -> Alias {
    Alias::new(SCHEMA)
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_schema::Migration),
            Box::new(m20240101_000002_create_technology::Migration),
            Box::new(m20240101_000003_create_users::Migration),
            Box::new(m20240101_000004_create_users_technologies::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000005_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_registered_in_order() {
        let names: Vec<String> = Migrator::migrations().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names.len(), 5);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names[0].ends_with("create_schema"));
    }
}
