/// CRUD tests against a live Postgres; skipped when no database is reachable
pub mod crud_tests;
